//! Browser glue for file downloads and object URLs.
//!
//! SYSTEM CONTEXT
//! ==============
//! Pages hand downloaded bytes here instead of repeating `web-sys` blob and
//! anchor plumbing. Non-browser builds report the action as unsupported.

use crate::net::api::Download;

/// Blob MIME type for a download, defaulting to an opaque byte stream.
pub fn blob_mime(download: &Download) -> &str {
    download.content_type.as_deref().unwrap_or("application/octet-stream")
}

/// Create an object URL for `download`'s bytes. Caller must revoke it.
///
/// # Errors
///
/// Returns an error string if the blob cannot be created.
pub fn object_url(download: &Download) -> Result<String, String> {
    #[cfg(feature = "hydrate")]
    {
        let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = web_sys::BlobPropertyBag::new();
        options.set_type(blob_mime(download));
        let blob = web_sys::Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(|_| "could not create blob".to_owned())?;
        web_sys::Url::create_object_url_with_blob(&blob).map_err(|_| "could not create object url".to_owned())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = blob_mime(download);
        Err("not available on server".to_owned())
    }
}

pub fn revoke_object_url(url: &str) {
    #[cfg(feature = "hydrate")]
    {
        let _ = web_sys::Url::revoke_object_url(url);
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = url;
    }
}

/// Offer `download` to the user as a file save.
///
/// # Errors
///
/// Returns an error string if the browser refuses any step.
pub fn save_download(download: &Download) -> Result<(), String> {
    #[cfg(feature = "hydrate")]
    {
        use wasm_bindgen::JsCast as _;

        let url = object_url(download)?;
        let result = (|| {
            let document = web_sys::window()
                .and_then(|w| w.document())
                .ok_or_else(|| "no document".to_owned())?;
            let link = document
                .create_element("a")
                .map_err(|_| "could not create link".to_owned())?
                .dyn_into::<web_sys::HtmlAnchorElement>()
                .map_err(|_| "could not create link".to_owned())?;
            link.set_href(&url);
            link.set_download(&download.filename);
            let body = document.body().ok_or_else(|| "no body".to_owned())?;
            body.append_child(&link).map_err(|_| "could not attach link".to_owned())?;
            link.click();
            let _ = body.remove_child(&link);
            Ok(())
        })();
        revoke_object_url(&url);
        result
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = download;
        Err("not available on server".to_owned())
    }
}

/// Current year for the footer.
pub fn current_year() -> i32 {
    #[cfg(feature = "hydrate")]
    {
        #[allow(clippy::cast_possible_truncation)]
        let year = js_sys::Date::new_0().get_full_year() as i32;
        year
    }
    #[cfg(not(feature = "hydrate"))]
    {
        2025
    }
}

/// Current time as an ISO-8601 string, for new bookmarks.
pub fn now_iso() -> String {
    #[cfg(feature = "hydrate")]
    {
        js_sys::Date::new_0().to_iso_string().into()
    }
    #[cfg(not(feature = "hydrate"))]
    {
        String::new()
    }
}
