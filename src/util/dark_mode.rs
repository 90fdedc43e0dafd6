//! Theme preference: read, apply, toggle.
//!
//! Reads the stored preference from `localStorage`, falling back to the
//! system `prefers-color-scheme`, and applies it as a `data-theme` attribute
//! on `<html>`. Requires a browser environment; other builds no-op.

#[cfg(test)]
#[path = "dark_mode_test.rs"]
mod dark_mode_test;

#[cfg(feature = "hydrate")]
const STORAGE_KEY: &str = "boimarker_dark";

/// `data-theme` attribute value for a preference.
pub fn theme_attribute(enabled: bool) -> &'static str {
    if enabled { "dark" } else { "light" }
}

/// Parse a stored preference. Unknown values mean "no preference".
pub fn parse_stored(value: &str) -> Option<bool> {
    match value {
        "true" => Some(true),
        "false" => Some(false),
        _ => None,
    }
}

/// Stored preference, else the system preference, else light.
pub fn read_preference() -> bool {
    #[cfg(feature = "hydrate")]
    {
        let Some(window) = web_sys::window() else {
            return false;
        };
        if let Ok(Some(storage)) = window.local_storage() {
            if let Some(stored) = storage.get_item(STORAGE_KEY).ok().flatten().as_deref().and_then(parse_stored) {
                return stored;
            }
        }
        window
            .match_media("(prefers-color-scheme: dark)")
            .ok()
            .flatten()
            .map_or(false, |mq| mq.matches())
    }
    #[cfg(not(feature = "hydrate"))]
    {
        false
    }
}

/// Set the `data-theme` attribute on the `<html>` element.
pub fn apply(enabled: bool) {
    #[cfg(feature = "hydrate")]
    {
        if let Some(el) = web_sys::window().and_then(|w| w.document()).and_then(|d| d.document_element()) {
            let _ = el.set_attribute("data-theme", theme_attribute(enabled));
        }
    }
    #[cfg(not(feature = "hydrate"))]
    {
        let _ = enabled;
    }
}

/// Flip the theme, apply it, and persist the new preference.
pub fn toggle(current: bool) -> bool {
    let next = !current;
    apply(next);
    #[cfg(feature = "hydrate")]
    {
        if let Some(storage) = web_sys::window().and_then(|w| w.local_storage().ok().flatten()) {
            let _ = storage.set_item(STORAGE_KEY, if next { "true" } else { "false" });
        }
    }
    next
}
