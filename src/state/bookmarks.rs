//! Bookmark collection with tag search.
//!
//! The backend has no bookmark endpoints, so the collection lives in memory
//! and starts from a small seed set.

#[cfg(test)]
#[path = "bookmarks_test.rs"]
mod bookmarks_test;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Bookmark {
    pub id: u64,
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: Vec<String>,
    pub created_at: String,
}

/// Editable fields of a bookmark; `tags` is the raw comma-separated input.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct BookmarkDraft {
    pub title: String,
    pub url: String,
    pub description: String,
    pub tags: String,
}

impl BookmarkDraft {
    pub fn from_bookmark(bookmark: &Bookmark) -> Self {
        Self {
            title: bookmark.title.clone(),
            url: bookmark.url.clone(),
            description: bookmark.description.clone(),
            tags: bookmark.tags.join(", "),
        }
    }

    /// # Errors
    ///
    /// Returns a user-facing message when the title or URL is missing.
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.title.trim().is_empty() {
            return Err("Please enter a title");
        }
        let url = self.url.trim();
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err("Please enter a valid URL");
        }
        Ok(())
    }
}

pub fn parse_tags(raw: &str) -> Vec<String> {
    let mut tags: Vec<String> = Vec::new();
    for tag in raw.split(',').map(str::trim).filter(|t| !t.is_empty()) {
        if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
            tags.push(tag.to_owned());
        }
    }
    tags
}

#[derive(Clone, Debug)]
pub struct BookmarksState {
    pub items: Vec<Bookmark>,
    pub query: String,
    /// `None` while adding, `Some(id)` while editing; only meaningful when
    /// `dialog_open`.
    pub editing: Option<u64>,
    pub dialog_open: bool,
    next_id: u64,
}

impl Default for BookmarksState {
    fn default() -> Self {
        let items = seed_bookmarks();
        let next_id = items.iter().map(|b| b.id).max().unwrap_or(0) + 1;
        Self { items, query: String::new(), editing: None, dialog_open: false, next_id }
    }
}

impl BookmarksState {
    /// Bookmarks whose title, description or any tag contains the query,
    /// case-insensitively. An empty query matches everything.
    pub fn filtered(&self) -> Vec<Bookmark> {
        let query = self.query.trim().to_lowercase();
        self.items
            .iter()
            .filter(|b| query.is_empty() || matches_query(b, &query))
            .cloned()
            .collect()
    }

    /// Distinct tags across the collection, sorted case-insensitively.
    pub fn all_tags(&self) -> Vec<String> {
        let mut tags: Vec<String> = Vec::new();
        for tag in self.items.iter().flat_map(|b| b.tags.iter()) {
            if !tags.iter().any(|t| t.eq_ignore_ascii_case(tag)) {
                tags.push(tag.clone());
            }
        }
        tags.sort_by_key(|t| t.to_lowercase());
        tags
    }

    /// Insert a new bookmark (`editing == None`) or update an existing one.
    ///
    /// # Errors
    ///
    /// Returns the validation message when the draft is incomplete.
    pub fn save(&mut self, editing: Option<u64>, draft: &BookmarkDraft, created_at: &str) -> Result<u64, &'static str> {
        draft.validate()?;
        let tags = parse_tags(&draft.tags);
        if let Some(id) = editing {
            if let Some(existing) = self.items.iter_mut().find(|b| b.id == id) {
                existing.title = draft.title.trim().to_owned();
                existing.url = draft.url.trim().to_owned();
                existing.description = draft.description.trim().to_owned();
                existing.tags = tags;
                return Ok(id);
            }
        }
        let id = self.next_id;
        self.next_id += 1;
        self.items.insert(0, Bookmark {
            id,
            title: draft.title.trim().to_owned(),
            url: draft.url.trim().to_owned(),
            description: draft.description.trim().to_owned(),
            tags,
            created_at: created_at.to_owned(),
        });
        Ok(id)
    }

    pub fn remove(&mut self, id: u64) {
        self.items.retain(|b| b.id != id);
    }

    pub fn get(&self, id: u64) -> Option<&Bookmark> {
        self.items.iter().find(|b| b.id == id)
    }
}

fn matches_query(bookmark: &Bookmark, query: &str) -> bool {
    bookmark.title.to_lowercase().contains(query)
        || bookmark.description.to_lowercase().contains(query)
        || bookmark.tags.iter().any(|t| t.to_lowercase().contains(query))
}

/// `YYYY-MM-DD` part of an ISO-8601 timestamp.
pub fn display_date(created_at: &str) -> &str {
    created_at.split('T').next().unwrap_or(created_at)
}

fn seed(id: u64, title: &str, url: &str, description: &str, tags: &[&str], created_at: &str) -> Bookmark {
    Bookmark {
        id,
        title: title.to_owned(),
        url: url.to_owned(),
        description: description.to_owned(),
        tags: tags.iter().map(|t| (*t).to_owned()).collect(),
        created_at: created_at.to_owned(),
    }
}

fn seed_bookmarks() -> Vec<Bookmark> {
    vec![
        seed(
            1,
            "Shadcn UI Components",
            "https://ui.shadcn.com",
            "Re-usable components built using Radix UI and Tailwind CSS.",
            &["UI", "React", "Components"],
            "2023-06-10T12:00:00Z",
        ),
        seed(
            2,
            "Next.js Documentation",
            "https://nextjs.org/docs",
            "The React Framework for the Web",
            &["React", "Framework", "Documentation"],
            "2023-06-08T10:30:00Z",
        ),
        seed(
            3,
            "FastAPI",
            "https://fastapi.tiangolo.com",
            "FastAPI framework, high performance, easy to learn, fast to code, ready for production",
            &["Python", "API", "Backend"],
            "2023-06-05T14:15:00Z",
        ),
        seed(
            4,
            "Tailwind CSS",
            "https://tailwindcss.com",
            "A utility-first CSS framework for rapidly building custom designs.",
            &["CSS", "Design", "Frontend"],
            "2023-06-03T09:20:00Z",
        ),
        seed(
            5,
            "Python Tutorial",
            "https://docs.python.org/3/tutorial",
            "Python is an easy to learn, powerful programming language.",
            &["Python", "Tutorial", "Programming"],
            "2023-06-01T16:45:00Z",
        ),
    ]
}
