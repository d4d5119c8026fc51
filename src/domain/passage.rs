//! Passage value object
//!
//! The piece of text currently being read aloud or exported. Changing
//! the passage invalidates any audio derived from the previous one.

/// A titled text passage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Passage {
    title: String,
    body: String,
}

impl Passage {
    /// Create a new passage
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Get the title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Get the body text
    pub fn body(&self) -> &str {
        &self.body
    }

    /// The text handed to the synthesizer: title and body joined with a
    /// sentence break, or the body alone when there is no title.
    pub fn spoken_text(&self) -> String {
        if self.title.trim().is_empty() {
            self.body.clone()
        } else {
            format!("{}. {}", self.title, self.body)
        }
    }

    /// File name stem derived from the title: whitespace runs collapse
    /// to a single underscore. Untitled passages get a fixed stem.
    pub fn file_stem(&self) -> String {
        let stem = self
            .title
            .split_whitespace()
            .collect::<Vec<_>>()
            .join("_");

        if stem.is_empty() {
            "untitled".to_string()
        } else {
            stem
        }
    }
}
