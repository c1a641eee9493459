use serde::{Deserialize, Serialize};

/// Reading status of a library entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReadingStatus {
    WantToRead,
    Reading,
    Finished,
}

/// A book in the user's library, with their status and rating
///
/// Categories and authors are stored as comma-delimited strings, matching
/// the shape the library store keeps them in. The recommendation engine only
/// ever reads a snapshot of these entries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LibraryEntry {
    pub book_id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Option<String>,
    /// User rating on a 1-5 scale
    #[serde(default)]
    pub rating: Option<u8>,
    #[serde(default = "default_status")]
    pub status: ReadingStatus,
}

fn default_status() -> ReadingStatus {
    ReadingStatus::WantToRead
}

impl LibraryEntry {
    /// Whether this entry counts as positive preference evidence.
    ///
    /// A book qualifies with a rating of at least 3.5, or when it was
    /// finished without being rated.
    pub fn is_favorite(&self) -> bool {
        match self.rating {
            Some(rating) => f32::from(rating) >= 3.5,
            None => self.status == ReadingStatus::Finished,
        }
    }

    /// Whether this entry counts as negative preference evidence (rating
    /// of at most 2.5)
    pub fn is_disliked(&self) -> bool {
        matches!(self.rating, Some(rating) if f32::from(rating) <= 2.5)
    }

    /// Trimmed category names, empty segments dropped
    pub fn categories(&self) -> Vec<String> {
        split_list(self.categories.as_deref())
    }

    /// Trimmed author names, empty segments dropped
    pub fn authors(&self) -> Vec<String> {
        split_list(self.authors.as_deref())
    }

    /// Text used for vectorization: the description, falling back to the
    /// title when the description is missing or empty
    pub fn text(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.title,
        }
    }
}

fn split_list(raw: Option<&str>) -> Vec<String> {
    raw.unwrap_or_default()
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
