use serde::{Deserialize, Serialize};

/// Base URL for Open Library cover images
const OPEN_LIBRARY_COVERS_URL: &str = "https://covers.openlibrary.org/b";

/// Catalog a book was sourced from
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CatalogSource {
    Google,
    OpenLibrary,
}

/// A candidate book returned by catalog search, not yet in the library
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Book {
    pub id: String,
    pub title: String,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    /// External aggregate rating; 0 means unrated
    #[serde(default)]
    pub rating: f32,
    #[serde(default)]
    pub thumbnail: Option<String>,
    pub source: CatalogSource,
}

impl Book {
    /// Text used for vectorization: the description, falling back to the
    /// title when the description is missing or empty
    pub fn text(&self) -> &str {
        match self.description.as_deref() {
            Some(description) if !description.is_empty() => description,
            _ => &self.title,
        }
    }
}

/// A ranked recommendation returned to the client
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Recommendation {
    pub book: Book,
    /// Composite score, rounded to 3 decimal places
    pub score: f64,
    pub reason: String,
}

// ============================================================================
// Google Books API Types
// ============================================================================

/// Raw volume from the Google Books API
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolume {
    pub id: String,
    #[serde(default)]
    pub volume_info: GoogleVolumeInfo,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GoogleVolumeInfo {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub authors: Vec<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub categories: Vec<String>,
    #[serde(default)]
    pub average_rating: Option<f32>,
    #[serde(default)]
    pub image_links: Option<GoogleImageLinks>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct GoogleImageLinks {
    #[serde(default)]
    pub thumbnail: Option<String>,
}

impl From<GoogleVolume> for Book {
    fn from(volume: GoogleVolume) -> Self {
        let info = volume.volume_info;

        Book {
            id: format!("gb_{}", volume.id),
            title: info.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: info.authors,
            description: info.description,
            categories: info.categories,
            rating: info.average_rating.unwrap_or(0.0),
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
            source: CatalogSource::Google,
        }
    }
}

// ============================================================================
// Open Library API Types
// ============================================================================

/// Raw search document from the Open Library API
#[derive(Debug, Clone, Deserialize)]
pub struct OpenLibraryDoc {
    /// Work key, e.g. "/works/OL45804W"
    #[serde(default)]
    pub key: String,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub author_name: Vec<String>,
    #[serde(default)]
    pub first_publish_year: Option<i32>,
    #[serde(default)]
    pub subject: Vec<String>,
    #[serde(default)]
    pub ratings_average: Option<f32>,
    #[serde(default)]
    pub cover_i: Option<u64>,
}

impl From<OpenLibraryDoc> for Book {
    fn from(doc: OpenLibraryDoc) -> Self {
        // Search results carry no description, so one is synthesized from the
        // publication year and leading subjects.
        let mut description = String::new();
        if let Some(year) = doc.first_publish_year {
            description.push_str(&format!("Published in {}. ", year));
        }
        if !doc.subject.is_empty() {
            let topics: Vec<&str> = doc.subject.iter().take(5).map(String::as_str).collect();
            description.push_str(&format!("Topics: {}.", topics.join(", ")));
        }
        let description = if description.is_empty() {
            None
        } else {
            Some(description)
        };

        let thumbnail = doc
            .cover_i
            .map(|cover| format!("{}/id/{}-M.jpg", OPEN_LIBRARY_COVERS_URL, cover));

        Book {
            id: format!("ol_{}", doc.key.trim_start_matches("/works/")),
            title: doc.title.unwrap_or_else(|| "Untitled".to_string()),
            authors: doc.author_name,
            description,
            categories: doc.subject.into_iter().take(3).collect(),
            rating: doc
                .ratings_average
                .map(|rating| (rating * 10.0).round() / 10.0)
                .unwrap_or(0.0),
            thumbnail,
            source: CatalogSource::OpenLibrary,
        }
    }
}
