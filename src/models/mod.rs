pub mod book;
pub mod library;

pub use book::{Book, CatalogSource, GoogleVolume, OpenLibraryDoc, Recommendation};
pub use library::{LibraryEntry, ReadingStatus};
