//! Book and catalog models

use serde::{Deserialize, Serialize};

/// Dashboard counters returned by the catalog root endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LibraryStats {
    pub book_count: i64,
    pub copy_count: i64,
    pub borrowed_count: i64,
}

/// Author as embedded in scan responses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Author {
    pub id: i64,
    pub name: String,
}

/// Author as embedded in search responses
#[derive(Debug, Clone, Deserialize)]
pub struct SearchAuthor {
    pub first_name: String,
    pub last_name: String,
}

/// Classification wrapper as embedded in book payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Classification {
    pub description: String,
}

/// Language wrapper as embedded in book payloads
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Language {
    pub name: String,
}

/// Raw search hit as returned by `books/search-books`
#[derive(Debug, Clone, Deserialize)]
pub struct SearchHit {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub publication_year: Option<i64>,
    pub books_code: Option<String>,
    #[serde(default)]
    pub authors: Vec<SearchAuthor>,
    pub classification: Option<Classification>,
    pub language: Option<Language>,
    #[serde(default)]
    pub copies: Vec<serde_json::Value>,
}

/// Search result as shown in the book list
#[derive(Debug, Clone, Serialize)]
pub struct BookSummary {
    pub id: i64,
    pub author: String,
    pub title: String,
    pub subtitle: String,
    pub published: Option<i64>,
    pub classification: Option<String>,
    pub language: Option<String>,
    pub available_copies: usize,
    pub code: Option<String>,
}

impl From<SearchHit> for BookSummary {
    fn from(hit: SearchHit) -> Self {
        let author = hit
            .authors
            .first()
            .map(|a| format!("{} {}", a.first_name, a.last_name))
            .unwrap_or_else(|| "Unknown author".to_string());

        Self {
            id: hit.id,
            author,
            title: hit.title,
            subtitle: hit.subtitle.unwrap_or_else(|| "No Subtitle".to_string()),
            published: hit.publication_year,
            classification: hit.classification.map(|c| c.description),
            language: hit.language.map(|l| l.name),
            available_copies: hit.copies.len(),
            code: hit.books_code,
        }
    }
}

/// Book payload embedded in a `borrow/scan` response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedBookInfo {
    pub id: Option<i64>,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i64>,
    #[serde(default)]
    pub authors: Vec<Author>,
    pub classification: Option<Classification>,
    pub language: Option<Language>,
}

/// Result of looking up a scanned book copy
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScannedBook {
    pub book: ScannedBookInfo,
    pub book_copy_id: i64,
    /// Available copy count at scan time
    pub acopies: i64,
    /// Outstanding reservation count at scan time
    #[serde(default)]
    pub reserved: i64,
}

/// Copy details returned by `books/bookCopies`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCopyDetails {
    pub id: i64,
    pub book_id: Option<i64>,
    pub code: Option<String>,
    pub status: Option<String>,
    pub book: Option<ScannedBookInfo>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn search_hit_maps_first_author_and_copy_count() {
        let hit: SearchHit = serde_json::from_value(serde_json::json!({
            "id": 7,
            "title": "Example",
            "publication_year": 1999,
            "books_code": "BK-7",
            "authors": [
                { "first_name": "Ada", "last_name": "Lovelace" },
                { "first_name": "Alan", "last_name": "Turing" }
            ],
            "classification": { "description": "Computing" },
            "language": { "name": "English" },
            "copies": [{}, {}, {}]
        }))
        .unwrap();

        let summary = BookSummary::from(hit);
        assert_eq!(summary.author, "Ada Lovelace");
        assert_eq!(summary.subtitle, "No Subtitle");
        assert_eq!(summary.available_copies, 3);
        assert_eq!(summary.classification.as_deref(), Some("Computing"));
    }

    #[test]
    fn search_hit_without_authors_still_maps() {
        let hit: SearchHit = serde_json::from_value(serde_json::json!({
            "id": 1,
            "title": "Orphan"
        }))
        .unwrap();

        let summary = BookSummary::from(hit);
        assert_eq!(summary.author, "Unknown author");
        assert_eq!(summary.available_copies, 0);
    }
}
