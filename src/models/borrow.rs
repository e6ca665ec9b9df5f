//! Borrow transaction model and related types

use serde::{Deserialize, Serialize};

use super::book::ScannedBook;

/// The in-progress record of a book copy being borrowed, held until
/// confirmed or cancelled.
///
/// Book-phase fields are fixed when the transaction is created from a
/// book scan; borrower fields are filled in one by one after the second
/// scan.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BorrowTransaction {
    pub book_copy_id: i64,
    pub book_title: String,
    pub book_subtitle: String,
    pub book_author: String,
    pub book_published: String,
    pub book_classification: String,
    pub book_language: String,
    pub available_copies: i64,
    pub reserved: i64,
    pub has_scanned_book: bool,
    pub user_id: Option<i64>,
    pub user_name: Option<String>,
    pub user_type: Option<String>,
    pub user_image: Option<String>,
}

impl BorrowTransaction {
    /// Start a transaction from a successful book scan.
    pub fn from_scan(scan: &ScannedBook) -> Self {
        let book = &scan.book;
        let author = book
            .authors
            .first()
            .map(|a| a.name.clone())
            .unwrap_or_else(|| "Unknown author".to_string());

        Self {
            book_copy_id: scan.book_copy_id,
            book_title: book.title.clone(),
            book_subtitle: book.subtitle.clone().unwrap_or_default(),
            book_author: author,
            book_published: book
                .publication_year
                .map(|y| y.to_string())
                .unwrap_or_default(),
            book_classification: book
                .classification
                .as_ref()
                .map(|c| c.description.clone())
                .unwrap_or_default(),
            book_language: book
                .language
                .as_ref()
                .map(|l| l.name.clone())
                .unwrap_or_default(),
            available_copies: scan.acopies,
            reserved: scan.reserved,
            has_scanned_book: true,
            user_id: None,
            user_name: None,
            user_type: None,
            user_image: None,
        }
    }

    /// True once the borrower scan has populated the identity fields.
    pub fn has_borrower(&self) -> bool {
        self.user_id.is_some()
    }
}

/// A single borrower-identity field update.
///
/// Only borrower fields can be patched; book-phase fields are immutable
/// once the transaction is created.
#[derive(Debug, Clone, PartialEq)]
pub enum BorrowerPatch {
    UserId(i64),
    UserName(String),
    UserType(String),
    UserImage(String),
}

/// Request body for the confirm-borrow endpoint
#[derive(Debug, Clone, Serialize)]
pub struct ConfirmBorrowRequest {
    pub book_copy_id: i64,
    pub user_id: i64,
    pub borrower_type: String,
}
