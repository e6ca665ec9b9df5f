//! Borrowing and reservation record models

use chrono::{DateTime, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Book as embedded in a borrowing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookRef {
    pub id: i64,
    pub title: String,
    pub subtitle: Option<String>,
    pub description: Option<String>,
    pub publication_year: Option<i64>,
}

/// Book copy as embedded in a borrowing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BookCopyRef {
    pub id: i64,
    pub book_id: i64,
    pub book: BookRef,
}

/// User as embedded in a borrowing record
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserRef {
    pub id: i64,
    pub name: String,
    pub email: Option<String>,
}

/// One borrowing as returned by the borrowings listing
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BorrowingRecord {
    pub id: i64,
    pub book_copy_id: i64,
    pub borrowed_at: DateTime<Utc>,
    pub returned_at: Option<DateTime<Utc>>,
    pub user_id: i64,
    pub book_copy: BookCopyRef,
    pub user: UserRef,
}

/// One reservation as returned by the reservations listing.
/// Timestamps are epoch seconds on the wire.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRecord {
    pub id: i64,
    pub user_id: i64,
    pub book_copy_id: i64,
    pub expires_at: i64,
    pub claimed_at: Option<i64>,
}

impl ReservationRecord {
    pub fn expires_at_utc(&self) -> Option<DateTime<Utc>> {
        Utc.timestamp_opt(self.expires_at, 0).single()
    }

    pub fn is_claimed(&self) -> bool {
        self.claimed_at.is_some()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn borrowing_record_parses_nested_shapes() {
        let record: BorrowingRecord = serde_json::from_value(serde_json::json!({
            "id": 1,
            "book_copy_id": 42,
            "borrowed_at": "2025-06-01T09:30:00Z",
            "returned_at": null,
            "user_id": 9,
            "book_copy": {
                "id": 42,
                "book_id": 7,
                "book": { "id": 7, "title": "Example" }
            },
            "user": { "id": 9, "name": "Juan dela Cruz", "email": "juan@example.com" }
        }))
        .unwrap();

        assert_eq!(record.book_copy.book.title, "Example");
        assert!(record.returned_at.is_none());
    }

    #[test]
    fn reservation_expiry_converts_epoch_seconds() {
        let r = ReservationRecord {
            id: 1,
            user_id: 2,
            book_copy_id: 3,
            expires_at: 1_750_000_000,
            claimed_at: None,
        };
        assert_eq!(r.expires_at_utc().unwrap().timestamp(), 1_750_000_000);
        assert!(!r.is_claimed());
    }
}
