//! Data models for the librarian client

pub mod book;
pub mod borrow;
pub mod record;
pub mod user;

// Re-export commonly used types
pub use book::{BookSummary, LibraryStats, ScannedBook};
pub use borrow::{BorrowTransaction, BorrowerPatch, ConfirmBorrowRequest};
pub use record::{BorrowingRecord, ReservationRecord};
pub use user::{Borrower, LoginRequest, SessionTokens};
