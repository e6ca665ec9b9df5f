//! List-view helpers for borrowing and reservation records
//!
//! The listings filter and paginate client-side: a case-insensitive
//! substring match over book title and borrower name, and fixed-size pages
//! with clamped navigation.

use crate::models::record::BorrowingRecord;

pub const ITEMS_PER_PAGE: usize = 5;

/// One page of a filtered listing
#[derive(Debug)]
pub struct Page<'a, T> {
    pub items: Vec<&'a T>,
    /// 1-based page number actually shown (clamped).
    pub page: usize,
    pub total_pages: usize,
    /// Total matching items across all pages.
    pub total: usize,
}

/// Borrowings whose book title or borrower name contains `query`.
pub fn filter_borrowings<'a>(
    records: &'a [BorrowingRecord],
    query: &str,
) -> Vec<&'a BorrowingRecord> {
    let query = query.to_lowercase();
    records
        .iter()
        .filter(|record| {
            record
                .book_copy
                .book
                .title
                .to_lowercase()
                .contains(&query)
                || record.user.name.to_lowercase().contains(&query)
        })
        .collect()
}

/// Slice `items` into the requested 1-based page, clamping out-of-range
/// page numbers to the nearest valid page.
pub fn paginate<'a, T>(items: &[&'a T], page: usize, per_page: usize) -> Page<'a, T> {
    let total = items.len();
    let total_pages = total.div_ceil(per_page).max(1);
    let page = page.clamp(1, total_pages);
    let start = (page - 1) * per_page;
    let end = (start + per_page).min(total);

    Page {
        items: items[start..end].to_vec(),
        page,
        total_pages,
        total,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::record::{BookCopyRef, BookRef, UserRef};
    use chrono::Utc;

    fn record(id: i64, title: &str, user: &str) -> BorrowingRecord {
        BorrowingRecord {
            id,
            book_copy_id: id,
            borrowed_at: Utc::now(),
            returned_at: None,
            user_id: id,
            book_copy: BookCopyRef {
                id,
                book_id: id,
                book: BookRef {
                    id,
                    title: title.to_string(),
                    subtitle: None,
                    description: None,
                    publication_year: None,
                },
            },
            user: UserRef {
                id,
                name: user.to_string(),
                email: None,
            },
        }
    }

    #[test]
    fn filter_matches_title_or_borrower_case_insensitively() {
        let records = vec![
            record(1, "Rust in Action", "Juan dela Cruz"),
            record(2, "The C Programming Language", "Maria Clara"),
            record(3, "Practical Rust", "Jose Rizal"),
        ];

        let by_title = filter_borrowings(&records, "rust");
        assert_eq!(by_title.len(), 2);

        let by_user = filter_borrowings(&records, "maria");
        assert_eq!(by_user.len(), 1);
        assert_eq!(by_user[0].id, 2);

        assert_eq!(filter_borrowings(&records, "").len(), 3);
        assert!(filter_borrowings(&records, "zzz").is_empty());
    }

    #[test]
    fn pagination_slices_and_reports_totals() {
        let records: Vec<BorrowingRecord> =
            (1..=12).map(|i| record(i, "Book", "User")).collect();
        let refs: Vec<&BorrowingRecord> = records.iter().collect();

        let first = paginate(&refs, 1, ITEMS_PER_PAGE);
        assert_eq!(first.items.len(), 5);
        assert_eq!(first.total_pages, 3);
        assert_eq!(first.total, 12);

        let last = paginate(&refs, 3, ITEMS_PER_PAGE);
        assert_eq!(last.items.len(), 2);
        assert_eq!(last.items[0].id, 11);
    }

    #[test]
    fn out_of_range_pages_are_clamped() {
        let records: Vec<BorrowingRecord> =
            (1..=6).map(|i| record(i, "Book", "User")).collect();
        let refs: Vec<&BorrowingRecord> = records.iter().collect();

        assert_eq!(paginate(&refs, 0, ITEMS_PER_PAGE).page, 1);
        assert_eq!(paginate(&refs, 99, ITEMS_PER_PAGE).page, 2);
    }

    #[test]
    fn empty_listing_is_a_single_empty_page() {
        let refs: Vec<&BorrowingRecord> = Vec::new();
        let page = paginate(&refs, 1, ITEMS_PER_PAGE);
        assert!(page.items.is_empty());
        assert_eq!(page.total_pages, 1);
        assert_eq!(page.total, 0);
    }
}
