//! Library API client (catalog, borrowings, returns, reservations)

use std::time::Duration;

use serde_json::json;

use crate::{
    config::{HttpConfig, LibraryConfig},
    error::AppResult,
    models::{
        book::{BookCopyDetails, BookSummary, LibraryStats, ScannedBook, SearchHit},
        borrow::ConfirmBorrowRequest,
        record::{BorrowingRecord, ReservationRecord},
    },
};

use super::{join_url, read_json, send_error, DataEnvelope, MessageEnvelope};

#[derive(Clone)]
pub struct LibraryClient {
    http: reqwest::Client,
    config: LibraryConfig,
    timeouts: HttpConfig,
}

impl LibraryClient {
    pub fn new(http: reqwest::Client, config: LibraryConfig, timeouts: HttpConfig) -> Self {
        Self {
            http,
            config,
            timeouts,
        }
    }

    fn url(&self, path: &str) -> String {
        join_url(&self.config.base_url, path)
    }

    fn scan_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.scan_timeout_seconds)
    }

    fn list_timeout(&self) -> Duration {
        Duration::from_secs(self.timeouts.list_timeout_seconds)
    }

    fn get(&self, path: &str, timeout: Duration) -> reqwest::RequestBuilder {
        self.http
            .get(self.url(path))
            .timeout(timeout)
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Origin", &self.config.origin)
            .header("Authorization", &self.config.api_token)
    }

    fn post(&self, path: &str, timeout: Duration) -> reqwest::RequestBuilder {
        self.http
            .post(self.url(path))
            .timeout(timeout)
            .header("Accept", "application/json")
            .header("x-api-key", &self.config.api_key)
            .header("Origin", &self.config.origin)
            .header("Authorization", &self.config.api_token)
    }

    /// Dashboard counters.
    pub async fn fetch_stats(&self) -> AppResult<LibraryStats> {
        let res = self
            .get("books/", self.list_timeout())
            .send()
            .await
            .map_err(send_error)?;

        read_json(res).await
    }

    /// Full-text book search.
    pub async fn search_books(&self, query: &str) -> AppResult<Vec<BookSummary>> {
        let res = self
            .post("books/search-books", self.list_timeout())
            .json(&json!({ "search": query }))
            .send()
            .await
            .map_err(send_error)?;

        let envelope: DataEnvelope<Vec<SearchHit>> = read_json(res).await?;
        let hits = envelope.into_data()?;
        Ok(hits.into_iter().map(BookSummary::from).collect())
    }

    /// Look up a book copy from a scanned code.
    pub async fn scan_book(&self, uuid: &str) -> AppResult<ScannedBook> {
        let res = self
            .post("borrow/scan", self.scan_timeout())
            .json(&json!({ "uuid": uuid }))
            .send()
            .await
            .map_err(send_error)?;

        read_json(res).await
    }

    /// Copy details by printed code.
    pub async fn fetch_book_copy(&self, code: &str) -> AppResult<BookCopyDetails> {
        let res = self
            .post("books/bookCopies", self.scan_timeout())
            .json(&json!({ "bookcopies_code": code }))
            .send()
            .await
            .map_err(send_error)?;

        let envelope: DataEnvelope<BookCopyDetails> = read_json(res).await?;
        envelope.into_data()
    }

    /// All borrowing records.
    pub async fn fetch_borrowings(&self) -> AppResult<Vec<BorrowingRecord>> {
        let res = self
            .get("borrowings/", self.list_timeout())
            .send()
            .await
            .map_err(send_error)?;

        let envelope: DataEnvelope<Vec<BorrowingRecord>> = read_json(res).await?;
        envelope.into_data()
    }

    /// Submit a completed borrow transaction.
    // Endpoint path is inherited verbatim from the backend contract.
    pub async fn confirm_borrow(&self, request: &ConfirmBorrowRequest) -> AppResult<String> {
        let res = self
            .post("borrowings/comfirm-borrow", self.list_timeout())
            .json(request)
            .send()
            .await
            .map_err(send_error)?;

        let envelope: MessageEnvelope = read_json(res).await?;
        envelope.into_message()
    }

    /// Return a borrowed copy from a scanned code.
    pub async fn return_book_by_scan(&self, uuid: &str) -> AppResult<String> {
        let res = self
            .post("return/scan-book", self.scan_timeout())
            .json(&json!({ "qr_uuid": uuid }))
            .send()
            .await
            .map_err(send_error)?;

        let envelope: MessageEnvelope = read_json(res).await?;
        envelope.into_message()
    }

    /// Outstanding reservations.
    pub async fn fetch_reservations(&self) -> AppResult<Vec<ReservationRecord>> {
        let res = self
            .get("reservations", self.list_timeout())
            .send()
            .await
            .map_err(send_error)?;

        let envelope: DataEnvelope<Vec<ReservationRecord>> = read_json(res).await?;
        envelope.into_data()
    }
}
