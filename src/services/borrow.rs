//! Scan-to-borrow workflow
//!
//! Coordinates the three-phase borrow sequence: book scan, borrower scan,
//! confirmation. The in-flight transaction lives in [`BorrowStore`]; the
//! scanner re-entrancy guard lives in [`ScanGuard`]. Collaborators are
//! reached through [`BorrowApi`] so the workflow can be exercised without
//! a network.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{
    api::ApiClient,
    error::{AppError, AppResult},
    models::{
        book::ScannedBook,
        borrow::{BorrowTransaction, BorrowerPatch, ConfirmBorrowRequest},
        user::Borrower,
    },
    qr,
    services::{
        scan::ScanGuard,
        store::{BorrowPhase, BorrowStore},
    },
};

/// Backend collaborators of the borrow workflow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BorrowApi: Send + Sync {
    /// Look up a book copy from a scanned code.
    async fn scan_book(&self, uuid: &str) -> AppResult<ScannedBook>;
    /// Resolve a borrower from a QR lookup token.
    async fn validate_borrower(&self, token: &str) -> AppResult<Borrower>;
    /// Submit a completed transaction.
    async fn confirm_borrow(&self, request: &ConfirmBorrowRequest) -> AppResult<String>;
}

#[async_trait]
impl BorrowApi for ApiClient {
    async fn scan_book(&self, uuid: &str) -> AppResult<ScannedBook> {
        self.library.scan_book(uuid).await
    }

    async fn validate_borrower(&self, token: &str) -> AppResult<Borrower> {
        self.portal.validate_user_qr(token).await
    }

    async fn confirm_borrow(&self, request: &ConfirmBorrowRequest) -> AppResult<String> {
        self.library.confirm_borrow(request).await
    }
}

pub struct BorrowService<A> {
    api: A,
    qr_origin: String,
    store: BorrowStore,
    guard: ScanGuard,
}

impl<A: BorrowApi> BorrowService<A> {
    pub fn new(api: A, qr_origin: impl Into<String>, cooldown: Duration) -> Self {
        Self {
            api,
            qr_origin: qr_origin.into(),
            store: BorrowStore::new(),
            guard: ScanGuard::new(cooldown),
        }
    }

    pub fn phase(&self) -> BorrowPhase {
        self.store.phase()
    }

    /// The in-flight transaction, if any.
    pub fn transaction(&self) -> Option<&BorrowTransaction> {
        self.store.get()
    }

    /// Handle a decoded book code frame.
    ///
    /// Returns `Ok(None)` when the frame is dropped by the re-entrancy
    /// guard. On lookup failure the workflow stays idle and the scanner
    /// re-arms after the cooldown.
    pub async fn handle_book_scan(
        &mut self,
        uuid: &str,
        now: Instant,
    ) -> AppResult<Option<BorrowTransaction>> {
        if !self.guard.try_acquire(now) {
            return Ok(None);
        }

        match self.api.scan_book(uuid).await {
            Ok(scan) => {
                let transaction = BorrowTransaction::from_scan(&scan);
                self.store.set(Some(transaction.clone()));
                self.guard.rearm();
                tracing::info!(
                    book_copy_id = transaction.book_copy_id,
                    title = %transaction.book_title,
                    "Book scanned"
                );
                Ok(Some(transaction))
            }
            Err(e) => {
                self.guard.lockout(now);
                Err(e)
            }
        }
    }

    /// Handle a decoded borrower QR frame.
    ///
    /// The payload must be a URL issued by the configured portal origin;
    /// anything else is rejected without touching the transaction.
    /// Returns `Ok(None)` when the frame is dropped by the guard.
    pub async fn handle_borrower_scan(
        &mut self,
        payload: &str,
        now: Instant,
    ) -> AppResult<Option<Borrower>> {
        if !self.guard.try_acquire(now) {
            return Ok(None);
        }

        match self.process_borrower_scan(payload).await {
            Ok(borrower) => {
                self.guard.rearm();
                tracing::info!(user_id = borrower.id, "Borrower validated");
                Ok(Some(borrower))
            }
            Err(e) => {
                self.guard.lockout(now);
                Err(e)
            }
        }
    }

    async fn process_borrower_scan(&mut self, payload: &str) -> AppResult<Borrower> {
        if self.store.get().is_none() {
            return Err(AppError::NoActiveTransaction);
        }

        let token = qr::extract_borrower_token(payload, &self.qr_origin)?;
        let borrower = self.api.validate_borrower(&token).await?;

        self.store.patch(BorrowerPatch::UserId(borrower.id))?;
        self.store
            .patch(BorrowerPatch::UserName(borrower.name.clone()))?;
        if let Some(image) = borrower.image.clone() {
            self.store.patch(BorrowerPatch::UserImage(image))?;
        }
        self.store
            .patch(BorrowerPatch::UserType(borrower.borrower_type.clone()))?;

        Ok(borrower)
    }

    /// Submit the transaction. Success clears it; failure leaves it
    /// intact so confirmation can be retried.
    pub async fn confirm(&mut self) -> AppResult<String> {
        let transaction = self.store.get().ok_or(AppError::NoActiveTransaction)?;
        let user_id = transaction
            .user_id
            .ok_or_else(|| AppError::Validation("Borrower has not been scanned".to_string()))?;
        let borrower_type = transaction.user_type.clone().unwrap_or_default();

        let request = ConfirmBorrowRequest {
            book_copy_id: transaction.book_copy_id,
            user_id,
            borrower_type,
        };

        let message = self.api.confirm_borrow(&request).await?;
        self.store.set(None);
        self.guard.rearm();
        tracing::info!(
            book_copy_id = request.book_copy_id,
            user_id = request.user_id,
            "Borrow confirmed"
        );
        Ok(message)
    }

    /// Abandon the workflow from any state.
    pub fn cancel(&mut self) {
        self.store.set(None);
        self.guard.rearm();
    }
}
