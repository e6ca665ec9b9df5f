//! Borrow transaction store
//!
//! Single source of truth for the one in-flight borrow transaction. Owned
//! by the borrow workflow and only ever touched from the UI event loop, so
//! no locking is involved; `set` must precede any `patch` in a given
//! transaction's lifetime.

use crate::{
    error::{AppError, AppResult},
    models::borrow::{BorrowTransaction, BorrowerPatch},
};

/// Workflow phase derived from the stored transaction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BorrowPhase {
    Idle,
    BookScanned,
    BorrowerScanned,
}

#[derive(Debug, Default)]
pub struct BorrowStore {
    current: Option<BorrowTransaction>,
}

impl BorrowStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current transaction, if any. Side-effect free.
    pub fn get(&self) -> Option<&BorrowTransaction> {
        self.current.as_ref()
    }

    /// Replace the whole transaction atomically. `None` clears it.
    pub fn set(&mut self, transaction: Option<BorrowTransaction>) {
        self.current = transaction;
    }

    /// Update a single borrower-identity field of the active transaction.
    ///
    /// Fails with `NoActiveTransaction` when nothing is in progress;
    /// never creates a transaction.
    pub fn patch(&mut self, patch: BorrowerPatch) -> AppResult<()> {
        let transaction = self
            .current
            .as_mut()
            .ok_or(AppError::NoActiveTransaction)?;

        match patch {
            BorrowerPatch::UserId(id) => transaction.user_id = Some(id),
            BorrowerPatch::UserName(name) => transaction.user_name = Some(name),
            BorrowerPatch::UserType(kind) => transaction.user_type = Some(kind),
            BorrowerPatch::UserImage(url) => transaction.user_image = Some(url),
        }
        Ok(())
    }

    pub fn phase(&self) -> BorrowPhase {
        match &self.current {
            None => BorrowPhase::Idle,
            Some(t) if t.has_borrower() => BorrowPhase::BorrowerScanned,
            Some(_) => BorrowPhase::BookScanned,
        }
    }
}
