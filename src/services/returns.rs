//! Return-by-scan flow
//!
//! A single-step scan flow: decode a copy code, submit it, show the
//! outcome. Uses the same re-entrancy guard as the borrow workflow; every
//! outcome re-arms the scanner after the cooldown so the next copy can be
//! processed.

use std::time::{Duration, Instant};

use async_trait::async_trait;

use crate::{api::ApiClient, error::AppResult, services::scan::ScanGuard};

/// Backend collaborator of the return flow
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ReturnApi: Send + Sync {
    async fn return_book_by_scan(&self, uuid: &str) -> AppResult<String>;
}

#[async_trait]
impl ReturnApi for ApiClient {
    async fn return_book_by_scan(&self, uuid: &str) -> AppResult<String> {
        self.library.return_book_by_scan(uuid).await
    }
}

pub struct ReturnService<A> {
    api: A,
    guard: ScanGuard,
}

impl<A: ReturnApi> ReturnService<A> {
    pub fn new(api: A, cooldown: Duration) -> Self {
        Self {
            api,
            guard: ScanGuard::new(cooldown),
        }
    }

    /// Handle a decoded copy code frame. Returns `Ok(None)` when the
    /// frame is dropped by the guard, `Ok(Some(message))` on success.
    pub async fn handle_scan(&mut self, uuid: &str, now: Instant) -> AppResult<Option<String>> {
        if !self.guard.try_acquire(now) {
            return Ok(None);
        }

        match self.api.return_book_by_scan(uuid).await {
            Ok(message) => {
                // The result stays on screen; listen again after the
                // cooldown rather than immediately.
                self.guard.lockout(now);
                tracing::info!(%uuid, "Book returned");
                Ok(Some(message))
            }
            Err(e) => {
                self.guard.lockout(now);
                Err(e)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;
    use mockall::predicate::eq;

    const COOLDOWN: Duration = Duration::from_secs(2);

    #[tokio::test]
    async fn duplicate_frames_return_one_book_once() {
        let mut api = MockReturnApi::new();
        api.expect_return_book_by_scan()
            .with(eq("copy-uuid"))
            .times(1)
            .returning(|_| Ok("Book returned".to_string()));
        let mut svc = ReturnService::new(api, COOLDOWN);

        let t0 = Instant::now();
        let message = svc.handle_scan("copy-uuid", t0).await.unwrap();
        assert_eq!(message.as_deref(), Some("Book returned"));

        // Same code still in frame during the cooldown is dropped.
        let dropped = svc
            .handle_scan("copy-uuid", t0 + Duration::from_millis(500))
            .await
            .unwrap();
        assert!(dropped.is_none());
    }

    #[tokio::test]
    async fn scanner_listens_again_after_the_cooldown() {
        let mut api = MockReturnApi::new();
        api.expect_return_book_by_scan()
            .times(2)
            .returning(|_| Err(AppError::Timeout));
        let mut svc = ReturnService::new(api, COOLDOWN);

        let t0 = Instant::now();
        assert!(svc.handle_scan("copy-uuid", t0).await.is_err());
        assert!(svc
            .handle_scan("copy-uuid", t0 + Duration::from_secs(2))
            .await
            .is_err());
    }
}
