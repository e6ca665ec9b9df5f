//! Business logic services

pub mod auth;
pub mod borrow;
pub mod records;
pub mod returns;
pub mod scan;
pub mod session;
pub mod store;

use std::time::Duration;

use crate::{api::ApiClient, config::AppConfig, services::session::SessionStore};

/// Container for all services
pub struct Services {
    pub auth: auth::AuthService,
    pub borrow: borrow::BorrowService<ApiClient>,
    pub returns: returns::ReturnService<ApiClient>,
}

impl Services {
    /// Create all services with the given API client
    pub fn new(api: ApiClient, config: &AppConfig, session: SessionStore) -> Self {
        let cooldown = Duration::from_secs(config.scanner.cooldown_seconds);

        Self {
            auth: auth::AuthService::new(api.portal.clone(), session),
            borrow: borrow::BorrowService::new(
                api.clone(),
                config.portal.qr_origin.clone(),
                cooldown,
            ),
            returns: returns::ReturnService::new(api, cooldown),
        }
    }
}
