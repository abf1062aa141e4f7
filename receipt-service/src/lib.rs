pub mod config;
pub mod error;
pub mod handlers;
pub mod middleware;
pub mod observability;
pub mod services;
pub mod startup;

use config::Settings;
use services::VendorClient;

/// Shared application state. Cheap to clone: the HTTP client pools internally.
#[derive(Clone)]
pub struct AppState {
    pub settings: Settings,
    pub vendor: VendorClient,
}

impl AppState {
    pub fn new(settings: Settings) -> Result<Self, error::AppError> {
        let vendor = VendorClient::new(settings.vendor.clone())?;
        Ok(Self { settings, vendor })
    }
}
