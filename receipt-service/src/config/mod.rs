use serde::Deserialize;
use std::time::Duration;

#[derive(Deserialize, Clone, Debug)]
pub struct Settings {
    pub server: ServerSettings,
    pub vendor: VendorSettings,
    #[serde(default)]
    pub telemetry: TelemetrySettings,
}

#[derive(Deserialize, Clone, Debug)]
pub struct ServerSettings {
    pub host: String,
    pub port: u16,
}

/// Upstream receipt vendor (login and receipt submission endpoints).
#[derive(Deserialize, Clone, Debug)]
pub struct VendorSettings {
    /// Scheme and host, without trailing slash (e.g. https://api.stage.vdpaybox.ru).
    pub base_url: String,
    #[serde(default = "default_login_path")]
    pub login_path: String,
    #[serde(default = "default_receipt_path")]
    pub receipt_path: String,
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Used as `externDeviceId` when the document has no `device_number`.
    #[serde(default)]
    pub default_device_id: Option<String>,
}

impl VendorSettings {
    pub fn login_url(&self) -> String {
        format!("{}{}", self.base_url, self.login_path)
    }

    pub fn receipt_url(&self) -> String {
        format!("{}{}", self.base_url, self.receipt_path)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}

fn default_login_path() -> String {
    "/api/atol/login".to_string()
}

fn default_receipt_path() -> String {
    "/api/receipt".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

#[derive(Deserialize, Clone, Debug)]
pub struct TelemetrySettings {
    #[serde(default = "default_service_name")]
    pub service_name: String,
    #[serde(default = "default_log_level")]
    pub log_level: String,
    /// OTLP gRPC collector. Spans are only exported when set.
    #[serde(default)]
    pub otlp_endpoint: Option<String>,
}

impl Default for TelemetrySettings {
    fn default() -> Self {
        Self {
            service_name: default_service_name(),
            log_level: default_log_level(),
            otlp_endpoint: None,
        }
    }
}

fn default_service_name() -> String {
    "receipt-service".to_string()
}

fn default_log_level() -> String {
    "info".to_string()
}

pub fn get_configuration() -> Result<Settings, config::ConfigError> {
    let base_path = std::env::current_dir()
        .map_err(|e| config::ConfigError::Message(format!("Failed to determine the current directory: {}", e)))?;

    // Running from the workspace root or from inside the crate
    let configuration_directory = if base_path.ends_with("receipt-service") {
        base_path.join("config")
    } else {
        base_path.join("receipt-service").join("config")
    };

    let settings = config::Config::builder()
        .add_source(config::File::from(configuration_directory.join("base.yaml")).required(true))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?;

    settings.try_deserialize::<Settings>()
}
