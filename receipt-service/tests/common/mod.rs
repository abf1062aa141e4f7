#![allow(dead_code)]

use base64::{engine::general_purpose, Engine as _};
use receipt_service::config::{ServerSettings, Settings, TelemetrySettings, VendorSettings};
use receipt_service::startup::Application;
use serde_json::{json, Value};
use wiremock::MockServer;

pub const TEST_USERNAME: &str = "cashier";
pub const TEST_PASSWORD: &str = "s3cret";
pub const TEST_TOKEN: &str = "test-bearer-token";
pub const LOGIN_PATH: &str = "/api/atol/login";
pub const RECEIPT_PATH: &str = "/api/receipt";

pub struct TestApp {
    pub address: String,
    pub port: u16,
    pub vendor: MockServer,
    pub client: reqwest::Client,
}

impl TestApp {
    pub async fn spawn() -> Self {
        Self::spawn_with_device(None).await
    }

    pub async fn spawn_with_device(default_device_id: Option<&str>) -> Self {
        let vendor = MockServer::start().await;

        let settings = Settings {
            server: ServerSettings {
                host: "127.0.0.1".to_string(),
                port: 0, // Random port
            },
            vendor: VendorSettings {
                base_url: vendor.uri(),
                login_path: LOGIN_PATH.to_string(),
                receipt_path: RECEIPT_PATH.to_string(),
                request_timeout_secs: 5,
                default_device_id: default_device_id.map(str::to_owned),
            },
            telemetry: TelemetrySettings::default(),
        };

        let app = Application::build(settings)
            .await
            .expect("Failed to build test application");

        let port = app.port();
        let address = format!("http://127.0.0.1:{}", port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for the server to be ready by polling the health endpoint
        let client = reqwest::Client::new();
        let health_url = format!("{}/health", address);
        for _ in 0..50 {
            if client.get(&health_url).send().await.is_ok() {
                break;
            }
            tokio::time::sleep(tokio::time::Duration::from_millis(50)).await;
        }

        TestApp {
            address,
            port,
            vendor,
            client,
        }
    }

    pub async fn post_receipt(&self, authorization: Option<&str>, body: &Value) -> reqwest::Response {
        let mut request = self
            .client
            .post(format!("{}/process", self.address))
            .json(body);
        if let Some(value) = authorization {
            request = request.header("Authorization", value);
        }
        request.send().await.expect("Failed to execute request")
    }
}

pub fn basic_auth_header(username: &str, password: &str) -> String {
    format!(
        "Basic {}",
        general_purpose::STANDARD.encode(format!("{}:{}", username, password))
    )
}

pub fn valid_auth_header() -> String {
    basic_auth_header(TEST_USERNAME, TEST_PASSWORD)
}

pub fn sample_receipt() -> Value {
    json!({
        "external_id": "892924433534522515289444",
        "receipt": {
            "client": {
                "email": "client@client.ru",
                "name": "Иванов Иван Иванович",
                "inn": "516974792202"
            },
            "company": { "sno": "osn", "inn": "5010051677" },
            "items": [
                {
                    "name": "Ваш любимый товар1",
                    "price": 120,
                    "quantity": 1,
                    "sum": 120,
                    "measure": 0,
                    "payment_method": "full_payment",
                    "payment_object": 1,
                    "vat": { "type": "vat20", "sum": 20.0 },
                    "mark_code": { "egais20": "MARK-1" }
                }
            ],
            "payments": [ { "type": 1, "sum": 120 } ],
            "vats": [ { "type": "vat20", "sum": 20.0 } ]
        }
    })
}
