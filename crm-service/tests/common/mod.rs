//! Common test utilities for crm-service integration tests.

use crm_service::config::CrmConfig;
use crm_service::startup::Application;
use service_core::config::Config as CommonConfig;
use std::sync::Once;

static INIT: Once = Once::new();

/// Initialize tracing for tests (only once).
pub fn init_tracing() {
    INIT.call_once(|| {
        tracing_subscriber::fmt()
            .with_env_filter("info,crm_service=debug")
            .with_test_writer()
            .try_init()
            .ok();
    });
}

fn test_config() -> CrmConfig {
    CrmConfig {
        common: CommonConfig { port: 0 },
        service_name: "crm-service-test".to_string(),
        service_version: "test".to_string(),
        log_level: "debug".to_string(),
        otlp_endpoint: None,
        default_tax_percentage: 18,
    }
}

/// Test application wrapper.
#[allow(dead_code)]
pub struct TestApp {
    pub address: String,
    pub http_port: u16,
    pub client: reqwest::Client,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn spawn() -> Self {
        init_tracing();

        let app = Application::build(test_config())
            .await
            .expect("Failed to build test application");

        let http_port = app.http_port();
        let address = format!("http://127.0.0.1:{}", http_port);

        tokio::spawn(async move {
            app.run_until_stopped().await.ok();
        });

        // Wait for HTTP server to be ready by polling health endpoint
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
            http_port,
            client,
        }
    }

    /// POST a JSON body and return the raw response.
    pub async fn post(&self, path: &str, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}{}", self.address, path))
            .json(body)
            .send()
            .await
            .expect("Failed to execute request")
    }

    /// POST a JSON body, assert success, and parse the JSON response.
    pub async fn post_json(&self, path: &str, body: &serde_json::Value) -> serde_json::Value {
        let response = self.post(path, body).await;
        assert!(
            response.status().is_success(),
            "POST {} returned {}",
            path,
            response.status()
        );
        response.json().await.expect("Failed to parse JSON")
    }
}
