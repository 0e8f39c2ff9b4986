//! Configuration module for crm-service.

use service_core::config as core_config;
use service_core::error::AppError;
use std::env;

use crate::models::DEFAULT_TAX_PERCENTAGE;

#[derive(Debug, Clone)]
pub struct CrmConfig {
    pub common: core_config::Config,
    pub service_name: String,
    pub service_version: String,
    pub log_level: String,
    pub otlp_endpoint: Option<String>,
    /// Tax applied when a request carries no tax percentage.
    pub default_tax_percentage: i64,
}

impl CrmConfig {
    pub fn from_env() -> Result<Self, AppError> {
        let common = core_config::Config::load()?;

        Ok(Self {
            common,
            service_name: env::var("SERVICE_NAME").unwrap_or_else(|_| "crm-service".to_string()),
            service_version: env::var("SERVICE_VERSION")
                .unwrap_or_else(|_| env!("CARGO_PKG_VERSION").to_string()),
            log_level: env::var("LOG_LEVEL").unwrap_or_else(|_| "info".to_string()),
            otlp_endpoint: env::var("OTLP_ENDPOINT").ok().filter(|s| !s.is_empty()),
            default_tax_percentage: env::var("CRM_DEFAULT_TAX_PERCENTAGE")
                .ok()
                .and_then(|s| s.trim().parse().ok())
                .unwrap_or(DEFAULT_TAX_PERCENTAGE),
        })
    }
}
