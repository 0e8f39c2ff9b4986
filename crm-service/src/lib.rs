//! CRM Service - invoice totals and the lead/deal sales pipeline.

pub mod config;
pub mod dtos;
pub mod handlers;
pub mod models;
pub mod services;
pub mod startup;
pub mod utils;
