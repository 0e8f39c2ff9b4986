//! Request and response bodies for the HTTP API.

pub mod invoices;
pub mod pipeline;

pub use invoices::*;
pub use pipeline::*;
