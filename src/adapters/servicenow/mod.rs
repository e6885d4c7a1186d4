//! Table API adapter
//!
//! This module provides the integration with the remote record store: the
//! [`TableApi`] trait, its reqwest-backed implementation [`TableClient`],
//! table routing and wire envelopes.

pub mod api;
pub mod client;
pub mod html;
pub mod models;
pub mod table;

pub use api::{ListQuery, TableApi};
pub use client::TableClient;
pub use html::HtmlDetector;
pub use models::{BatchResponse, ServicedRequest};
pub use table::ResourceTable;
