// snowbridge - ServiceNow Table API provisioning connector
// Copyright (c) 2025 snowbridge contributors
// Licensed under the MIT License

//! # snowbridge - ServiceNow Table API provisioning connector
//!
//! snowbridge provisions user accounts, groups and group memberships on a
//! ServiceNow instance through its Table and Batch REST APIs.
//!
//! ## Overview
//!
//! This library provides:
//! - **Paging** over table records with offset/limit and the `x-total-count`
//!   header
//! - **Mapping** between flat attribute bags and the wide `sys_user` /
//!   `sys_user_group` record shape, including reference fields
//! - **Membership batches** that replace a user's groups in one Batch API call
//!
//! ## Architecture
//!
//! - [`cli`] - Command-line interface and argument parsing
//! - [`core`] - Attribute mapping, membership batches and provisioning flows
//! - [`adapters`] - The Table API trait and its HTTP client
//! - [`domain`] - Records, attributes, batches and errors
//! - [`config`] - Configuration management
//! - [`logging`] - Structured logging
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use snowbridge::config::load_config;
//! use snowbridge::core::provisioning::{ObjectKind, Provisioner};
//! use snowbridge::domain::Attribute;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = load_config("snowbridge.toml")?;
//!     let provisioner = Provisioner::from_config(&config.servicenow)?;
//!
//!     let uid = provisioner
//!         .create(
//!             ObjectKind::Account,
//!             &[
//!                 Attribute::single("user_name", "abel.tuter"),
//!                 Attribute::single("__PASSWORD__", "Welcome1!"),
//!                 Attribute::single("__ENABLE__", true),
//!             ],
//!         )
//!         .await?;
//!
//!     println!("Created user {uid}");
//!     Ok(())
//! }
//! ```
//!
//! ## Paging
//!
//! Paged searches return an offset cookie; pass it back to fetch the next
//! page. The cookie is `None` on the last page.
//!
//! ```rust,no_run
//! use snowbridge::core::provisioning::{ObjectKind, Provisioner, SearchOptions, SearchQuery};
//!
//! # async fn example(provisioner: &Provisioner) -> snowbridge::domain::Result<()> {
//! let mut options = SearchOptions {
//!     page_size: Some(50),
//!     ..SearchOptions::default()
//! };
//! loop {
//!     let page = provisioner
//!         .search(ObjectKind::Group, &SearchQuery::All, &options)
//!         .await?;
//!     for group in &page.objects {
//!         println!("{}", group.uid);
//!     }
//!     match page.paged_results_cookie {
//!         Some(cookie) => options.paged_results_cookie = Some(cookie),
//!         None => break,
//!     }
//! }
//! # Ok(())
//! # }
//! ```
//!
//! ## Error Handling
//!
//! Library operations return [`domain::Result`], whose error is
//! [`domain::ConnectorError`]. Remote failures carry a
//! [`domain::TableApiError`] that tells a missing record apart from a
//! failed request and a malformed response.

pub mod adapters;
pub mod cli;
pub mod config;
pub mod core;
pub mod domain;
pub mod logging;
