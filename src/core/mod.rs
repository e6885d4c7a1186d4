//! Core connector logic
//!
//! # Modules
//!
//! - [`mapper`] - Translation between host attributes and table records
//! - [`membership`] - Group membership batches
//! - [`provisioning`] - Create, update, delete and search of accounts and groups
//!
//! # Example
//!
//! ```rust,no_run
//! use snowbridge::config::load_config;
//! use snowbridge::core::provisioning::{ObjectKind, Provisioner, SearchOptions, SearchQuery};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = load_config("snowbridge.toml")?;
//! let provisioner = Provisioner::from_config(&config.servicenow)?;
//!
//! let result = provisioner
//!     .search(ObjectKind::Group, &SearchQuery::All, &SearchOptions::default())
//!     .await?;
//! for group in result.objects {
//!     println!("{} {:?}", group.uid, group.name);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mapper;
pub mod membership;
pub mod provisioning;

pub use provisioning::{
    ConnectorObject, ObjectKind, Provisioner, SearchOptions, SearchQuery, SearchResult,
};
