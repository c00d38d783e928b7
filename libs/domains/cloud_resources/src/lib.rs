//! Cloud Resources Domain
//!
//! Read-only inventory of Yandex Cloud resources in a folder.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Folder-scoped queries
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │  Inventory  │  ← Trait + Yandex Cloud REST implementation
//! └──────┬──────┘
//!        │
//! ┌──────▼──────┐
//! │ Credentials │  ← Service-account JWT → IAM token, cached
//! └─────────────┘
//! ```
//!
//! # Usage
//!
//! ```rust,no_run
//! use core_config::FromEnv;
//! use domain_cloud_resources::{CloudResourceService, YandexCloudConfig, YandexCloudInventory};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let inventory = YandexCloudInventory::new(YandexCloudConfig::from_env()?)?;
//! let service = CloudResourceService::new(inventory, "b1g...");
//!
//! for db in service.list_databases().await? {
//!     println!("{} {}", db.id, db.status);
//! }
//! # Ok(())
//! # }
//! ```

pub mod credentials;
pub mod error;
pub mod inventory;
pub mod models;
pub mod service;
pub mod yandex;

// Re-export commonly used types
pub use credentials::{Credentials, IamTokenProvider, ServiceAccountKey};
pub use error::{CloudResourceError, CloudResourceResult};
pub use inventory::InventoryClient;
pub use models::{ResourceKind, ResourceSummary};
pub use service::CloudResourceService;
pub use yandex::{YandexCloudConfig, YandexCloudInventory};
