//! Pricing Domain
//!
//! Deterministic cost arithmetic and service recommendations over a static
//! rate table. Nothing in this crate performs I/O after the rate table has
//! been loaded.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────┐
//! │   Service   │  ← Facade shared by the dispatch layer
//! └──────┬──────┘
//!        │
//! ┌──────▼──────────────────────────┐
//! │ Calculator / Recommender / Text │  ← Pure functions
//! └──────┬──────────────────────────┘
//!        │
//! ┌──────▼──────┐
//! │ Rate Table  │  ← Immutable unit prices
//! └─────────────┘
//! ```

pub mod calculator;
pub mod error;
pub mod messages;
pub mod models;
pub mod rates;
pub mod recommender;
pub mod service;

// Re-export commonly used types
pub use calculator::compute_vm_cost;
pub use error::{PricingError, PricingResult};
pub use messages::{PRICING_UNAVAILABLE, PricingTopic};
pub use models::{
    Currency, HOURS_PER_MONTH, MAX_VM_QUANTITY, Money, PostgresTier, ProjectType,
    RecommendedService, ServiceRecommendation, ServiceRequirements, VmCostRequest, VmCostResult,
};
pub use rates::RateTable;
pub use recommender::recommend_services;
pub use service::PricingService;
