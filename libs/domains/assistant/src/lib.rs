//! Assistant Domain
//!
//! Turns inbound chat messages into replies: command parsing, intent
//! detection, YandexGPT prompts and reply templates.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────┐
//! │  Dispatcher  │  ← Command / intent routing, timeouts, apologies
//! └──┬────┬───┬──┘
//!    │    │   │
//!    │    │   └──────────────► Inventory (domain_cloud_resources)
//!    │    └──────────────────► Pricing Engine (domain_pricing)
//! ┌──▼───────────┐
//! │  Assistant   │  ← Task prompts
//! └──────┬───────┘
//!        │
//! ┌──────▼───────┐
//! │ LanguageModel│  ← Trait + YandexGPT client
//! └──────────────┘
//! ```

pub mod assistant;
pub mod dispatcher;
pub mod error;
pub mod intent;
pub mod llm;
pub mod models;
pub mod prompts;
pub mod templates;

// Re-export commonly used types
pub use assistant::CloudAssistant;
pub use dispatcher::{DEFAULT_COLLABORATOR_TIMEOUT, Dispatcher};
pub use error::{AssistantError, AssistantResult};
pub use intent::classify;
pub use llm::{CompletionRequest, LanguageModel, YandexGptClient, YandexGptConfig};
pub use models::{Command, InboundMessage, Intent, ServiceInfo};
