//! Language model clients

mod provider;
pub mod yandex_gpt;

#[cfg(test)]
pub use provider::MockLanguageModel;
pub use provider::{CompletionRequest, LanguageModel};
pub use yandex_gpt::{YandexGptClient, YandexGptConfig};
