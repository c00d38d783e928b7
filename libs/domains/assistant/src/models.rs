use serde::{Deserialize, Serialize};
use std::str::FromStr;
use strum::{AsRefStr, EnumString};

/// A message as delivered by the transport
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InboundMessage {
    /// Command name without the leading `/` or `@bot` suffix
    pub command: Option<String>,
    pub args: Vec<String>,
    pub raw_text: String,
}

impl InboundMessage {
    /// Parse message text: `/name@bot a b` is a command, anything else free text
    pub fn from_text(text: &str) -> Self {
        let raw_text = text.to_string();
        let mut tokens = text.split_whitespace();

        let command = match tokens.clone().next() {
            Some(first) if first.starts_with('/') => {
                let name = first.trim_start_matches('/');
                let name = name.split_once('@').map_or(name, |(name, _bot)| name);
                (!name.is_empty()).then(|| name.to_lowercase())
            }
            _ => None,
        };

        let args = if command.is_some() {
            tokens.next();
            tokens.map(str::to_string).collect()
        } else {
            Vec::new()
        };

        Self {
            command,
            args,
            raw_text,
        }
    }

    pub fn command(name: &str, args: &[&str]) -> Self {
        let mut raw_text = format!("/{}", name);
        for arg in args {
            raw_text.push(' ');
            raw_text.push_str(arg);
        }
        Self {
            command: Some(name.to_string()),
            args: args.iter().map(|a| a.to_string()).collect(),
            raw_text,
        }
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self {
            command: None,
            args: Vec::new(),
            raw_text: text.into(),
        }
    }

    pub fn is_command(&self) -> bool {
        self.command.is_some()
    }
}

/// Commands the bot understands
#[derive(Debug, Clone, PartialEq, Eq, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
pub enum Command {
    Start,
    Help,
    Services,
    CalculateVm,
    Pricing,
    Databases,
    Examples,
    Optimize,
    Diagnose,
    Premium,
    #[strum(default)]
    Unknown(String),
}

impl Command {
    pub fn parse(name: &str) -> Self {
        // EnumString with a default variant never fails
        Command::from_str(name).unwrap_or_else(|_| Command::Unknown(name.to_string()))
    }
}

/// Purpose of a free-text message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Intent {
    Help,
    ServiceLookup { service: String },
    Freeform,
}

impl Intent {
    pub fn as_str(&self) -> &'static str {
        match self {
            Intent::Help => "help",
            Intent::ServiceLookup { .. } => "service_lookup",
            Intent::Freeform => "freeform",
        }
    }
}

/// Service description assembled from a language model answer
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ServiceInfo {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub features: Vec<String>,
    #[serde(default)]
    pub use_cases: Vec<String>,
}
