//! Free-text intent detection
//!
//! Rules are checked in order and the first match wins, so a message that
//! mentions both commands and a service is treated as a help request.

use crate::models::Intent;

/// Substrings that turn a message into a help request
pub const HELP_MARKERS: &[&str] = &["команд", "command"];

/// Substrings that turn a message into a service lookup
pub const SERVICE_MARKERS: &[&str] = &["сервис", "service"];

/// Classify a free-text message
pub fn classify(text: &str) -> Intent {
    let lowered = text.to_lowercase();

    if HELP_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        return Intent::Help;
    }

    if SERVICE_MARKERS.iter().any(|marker| lowered.contains(marker)) {
        let service = SERVICE_MARKERS
            .iter()
            .fold(lowered, |acc, marker| acc.replace(marker, ""));
        return Intent::ServiceLookup {
            service: service.trim().to_string(),
        };
    }

    Intent::Freeform
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_help_markers() {
        assert_eq!(classify("Какие команды ты знаешь?"), Intent::Help);
        assert_eq!(classify("list COMMANDS please"), Intent::Help);
    }

    #[test]
    fn test_help_beats_service_lookup() {
        assert_eq!(classify("команды для сервиса"), Intent::Help);
        assert_eq!(classify("service commands"), Intent::Help);
    }

    #[test]
    fn test_service_lookup_strips_markers() {
        assert_eq!(
            classify("Сервис Object Storage"),
            Intent::ServiceLookup {
                service: "object storage".to_string()
            }
        );
        assert_eq!(
            classify("tell me about service  Cloud Functions "),
            Intent::ServiceLookup {
                service: "tell me about   cloud functions".to_string()
            }
        );
    }

    #[test]
    fn test_bare_marker_gives_empty_service() {
        assert_eq!(
            classify("service"),
            Intent::ServiceLookup {
                service: String::new()
            }
        );
    }

    #[test]
    fn test_freeform() {
        assert_eq!(classify("How do I resize a disk?"), Intent::Freeform);
        assert_eq!(classify(""), Intent::Freeform);
    }
}
