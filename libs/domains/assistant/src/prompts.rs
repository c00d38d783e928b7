//! Prompts for the cloud assistant

/// System prompt for code examples
pub const EXAMPLES_SYSTEM_PROMPT: &str = "You are a Yandex Cloud expert. Provide a concrete code \
example for the requested service. Use current SDK versions and best practices. Add comments \
that explain the code.";

/// System prompt for optimization advice
pub const OPTIMIZATION_SYSTEM_PROMPT: &str = "You are a Yandex Cloud optimization specialist. \
Analyze the described situation and give concrete optimization recommendations covering \
performance and cost.";

/// System prompt for troubleshooting
pub const DIAGNOSTICS_SYSTEM_PROMPT: &str = "You are a Yandex Cloud troubleshooting expert. \
Analyze the described problem, list the likely causes and give concrete steps to fix them.";

/// System prompt that asks for a machine-readable service description
pub const SERVICE_INFO_SYSTEM_PROMPT: &str = r#"You are a Yandex Cloud expert. Answer with a single JSON object and nothing else, in this shape:
{"description": "one paragraph", "features": ["feature", "..."], "use_cases": ["use case", "..."]}"#;

/// Scenario used when `/examples` gets a service but no scenario
pub const DEFAULT_SCENARIO: &str = "basic usage";

/// Setup used when `/optimize` gets a resource but no description
pub const DEFAULT_SETUP: &str = "not specified";

pub fn code_example(service: &str, scenario: &str) -> String {
    format!(
        "Provide a Python code example for the Yandex Cloud service {}. Scenario: {}",
        service, scenario
    )
}

pub fn optimization(resource_type: &str, current_setup: &str) -> String {
    format!(
        "Analyze the current {} configuration: {}. Suggest optimizations.",
        resource_type, current_setup
    )
}

pub fn diagnostics(problem: &str) -> String {
    format!("Help diagnose and solve this problem: {}", problem)
}

pub fn service_info(service: &str) -> String {
    format!(
        "Describe the Yandex Cloud service {} in detail. Include its main features, use cases and advantages.",
        service
    )
}

pub fn recommendation(requirements: &str) -> String {
    format!(
        "Based on the following requirements, recommend suitable Yandex Cloud services: {}",
        requirements
    )
}
