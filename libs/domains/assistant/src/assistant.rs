use tracing::{debug, warn};

use crate::error::AssistantResult;
use crate::llm::{CompletionRequest, LanguageModel};
use crate::models::ServiceInfo;
use crate::prompts;

/// Display name used when a service lookup names no service
pub const FALLBACK_SERVICE_NAME: &str = "Yandex Cloud";

/// Cloud assistant - task-specific prompts over a language model
pub struct CloudAssistant<L: LanguageModel> {
    model: L,
}

impl<L: LanguageModel> CloudAssistant<L> {
    pub fn new(model: L) -> Self {
        Self { model }
    }

    /// Forward text as is, with no system prompt
    pub async fn complete(&self, prompt: &str) -> AssistantResult<String> {
        self.model.complete(CompletionRequest::new(prompt)).await
    }

    pub async fn code_example(&self, service: &str, scenario: &str) -> AssistantResult<String> {
        let request = CompletionRequest::new(prompts::code_example(service, scenario))
            .with_system_prompt(prompts::EXAMPLES_SYSTEM_PROMPT);
        self.model.complete(request).await
    }

    pub async fn optimization_advice(
        &self,
        resource_type: &str,
        current_setup: &str,
    ) -> AssistantResult<String> {
        let request = CompletionRequest::new(prompts::optimization(resource_type, current_setup))
            .with_system_prompt(prompts::OPTIMIZATION_SYSTEM_PROMPT);
        self.model.complete(request).await
    }

    pub async fn diagnostic_help(&self, problem: &str) -> AssistantResult<String> {
        let request = CompletionRequest::new(prompts::diagnostics(problem))
            .with_system_prompt(prompts::DIAGNOSTICS_SYSTEM_PROMPT);
        self.model.complete(request).await
    }

    pub async fn recommendation(&self, requirements: &str) -> AssistantResult<String> {
        self.model
            .complete(CompletionRequest::new(prompts::recommendation(requirements)))
            .await
    }

    /// Describe a service; an answer that is not JSON becomes the description
    pub async fn service_info(&self, service: &str) -> AssistantResult<ServiceInfo> {
        let name = if service.is_empty() {
            FALLBACK_SERVICE_NAME
        } else {
            service
        };

        let request = CompletionRequest::new(prompts::service_info(name))
            .with_system_prompt(prompts::SERVICE_INFO_SYSTEM_PROMPT);
        let answer = self.model.complete(request).await?;

        let mut info = parse_service_info(&answer);
        info.name = name.to_string();
        debug!(
            service = name,
            features = info.features.len(),
            use_cases = info.use_cases.len(),
            "Service info resolved"
        );
        Ok(info)
    }
}

/// Parse the outermost `{...}` of an answer, falling back to plain text
fn parse_service_info(answer: &str) -> ServiceInfo {
    let json = match (answer.find('{'), answer.rfind('}')) {
        (Some(start), Some(end)) if start < end => Some(&answer[start..=end]),
        _ => None,
    };

    match json.map(serde_json::from_str::<ServiceInfo>) {
        Some(Ok(info)) => info,
        Some(Err(e)) => {
            warn!(error = %e, "Service info answer is not valid JSON, using raw text");
            plain(answer)
        }
        None => plain(answer),
    }
}

fn plain(answer: &str) -> ServiceInfo {
    ServiceInfo {
        description: answer.trim().to_string(),
        ..ServiceInfo::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AssistantError;
    use crate::llm::MockLanguageModel;

    #[tokio::test]
    async fn test_code_example_uses_examples_prompt() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete()
            .withf(|request| {
                request.system_prompt.as_deref() == Some(prompts::EXAMPLES_SYSTEM_PROMPT)
                    && request.prompt.contains("Object Storage")
                    && request.prompt.contains("upload a file")
            })
            .times(1)
            .returning(|_| Ok("```python\nprint('hi')\n```".to_string()));

        let assistant = CloudAssistant::new(mock);
        let answer = assistant
            .code_example("Object Storage", "upload a file")
            .await
            .unwrap();
        assert!(answer.contains("print"));
    }

    #[tokio::test]
    async fn test_optimization_and_diagnostics_prompts() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete()
            .withf(|r| r.system_prompt.as_deref() == Some(prompts::OPTIMIZATION_SYSTEM_PROMPT))
            .returning(|_| Ok("use preemptible VMs".to_string()));
        mock.expect_complete()
            .withf(|r| r.system_prompt.as_deref() == Some(prompts::DIAGNOSTICS_SYSTEM_PROMPT))
            .returning(|_| Ok("check security groups".to_string()));

        let assistant = CloudAssistant::new(mock);
        assert_eq!(
            assistant.optimization_advice("vm", "4 cores idle").await.unwrap(),
            "use preemptible VMs"
        );
        assert_eq!(
            assistant.diagnostic_help("connection refused").await.unwrap(),
            "check security groups"
        );
    }

    #[tokio::test]
    async fn test_complete_has_no_system_prompt() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete()
            .withf(|r| r.system_prompt.is_none() && r.prompt == "Hello There")
            .returning(|_| Ok("hi".to_string()));

        let assistant = CloudAssistant::new(mock);
        assert_eq!(assistant.complete("Hello There").await.unwrap(), "hi");
    }

    #[tokio::test]
    async fn test_service_info_parses_embedded_json() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete().returning(|_| {
            Ok(r#"Sure! {"description": "S3-compatible storage", "features": ["Lifecycle rules"], "use_cases": ["Backups", "Static sites"]} Enjoy"#.to_string())
        });

        let info = CloudAssistant::new(mock)
            .service_info("object storage")
            .await
            .unwrap();
        assert_eq!(info.name, "object storage");
        assert_eq!(info.description, "S3-compatible storage");
        assert_eq!(info.features, vec!["Lifecycle rules"]);
        assert_eq!(info.use_cases, vec!["Backups", "Static sites"]);
    }

    #[tokio::test]
    async fn test_service_info_falls_back_to_text() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete()
            .withf(|r| r.prompt.contains(FALLBACK_SERVICE_NAME))
            .returning(|_| Ok("  Just prose about the cloud.  ".to_string()));

        let info = CloudAssistant::new(mock).service_info("").await.unwrap();
        assert_eq!(info.name, FALLBACK_SERVICE_NAME);
        assert_eq!(info.description, "Just prose about the cloud.");
        assert!(info.features.is_empty());
    }

    #[tokio::test]
    async fn test_errors_propagate() {
        let mut mock = MockLanguageModel::new();
        mock.expect_complete()
            .returning(|_| Err(AssistantError::LanguageModel("boom".to_string())));

        let assistant = CloudAssistant::new(mock);
        assert!(assistant.recommendation("web shop").await.is_err());
        assert!(assistant.service_info("compute").await.is_err());
    }

    #[test]
    fn test_parse_service_info_broken_json() {
        let info = parse_service_info("{not json}");
        assert_eq!(info.description, "{not json}");
    }
}
