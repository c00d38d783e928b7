//! Message dispatch
//!
//! Routes one inbound message to the pricing engine, the cloud assistant or
//! the inventory and always produces a reply. Argument problems become usage
//! hints; collaborator failures are logged and become a fixed apology.

use std::future::Future;
use std::time::Duration;

use domain_cloud_resources::{CloudResourceService, InventoryClient};
use domain_pricing::{PricingService, PricingTopic, ServiceRequirements, VmCostRequest};
use observability::{CollaboratorTimer, DispatchMetrics, PricingMetrics};
use tracing::{debug, error, instrument};

use crate::assistant::CloudAssistant;
use crate::error::{AssistantError, AssistantResult};
use crate::intent::classify;
use crate::llm::LanguageModel;
use crate::models::{Command, InboundMessage, Intent};
use crate::prompts::{DEFAULT_SCENARIO, DEFAULT_SETUP};
use crate::templates;

pub const DEFAULT_COLLABORATOR_TIMEOUT: Duration = Duration::from_secs(30);

const LANGUAGE_MODEL: &str = "language_model";
const INVENTORY: &str = "inventory";

/// Stateless message handler shared by all in-flight messages
pub struct Dispatcher<L: LanguageModel, C: InventoryClient> {
    pricing: PricingService,
    assistant: CloudAssistant<L>,
    inventory: CloudResourceService<C>,
    timeout: Duration,
}

impl<L: LanguageModel, C: InventoryClient> Dispatcher<L, C> {
    pub fn new(
        pricing: PricingService,
        assistant: CloudAssistant<L>,
        inventory: CloudResourceService<C>,
    ) -> Self {
        Self {
            pricing,
            assistant,
            inventory,
            timeout: DEFAULT_COLLABORATOR_TIMEOUT,
        }
    }

    /// Upper bound for each language model or inventory call
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Produce the reply for one message. Never fails.
    #[instrument(skip_all, fields(command = ?message.command))]
    pub async fn handle(&self, message: &InboundMessage) -> String {
        let result = match &message.command {
            Some(name) => self.handle_command(Command::parse(name), &message.args).await,
            None => self.handle_text(&message.raw_text).await,
        };

        match result {
            Ok(reply) => reply,
            Err(AssistantError::InvalidArgument(usage)) => {
                debug!(usage = %usage, "Rejected command arguments");
                usage
            }
            Err(e) => {
                error!(error = %e, command = ?message.command, "Failed to handle message");
                templates::APOLOGY.to_string()
            }
        }
    }

    async fn handle_command(&self, command: Command, args: &[String]) -> AssistantResult<String> {
        DispatchMetrics::record_command(command.as_ref());
        debug!(command = command.as_ref(), args = args.len(), "Routing command");

        match command {
            Command::Start => Ok(templates::START.to_string()),
            Command::Help => Ok(templates::HELP.to_string()),
            Command::Premium => Ok(templates::PREMIUM.to_string()),
            Command::CalculateVm => {
                let request = parse_vm_request(args)?;
                let result = self.pricing.calculate_vm_cost(&request);
                PricingMetrics::record_vm_calculation();
                Ok(self.pricing.format_price_message(&result))
            }
            Command::Pricing => Ok(self.pricing_reply(args)),
            Command::Databases => {
                let databases = self
                    .call(INVENTORY, async {
                        self.inventory
                            .list_databases()
                            .await
                            .map_err(AssistantError::from)
                    })
                    .await?;
                Ok(templates::render_databases(&databases))
            }
            Command::Services => self.services(args).await,
            Command::Examples => match args.split_first() {
                None => Ok(templates::EXAMPLES.to_string()),
                Some((service, scenario)) => {
                    let scenario = join_or(scenario, DEFAULT_SCENARIO);
                    self.call(LANGUAGE_MODEL, self.assistant.code_example(service, &scenario))
                        .await
                }
            },
            Command::Optimize => match args.split_first() {
                None => Ok(templates::OPTIMIZE.to_string()),
                Some((resource, setup)) => {
                    let setup = join_or(setup, DEFAULT_SETUP);
                    self.call(
                        LANGUAGE_MODEL,
                        self.assistant.optimization_advice(resource, &setup),
                    )
                    .await
                }
            },
            Command::Diagnose => {
                if args.is_empty() {
                    return Ok(templates::DIAGNOSE.to_string());
                }
                let problem = args.join(" ");
                self.call(LANGUAGE_MODEL, self.assistant.diagnostic_help(&problem))
                    .await
            }
            Command::Unknown(name) => {
                debug!(command = %name, "Unknown command");
                Ok(templates::UNKNOWN_COMMAND.to_string())
            }
        }
    }

    fn pricing_reply(&self, args: &[String]) -> String {
        match args.first() {
            None => templates::PRICING_MENU.to_string(),
            Some(service) => {
                let service = service.to_lowercase();
                PricingMetrics::record_info_lookup(PricingTopic::label(&service));
                self.pricing.pricing_info(&service)
            }
        }
    }

    /// `web_app <traffic>` / `database <size>` use the decision table,
    /// anything else is a free-form recommendation request
    async fn services(&self, args: &[String]) -> AssistantResult<String> {
        if args.is_empty() {
            return Ok(templates::SERVICES.to_string());
        }

        if let [project_type, amount] = args {
            let project_type = project_type.to_lowercase();
            if let Ok(amount) = amount.parse::<i64>() {
                let requirements = match project_type.as_str() {
                    "web_app" => Some(ServiceRequirements::new("web_app").with_traffic(amount)),
                    "database" => {
                        Some(ServiceRequirements::new("database").with_data_size(amount))
                    }
                    _ => None,
                };
                if let Some(requirements) = requirements {
                    let recommendation = self.pricing.recommend_services(&requirements);
                    return Ok(self.pricing.format_recommendation(&recommendation));
                }
            }
        }

        let requirements = args.join(" ");
        self.call(LANGUAGE_MODEL, self.assistant.recommendation(&requirements))
            .await
    }

    async fn handle_text(&self, text: &str) -> AssistantResult<String> {
        let intent = classify(text);
        DispatchMetrics::record_intent(intent.as_str());
        debug!(intent = intent.as_str(), "Classified free text");

        match intent {
            Intent::Help => Ok(templates::HELP.to_string()),
            Intent::ServiceLookup { service } => {
                let info = self
                    .call(LANGUAGE_MODEL, self.assistant.service_info(&service))
                    .await?;
                Ok(templates::render_service_info(&info))
            }
            Intent::Freeform => self.call(LANGUAGE_MODEL, self.assistant.complete(text)).await,
        }
    }

    /// Run a collaborator call under the dispatch timeout, recording metrics
    async fn call<T, F>(&self, collaborator: &'static str, future: F) -> AssistantResult<T>
    where
        F: Future<Output = AssistantResult<T>>,
    {
        let mut timer = CollaboratorTimer::start(collaborator);

        match tokio::time::timeout(self.timeout, future).await {
            Ok(Ok(value)) => {
                timer.stop("ok");
                Ok(value)
            }
            Ok(Err(e)) => {
                timer.stop("error");
                Err(e)
            }
            Err(_) => {
                timer.stop("timeout");
                Err(AssistantError::Timeout {
                    collaborator,
                    elapsed: self.timeout,
                })
            }
        }
    }
}

/// Parse `cpu ram disk`; the error carries the reply for the user
fn parse_vm_request(args: &[String]) -> AssistantResult<VmCostRequest> {
    let [cpu, ram, disk] = args else {
        return Err(AssistantError::InvalidArgument(
            templates::CALCULATE_USAGE.to_string(),
        ));
    };

    let parse = |value: &String| {
        value.parse::<i64>().map_err(|_| {
            AssistantError::InvalidArgument(templates::CALCULATE_PARSE_ERROR.to_string())
        })
    };

    let request = VmCostRequest::new(parse(cpu)?, parse(ram)?, parse(disk)?);
    if !request.is_within_limits() {
        return Err(AssistantError::InvalidArgument(
            templates::CALCULATE_RANGE_ERROR.to_string(),
        ));
    }
    Ok(request)
}

fn join_or(parts: &[String], default: &str) -> String {
    if parts.is_empty() {
        default.to_string()
    } else {
        parts.join(" ")
    }
}
