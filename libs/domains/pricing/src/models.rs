use serde::{Deserialize, Serialize};
use std::fmt;
use strum::{Display, EnumString};

/// Currency enumeration
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Default, Hash,
)]
#[serde(rename_all = "UPPERCASE")]
#[strum(serialize_all = "UPPERCASE")]
pub enum Currency {
    #[default]
    Rub,
    Usd,
    Eur,
}

impl Currency {
    /// Symbol used when rendering amounts in chat replies
    pub fn symbol(&self) -> &'static str {
        match self {
            Currency::Rub => "₽",
            Currency::Usd => "$",
            Currency::Eur => "€",
        }
    }
}

/// Money representation with two-decimal precision
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Hash, Default)]
pub struct Money {
    /// Amount in the smallest currency unit (kopecks for RUB)
    pub amount: i64,
    /// Currency type
    pub currency: Currency,
}

impl Money {
    /// Create a new Money value from minor units
    pub fn new(amount: i64, currency: Currency) -> Self {
        Self { amount, currency }
    }

    /// Create Money from a decimal value, rounding half away from zero
    pub fn from_decimal(value: f64, currency: Currency) -> Self {
        Self {
            amount: (value * 100.0).round() as i64,
            currency,
        }
    }

    /// Convert to decimal value
    pub fn to_decimal(&self) -> f64 {
        self.amount as f64 / 100.0
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let sign = if self.amount < 0 { "-" } else { "" };
        let abs = self.amount.unsigned_abs();
        write!(
            f,
            "{}{}.{:02} {}",
            sign,
            abs / 100,
            abs % 100,
            self.currency.symbol()
        )
    }
}

/// Managed PostgreSQL instance tier
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString, Hash,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum PostgresTier {
    Small,
    Medium,
    Large,
}

/// Input for a virtual machine cost estimate
///
/// Values are taken as-is: zero or negative sizes are not rejected and simply
/// produce a zero or negative sub-cost.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmCostRequest {
    pub cpu_cores: i64,
    pub ram_gb: i64,
    pub disk_gb: i64,
    #[serde(default = "default_hours")]
    pub hours: i64,
}

/// Hours in a billing month
pub const HOURS_PER_MONTH: i64 = 730;

/// Largest absolute core, gigabyte or hour count an estimate accepts.
/// Costs stay far below `i64::MAX` kopecks and exact in `f64` at this bound.
pub const MAX_VM_QUANTITY: i64 = 1_000_000;

fn default_hours() -> i64 {
    HOURS_PER_MONTH
}

impl VmCostRequest {
    /// Estimate for a full month of uptime
    pub fn new(cpu_cores: i64, ram_gb: i64, disk_gb: i64) -> Self {
        Self {
            cpu_cores,
            ram_gb,
            disk_gb,
            hours: HOURS_PER_MONTH,
        }
    }

    pub fn with_hours(mut self, hours: i64) -> Self {
        self.hours = hours;
        self
    }

    /// Whether every field is within [`MAX_VM_QUANTITY`]
    pub fn is_within_limits(&self) -> bool {
        [self.cpu_cores, self.ram_gb, self.disk_gb, self.hours]
            .iter()
            .all(|value| value.unsigned_abs() <= MAX_VM_QUANTITY as u64)
    }
}

/// Result of a virtual machine cost estimate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct VmCostResult {
    pub cpu_cost: Money,
    pub ram_cost: Money,
    pub disk_cost: Money,
    /// Rounded sum of the unrounded sub-costs
    pub total: Money,
    /// Always equal to `total`
    pub monthly_estimate: Money,
}

/// Kind of project a recommendation is requested for
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProjectType {
    WebApp,
    Database,
    #[serde(other)]
    Other,
}

impl From<&str> for ProjectType {
    fn from(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "web_app" => ProjectType::WebApp,
            "database" => ProjectType::Database,
            _ => ProjectType::Other,
        }
    }
}

/// Requirements a service recommendation is derived from
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceRequirements {
    #[serde(rename = "type")]
    pub project_type: ProjectType,
    /// Expected daily users, web apps only
    #[serde(default)]
    pub traffic: Option<i64>,
    /// Dataset size in gigabytes, databases only
    #[serde(default)]
    pub data_size: Option<i64>,
}

impl ServiceRequirements {
    pub fn new(project_type: impl Into<ProjectType>) -> Self {
        Self {
            project_type: project_type.into(),
            traffic: None,
            data_size: None,
        }
    }

    pub fn with_traffic(mut self, traffic: i64) -> Self {
        self.traffic = Some(traffic);
        self
    }

    pub fn with_data_size(mut self, data_size: i64) -> Self {
        self.data_size = Some(data_size);
        self
    }
}

/// A single recommended service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecommendedService {
    pub service_name: String,
    pub reason: String,
}

/// Ordered list of recommended services
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct ServiceRecommendation {
    pub services: Vec<RecommendedService>,
}

impl ServiceRecommendation {
    pub fn is_empty(&self) -> bool {
        self.services.is_empty()
    }

    pub fn service_names(&self) -> Vec<&str> {
        self.services
            .iter()
            .map(|s| s.service_name.as_str())
            .collect()
    }
}
