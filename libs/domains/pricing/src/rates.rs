//! Static rate table
//!
//! Loaded once at startup and shared read-only for the life of the process.

use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::info;

use crate::error::{PricingError, PricingResult};
use crate::models::{Currency, Money, PostgresTier};

/// Compute Cloud unit prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ComputeRates {
    /// Price per CPU core per hour
    pub cpu_hour: f64,
    /// Price per GB of RAM per hour
    pub ram_gb_hour: f64,
    /// Price per GB of disk per month
    pub disk_gb_month: f64,
}

/// Per-1000-operations prices for object storage
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageOperationRates {
    pub read: f64,
    pub write: f64,
}

/// Object Storage unit prices
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StorageRates {
    /// Price per GB stored per month
    pub gb_month: f64,
    pub operations: StorageOperationRates,
}

/// Flat monthly prices per managed PostgreSQL tier
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PostgresRates {
    pub small: f64,
    pub medium: f64,
    pub large: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DatabaseRates {
    pub postgresql: PostgresRates,
}

/// Immutable table of unit prices used by every estimate
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RateTable {
    #[serde(default)]
    pub currency: Currency,
    pub compute: ComputeRates,
    pub storage: StorageRates,
    pub database: DatabaseRates,
}

impl Default for RateTable {
    fn default() -> Self {
        Self {
            currency: Currency::Rub,
            compute: ComputeRates {
                cpu_hour: 4.75,
                ram_gb_hour: 1.58,
                disk_gb_month: 0.93,
            },
            storage: StorageRates {
                gb_month: 0.15,
                operations: StorageOperationRates {
                    read: 0.0000876,
                    write: 0.0008766,
                },
            },
            database: DatabaseRates {
                postgresql: PostgresRates {
                    small: 2950.0,
                    medium: 5900.0,
                    large: 11800.0,
                },
            },
        }
    }
}

impl RateTable {
    /// Parse a rate table from JSON and validate it
    pub fn from_json(json: &str) -> PricingResult<Self> {
        let table: RateTable = serde_json::from_str(json)?;
        table.validate()?;
        Ok(table)
    }

    /// Load a rate table from a JSON file
    pub fn from_file(path: impl AsRef<Path>) -> PricingResult<Self> {
        let path = path.as_ref();
        let contents = std::fs::read_to_string(path).map_err(|source| PricingError::Io {
            path: path.display().to_string(),
            source,
        })?;

        let table = Self::from_json(&contents)?;
        info!(path = %path.display(), "Loaded rate table");
        Ok(table)
    }

    /// Monthly price of a managed PostgreSQL tier
    pub fn postgres_monthly(&self, tier: PostgresTier) -> Money {
        let rates = &self.database.postgresql;
        let value = match tier {
            PostgresTier::Small => rates.small,
            PostgresTier::Medium => rates.medium,
            PostgresTier::Large => rates.large,
        };
        Money::from_decimal(value, self.currency)
    }

    fn validate(&self) -> PricingResult<()> {
        let rates = [
            ("compute.cpu_hour", self.compute.cpu_hour),
            ("compute.ram_gb_hour", self.compute.ram_gb_hour),
            ("compute.disk_gb_month", self.compute.disk_gb_month),
            ("storage.gb_month", self.storage.gb_month),
            ("storage.operations.read", self.storage.operations.read),
            ("storage.operations.write", self.storage.operations.write),
            ("database.postgresql.small", self.database.postgresql.small),
            ("database.postgresql.medium", self.database.postgresql.medium),
            ("database.postgresql.large", self.database.postgresql.large),
        ];

        for (name, value) in rates {
            if !value.is_finite() || value < 0.0 {
                return Err(PricingError::InvalidRate(format!(
                    "{} must be a finite non-negative number, got {}",
                    name, value
                )));
            }
        }

        Ok(())
    }
}
