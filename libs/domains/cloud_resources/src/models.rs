use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Kind of resource the inventory can list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ResourceKind {
    Database,
    Compute,
}

/// Flat view of a cloud resource as returned by the inventory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceSummary {
    pub id: String,
    pub name: String,
    pub status: String,
    /// `serverless`/`dedicated` for databases, platform id for instances
    #[serde(rename = "type")]
    pub resource_type: String,
}

impl ResourceSummary {
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        status: impl Into<String>,
        resource_type: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            status: status.into(),
            resource_type: resource_type.into(),
        }
    }
}
