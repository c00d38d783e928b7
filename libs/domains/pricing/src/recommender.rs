//! Rule-based service recommendations
//!
//! A fixed decision table keyed on project type with strict less-than
//! thresholds. Unknown project types produce no recommendation.

use crate::models::{ProjectType, RecommendedService, ServiceRecommendation, ServiceRequirements};

/// Daily users below which a serverless deployment is recommended
pub const WEB_APP_TRAFFIC_THRESHOLD: i64 = 1000;

/// Dataset size (GB) below which the small PostgreSQL tier is recommended
pub const DATABASE_SIZE_THRESHOLD: i64 = 100;

/// Recommend services for the given requirements
pub fn recommend_services(requirements: &ServiceRequirements) -> ServiceRecommendation {
    let mut services = Vec::new();

    match requirements.project_type {
        ProjectType::WebApp => {
            if requirements.traffic.unwrap_or(0) < WEB_APP_TRAFFIC_THRESHOLD {
                services.push(recommended(
                    "Cloud Functions",
                    "Serverless functions suit small web apps with low traffic",
                ));
            } else {
                services.push(recommended(
                    "Compute Cloud",
                    "Dedicated virtual machines suit web apps with high traffic",
                ));
            }
        }
        ProjectType::Database => {
            if requirements.data_size.unwrap_or(0) < DATABASE_SIZE_THRESHOLD {
                services.push(recommended(
                    "Managed PostgreSQL (small)",
                    "A small managed instance suits small datasets",
                ));
            } else {
                services.push(recommended(
                    "Managed PostgreSQL (medium)",
                    "A medium managed instance suits medium and large datasets",
                ));
            }
        }
        ProjectType::Other => {}
    }

    ServiceRecommendation { services }
}

fn recommended(service_name: &str, reason: &str) -> RecommendedService {
    RecommendedService {
        service_name: service_name.to_string(),
        reason: reason.to_string(),
    }
}
