//! Fixed reply texts and renderers for collaborator results

use domain_cloud_resources::ResourceSummary;

use crate::models::ServiceInfo;

pub const START: &str = "👋 Hi! I'm your Yandex Cloud assistant.\n\n\
🔹 I can help you:\n\
- Choose the right services\n\
- Estimate service costs\n\
- Get code and configuration examples\n\
- Answer documentation questions\n\n\
Use /help to see the available commands.";

pub const HELP: &str = "🔷 Available commands:\n\n\
📊 Main commands:\n\
/services - Yandex Cloud services overview\n\
/calculate_vm - Estimate the cost of a virtual machine\n\
/pricing - Pricing information\n\
/databases - List databases in your folder\n\n\
🛠 More:\n\
/examples - Code and configuration examples\n\
/optimize - Optimization advice\n\
/diagnose - Troubleshooting\n\
/premium - Premium features\n\n\
💬 Or just type your question and I'll do my best to help!";

pub const SERVICES: &str = "🎯 To get a recommendation, describe your requirements:\n\n\
• Project type (web app, database, etc.)\n\
• Expected load\n\
• Data requirements\n\
• Budget\n\n\
For example:\n\
/services web_app 1000\n\
/services database 250\n\
/services a web shop with 1000 daily users";

pub const EXAMPLES: &str = "🔍 Pick an example category:\n\n\
1. Compute Cloud (VM)\n\
2. Object Storage\n\
3. Managed Databases\n\
4. Serverless Functions\n\
5. API Gateway\n\n\
Then send /examples [service] [scenario], e.g. /examples storage upload a file";

pub const OPTIMIZE: &str = "🔧 Optimization advice:\n\n\
1. Resource utilization analysis\n\
2. Cost optimization\n\
3. Performance\n\
4. Security\n\n\
Send /optimize [resource] [current setup], e.g. /optimize vm 8 cores at 10% load";

pub const DIAGNOSE: &str = "🔍 Troubleshooting:\n\n\
Describe the problem you ran into:\n\
- Connectivity issues\n\
- Deployment errors\n\
- Performance problems\n\
- Errors in logs\n\n\
Send /diagnose [problem] and I'll help find the cause and a fix.";

pub const PREMIUM: &str = "⭐️ Premium features:\n\n\
1. Priority 24/7 support\n\
2. Expert consultations\n\
3. Ready-made solutions and templates\n\
4. Advanced diagnostics\n\
5. Personal recommendations\n\n\
Contact the administrator to get access.";

pub const CALCULATE_USAGE: &str = "❌ Please pass the parameters as:\n\
/calculate_vm [cpu] [ram] [disk]\n\
Example: /calculate_vm 2 4 100";

pub const CALCULATE_PARSE_ERROR: &str = "❌ Invalid parameters. Use whole numbers.\n\
Example: /calculate_vm 2 4 100";

pub const CALCULATE_RANGE_ERROR: &str = "❌ Parameters are too large.\n\
Each value must be at most 1000000.\n\
Example: /calculate_vm 2 4 100";

pub const PRICING_MENU: &str = "🏷️ Available pricing information:\n\n\
Use the commands:\n\
• /pricing compute - virtual machine prices\n\
• /pricing storage - storage prices\n\n\
To estimate a VM, use:\n\
/calculate_vm [cpu] [ram] [disk]";

pub const DATABASES_NONE_FOUND: &str = "No databases found in your folder.";

pub const DATABASES_HEADER: &str = "Databases in Yandex Cloud:\n\n";

pub const DIVIDER: &str = "-------------------";

pub const APOLOGY: &str = "Sorry, something went wrong while processing your request. Please try again later.";

pub const UNKNOWN_COMMAND: &str = "🤔 I don't know that command. Use /help to see what I can do.";

/// One block per database, each followed by a divider, in input order
pub fn render_databases(databases: &[ResourceSummary]) -> String {
    if databases.is_empty() {
        return DATABASES_NONE_FOUND.to_string();
    }

    let mut message = String::from(DATABASES_HEADER);
    for db in databases {
        message.push_str(&format!("📁 ID: {}\n", db.id));
        message.push_str(&format!("📌 Name: {}\n", db.name));
        message.push_str(&format!("📍 Status: {}\n", db.status));
        message.push_str(&format!("🔧 Type: {}\n", db.resource_type));
        message.push_str(DIVIDER);
        message.push('\n');
    }
    message
}

pub fn render_service_info(info: &ServiceInfo) -> String {
    let mut message = format!("📦 {}\n\n📝 Description: {}\n", info.name, info.description);

    message.push_str("\n✨ Features:\n");
    for feature in &info.features {
        message.push_str(&format!("• {}\n", feature));
    }

    message.push_str("\n🎯 Use cases:\n");
    for use_case in &info.use_cases {
        message.push_str(&format!("• {}\n", use_case));
    }
    message
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_render_databases_preserves_order() {
        let databases = vec![
            ResourceSummary::new("db-b", "beta", "RUNNING", "serverless"),
            ResourceSummary::new("db-a", "alpha", "STOPPED", "dedicated"),
        ];
        let message = render_databases(&databases);

        assert_eq!(message.matches(DIVIDER).count(), 2);
        let beta = message.find("db-b").unwrap();
        let alpha = message.find("db-a").unwrap();
        assert!(beta < alpha);
        assert!(message.contains("🔧 Type: dedicated"));
    }

    #[test]
    fn test_render_databases_empty() {
        assert_eq!(render_databases(&[]), DATABASES_NONE_FOUND);
    }

    #[test]
    fn test_render_service_info() {
        let info = ServiceInfo {
            name: "object storage".to_string(),
            description: "S3-compatible storage".to_string(),
            features: vec!["Versioning".to_string(), "Lifecycle".to_string()],
            use_cases: vec!["Backups".to_string()],
        };
        let message = render_service_info(&info);

        assert!(message.starts_with("📦 object storage"));
        assert!(message.contains("📝 Description: S3-compatible storage"));
        assert!(message.contains("• Versioning\n• Lifecycle\n"));
        assert!(message.contains("🎯 Use cases:\n• Backups\n"));
    }

    #[test]
    fn test_help_lists_every_command() {
        for command in [
            "/services",
            "/calculate_vm",
            "/pricing",
            "/databases",
            "/examples",
            "/optimize",
            "/diagnose",
            "/premium",
        ] {
            assert!(HELP.contains(command), "{} missing from help", command);
        }
    }
}
