//! Rule-based rollout example
//!
//! This example demonstrates:
//! - Loading feature definitions from a YAML flag document
//! - Projecting request data into a feature context
//! - Checking features for a handful of users

use flagrule_sdk::{FeatureManager, RawContext, RuleManagerBuilder};
use serde_json::{json, Map, Value};

fn project_user(raw: &RawContext) -> Value {
    let mut context = Map::new();
    if let Some(user) = raw.get("user") {
        if let Some(email) = user.get("email") {
            context.insert("user_email".to_string(), email.clone());
        }
        if let Some(plan) = user.get("plan") {
            context.insert("plan".to_string(), plan.clone());
        }
    }
    Value::Object(context)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("flagrule_sdk=debug".parse()?),
        )
        .init();

    println!("=== Rollout Example ===\n");

    let manager = RuleManagerBuilder::new()
        .with_context_builder(project_user)
        .with_document_file("demos/flags/features.yaml")
        .validate_on_add(true)
        .build()?;

    println!("Loaded features: {:?}\n", manager.names());

    let users = [
        json!({"email": "test@example.com", "plan": "free"}),
        json!({"email": "someone@example.com", "plan": "pro"}),
        json!({"email": "other@example.com", "plan": "team"}),
        json!({"email": "guest@example.com", "plan": "free"}),
    ];

    for user in users {
        let mut raw = RawContext::new();
        raw.insert("user".to_string(), user.clone());

        println!("User {}", user["email"]);
        for feature in ["calendar-v2", "shop-v2", "not-configured"] {
            println!("  {:<16} {}", feature, manager.has(feature, &raw)?);
        }
    }

    Ok(())
}
