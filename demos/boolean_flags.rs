//! Boolean flags example
//!
//! Flags that are simply on or off, loaded from inline JSON.

use flagrule_sdk::{BooleanManager, DocumentFormat, FeatureManager};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let manager = BooleanManager::new();
    manager.load_document(r#"{"calendar-v2": true, "shop-v2": false}"#, DocumentFormat::Json)?;
    manager.add("search-v3", json!(true))?;

    for feature in ["calendar-v2", "shop-v2", "search-v3", "not-configured"] {
        println!("{:<16} {}", feature, manager.is_enabled(feature)?);
    }

    // Anything but true/false is rejected
    if let Err(err) = manager.add("broken", json!("yes")) {
        println!("\nRejected: {}", err);
    }

    Ok(())
}
