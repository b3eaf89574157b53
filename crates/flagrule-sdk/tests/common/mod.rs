//! Common test utilities for SDK integration tests

#![allow(dead_code)]

use flagrule_sdk::RawContext;
use serde_json::{json, Map, Value};

/// Convert a JSON object fixture into a raw context
pub fn raw(value: Value) -> RawContext {
    match value {
        Value::Object(map) => map,
        other => panic!("Expected object fixture, got {}", other),
    }
}

/// Raw context carrying a user record
pub fn with_user(email: &str) -> RawContext {
    raw(json!({ "user": { "email": email } }))
}

/// Context builder projecting a user record into `user_email`
pub fn project_user(raw: &RawContext) -> Value {
    let mut context = Map::new();
    if let Some(email) = raw.get("user").and_then(|user| user.get("email")) {
        context.insert("user_email".to_string(), email.clone());
    }
    Value::Object(context)
}

/// Feature admitting the listed emails at the given rollout
pub fn email_feature(emails: &[&str], rollout: Option<u32>) -> Value {
    let mut segment = json!({
        "name": "internal user",
        "conditions": [
            { "property": "user_email", "op": "in", "value": emails }
        ]
    });
    if let Some(rollout) = rollout {
        segment["rollout"] = json!(rollout);
    }
    json!({ "segments": [segment] })
}
