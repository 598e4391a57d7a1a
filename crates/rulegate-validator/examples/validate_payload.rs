//! Validate a business rule payload and print the wire response
//!
//! Run with: cargo run --example validate_payload
//! Set RUST_LOG=debug to see validator tracing output.

use rulegate_validator::{PayloadResponse, RuleValidator, ValidatorConfig};
use serde_json::json;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("=== Rule Payload Validation Example ===\n");

    let config = ValidatorConfig::load()?.enforce_safety_limits(true);
    let validator = RuleValidator::with_config(config);

    let payload = json!({
        "conditionExpression": {
            "operator": "AND",
            "rules": [
                { "field": "order.total", "operator": ">", "value": 1000 },
                { "operator": "OR", "rules": [
                    { "field": "customer.tier", "operator": "IN", "value": ["gold", "platinum"] },
                    { "field": "customer.email", "operator": "IS_NOT_EMPTY" }
                ]}
            ]
        },
        "successActions": [
            { "type": "ALLOW_TRANSITION" },
            { "type": "LOG", "config": { "message": "High value order approved", "level": "info" } }
        ],
        "failureActions": [
            { "type": "BLOCK_TRANSITION" },
            { "type": "NOTIFY", "config": { "message": "Order blocked" } }
        ]
    });

    let result = validator.validate_payload_value(&payload);
    let response = PayloadResponse::from(&result);

    println!("{}", serde_json::to_string_pretty(&response)?);

    for issue in &result.errors {
        for leaf in issue.leaves() {
            println!("  [{}] {}", leaf.code(), leaf);
        }
    }

    Ok(())
}
