// Basic usage example for optval
//
// Run with: cargo run --example basic_usage

use optval::{Descriptor, NestedTemplate, TypeTag, ValidatedOptions, template};
use serde_json::json;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::init();

    let template = template! {
        "name" => Descriptor::string().required().min_length(1),
        "port" => Descriptor::number().min_value(1.0).max_value(65535.0),
        "mode" => Descriptor::string().accepted_values(["fast", "safe"]),
        "conf" => TypeTag::FilePath,
        "tags" => Descriptor::list(TypeTag::String),
        "db" => NestedTemplate::new(template! {
            "host" => Descriptor::string().required(),
        }),
    };

    println!("🔍 optval Basic Usage Example\n");

    // Valid options
    println!("✅ Validating good options...");
    let options = json!({
        "name": "server-1",
        "port": 8080,
        "mode": "safe",
        "conf": "/etc/app.conf",
        "tags": ["edge", "eu"],
        "db": { "host": "localhost" },
    });
    let validated = ValidatedOptions::new(&template, &options)?;
    println!("   Validated: {}\n", validated.to_object());

    // Each of these breaks exactly one rule
    let broken = [
        json!({ "port": 80 }),
        json!({ "name": "a", "port": 70000 }),
        json!({ "name": "a", "mode": "turbo" }),
        json!({ "name": "a", "conf": "not a path" }),
        json!({ "name": "a", "tags": ["a", 2] }),
        json!({ "name": "a", "db": { "port": 5432 } }),
    ];

    for options in &broken {
        println!("❌ Validating {options}...");
        match ValidatedOptions::new(&template, options) {
            Ok(_) => println!("   Unexpected success\n"),
            Err(e) => println!("   Expected error: {e}\n"),
        }
    }

    println!("✨ Basic usage example complete!");

    Ok(())
}
