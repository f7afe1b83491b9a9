//! Common test utilities for optval integration tests
//!
//! Provides a shared server template and matching options.

#![allow(dead_code)]

use optval::{Descriptor, NestedTemplate, Template, TypeTag, template};
use serde_json::{Value, json};

// =============================================================================
// Test Templates
// =============================================================================

/// A server template covering every entry kind and most constraints
pub fn server_template() -> Template {
    template! {
        "name" => Descriptor::string().required().min_length(1).max_length(32),
        "port" => Descriptor::number().min_value(1.0).max_value(65535.0),
        "mode" => Descriptor::string().accepted_values(["fast", "safe"]),
        "user" => Descriptor::string().not_accepted_values(["root"]),
        "id" => Descriptor::string()
            .regex_format(r"^[a-z0-9-]+$")
            .expect("test pattern compiles"),
        "verbose" => TypeTag::Boolean,
        "conf" => TypeTag::FilePath,
        "data_dir" => Descriptor::folder_path(),
        "tags" => Descriptor::list(TypeTag::String).max_length(4),
        "db" => NestedTemplate::new(template! {
            "host" => Descriptor::string().required(),
            "pool" => template! {
                "size" => Descriptor::number().min_value(1.0).max_value(64.0),
            },
        })
        .required(),
    }
}

/// The same template in its JSON form
pub fn server_template_json() -> Value {
    json!({
        "name": { "type": "string", "required": true, "minLength": 1, "maxLength": 32 },
        "port": { "type": "number", "minValue": 1, "maxValue": 65535 },
        "mode": { "type": "string", "acceptedValues": ["fast", "safe"] },
        "user": { "type": "string", "notAcceptedValues": ["root"] },
        "id": { "type": "string", "regexFormat": "^[a-z0-9-]+$" },
        "verbose": "boolean",
        "conf": "file-path",
        "data_dir": { "type": "folder-path" },
        "tags": { "type": "list", "listContents": "string", "maxLength": 4 },
        "db": {
            "type": "object",
            "required": true,
            "host": { "type": "string", "required": true },
            "pool": {
                "type": "object",
                "size": { "type": "number", "minValue": 1, "maxValue": 64 },
            },
        },
    })
}

/// Options that satisfy `server_template`
pub fn valid_options() -> Value {
    json!({
        "name": "server-1",
        "port": 8080,
        "mode": "safe",
        "user": "app",
        "id": "srv-01",
        "verbose": true,
        "conf": "/etc/app.conf",
        "data_dir": "/var/lib/app",
        "tags": ["edge", "eu"],
        "db": {
            "host": "localhost",
            "pool": { "size": 8 },
        },
    })
}

/// `valid_options` with one top-level key replaced
pub fn options_with(key: &str, value: Value) -> Value {
    let mut options = valid_options();
    options[key] = value;
    options
}
