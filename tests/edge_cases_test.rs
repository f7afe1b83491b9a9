//! Edge Cases Integration Tests
//!
//! Tests for edge cases, error conditions, and boundary behaviors:
//! - Options that are not mappings
//! - Null values and mixed numeric representations
//! - Malformed templates
//! - Shared templates across threads

mod common;

use common::{server_template, valid_options};
use optval::{Descriptor, Error, Template, TypeTag, ValidatedOptions, template, validate};
use serde_json::{Value, json};
use std::sync::Arc;
use std::thread;

// =============================================================================
// Non-mapping Options
// =============================================================================

#[test]
fn test_non_mapping_options_pass_through() {
    let template = server_template();

    for options in [json!([1, 2]), json!("text"), json!(42), json!(true), Value::Null] {
        let validated = ValidatedOptions::new(&template, &options).unwrap();
        assert_eq!(validated.to_object(), &options);
    }
}

#[test]
fn test_validate_rejects_malformed_template() {
    let template = template! { "s" => Descriptor::string().min_value(1.0) };

    let err = validate(&json!({ "s": "x" }), &template).unwrap_err();
    assert!(err.is_template_error());
}

#[test]
fn test_empty_template_accepts_anything() {
    let template = Template::new();
    assert!(validate(&valid_options(), &template).is_ok());
}

// =============================================================================
// Values
// =============================================================================

#[test]
fn test_null_is_not_any_type() {
    for tag in TypeTag::ALL {
        let template = template! { "key" => tag };
        let err = validate(&json!({ "key": null }), &template).unwrap_err();
        assert!(matches!(err, Error::TypeMismatch { .. }), "{tag}: {err}");
    }
}

#[test]
fn test_integer_and_float_bounds() {
    let template = template! {
        "ratio" => Descriptor::number().min_value(0.5).max_value(1.5),
    };

    assert!(validate(&json!({ "ratio": 1 }), &template).is_ok());
    assert!(validate(&json!({ "ratio": 0.5 }), &template).is_ok());

    let err = validate(&json!({ "ratio": 0.25 }), &template).unwrap_err();
    assert_eq!(err.to_string(), "Value of 'ratio' cannot be -0.5 or less.");
}

#[test]
fn test_accepted_numbers_compare_by_value() {
    let template = Template::from_value(&json!({
        "level": { "type": "number", "acceptedValues": [1, 2, 3] }
    }))
    .unwrap();

    assert!(validate(&json!({ "level": 2.0 }), &template).is_ok());

    let err = validate(&json!({ "level": 4 }), &template).unwrap_err();
    assert_eq!(
        err.to_string(),
        "Value '4' is not a valid option for 'level'. Valid options are: 1, 2, 3."
    );
}

#[test]
fn test_empty_list_below_min_length() {
    let template = Template::from_value(&json!({
        "labels": { "type": "list", "minLength": 1 },
    }))
    .unwrap();

    let err = validate(&json!({ "labels": [] }), &template).unwrap_err();
    assert!(matches!(err, Error::BelowMinLength { limit: 0, .. }));
}

#[test]
fn test_list_of_objects_is_not_inspected() {
    let template = template! { "items" => Descriptor::list(TypeTag::Object) };
    assert!(validate(&json!({ "items": [{ "a": 1 }, "b", 3] }), &template).is_ok());
}

#[test]
fn test_regex_matches_number_text() {
    let template = Template::from_value(&json!({
        "code": { "type": "number", "regexFormat": "^[0-9]{3}$" }
    }))
    .unwrap();

    assert!(validate(&json!({ "code": 200 }), &template).is_ok());
    assert!(matches!(
        validate(&json!({ "code": 2000 }), &template),
        Err(Error::FormatMismatch { .. })
    ));
}

#[test]
fn test_integral_float_matches_integer_format() {
    let template = Template::from_value(&json!({
        "year": { "type": "number", "regexFormat": "^\\d{4}$", "notAcceptedValues": [1] }
    }))
    .unwrap();

    assert!(validate(&json!({ "year": 2024.0 }), &template).is_ok());

    let err = validate(&json!({ "year": 1.0 }), &template).unwrap_err();
    assert_eq!(err.to_string(), "Value '1' is not allowed for 'year'.");
}

// =============================================================================
// Nested Constraints
// =============================================================================

#[test]
fn test_nested_object_constraints() {
    let template = Template::from_value(&json!({
        "env": { "type": "object", "required": true, "minLength": 1, "maxLength": 2 },
        "db": { "type": { "host": "string" }, "acceptedValues": [{ "host": "a" }, { "host": "b" }] },
    }))
    .unwrap();

    assert!(validate(&json!({ "env": { "A": "1" }, "db": { "host": "b" } }), &template).is_ok());

    let err = validate(&json!({ "env": {} }), &template).unwrap_err();
    assert_eq!(err.to_string(), "Length of 'env' cannot be 0 or less.");

    let err = validate(&json!({ "env": { "A": 1, "B": 2, "C": 3 } }), &template).unwrap_err();
    assert_eq!(err.to_string(), "Length of 'env' cannot be 3 or more.");

    let err = validate(&json!({ "env": { "A": 1 }, "db": { "host": 1 } }), &template).unwrap_err();
    assert_eq!(err.key(), Some("host"));

    let err = validate(&json!({ "env": { "A": 1 }, "db": { "host": "c" } }), &template).unwrap_err();
    assert!(matches!(err, Error::NotAccepted { ref key, .. } if key == "db"));
}

// =============================================================================
// Malformed Templates
// =============================================================================

#[test]
fn test_descriptor_without_type() {
    let err = Template::from_value(&json!({ "db": { "host": "string" } })).unwrap_err();
    assert_eq!(err, Error::MissingTemplateType { key: "db".into() });
    assert!(err.is_template_error());
}

#[test]
fn test_nested_descriptor_without_type() {
    let err = Template::from_value(&json!({
        "db": { "type": "object", "pool": { "size": "number" } }
    }))
    .unwrap_err();
    assert_eq!(err, Error::MissingTemplateType { key: "pool".into() });
}

#[test]
fn test_constraints_must_fit_type() {
    for bad in [
        json!({ "a": { "type": "string", "minValue": 1 } }),
        json!({ "a": { "type": "boolean", "maxLength": 1 } }),
        json!({ "a": { "type": "number", "minValue": 10, "maxValue": 1 } }),
        json!({ "a": { "type": "string", "listContents": "string" } }),
        json!({ "a": { "type": "list", "listContents": "integer" } }),
        json!({ "a": { "type": "string", "required": "yes" } }),
        json!({ "a": { "type": "string", "acceptedValues": "fast" } }),
        json!({ "a": { "type": "object", "minValue": 1 } }),
        json!({ "a": { "type": ["string"] } }),
    ] {
        let err = Template::from_value(&bad).unwrap_err();
        assert!(err.is_template_error(), "{bad}: {err}");
    }
}

// =============================================================================
// Concurrent Use
// =============================================================================

#[test]
fn test_shared_template_across_threads() {
    let template = Arc::new(server_template());
    let mut handles = vec![];

    for i in 0..8 {
        let template = Arc::clone(&template);
        handles.push(thread::spawn(move || {
            let mut options = valid_options();
            options["port"] = json!(1000 + i);
            ValidatedOptions::new(&template, options).map(|v| v.into_inner())
        }));
    }

    for (i, handle) in handles.into_iter().enumerate() {
        let options = handle.join().unwrap().unwrap();
        assert_eq!(options["port"], json!(1000 + i));
    }
}
