use anyhow::Result;
use fcm_package::{ValidationError, build_package_from_value};
use serde_json::json;

/// Test: Untyped parameters with every field set build the same package shape
#[test]
fn test_dynamic_full_package() -> Result<()> {
    let params = json!({
        "registration_ids": ["id1"],
        "condition": "'dogs' in topics || 'cats' in topics",
        "priority": "normal",
        "time_to_live": 3600,
        "content_available": true,
        "data": { "custom": "x" },
        "notification": { "title": "Hello", "badge": 1 },
    });

    let (package, notices) = build_package_from_value(&params)?;

    assert!(notices.is_empty());
    assert_eq!(package.to_value()?, params);

    Ok(())
}

/// Test: registration_ids must be a list of strings
#[test]
fn test_dynamic_registration_ids_type() {
    let err = build_package_from_value(&json!({ "registration_ids": "not-a-list" })).unwrap_err();
    assert!(
        matches!(&err, ValidationError::InvalidType { field, expected: "list", .. } if field == "registration_ids"),
        "Unexpected error: {:?}",
        err
    );

    let err = build_package_from_value(&json!({ "registration_ids": [123] })).unwrap_err();
    assert!(
        matches!(&err, ValidationError::InvalidType { field, expected: "str", .. } if field == "registration_ids[0]"),
        "Unexpected error: {:?}",
        err
    );

    let err = build_package_from_value(&json!({ "to": "a" })).unwrap_err();
    assert_eq!(err, ValidationError::MissingField("registration_ids"));
}

/// Test: registration_ids are validated before any optional field
#[test]
fn test_dynamic_registration_ids_checked_first() {
    let err = build_package_from_value(&json!({
        "registration_ids": [1],
        "priority": "urgent",
    }))
    .unwrap_err();

    assert!(err.is_generic(), "Expected a type error, got {:?}", err);
}

/// Test: Empty registration_ids win over an unknown parameter
#[test]
fn test_dynamic_empty_registration_ids_before_unknown_field() {
    let err = build_package_from_value(&json!({
        "registration_ids": [],
        "bogus": 1,
    }))
    .unwrap_err();

    assert_eq!(err, ValidationError::EmptyRegistrationIds);

    let err = build_package_from_value(&json!({
        "registration_ids": [],
        "time_to_live": 5_000_000,
        "data": { "gcm.foo": "x" },
    }))
    .unwrap_err();

    assert_eq!(err, ValidationError::EmptyRegistrationIds);
}

/// Test: Value rules run after every field has the right type
#[test]
fn test_dynamic_type_errors_before_value_errors() {
    let err = build_package_from_value(&json!({
        "registration_ids": ["a"],
        "priority": "urgent",
        "dry_run": "yes",
    }))
    .unwrap_err();

    assert!(
        matches!(&err, ValidationError::InvalidType { field, .. } if field == "dry_run"),
        "Unexpected error: {:?}",
        err
    );
}

/// Test: Null fields count as absent
#[test]
fn test_dynamic_null_fields_are_omitted() -> Result<()> {
    let (package, _) = build_package_from_value(&json!({
        "registration_ids": ["id1"],
        "to": null,
        "dry_run": null,
        "data": null,
    }))?;

    assert_eq!(package.to_value()?, json!({ "registration_ids": ["id1"] }));

    Ok(())
}

/// Test: Wrong scalar types map to the right error kind
#[test]
fn test_dynamic_scalar_types() {
    let cases = [
        (json!({ "registration_ids": ["a"], "dry_run": "yes" }), "dry_run"),
        (json!({ "registration_ids": ["a"], "delay_while_idle": 1 }), "delay_while_idle"),
        (json!({ "registration_ids": ["a"], "collapse_key": 7 }), "collapse_key"),
        (json!({ "registration_ids": ["a"], "to": ["x"] }), "to"),
        (json!({ "registration_ids": ["a"], "restricted_package_name": false }), "restricted_package_name"),
    ];

    for (params, expected_field) in cases {
        let err = build_package_from_value(&params).unwrap_err();
        assert!(
            matches!(&err, ValidationError::InvalidType { field, .. } if field == expected_field),
            "Expected type error on {}, got {:?}",
            expected_field,
            err
        );
    }
}

/// Test: Time to live rejects non-integers, negatives and values over four weeks
#[test]
fn test_dynamic_time_to_live() -> Result<()> {
    for ttl in [json!("60"), json!(-1), json!(1.5), json!(2_419_201), json!(u64::MAX)] {
        let err = build_package_from_value(&json!({ "registration_ids": ["a"], "time_to_live": ttl.clone() }))
            .unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidTimeToLive(_)),
            "Expected InvalidTimeToLive for {}, got {:?}",
            ttl,
            err
        );
    }

    let (package, _) =
        build_package_from_value(&json!({ "registration_ids": ["a"], "time_to_live": 2_419_200 }))?;
    assert_eq!(package.time_to_live(), Some(2_419_200));

    Ok(())
}

/// Test: Non-string priorities are invalid priorities
#[test]
fn test_dynamic_priority_type() {
    let err = build_package_from_value(&json!({ "registration_ids": ["a"], "priority": 10 }))
        .unwrap_err();

    assert_eq!(err, ValidationError::InvalidPriority("10".to_string()));
}

/// Test: Data values must be strings and keys must not be reserved
#[test]
fn test_dynamic_data_rules() {
    let err = build_package_from_value(&json!({
        "registration_ids": ["a"],
        "data": { "count": 3 },
    }))
    .unwrap_err();
    assert!(
        matches!(&err, ValidationError::InvalidType { field, .. } if field == "data['count']"),
        "Unexpected error: {:?}",
        err
    );

    for key in ["gcm.foo", "from", "notification"] {
        let err = build_package_from_value(&json!({
            "registration_ids": ["a"],
            "data": { key: "x" },
        }))
        .unwrap_err();
        assert!(
            matches!(err, ValidationError::InvalidDataKey { .. }),
            "Key {} should be rejected, got {:?}",
            key,
            err
        );
    }

    let err = build_package_from_value(&json!({ "registration_ids": ["a"], "data": ["x"] }))
        .unwrap_err();
    assert!(err.is_generic());
}

/// Test: Notification values outside strings and numbers are rejected
#[test]
fn test_dynamic_notification_schema() {
    let err = build_package_from_value(&json!({
        "registration_ids": ["a"],
        "notification": { "title": { "nested": true } },
    }))
    .unwrap_err();

    assert!(
        matches!(&err, ValidationError::InvalidType { field, .. } if field == "notification['title']"),
        "Unexpected error: {:?}",
        err
    );

    let err = build_package_from_value(&json!({ "registration_ids": ["a"], "notification": "hi" }))
        .unwrap_err();
    assert!(err.is_generic());
}

/// Test: Conflicting targets and unknown parameters are rejected
#[test]
fn test_dynamic_shape_errors() {
    let err = build_package_from_value(&json!({
        "registration_ids": ["a"],
        "to": "a",
        "condition": "'x' in topics",
    }))
    .unwrap_err();
    assert_eq!(err, ValidationError::ConflictingTarget);

    let err = build_package_from_value(&json!({ "registration_ids": ["a"], "conditions": "x" }))
        .unwrap_err();
    assert_eq!(err, ValidationError::UnknownField("conditions".to_string()));

    let err = build_package_from_value(&json!(["a"])).unwrap_err();
    assert!(err.is_generic());
}

/// Test: notification_key produces a notice in the dynamic path too
#[test]
fn test_dynamic_notification_key_notice() -> Result<()> {
    let (package, notices) = build_package_from_value(&json!({
        "registration_ids": ["a"],
        "notification_key": "group",
    }))?;

    assert_eq!(notices.len(), 1);
    assert_eq!(package.to_value()?["notification_key"], json!("group"));

    Ok(())
}
