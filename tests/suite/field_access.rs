//! Reserved and open field access

use pretty_assertions::assert_eq;
use serde_json::json;
use vault_types::{FieldValue, ResultVault, SUCCESS_ALIASES, VaultError};

use crate::common::{sample_vault, test_error};

#[test]
fn construct_with_message_and_data() {
    let vault = ResultVault::new([
        ("error_message", FieldValue::from("missing user")),
        ("user_id", FieldValue::from(123)),
    ])
    .unwrap();

    assert!(!vault.success());
    assert_eq!(vault.get("user_id").unwrap(), json!(123));
    assert_eq!(vault.error_message(), "missing user");
}

#[test]
fn construction_records_each_pair() {
    let vault = ResultVault::new([("meth_1", "answer_1"), ("meth_2", "answer_2")]).unwrap();
    let snapshot = vault.snapshot();
    assert_eq!(snapshot.get("meth_1"), Some(&FieldValue::from("answer_1")));
    assert_eq!(snapshot.get("meth_2"), Some(&FieldValue::from("answer_2")));
}

#[test]
fn construction_failure_returns_no_vault() {
    let result = ResultVault::new([
        ("user_id", FieldValue::from(1)),
        ("\"meth_1\"", FieldValue::from("answer_1")),
    ]);
    assert!(matches!(result, Err(VaultError::Validation { .. })));
}

#[test]
fn set_then_get_round_trips() {
    let mut vault = ResultVault::default();
    let cases = [
        ("user_id", json!(123)),
        ("user_name", json!("Test User")),
        ("ratio", json!(0.25)),
        ("tags", json!(["a", "b"])),
        ("nested", json!({"depth": {"level": 2}})),
        ("nothing", json!(null)),
        ("_hidden", json!(false)),
        ("CamelCase", json!("kept as written")),
    ];

    for (key, value) in &cases {
        vault.set(key, value.clone()).unwrap();
    }
    for (key, value) in &cases {
        assert_eq!(vault.get(key).unwrap(), *value, "round trip for {key}");
    }
}

#[test]
fn non_identifier_keys_fail_everywhere() {
    for key in ["\"test_5\"", "'test_5'", "test-5", "5test", "", "with space", "name="] {
        assert!(
            ResultVault::new([(key, 1)]).unwrap_err().is_validation(),
            "construction with {key:?}"
        );

        let mut vault = sample_vault();
        assert!(vault.set(key, 1).unwrap_err().is_validation(), "set with {key:?}");
        assert!(
            vault.update([(key, 1)]).unwrap_err().is_validation(),
            "update with {key:?}"
        );
    }
}

#[test]
fn undeclared_field_is_unknown_until_written() {
    let mut vault = sample_vault();
    assert_eq!(
        vault.get("foo").unwrap_err(),
        VaultError::UnknownMember {
            name: "foo".to_string()
        }
    );
    vault.set("foo", 1).unwrap();
    assert_eq!(vault.get("foo").unwrap(), json!(1));
}

#[test]
fn success_is_identical_across_aliases() {
    let expected = {
        let mut vault = sample_vault();
        vault.set_success(true).unwrap();
        vault.snapshot()
    };

    for alias in SUCCESS_ALIASES {
        let mut vault = sample_vault();
        assert!(!vault.success());
        vault.set(alias, true).unwrap();
        assert!(vault.success(), "{alias}");
        assert_eq!(vault.snapshot(), expected, "{alias}");
        for reader in SUCCESS_ALIASES {
            assert_eq!(vault.get(reader).unwrap(), json!(true), "{alias} read as {reader}");
        }
    }
}

#[test]
fn typed_alias_setters_reach_success() {
    type Setter = fn(&mut ResultVault, FieldValue) -> Result<(), VaultError>;
    let setters: [Setter; 6] = [
        |v, x| v.set_success(x),
        |v, x| v.set_ok(x),
        |v, x| v.set_good(x),
        |v, x| v.set_pass(x),
        |v, x| v.set_passed(x),
        |v, x| v.set_succeeded(x),
    ];
    for setter in setters {
        let mut vault = sample_vault();
        setter(&mut vault, FieldValue::from(true)).unwrap();
        assert!(vault.success());
    }
}

#[test]
fn status_defaults_to_absent() {
    let mut vault = sample_vault();
    assert!(vault.status().is_none());
    assert_eq!(vault.get("status").unwrap(), json!(null));
    vault.set_status("test_status").unwrap();
    assert_eq!(vault.get("status").unwrap(), json!("test_status"));
}

#[test]
fn exception_requires_an_error_value() {
    let mut vault = sample_vault();
    let err = vault.set_exception("My error message").unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("error value"));

    let error = test_error("argument error");
    vault.set_exception(error.clone()).unwrap();
    assert_eq!(vault.get("exception").unwrap(), error);
    assert_eq!(
        vault.exception().map(ToString::to_string).as_deref(),
        Some("argument error")
    );
}

#[test]
fn exception_fills_blank_message_only() {
    let mut vault = sample_vault();
    vault.set_exception(test_error("first")).unwrap();
    assert_eq!(vault.error_message(), "first");

    vault.set_exception(test_error("second")).unwrap();
    assert_eq!(vault.error_message(), "first");
}

#[test]
fn error_message_defaults_to_empty() {
    let mut vault = sample_vault();
    assert!(vault.error_message().is_empty());
    vault.set_error_message("Test Message").unwrap();
    assert_eq!(vault.error_message(), "Test Message");
}

#[test]
fn data_cannot_be_assigned() {
    let mut vault = sample_vault();
    let err = vault.set("data", json!({"test_1": "tester"})).unwrap_err();
    assert!(err.is_validation());
    assert!(err.to_string().contains("use update to set or update results"));
}

#[test]
fn open_fields_may_hold_errors() {
    let mut vault = sample_vault();
    let cause = test_error("root cause");
    vault.set("cause", cause.clone()).unwrap();
    assert_eq!(vault.field("cause"), Some(&cause));
    assert!(vault.exception().is_none());
}
