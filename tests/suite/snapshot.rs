//! Snapshot export

use pretty_assertions::assert_eq;
use serde_json::json;
use vault_types::{FieldValue, ResultVault};

use crate::common::{sample_vault, test_error};

#[test]
fn always_has_reserved_keys() {
    let snapshot = ResultVault::default().snapshot();
    let keys: Vec<&str> = snapshot.keys().collect();
    assert_eq!(keys, ["error_message", "status", "success"]);
}

#[test]
fn holds_open_data() {
    let snapshot = sample_vault().snapshot();
    assert_eq!(snapshot.get("test_1"), Some(&FieldValue::from("One")));
    assert_eq!(snapshot.get("test_2"), Some(&FieldValue::from("Two")));
    assert_eq!(snapshot.len(), 5);
}

#[test]
fn never_holds_exception() {
    let mut vault = sample_vault();
    vault.set_exception(test_error("hidden")).unwrap();

    let snapshot = vault.snapshot();
    assert!(!snapshot.contains_key("exception"));
    assert!(snapshot.contains_key("success"));
    assert!(snapshot.contains_key("status"));
    assert!(snapshot.contains_key("error_message"));
    assert_eq!(snapshot.get("error_message"), Some(&FieldValue::from("hidden")));
}

#[test]
fn unaffected_by_later_mutation() {
    let mut vault = sample_vault();
    let snapshot = vault.snapshot();

    vault.set("test_1", "changed").unwrap();
    vault.set("test_9", 9).unwrap();
    vault.set_success(true).unwrap();
    vault.set_status("done").unwrap();

    assert_eq!(snapshot.get("test_1"), Some(&FieldValue::from("One")));
    assert!(!snapshot.contains_key("test_9"));
    assert_eq!(snapshot.get("success"), Some(&FieldValue::from(false)));
    assert_eq!(snapshot.get("status"), Some(&FieldValue::NULL));
}

#[test]
fn owned_copies_do_not_reach_back() {
    let vault = sample_vault();
    let mut exported = vault.snapshot().to_json();
    exported["test_1"] = json!("tampered");
    exported["extra"] = json!(true);

    assert_eq!(vault.get("test_1").unwrap(), json!("One"));
    assert!(vault.get("extra").unwrap_err().is_unknown_member());
}

#[test]
fn json_rendering() {
    let mut vault = sample_vault();
    vault.set_ok(true).unwrap();
    vault.set_status(json!({"code": 200})).unwrap();

    assert_eq!(
        vault.snapshot().to_json(),
        json!({
            "success": true,
            "status": {"code": 200},
            "error_message": "",
            "test_1": "One",
            "test_2": "Two",
        })
    );
}

#[test]
fn iterates_pairs() {
    let snapshot = sample_vault().snapshot();
    let rendered: Vec<String> = snapshot
        .iter()
        .map(|(key, value)| format!("{key}={value}"))
        .collect();
    assert_eq!(
        rendered,
        [
            "error_message=",
            "status=null",
            "success=false",
            "test_1=One",
            "test_2=Two",
        ]
    );
}
