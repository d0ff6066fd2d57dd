//! Request Handler Tests
//!
//! These tests verify:
//! - Request parsing from names and positional arguments
//! - Dispatch of each request against a store file
//! - Failures come back as `Reply::Error` instead of panicking

use std::path::{Path, PathBuf};

use monokv::{Config, FileStore, Handler, MonoError, Reply, Request};
use tempfile::TempDir;

// =============================================================================
// Helper Functions
// =============================================================================

fn args(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}

fn setup() -> (TempDir, PathBuf, Handler) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chat.json");
    (temp_dir, path, Handler::default())
}

fn path_arg(path: &Path) -> String {
    path.display().to_string()
}

fn pairs(items: &[(&str, &str)]) -> Vec<(String, String)> {
    items
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
}

// =============================================================================
// Parsing Tests
// =============================================================================

#[test]
fn test_parse_ping() {
    assert_eq!(Request::parse("ping", &[]).unwrap(), Request::Ping);
    assert!(Request::parse("ping", &args(&["extra"])).is_err());
}

#[test]
fn test_parse_add_fields() {
    let request =
        Request::parse("add_fields", &args(&["db.json", "k1", "sk1", "val1", "sk2", "toilet"]))
            .unwrap();

    assert_eq!(
        request,
        Request::AddFields {
            path: PathBuf::from("db.json"),
            identifier: "k1".to_string(),
            pairs: pairs(&[("sk1", "val1"), ("sk2", "toilet")]),
        }
    );
    assert_eq!(request.name(), "add_fields");
}

#[test]
fn test_parse_add_fields_dangling_sub_key() {
    let result = Request::parse("add_fields", &args(&["db.json", "k1", "sk1", "val1", "sk2"]));

    match result {
        Err(MonoError::Protocol(message)) => assert!(message.contains("sk2")),
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[test]
fn test_parse_add_fields_too_few() {
    assert!(Request::parse("add_fields", &args(&["db.json", "k1", "sk1"])).is_err());
}

#[test]
fn test_parse_list_values_defaults() {
    let request = Request::parse("list_values", &args(&["db.json", "k1"])).unwrap();

    assert_eq!(
        request,
        Request::ListValues {
            path: PathBuf::from("db.json"),
            identifier: "k1".to_string(),
            with_keys: true,
            raw: false,
        }
    );
}

#[test]
fn test_parse_list_values_flags() {
    let request = Request::parse("list_values", &args(&["db.json", "k1", "no", "TRUE"])).unwrap();

    match request {
        Request::ListValues { with_keys, raw, .. } => {
            assert!(!with_keys);
            assert!(raw);
        }
        other => panic!("Expected ListValues, got {:?}", other),
    }

    assert!(Request::parse("list_values", &args(&["db.json", "k1", "maybe"])).is_err());
}

#[test]
fn test_parse_unknown_request() {
    match Request::parse("explode", &[]) {
        Err(MonoError::Protocol(message)) => assert_eq!(message, "Unknown request: explode"),
        other => panic!("Expected Protocol error, got {:?}", other),
    }
}

#[test]
fn test_parse_wrong_argument_counts() {
    assert!(Request::parse("set_value", &args(&["db.json", "k1", "sk1"])).is_err());
    assert!(Request::parse("list_keys", &[]).is_err());
    assert!(Request::parse("delete_key", &args(&["db.json"])).is_err());
    assert!(Request::parse("delete_all", &args(&["db.json", "now"])).is_err());
}

// =============================================================================
// Reply Tests
// =============================================================================

#[test]
fn test_reply_display() {
    assert_eq!(Reply::Success.to_string(), "Success");
    assert_eq!(Reply::Pong.to_string(), "pong");
    assert_eq!(
        Reply::Keys(vec!["k1".to_string(), "k2".to_string()]).to_string(),
        r#"["k1","k2"]"#
    );
    assert_eq!(Reply::error("boom").to_string(), "error: boom");
}

#[test]
fn test_reply_is_success() {
    assert!(Reply::Success.is_success());
    assert!(Reply::Values(vec![]).is_success());
    assert!(!Reply::error("boom").is_success());
}

// =============================================================================
// Dispatch Tests
// =============================================================================

#[test]
fn test_ping() {
    let handler = Handler::default();

    assert_eq!(handler.dispatch(Request::Ping), Reply::Pong);
    assert_eq!(handler.handle_named("ping", &[]), Reply::Pong);
}

#[test]
fn test_request_round_trip_scenario() {
    let (_dir, path, handler) = setup();
    let p = path_arg(&path);

    let reply = handler.handle_named("add_fields", &args(&[p.as_str(), "k1", "sk1", "val1", "sk2", "toilet"]));
    assert_eq!(reply, Reply::Success);

    assert_eq!(
        handler.handle_named("list_keys", &args(&[p.as_str()])),
        Reply::Keys(vec!["k1".to_string()])
    );
    assert_eq!(
        handler.handle_named("list_values", &args(&[p.as_str(), "k1"])),
        Reply::Values(vec!["sk1: val1".to_string(), "sk2: toilet".to_string()])
    );

    assert_eq!(
        handler.handle_named("set_value", &args(&[p.as_str(), "k1", "sk2", "sigma"])),
        Reply::Success
    );
    assert_eq!(
        handler.handle_named("list_values", &args(&[p.as_str(), "k1", "false"])),
        Reply::Values(vec!["val1".to_string(), "sigma".to_string()])
    );

    assert_eq!(
        handler.handle_named("delete_key", &args(&[p.as_str(), "k1"])),
        Reply::Success
    );
    assert_eq!(
        handler.handle_named("list_keys", &args(&[p.as_str()])),
        Reply::Keys(vec![])
    );
}

#[test]
fn test_add_fields_replaces_existing_record() {
    let (_dir, path, handler) = setup();

    handler.add_fields(&path, "k1", &pairs(&[("a", "1"), ("b", "2")]));
    handler.add_fields(&path, "k1", &pairs(&[("c", "3")]));

    assert_eq!(
        handler.list_values(&path, "k1", true, false),
        Reply::Values(vec!["c: 3".to_string()])
    );
}

#[test]
fn test_add_fields_pair_limit() {
    let (_dir, path, handler) = setup();
    let too_many = pairs(&[
        ("a", "1"),
        ("b", "2"),
        ("c", "3"),
        ("d", "4"),
        ("e", "5"),
        ("f", "6"),
    ]);

    let reply = handler.add_fields(&path, "k1", &too_many);

    assert!(!reply.is_success());
    assert!(!path.exists());
    assert_eq!(handler.add_fields(&path, "k1", &too_many[..5]), Reply::Success);
}

#[test]
fn test_add_fields_custom_pair_limit() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("chat.json");
    let config = Config::builder().max_field_pairs(3).build().unwrap();
    let handler = Handler::new(config);

    let four = pairs(&[("a", "1"), ("b", "2"), ("c", "3"), ("d", "4")]);

    assert!(!handler.add_fields(&path, "k", &four).is_success());
    assert!(handler.add_fields(&path, "k", &four[..3]).is_success());
}

#[test]
fn test_add_fields_requires_a_pair() {
    let (_dir, path, handler) = setup();

    assert!(!handler.add_fields(&path, "k1", &[]).is_success());
}

#[test]
fn test_add_fields_unsupported_character() {
    let (_dir, path, handler) = setup();

    let reply = handler.add_fields(&path, "k1", &pairs(&[("a", "naïve")]));

    match reply {
        Reply::Error(message) => assert!(message.contains('ï')),
        other => panic!("Expected Error reply, got {:?}", other),
    }
}

#[test]
fn test_set_value_missing_sub_key_is_error_reply() {
    let (_dir, path, handler) = setup();
    handler.add_fields(&path, "k1", &pairs(&[("sk1", "val1")]));

    match handler.set_value(&path, "k1", "sk9", "x") {
        Reply::Error(message) => assert!(message.contains("not found")),
        other => panic!("Expected Error reply, got {:?}", other),
    }
}

#[test]
fn test_list_values_raw_reply() {
    let (_dir, path, handler) = setup();
    handler.add_fields(&path, "k1", &pairs(&[("sk1", "val1")]));

    assert_eq!(
        handler.list_values(&path, "k1", false, true),
        Reply::Values(vec!["23724622312".to_string()])
    );
}

#[test]
fn test_delete_key_missing_is_error_reply() {
    let (_dir, path, handler) = setup();

    assert!(!handler.delete_key(&path, "ghost").is_success());
}

#[test]
fn test_delete_all_clears_without_prompt() {
    let (_dir, path, handler) = setup();
    handler.add_fields(&path, "k1", &pairs(&[("sk1", "val1")]));
    handler.add_fields(&path, "k2", &pairs(&[("sk1", "val2")]));

    assert_eq!(handler.delete_all(&path), Reply::Success);
    assert!(FileStore::at_path(&path).list_keys().unwrap().is_empty());
}

#[test]
fn test_handle_named_rejects_bad_requests() {
    let handler = Handler::default();

    assert!(matches!(
        handler.handle_named("explode", &[]),
        Reply::Error(_)
    ));
    assert!(matches!(
        handler.handle_named("add_fields", &args(&["x.json", "k1"])),
        Reply::Error(_)
    ));
}
