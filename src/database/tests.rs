use super::key::{is_valid_key, MAX_KEY_BYTES};
use super::models::ServerValue;
use super::query::ORDER_BY_KEY;
use super::*;
use crate::core::middleware::AuthMiddleware;
use httpmock::prelude::*;
use reqwest::Client;
use reqwest_middleware::ClientBuilder;
use serde_json::json;

fn plain_db(server: &MockServer) -> FirebaseDb {
    let client = ClientBuilder::new(Client::new()).build();
    FirebaseDb::new_with_client(client, server.base_url())
}

fn authed_db(server: &MockServer, token: &str) -> FirebaseDb {
    let client = ClientBuilder::new(Client::new())
        .with(AuthMiddleware::new(token))
        .build();
    FirebaseDb::new_with_client(client, server.base_url())
}

#[test]
fn accepts_plain_keys() {
    assert!(is_valid_key("abc"));
    assert!(is_valid_key("user_42-x~!"));
    assert!(is_valid_key("ünïcødé"));
}

#[test]
fn rejects_forbidden_characters() {
    for key in ["a.b", "a$b", "a#b", "a[b", "a]b", "a/b"] {
        assert!(!is_valid_key(key), "{key:?} should be rejected");
    }
}

#[test]
fn rejects_control_characters() {
    for b in (0u8..=0x1f).chain(std::iter::once(0x7f)) {
        let key = format!("a{}b", b as char);
        assert!(!is_valid_key(&key), "control byte {b:#04x} should be rejected");
    }
}

#[test]
fn enforces_byte_length_boundary() {
    assert!(is_valid_key(&"a".repeat(MAX_KEY_BYTES)));
    assert!(!is_valid_key(&"a".repeat(MAX_KEY_BYTES + 1)));

    // Multi-byte characters count by encoded length: 'é' is two bytes.
    assert!(is_valid_key(&"é".repeat(MAX_KEY_BYTES / 2)));
    assert!(!is_valid_key(&"é".repeat(MAX_KEY_BYTES / 2 + 1)));
}

#[tokio::test]
async fn appends_json_suffix_exactly_once() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/rooms/1.json");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"label": "Room A"}));
    });

    db.get("/rooms/1", false).await.unwrap();
    db.get("/rooms/1.json", false).await.unwrap();

    mock.assert_hits(2);
}

#[tokio::test]
async fn encodes_query_tokens_pairwise() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rooms.json")
            .query_param("shallow", "true");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"-A": true, "-B": true}));
    });

    let body = db.get("/rooms", true).await.unwrap();
    let parsed: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(parsed, json!({"-A": true, "-B": true}));

    mock.assert();
}

#[tokio::test]
async fn rejects_unbalanced_query_tokens_before_sending() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(GET);
        then.status(200);
    });

    let err = db
        .send(reqwest::Method::GET, "/rooms", None, &["shallow"])
        .await
        .unwrap_err();
    assert!(matches!(err, Error::UnbalancedQueryParams));

    mock.assert_hits(0);
}

#[tokio::test]
async fn auth_token_is_sole_parameter_when_no_others_exist() {
    let server = MockServer::start();
    let db = authed_db(&server, "sekret");

    let mock = server.mock(|when, then| {
        when.method(DELETE)
            .path("/rooms/1.json")
            .query_param("auth", "sekret");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!(null));
    });

    db.delete("/rooms/1").await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn auth_token_is_merged_after_other_parameters() {
    let server = MockServer::start();
    let db = authed_db(&server, "sekret");

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rooms.json")
            .query_param("shallow", "true")
            .query_param("auth", "sekret");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"-A": true}));
    });

    db.get("/rooms", true).await.unwrap();

    mock.assert();
}

#[tokio::test]
async fn put_serializes_value_and_discards_response() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(PUT)
            .path("/rooms/1.json")
            .json_body(json!({"label": "Room A", "created_on": {".sv": "timestamp"}}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"label": "Room A", "created_on": 1700000000000u64}));
    });

    db.put(
        "/rooms/1",
        &json!({"label": "Room A", "created_on": ServerValue::TIMESTAMP}),
    )
    .await
    .unwrap();

    mock.assert();
}

#[tokio::test]
async fn post_returns_generated_child_key() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(POST)
            .path("/rooms.json")
            .json_body(json!({"label": "Room A"}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"name": "-XYZ"}));
    });

    let name = db.post("/rooms", &json!({"label": "Room A"})).await.unwrap();
    assert_eq!(name, "-XYZ");

    mock.assert();
}

#[tokio::test]
async fn multi_path_patch_commits_once_with_last_write_winning() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(PATCH)
            .path("/rooms/1.json")
            .json_body(json!({"a": 3, "b": 2}));
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"a": 3, "b": 2}));
    });

    db.patch_multi_path("/rooms/1")
        .add("a", 1)
        .unwrap()
        .add("b", 2)
        .unwrap()
        .add("a", 3)
        .unwrap()
        .apply()
        .await
        .unwrap();

    mock.assert();
}

#[tokio::test]
async fn filtered_get_quotes_order_by_and_includes_limit() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(GET)
            .path("/rooms.json")
            .query_param("orderBy", "\"$key\"")
            .query_param("limitToFirst", "1");
        then.status(200)
            .header("content-type", "application/json")
            .json_body(json!({"-A": {"label": "Room A"}}));
    });

    let filter = Filter::order_by(ORDER_BY_KEY).limit_to_first(1);
    db.get_filtered("/rooms", &filter).await.unwrap();

    mock.assert();
}

#[test]
fn filter_omits_unset_parameters() {
    let filter = Filter::order_by(ORDER_BY_KEY).limit_to_first(1);
    assert_eq!(
        filter.to_query_params(),
        vec!["orderBy", "\"$key\"", "limitToFirst", "1"]
    );
}

#[test]
fn filter_includes_range_parameters_when_set() {
    let filter = Filter::order_by("height")
        .start_at("10")
        .end_at("20")
        .limit_to_last(5);
    assert_eq!(
        filter.to_query_params(),
        vec![
            "orderBy",
            "\"height\"",
            "startAt",
            "10",
            "endAt",
            "20",
            "limitToLast",
            "5"
        ]
    );
}

#[test]
fn server_timestamp_serializes_to_sentinel_shape() {
    let encoded = serde_json::to_string(&ServerValue::TIMESTAMP).unwrap();
    assert_eq!(encoded, r#"{".sv":"timestamp"}"#);
}

#[tokio::test]
async fn non_success_status_surfaces_api_error() {
    let server = MockServer::start();
    let db = plain_db(&server);

    let mock = server.mock(|when, then| {
        when.method(GET).path("/secret.json");
        then.status(401)
            .header("content-type", "application/json")
            .json_body(json!({"error": "Permission denied"}));
    });

    let err = db.get("/secret", false).await.unwrap_err();
    match err {
        Error::Api { status, message } => {
            assert_eq!(status, StatusCode::UNAUTHORIZED);
            assert_eq!(message, "Permission denied");
        }
        other => panic!("unexpected error: {other}"),
    }

    mock.assert();
}
