// Copyright (c) AlphaVelocity.
// All rights reserved.
//
// This source code is licensed under the license found in the
// LICENSE file in the root directory of this source tree.

use std::io::Write;

use finassist::api::{self, ApiClient};
use finassist::app::App;
use finassist::commands::auth::{login_flow, register_flow};
use finassist::config::{AuthMode, Config};
use finassist::error::ApiError;
use finassist::guard::Route;
use finassist::models::{UserCreate, UserLogin};
use finassist::store::LocalStore;
use rust_decimal::Decimal;
use serde_json::json;
use tempfile::NamedTempFile;
use tokio::runtime::Runtime;
use wiremock::matchers::{body_string_contains, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn setup() -> (Runtime, MockServer) {
    let rt = Runtime::new().unwrap();
    let server = rt.block_on(MockServer::start());
    (rt, server)
}

fn config(server: &MockServer) -> Config {
    Config {
        api_url: format!("{}/api", server.uri()),
        api_key: "test-key".into(),
        auth_mode: AuthMode::Remote,
        ..Config::default()
    }
}

fn mount(rt: &Runtime, server: &MockServer, mock: Mock) {
    rt.block_on(mock.mount(server));
}

fn user_json() -> serde_json::Value {
    json!({
        "id": 7, "email": "ada@example.com", "first_name": "Ada", "last_name": "Lovelace",
        "is_active": true, "created_at": "2025-01-01T10:00:00+00:00", "updated_at": "2025-01-01T10:00:00"
    })
}

fn new_user() -> UserCreate {
    UserCreate {
        email: "ada@example.com".into(),
        first_name: "Ada".into(),
        last_name: "Lovelace".into(),
        password: "12345678".into(),
    }
}

#[test]
fn every_request_carries_api_key_and_protected_ones_the_bearer() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/finance/transactions"))
            .and(query_param("skip", "5"))
            .and(query_param("limit", "10"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "abc", "token_type": "bearer", "expires_in": 1800
            }))),
    );

    let api = ApiClient::new(&config(&server))
        .unwrap()
        .with_token(Some("tok-123".into()));
    assert!(api::finance::transactions(&api, 5, 10).unwrap().is_empty());
    api::auth::login(
        &api,
        &UserLogin {
            username: "ada@example.com".into(),
            password: "pw".into(),
        },
    )
    .unwrap();

    let requests = rt.block_on(server.received_requests()).unwrap();
    assert_eq!(requests.len(), 2);
    for req in &requests {
        assert_eq!(req.headers.get("x-api-key").unwrap(), "test-key");
    }
    let listing = &requests[0];
    assert_eq!(
        listing.headers.get("authorization").unwrap(),
        "Bearer tok-123"
    );
    let login = &requests[1];
    assert!(login.headers.get("authorization").is_none());
}

#[test]
fn no_bearer_without_a_token() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("GET"))
            .and(path("/api/finance/yearly-summary"))
            .and(query_param("year", "2025"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Not authenticated"}))),
    );
    let api = ApiClient::new(&config(&server)).unwrap();
    let err = api::finance::yearly_summary(&api, 2025).unwrap_err();
    match err {
        ApiError::Status { status, detail } => {
            assert_eq!(status.as_u16(), 401);
            assert_eq!(detail.as_deref(), Some("Not authenticated"));
        }
        other => panic!("unexpected error {:?}", other),
    }
    let requests = rt.block_on(server.received_requests()).unwrap();
    assert!(requests[0].headers.get("authorization").is_none());
}

#[test]
fn login_is_form_encoded_and_401_maps_to_invalid_credentials() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .and(header("content-type", "application/x-www-form-urlencoded"))
            .and(body_string_contains("username=ada%40example.com"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({"detail": "Incorrect"}))),
    );
    let api = ApiClient::new(&config(&server)).unwrap();
    let err = api::auth::login(
        &api,
        &UserLogin {
            username: "ada@example.com".into(),
            password: "bad".into(),
        },
    )
    .unwrap_err();
    assert!(matches!(err, ApiError::InvalidCredentials));
}

#[test]
fn remote_login_flow_stores_token_and_navigates() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "h.eyJzdWIiOiIxIiwiZXhwIjo0MTAyNDQ0ODAwfQ.s",
                "token_type": "bearer", "expires_in": 1800
            }))),
    );
    let app = App::new(config(&server), LocalStore::in_memory().unwrap()).unwrap();
    let creds = UserLogin {
        username: "ada@example.com".into(),
        password: "12345678".into(),
    };
    assert_eq!(login_flow(&app.session, &creds), Ok(Route::Dashboard));
    assert!(app.session.is_authenticated());
}

#[test]
fn register_duplicate_email_is_reported() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Email already registered"})),
            ),
    );
    let app = App::new(config(&server), LocalStore::in_memory().unwrap()).unwrap();
    assert!(matches!(
        api::auth::register(&app.api(), &new_user()),
        Err(ApiError::AlreadyRegistered)
    ));
    assert_eq!(
        register_flow(&app.api(), &app.session, &new_user()),
        Err("This email is already registered")
    );
}

#[test]
fn register_then_failed_login_sends_user_to_login_page() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/register"))
            .respond_with(ResponseTemplate::new(200).set_body_json(user_json())),
    );
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/auth/login"))
            .respond_with(ResponseTemplate::new(500)),
    );
    let app = App::new(config(&server), LocalStore::in_memory().unwrap()).unwrap();
    assert_eq!(
        register_flow(&app.api(), &app.session, &new_user()),
        Ok(Route::Login)
    );
    assert_eq!(app.session.token(), None);
}

#[test]
fn create_transaction_sends_numeric_amount() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/finance/transactions"))
            .and(body_string_contains(r#""amount":42.1"#))
            .and(body_string_contains(r#""transaction_type":"expense""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1, "user_id": 7, "date": "2025-03-04T00:00:00", "description": "Groceries",
                "amount": 42.1, "category": "Food", "transaction_type": "expense",
                "source": "manual", "created_at": "2025-03-04T09:00:00+00:00",
                "updated_at": "2025-03-04T09:00:00+00:00"
            }))),
    );
    let form = finassist::forms::TransactionForm {
        date: "2025-03-04".into(),
        description: "Groceries".into(),
        amount: "42.10".into(),
        category: Some("Food".into()),
        transaction_type: "expense".into(),
        source: None,
    };
    let api = ApiClient::new(&config(&server)).unwrap();
    let tx = api::finance::create_transaction(&api, &form.validate().unwrap()).unwrap();
    assert_eq!(tx.amount, Decimal::new(421, 1));
    assert_eq!(tx.category.as_deref(), Some("Food"));
}

#[test]
fn bank_statement_goes_up_as_multipart_file() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/upload/bank-statement"))
            .and(body_string_contains(r#"name="file""#))
            .and(body_string_contains("%PDF-1.4 fake"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([]))),
    );
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "%PDF-1.4 fake").unwrap();
    file.flush().unwrap();

    let api = ApiClient::new(&config(&server)).unwrap();
    let txs = api::upload::bank_statement(&api, file.path()).unwrap();
    assert!(txs.is_empty());
    let requests = rt.block_on(server.received_requests()).unwrap();
    let ct = requests[0].headers.get("content-type").unwrap().to_str().unwrap();
    assert!(ct.starts_with("multipart/form-data"));
}

#[test]
fn uploaded_rows_with_offset_timestamps_decode() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/upload/bank-statement"))
            .respond_with(ResponseTemplate::new(200).set_body_raw(
                r#"[{"id": 9, "user_id": 7, "date": "2025-02-28T00:00:00",
                     "description": "ATM", "amount": 60.0, "category": null,
                     "transaction_type": "expense", "source": "bank_statement",
                     "created_at": "2025-03-04T09:00:00.123456+00:00",
                     "updated_at": "2025-03-04T11:00:00+02:00"}]"#,
                "application/json",
            )),
    );
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "%PDF-1.4").unwrap();
    let api = ApiClient::new(&config(&server)).unwrap();
    let result = api::upload::bank_statement(&api, file.path());
    assert_eq!(
        finassist::commands::upload::upload_status(&result),
        "File uploaded successfully!"
    );
    let txs = result.unwrap();
    assert_eq!(txs[0].created_at.timestamp(), txs[0].updated_at.timestamp());
    assert_eq!(txs[0].date.to_string(), "2025-02-28 00:00:00");
}

#[test]
fn upload_failure_message_carries_server_detail() {
    let (rt, server) = setup();
    mount(
        &rt,
        &server,
        Mock::given(method("POST"))
            .and(path("/api/upload/bank-statement"))
            .respond_with(
                ResponseTemplate::new(400).set_body_json(json!({"detail": "Only PDF files are allowed"})),
            ),
    );
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "plain text").unwrap();
    let api = ApiClient::new(&config(&server)).unwrap();
    let result = api::upload::bank_statement(&api, file.path());
    assert_eq!(
        finassist::commands::upload::upload_status(&result),
        "Upload failed: server returned 400 Bad Request: Only PDF files are allowed"
    );
}
