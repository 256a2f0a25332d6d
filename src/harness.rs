//! Reusable end-to-end test helpers for PocketBase projects.
//!
//! A minimal pass/fail runner plus user-lifecycle helpers layered on
//! [`PbClient`], for writing project-specific access-control suites that
//! run against a live instance.

use anyhow::{Context, Result, bail};
use colored::Colorize;
use reqwest::Method;
use serde_json::{Value, json};

use crate::api::query::encode;
use crate::api::{self, PbClient};

/// Simple test runner that tracks pass/fail counts.
pub struct TestRunner {
    pub title: String,
    passed: usize,
    failed: usize,
}

impl TestRunner {
    pub fn new(title: impl Into<String>) -> Self {
        let title = title.into();
        println!("{}", "=".repeat(60));
        println!("{title}");
        println!("{}", "=".repeat(60));
        Self {
            title,
            passed: 0,
            failed: 0,
        }
    }

    /// Record a passing test.
    pub fn ok(&mut self, label: &str) {
        self.passed += 1;
        println!("  {} {label}", "✓".green());
    }

    /// Record a failing test.
    pub fn fail(&mut self, label: &str, detail: &str) {
        self.failed += 1;
        if detail.is_empty() {
            println!("  {} {label}", "✗".red());
        } else {
            println!("  {} {label}: {detail}", "✗".red());
        }
    }

    /// Assert a condition, recording pass or fail.
    pub fn check(&mut self, label: &str, condition: bool, detail: &str) {
        if condition {
            self.ok(label);
        } else {
            self.fail(label, detail);
        }
    }

    /// Print a section header.
    pub fn section(&self, title: &str) {
        println!("\n--- {title} ---");
    }

    pub fn passed(&self) -> usize {
        self.passed
    }

    pub fn failed(&self) -> usize {
        self.failed
    }

    /// Print results and return the process exit code (0=pass, 1=fail).
    pub fn summary(&self) -> i32 {
        println!("\n{}", "=".repeat(60));
        println!("Results: {} passed, {} failed", self.passed, self.failed);
        println!("{}", "=".repeat(60));
        if self.failed == 0 { 0 } else { 1 }
    }
}

/// Make a request as a regular user (or unauthenticated).
///
/// Always returns a `(status, payload)` pair; HTTP error statuses do not
/// fail the call, so suites can assert on rejections directly.
pub async fn req(
    client: &PbClient,
    method: Method,
    path: &str,
    body: Option<&Value>,
    token: Option<&str>,
) -> api::Result<(u16, Value)> {
    client.transport().send_raw(method, path, body, token).await
}

/// Authenticate a regular user. Returns `(token, user_id)`.
pub async fn user_login(
    client: &PbClient,
    email: &str,
    password: &str,
    collection: &str,
) -> Result<(String, String)> {
    let (status, data) = req(
        client,
        Method::POST,
        &format!("/api/collections/{collection}/auth-with-password"),
        Some(&json!({"identity": email, "password": password})),
        None,
    )
    .await?;
    if status != 200 {
        bail!("Login failed for {email}: HTTP {status} {data}");
    }

    let token = data["token"]
        .as_str()
        .context("login response missing token")?
        .to_string();
    let user_id = data["record"]["id"]
        .as_str()
        .context("login response missing record id")?
        .to_string();
    Ok((token, user_id))
}

/// Create a user via the public API (assumes an open createRule).
/// Returns the new user id.
pub async fn create_test_user(
    client: &PbClient,
    email: &str,
    password: &str,
    name: &str,
    collection: &str,
) -> Result<String> {
    let (status, data) = req(
        client,
        Method::POST,
        &format!("/api/collections/{collection}/records"),
        Some(&json!({
            "email": email,
            "password": password,
            "passwordConfirm": password,
            "name": name,
        })),
        None,
    )
    .await?;
    if status != 200 && status != 201 {
        bail!("Failed to create user {email}: HTTP {status} {data}");
    }

    Ok(data["id"]
        .as_str()
        .context("create response missing record id")?
        .to_string())
}

/// Create a user as superuser (for collections with a locked createRule).
/// Returns the new user id.
pub async fn superuser_create_user(
    client: &PbClient,
    email: &str,
    password: &str,
    name: &str,
    collection: &str,
) -> Result<String> {
    let body = json!({
        "email": email,
        "password": password,
        "passwordConfirm": password,
        "name": name,
    });
    let response = client
        .send_authenticated(
            Method::POST,
            &format!("/api/collections/{collection}/records"),
            Some(&body),
        )
        .await
        .with_context(|| format!("Superuser failed to create user {email}"))?;

    let data = response.into_data();
    Ok(data["id"]
        .as_str()
        .context("create response missing record id")?
        .to_string())
}

/// Delete stale test users from previous runs. Failures are ignored.
pub async fn pre_cleanup(client: &PbClient, emails: &[&str], collection: &str) {
    for email in emails {
        let filter = encode(&format!("email = \"{email}\""));
        let path =
            format!("/api/collections/{collection}/records?filter={filter}&perPage=5");
        let Ok(response) = client.send_authenticated(Method::GET, &path, None).await else {
            continue;
        };
        let data = response.into_data();
        for record in data["items"].as_array().into_iter().flatten() {
            if let Some(id) = record["id"].as_str() {
                superuser_delete(client, collection, id).await;
            }
        }
    }
}

/// Delete a record as superuser. Ignores failures, including 404.
pub async fn superuser_delete(client: &PbClient, collection: &str, record_id: &str) {
    let _ = client
        .send_authenticated(
            Method::DELETE,
            &format!("/api/collections/{collection}/records/{record_id}"),
            None,
        )
        .await;
}

/// GET a record as superuser, as a `(status, payload)` pair.
pub async fn superuser_get(
    client: &PbClient,
    collection: &str,
    record_id: &str,
) -> api::Result<(u16, Value)> {
    as_status_pair(
        client
            .send_authenticated(
                Method::GET,
                &format!("/api/collections/{collection}/records/{record_id}"),
                None,
            )
            .await,
    )
}

/// List records as superuser, as a `(status, payload)` pair.
pub async fn superuser_list(
    client: &PbClient,
    collection: &str,
    filter: Option<&str>,
) -> api::Result<(u16, Value)> {
    let mut path = format!("/api/collections/{collection}/records");
    if let Some(filter) = filter {
        path.push_str(&format!("?filter={}", encode(filter)));
    }
    as_status_pair(client.send_authenticated(Method::GET, &path, None).await)
}

/// Flatten an authenticated outcome into the raw `(status, payload)` shape.
fn as_status_pair(
    outcome: api::Result<api::ApiResponse>,
) -> api::Result<(u16, Value)> {
    match outcome {
        Ok(response) => Ok((response.status, response.into_data())),
        Err(api::Error::Request { status, data }) if status != 0 => Ok((status, data)),
        Err(other) => Err(other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::Config;
    use httpmock::MockServer;
    use httpmock::prelude::*;

    fn client_for(server: &MockServer) -> PbClient {
        PbClient::new(Config::new(server.base_url(), "admin@example.com", "pw"))
    }

    fn mock_auth(server: &MockServer) {
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/_superusers/auth-with-password");
            then.status(200).json_body(json!({"token": "tok"}));
        });
    }

    #[test]
    fn runner_tracks_pass_and_fail_counts() {
        let mut runner = TestRunner::new("sample suite");
        runner.ok("first");
        runner.check("second", true, "");
        runner.check("third", false, "expected 403");
        assert_eq!(runner.passed(), 2);
        assert_eq!(runner.failed(), 1);
        assert_eq!(runner.summary(), 1);

        let mut green = TestRunner::new("all green");
        green.ok("only");
        assert_eq!(green.summary(), 0);
    }

    #[tokio::test]
    async fn user_login_returns_token_and_record_id() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/users/auth-with-password");
            then.status(200).json_body(json!({
                "token": "user-tok",
                "record": {"id": "u42"},
            }));
        });

        let client = client_for(&server);
        let (token, user_id) = user_login(&client, "user@example.com", "pw123456", "users")
            .await
            .unwrap();
        assert_eq!(token, "user-tok");
        assert_eq!(user_id, "u42");
    }

    #[tokio::test]
    async fn user_login_failure_carries_status_and_payload() {
        let server = MockServer::start_async().await;
        server.mock(|when, then| {
            when.method(POST)
                .path("/api/collections/users/auth-with-password");
            then.status(400)
                .json_body(json!({"message": "Failed to authenticate."}));
        });

        let client = client_for(&server);
        let err = user_login(&client, "user@example.com", "wrong", "users")
            .await
            .unwrap_err();
        assert!(err.to_string().contains("HTTP 400"));
    }

    #[tokio::test]
    async fn pre_cleanup_deletes_every_matching_record() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        server.mock(|when, then| {
            when.method(GET)
                .path("/api/collections/users/records")
                .query_param("filter", r#"email = "stale@example.com""#);
            then.status(200)
                .json_body(json!({"items": [{"id": "a1"}, {"id": "a2"}]}));
        });
        let delete_a1 = server.mock(|when, then| {
            when.method(DELETE).path("/api/collections/users/records/a1");
            then.status(204);
        });
        let delete_a2 = server.mock(|when, then| {
            when.method(DELETE).path("/api/collections/users/records/a2");
            then.status(204);
        });

        let client = client_for(&server);
        pre_cleanup(&client, &["stale@example.com"], "users").await;

        assert_eq!(delete_a1.hits(), 1);
        assert_eq!(delete_a2.hits(), 1);
    }

    #[tokio::test]
    async fn superuser_get_returns_error_statuses_as_pairs() {
        let server = MockServer::start_async().await;
        mock_auth(&server);
        server.mock(|when, then| {
            when.method(GET).path("/api/collections/users/records/gone");
            then.status(404)
                .json_body(json!({"message": "The requested resource wasn't found."}));
        });

        let client = client_for(&server);
        let (status, data) = superuser_get(&client, "users", "gone").await.unwrap();
        assert_eq!(status, 404);
        assert_eq!(
            data["message"],
            json!("The requested resource wasn't found.")
        );
    }
}
