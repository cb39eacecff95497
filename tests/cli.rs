//! End-to-end tests for the binary: argument handling, exit codes, and the
//! full token → admin key → data plane round-trip against a mock server.

use assert_cmd::Command;
use httpmock::MockServer;
use predicates::prelude::*;

fn base_cmd() -> Command {
    Command::cargo_bin("azsearch-config").expect("binary")
}

fn service_env(cmd: &mut Command, server: &MockServer) {
    cmd.env_clear()
        .env("AZSEARCH_TENANT_ID", "tenant")
        .env("AZSEARCH_SERVICE_PRINCIPAL_ID", "client")
        .env("AZSEARCH_SERVICE_PRINCIPAL_KEY", "secret")
        .env("AZSEARCH_SUBSCRIPTION", "sub")
        .env("AZSEARCH_RESOURCE_GROUP", "rg")
        .env("AZSEARCH_SEARCH_SERVICE_NAME", "svc")
        .env("AZSEARCH_AUTHORITY", server.base_url())
        .env("AZSEARCH_MANAGEMENT_ENDPOINT", server.base_url())
        .env("AZSEARCH_ENDPOINT", server.base_url());
}

fn mock_control_plane(server: &MockServer) -> (httpmock::Mock<'_>, httpmock::Mock<'_>) {
    let token = server.mock(|when, then| {
        when.method("POST").path("/tenant/oauth2/v2.0/token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"token_type":"Bearer","expires_in":3599,"access_token":"tok"}"#);
    });
    let keys = server.mock(|when, then| {
        when.method("POST")
            .path("/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Search/searchServices/svc/listAdminKeys")
            .header("authorization", "Bearer tok");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"primaryKey":"admin","secondaryKey":"backup"}"#);
    });
    (token, keys)
}

#[test]
fn missing_settings_are_a_usage_error() {
    let mut cmd = base_cmd();
    cmd.env_clear().args(["index", "list"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("tenant_id"));
}

#[test]
fn help_exits_zero() {
    base_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("index"))
        .stdout(predicate::str::contains("datasource"))
        .stdout(predicate::str::contains("indexer"));
}

#[test]
fn unknown_subcommand_exits_one() {
    let mut cmd = base_cmd();
    cmd.env_clear().arg("bogus");

    cmd.assert().failure().code(1);
}

#[test]
fn index_list_prints_the_unwrapped_collection() {
    let server = MockServer::start();
    let (token, keys) = mock_control_plane(&server);
    let list = server.mock(|when, then| {
        when.method("GET")
            .path("/indexes")
            .header("api-key", "admin")
            .query_param("api-version", "2019-05-06");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"value":[{"name":"idx1"}]}"#);
    });

    let mut cmd = base_cmd();
    service_env(&mut cmd, &server);
    cmd.args(["index", "list"]);

    cmd.assert()
        .success()
        .stdout(predicate::str::contains("idx1"));
    token.assert();
    keys.assert();
    list.assert();
}

#[test]
fn remote_errors_print_structured_json_and_exit_one() {
    let server = MockServer::start();
    let (_token, _keys) = mock_control_plane(&server);
    server.mock(|when, then| {
        when.method("GET").path("/indexes");
        then.status(403)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":"Forbidden"}}"#);
    });

    let mut cmd = base_cmd();
    service_env(&mut cmd, &server);
    cmd.args(["index", "list"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("\"status_code\":403"))
        .stderr(predicate::str::contains("Forbidden"));
}

#[test]
fn failed_key_resolution_is_fatal() {
    let server = MockServer::start();
    server.mock(|when, then| {
        when.method("POST").path("/tenant/oauth2/v2.0/token");
        then.status(200)
            .header("content-type", "application/json")
            .body(r#"{"token_type":"Bearer","expires_in":3599,"access_token":"tok"}"#);
    });
    server.mock(|when, then| {
        when.method("POST")
            .path("/subscriptions/sub/resourceGroups/rg/providers/Microsoft.Search/searchServices/svc/listAdminKeys");
        then.status(401)
            .header("content-type", "application/json")
            .body(r#"{"error":{"code":"AuthenticationFailed"}}"#);
    });
    let list = server.mock(|when, then| {
        when.method("GET").path("/indexes");
        then.status(200).body(r#"{"value":[]}"#);
    });

    let mut cmd = base_cmd();
    service_env(&mut cmd, &server);
    cmd.args(["index", "list"]);

    cmd.assert()
        .failure()
        .code(1)
        .stderr(predicate::str::contains("admin key"));
    assert_eq!(list.hits(), 0);
}
