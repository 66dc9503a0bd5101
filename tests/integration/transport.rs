//! Result classification, request headers and call counting.

use crate::common::logging::{capture_logs, crate_warnings};
use crate::common::{MockService, TEST_TOKEN, refused_base_url};
use cato_scim::{ClientConfiguration, GroupMember, LogLevel, NewGroup, NewUser, ScimClient, ScimFailure};
use serde_json::json;
use wiremock::matchers::{any, header, method, path};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_not_found_uses_error_field() {
    let service = MockService::start();
    service.mount_json("GET", "Users/u-404", 404, json!({"error": "not found"}));

    let result = service.client().get_user("u-404");
    assert_eq!(result, Err(ScimFailure::http(404, "not found")));
}

#[test]
fn test_scim_error_detail_is_used() {
    let service = MockService::start();
    service.mount_json(
        "POST",
        "Users",
        409,
        json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:Error"],
            "status": "409",
            "detail": "userName already exists"
        }),
    );

    let user = NewUser::new("joe.chip@example.com", "Joe", "Chip", "ext-1");
    let failure = service.client().create_user(&user).unwrap_err();
    assert_eq!(failure.status(), Some(409));
    assert_eq!(failure.error(), Some("userName already exists"));
}

#[test]
fn test_status_line_when_body_has_no_message() {
    let service = MockService::start();
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Groups")))
            .respond_with(ResponseTemplate::new(503).set_body_string("<html>down</html>")),
    );

    let failure = service.client().get_groups().unwrap_err();
    assert_eq!(failure, ScimFailure::http(503, "503 Service Unavailable"));
}

#[test]
fn test_undecodable_success_body_is_local_failure() {
    let service = MockService::start();
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Users/u-1")))
            .respond_with(ResponseTemplate::new(200).set_body_string("not json")),
    );

    let client = service.client();
    let failure = client.get_user("u-1").unwrap_err();
    assert_eq!(failure, ScimFailure::local("invalid response body"));
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_list_body_that_is_not_an_object() {
    let service = MockService::start();
    service.mount_json("GET", "Users", 200, json!(["u-1", "u-2"]));

    let failure = service.client().get_users().unwrap_err();
    assert_eq!(failure.error(), Some("invalid response body"));
}

#[test]
fn test_empty_array_list_body_is_invalid() {
    let service = MockService::start();
    service.mount_json("GET", "Users", 200, json!([]));
    service.mount_json("GET", "Groups", 200, json!([1, 2]));

    let client = service.client();
    assert_eq!(client.get_users(), Err(ScimFailure::invalid_response_body()));
    assert_eq!(client.get_groups(), Err(ScimFailure::invalid_response_body()));
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_null_resources_is_empty_list() {
    let service = MockService::start();
    service.mount_json("GET", "Groups", 200, json!({"totalResults": 0, "Resources": null}));

    assert_eq!(service.client().get_groups(), Ok(vec![]));
}

#[test]
fn test_truncated_list_returns_received_page() {
    let service = MockService::start();
    service.mount_json(
        "GET",
        "Users",
        200,
        json!({"totalResults": 250, "Resources": [{"id": "u-1"}]}),
    );

    let client = ScimClient::new(service.config().with_log_level(LogLevel::None)).unwrap();
    let (users, records) = capture_logs(|| client.get_users());
    assert_eq!(users.unwrap(), vec![json!({"id": "u-1"})]);
    assert_eq!(client.call_count(), 1);

    let warnings = crate_warnings(&records);
    assert_eq!(warnings.len(), 1, "records: {records:?}");
    assert!(warnings[0].contains("reported 250 results but returned 1"));
}

#[test]
fn test_complete_list_logs_no_warning() {
    let service = MockService::start();
    service.mount_json(
        "GET",
        "Users",
        200,
        json!({"totalResults": 1, "Resources": [{"id": "u-1"}]}),
    );

    let client = service.client();
    let (users, records) = capture_logs(|| client.get_users());
    assert_eq!(users.unwrap().len(), 1);
    assert!(crate_warnings(&records).is_empty(), "records: {records:?}");
}

#[test]
fn test_connection_refused_is_transport_failure() {
    let config = ClientConfiguration::new(refused_base_url(), TEST_TOKEN).unwrap();
    let client = ScimClient::new(config).unwrap();

    let failure = client.get_users().unwrap_err();
    match &failure {
        ScimFailure::Transport { reason } => assert!(!reason.is_empty()),
        other => panic!("Expected Transport failure, got: {:?}", other),
    }
    assert_eq!(client.call_count(), 1);
    assert!(serde_json::to_value(&failure).unwrap().get("reason").is_some());
}

#[test]
fn test_requests_carry_auth_and_media_types() {
    let service = MockService::start();
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Users/u-1")))
            .and(header("authorization", format!("Bearer {TEST_TOKEN}").as_str()))
            .and(header("content-type", "application/scim+json"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "u-1"})))
            .expect(1),
    );

    service.client().get_user("u-1").unwrap();

    let request = service.single_request();
    let accept = request.headers.get("accept").unwrap().to_str().unwrap();
    assert!(accept.contains("application/scim+json"));
    assert!(accept.contains("application/json"));
    service.verify();
}

#[test]
fn test_ids_are_percent_encoded_in_path() {
    let service = MockService::start();
    service.mount(
        Mock::given(any()).respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );

    service.client().get_user("a/b?c").unwrap();

    let request = service.single_request();
    assert_eq!(request.url.path(), format!("{}/Users/a%2Fb%3Fc", crate::common::BASE_PATH));
}

/// Run `operation` and check that it sent exactly one request.
fn assert_one_call<T>(client: &ScimClient, name: &str, operation: impl FnOnce(&ScimClient) -> Result<T, ScimFailure>) {
    let before = client.call_count();
    if let Err(e) = operation(client) {
        panic!("{name} failed: {e}");
    }
    assert_eq!(client.call_count(), before + 1, "{name} should send one request");
}

#[test]
fn test_each_operation_counts_exactly_one_call() {
    let service = MockService::start();
    service.mount(
        Mock::given(any()).respond_with(ResponseTemplate::new(200).set_body_json(json!({}))),
    );
    let client = service.client();
    let member = [GroupMember::new("u-1")];

    assert_one_call(&client, "get_users", |c| c.get_users());
    assert_one_call(&client, "get_user", |c| c.get_user("u-1"));
    assert_one_call(&client, "find_users", |c| c.find_users("userName", "a@b.com"));
    assert_one_call(&client, "create_user", |c| {
        c.create_user(&NewUser::new("a@b.com", "A", "B", "ext-a"))
    });
    assert_one_call(&client, "update_user", |c| c.update_user("u-1", &json!({"active": true})));
    assert_one_call(&client, "disable_user", |c| c.disable_user("u-1"));
    assert_one_call(&client, "get_groups", |c| c.get_groups());
    assert_one_call(&client, "get_group", |c| c.get_group("g-1"));
    assert_one_call(&client, "find_group", |c| c.find_group("Engineering"));
    assert_one_call(&client, "create_group", |c| {
        c.create_group(&NewGroup::new("Eng", "ext-eng"))
    });
    assert_one_call(&client, "update_group", |c| {
        c.update_group("g-1", &json!({"displayName": "E"}))
    });
    assert_one_call(&client, "rename_group", |c| c.rename_group("g-1", "E"));
    assert_one_call(&client, "disable_group", |c| c.disable_group("g-1"));
    assert_one_call(&client, "add_members", |c| c.add_members("g-1", &member));
    assert_one_call(&client, "remove_members", |c| c.remove_members("g-1", &member));

    assert_eq!(client.call_count(), 15);
    assert_eq!(service.received_requests().len(), 15);
}
