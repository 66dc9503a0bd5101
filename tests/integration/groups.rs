//! Group operations against a mock service.

use crate::common::{GroupStore, MockService, fixtures, request_json};
use cato_scim::{GroupMember, NewGroup, ScimFailure};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

#[test]
fn test_rename_then_get_returns_new_name() {
    let service = MockService::start();
    let store = GroupStore::new();
    let id = store.insert("Engineering");
    service.mount_group_store(&store);

    let client = service.client();
    client.rename_group(&id, "X").unwrap();
    let group = client.get_group(&id).unwrap();

    assert_eq!(group["displayName"], "X");
    assert_eq!(group["id"], id.as_str());
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_rename_group_sends_display_name_update() {
    let service = MockService::start();
    let store = GroupStore::new();
    let id = store.insert("Engineering");
    service.mount_group_store(&store);

    service.client().rename_group(&id, "Platform").unwrap();

    let request = service.single_request();
    assert_eq!(request.method.as_str(), "PUT");
    assert_eq!(request_json(&request), json!({"displayName": "Platform"}));
    assert_eq!(store.get(&id).unwrap()["displayName"], "Platform");
}

#[test]
fn test_rename_group_with_empty_name_sends_nothing() {
    let service = MockService::start();
    let client = service.client();

    assert!(client.rename_group("g-1", "").unwrap_err().is_local());
    assert_eq!(client.call_count(), 0);
}

#[test]
fn test_get_unknown_group_is_http_failure() {
    let service = MockService::start();
    service.mount_group_store(&GroupStore::new());

    let result = service.client().get_group("missing");
    assert_eq!(result, Err(ScimFailure::http(404, "not found")));
}

#[test]
fn test_disable_group_matches_update_group() {
    let service = MockService::start();
    let store = GroupStore::new();
    let id = store.insert("Contractors");
    service.mount_group_store(&store);

    let client = service.client();
    client.disable_group(&id).unwrap();
    client.update_group(&id, &json!({"active": false})).unwrap();

    let requests = service.received_requests();
    assert_eq!(request_json(&requests[0]), request_json(&requests[1]));
    assert_eq!(store.get(&id).unwrap()["active"], false);
}

#[test]
fn test_find_group_filters_by_display_name() {
    let service = MockService::start();
    let group = fixtures::group("g-1", "TEST group", &[]);
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Groups")))
            .and(query_param("filter", r#"displayName eq "TEST group""#))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(fixtures::list(vec![group.clone()])),
            )
            .expect(1),
    );

    assert_eq!(service.client().find_group("TEST group"), Ok(vec![group]));
    service.verify();
}

#[test]
fn test_find_group_query_encodes_spaces_as_percent_twenty() {
    let service = MockService::start();
    service.mount_json("GET", "Groups", 200, fixtures::list(vec![]));

    service.client().find_group("TEST group").unwrap();

    let request = service.single_request();
    assert_eq!(
        request.url.query(),
        Some("filter=displayName%20eq%20%22TEST%20group%22")
    );
}

#[test]
fn test_get_groups_preserves_member_order() {
    let service = MockService::start();
    let group = fixtures::group("g-1", "Engineering", &[("u-3", ""), ("u-1", "a@example.com")]);
    service.mount_json("GET", "Groups", 200, fixtures::list(vec![group]));

    let groups = service.client().get_groups().unwrap();
    let members = groups[0]["members"].as_array().unwrap();
    assert_eq!(members[0]["value"], "u-3");
    assert_eq!(members[1]["value"], "u-1");
}

#[test]
fn test_create_group_request_body() {
    let service = MockService::start();
    service.mount_json("POST", "Groups", 201, json!({"id": "g-1", "displayName": "Engineering"}));

    let group = NewGroup::new("Engineering", "ext-eng")
        .member(GroupMember::new("u-1").with_display("joe.chip@example.com"))
        .member(GroupMember::new("u-2"));
    let created = service.client().create_group(&group).unwrap();

    assert_eq!(created["id"], "g-1");
    assert_eq!(
        request_json(&service.single_request()),
        json!({
            "schemas": [fixtures::GROUP_SCHEMA],
            "displayName": "Engineering",
            "externalId": "ext-eng",
            "members": [
                {"value": "u-1", "display": "joe.chip@example.com"},
                {"value": "u-2"}
            ]
        })
    );
}

#[test]
fn test_add_members_patch_body() {
    let service = MockService::start();
    service.mount(
        Mock::given(method("PATCH"))
            .and(path(service.path("Groups/g-1")))
            .respond_with(ResponseTemplate::new(204)),
    );

    let members = [GroupMember::new("u-1").with_display("joe.chip@example.com")];
    let result = service.client().add_members("g-1", &members);

    assert_eq!(result, Ok(json!({})));
    assert_eq!(
        request_json(&service.single_request()),
        json!({
            "schemas": ["urn:ietf:params:scim:api:messages:2.0:PatchOp"],
            "Operations": [{
                "op": "add",
                "path": "members",
                "value": [{"value": "u-1", "display": "joe.chip@example.com"}]
            }]
        })
    );
}

#[test]
fn test_remove_members_patch_op() {
    let service = MockService::start();
    service.mount_json("PATCH", "Groups/g-1", 200, json!({"id": "g-1", "members": []}));

    service
        .client()
        .remove_members("g-1", &[GroupMember::new("u-1")])
        .unwrap();

    let body = request_json(&service.single_request());
    assert_eq!(body["Operations"][0]["op"], "remove");
    assert_eq!(body["Operations"][0]["value"], json!([{"value": "u-1"}]));
}

#[test]
fn test_membership_change_without_members_sends_nothing() {
    let service = MockService::start();
    let client = service.client();

    assert!(client.add_members("g-1", &[]).unwrap_err().is_local());
    assert!(client.remove_members("g-1", &[]).unwrap_err().is_local());
    assert_eq!(client.call_count(), 0);
    assert!(service.received_requests().is_empty());
}
