//! Administration workflows against a mock service.

use crate::common::{MockService, fixtures, request_json};
use cato_scim::admin::{self, AdminError, MemberSummary, StatusChange};
use serde_json::json;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, ResponseTemplate};

const JOE: &str = "joe.chip@example.com";

/// Answer `find_users("userName", JOE)` with `users`.
fn mount_user_search(service: &MockService, users: Vec<serde_json::Value>) {
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Users")))
            .and(query_param("filter", format!(r#"userName eq "{JOE}""#).as_str()))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::list(users))),
    );
}

/// Answer `find_group("Engineering")` with `groups`.
fn mount_group_search(service: &MockService, groups: Vec<serde_json::Value>) {
    service.mount(
        Mock::given(method("GET"))
            .and(path(service.path("Groups")))
            .and(query_param("filter", r#"displayName eq "Engineering""#))
            .respond_with(ResponseTemplate::new(200).set_body_json(fixtures::list(groups))),
    );
}

#[test]
fn test_user_status_reads_full_user() {
    let service = MockService::start();
    mount_user_search(&service, vec![json!({"id": "u-1", "userName": JOE})]);
    service.mount_json("GET", "Users/u-1", 200, fixtures::user("u-1", JOE, false));

    let status = admin::user_status(&service.client(), JOE).unwrap();

    assert_eq!(status.user_id, "u-1");
    assert!(!status.active);
    assert_eq!(status.label(), "disabled");
}

#[test]
fn test_unknown_user_is_not_found() {
    let service = MockService::start();
    mount_user_search(&service, vec![]);

    let client = service.client();
    match admin::user_status(&client, JOE) {
        Err(AdminError::NotFound { value, .. }) => assert_eq!(value, JOE),
        other => panic!("Expected NotFound, got: {:?}", other),
    }
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_duplicate_users_are_ambiguous() {
    let service = MockService::start();
    mount_user_search(
        &service,
        vec![fixtures::user("u-1", JOE, true), fixtures::user("u-2", JOE, true)],
    );

    let result = admin::set_user_active(&service.client(), JOE, false);
    assert!(matches!(result, Err(AdminError::Ambiguous { .. })));
}

#[test]
fn test_disable_sends_full_user_back() {
    let service = MockService::start();
    let user = fixtures::user("u-1", JOE, true);
    mount_user_search(&service, vec![user.clone()]);
    service.mount_json("GET", "Users/u-1", 200, user.clone());
    service.mount_json("PUT", "Users/u-1", 200, json!({"id": "u-1", "active": false}));

    let change = admin::set_user_active(&service.client(), JOE, false).unwrap();
    assert_eq!(change, StatusChange::Changed);

    let requests = service.received_requests();
    assert_eq!(requests.len(), 3);
    let sent = request_json(&requests[2]);
    let mut expected = user;
    expected["active"] = json!(false);
    assert_eq!(sent, expected);
}

#[test]
fn test_enable_already_enabled_user_sends_no_update() {
    let service = MockService::start();
    let user = fixtures::user("u-1", JOE, true);
    mount_user_search(&service, vec![user.clone()]);
    service.mount_json("GET", "Users/u-1", 200, user);

    let client = service.client();
    let change = admin::set_user_active(&client, JOE, true).unwrap();

    assert_eq!(change, StatusChange::AlreadyInState);
    assert_eq!(client.call_count(), 2);
}

#[test]
fn test_update_password_puts_password() {
    let service = MockService::start();
    let user = fixtures::user("u-1", JOE, true);
    mount_user_search(&service, vec![user.clone()]);
    service.mount_json("GET", "Users/u-1", 200, user);
    service.mount_json("PUT", "Users/u-1", 200, json!({"id": "u-1"}));

    admin::update_password(&service.client(), JOE, "Ubik-2024").unwrap();

    let requests = service.received_requests();
    let sent = request_json(requests.last().unwrap());
    assert_eq!(sent["password"], "Ubik-2024");
    assert_eq!(sent["userName"], JOE);
}

#[test]
fn test_failed_update_keeps_failure() {
    let service = MockService::start();
    let user = fixtures::user("u-1", JOE, true);
    mount_user_search(&service, vec![user.clone()]);
    service.mount_json("GET", "Users/u-1", 200, user);
    service.mount_json("PUT", "Users/u-1", 400, json!({"detail": "password too weak"}));

    let err = admin::update_password(&service.client(), JOE, "x").unwrap_err();
    assert_eq!(err.failure().and_then(|f| f.status()), Some(400));
    assert!(err.to_string().contains("password too weak"));
}

#[test]
fn test_add_member_patches_user_reference() {
    let service = MockService::start();
    mount_group_search(&service, vec![fixtures::group("g-1", "Engineering", &[])]);
    mount_user_search(&service, vec![fixtures::user("u-1", JOE, true)]);
    service.mount(
        Mock::given(method("PATCH"))
            .and(path(service.path("Groups/g-1")))
            .respond_with(ResponseTemplate::new(204))
            .expect(1),
    );

    admin::add_member(&service.client(), "Engineering", JOE).unwrap();

    let requests = service.received_requests();
    let patch = request_json(requests.last().unwrap());
    assert_eq!(patch["Operations"][0]["op"], "add");
    assert_eq!(
        patch["Operations"][0]["value"],
        json!([{"value": "u-1", "display": JOE}])
    );
    service.verify();
}

#[test]
fn test_remove_member_from_unknown_group() {
    let service = MockService::start();
    mount_group_search(&service, vec![]);

    let client = service.client();
    let err = admin::remove_member(&client, "Engineering", JOE).unwrap_err();

    assert_eq!(err.to_string(), "No group found with name: Engineering");
    assert_eq!(client.call_count(), 1);
}

#[test]
fn test_list_members_resolves_missing_displays() {
    let service = MockService::start();
    mount_group_search(&service, vec![json!({"id": "g-1", "displayName": "Engineering"})]);
    service.mount_json(
        "GET",
        "Groups/g-1",
        200,
        fixtures::group(
            "g-1",
            "Engineering",
            &[("u-1", "joe.chip@example.com"), ("u-2", ""), ("u-3", "")],
        ),
    );
    service.mount_json("GET", "Users/u-2", 200, fixtures::user("u-2", "pat@example.com", true));
    service.mount_json("GET", "Users/u-3", 404, json!({"error": "not found"}));

    let listing = admin::list_members(&service.client(), "Engineering").unwrap();

    assert_eq!(listing.group, "Engineering");
    assert_eq!(
        listing.members,
        vec![
            MemberSummary {
                id: "u-1".to_string(),
                display: "joe.chip@example.com".to_string()
            },
            MemberSummary {
                id: "u-2".to_string(),
                display: "pat@example.com".to_string()
            },
            MemberSummary {
                id: "u-3".to_string(),
                display: "u-3".to_string()
            },
        ]
    );
}

#[test]
fn test_lookup_group_by_name_fetches_members() {
    let service = MockService::start();
    mount_group_search(
        &service,
        vec![
            json!({"id": "g-1", "displayName": "Engineering"}),
            json!({"id": "g-2", "displayName": "Engineering"}),
        ],
    );
    let full = fixtures::group("g-1", "Engineering", &[("u-1", JOE)]);
    service.mount_json("GET", "Groups/g-1", 200, full.clone());

    let group = admin::lookup_group(&service.client(), "Engineering", false).unwrap();
    assert_eq!(group, full);
}

#[test]
fn test_lookup_user_by_id() {
    let service = MockService::start();
    let user = fixtures::user("u-1", JOE, true);
    service.mount_json("GET", "Users/u-1", 200, user.clone());

    let client = service.client();
    assert_eq!(admin::lookup_user(&client, "u-1", true).unwrap(), user);
    assert_eq!(client.call_count(), 1);
}
