//! SCIM payloads returned by the mock service.

use serde_json::{Value, json};

pub const USER_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:User";
pub const GROUP_SCHEMA: &str = "urn:ietf:params:scim:schemas:core:2.0:Group";
pub const LIST_SCHEMA: &str = "urn:ietf:params:scim:api:messages:2.0:ListResponse";

/// A user as returned by the service.
pub fn user(id: &str, user_name: &str, active: bool) -> Value {
    json!({
        "schemas": [USER_SCHEMA],
        "id": id,
        "userName": user_name,
        "externalId": format!("ext-{id}"),
        "name": {"givenName": "Joe", "familyName": "Chip"},
        "emails": [{"value": user_name, "primary": true}],
        "active": active,
        "meta": {
            "resourceType": "User",
            "created": "2024-03-01T10:00:00Z",
            "lastModified": "2024-03-02T10:00:00Z"
        }
    })
}

/// A group as returned by the service. Members are `(id, display)` pairs;
/// an empty display is left out.
pub fn group(id: &str, display_name: &str, members: &[(&str, &str)]) -> Value {
    let members: Vec<Value> = members
        .iter()
        .map(|(value, display)| {
            if display.is_empty() {
                json!({"value": value})
            } else {
                json!({"value": value, "display": display})
            }
        })
        .collect();

    json!({
        "schemas": [GROUP_SCHEMA],
        "id": id,
        "displayName": display_name,
        "externalId": format!("ext-{id}"),
        "members": members
    })
}

/// A single-page ListResponse.
pub fn list(resources: Vec<Value>) -> Value {
    json!({
        "schemas": [LIST_SCHEMA],
        "totalResults": resources.len(),
        "startIndex": 1,
        "itemsPerPage": resources.len(),
        "Resources": resources
    })
}
