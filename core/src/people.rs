//! People: the users of an organization.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api_child::{ApiCall, ApiChild, ApiSession, QueryParams};
use crate::common::PhoneNumber;
use crate::pagination::Page;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PersonType {
    Person,
    Bot,
    Appuser,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PresenceStatus {
    Active,
    Call,
    DoNotDisturb,
    Inactive,
    Meeting,
    OutOfOffice,
    Pending,
    Presenting,
    Unknown,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    #[serde(default)]
    pub emails: Vec<String>,
    #[serde(default)]
    pub phone_numbers: Vec<PhoneNumber>,
    /// Only present when calling data was requested.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub display_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nick_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default)]
    pub roles: Vec<String>,
    #[serde(default)]
    pub licenses: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub timezone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<PresenceStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub invite_pending: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub login_enabled: Option<bool>,
    #[serde(
        rename = "type",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub person_type: Option<PersonType>,
}

/// Filters for [`PeopleApi::list`]. All are optional.
#[derive(Debug, Clone, Default)]
pub struct ListPeople {
    pub email: Option<String>,
    pub display_name: Option<String>,
    /// Up to 85 person ids, sent comma separated.
    pub ids: Vec<String>,
    pub location_id: Option<String>,
    pub calling_data: Option<bool>,
    pub org_id: Option<String>,
    pub max: Option<u32>,
}

pub struct PeopleApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for PeopleApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "people".to_string()
    }
}

impl<'a> PeopleApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    /// List people. Follow the result with [`ApiCall::follow`] to page through
    /// the whole directory.
    pub fn list(&self, filter: &ListPeople) -> ApiCall<Page<Person>> {
        let ids = (!filter.ids.is_empty()).then(|| filter.ids.join(","));
        let query = QueryParams::new()
            .push_opt("email", filter.email.as_deref())
            .push_opt("displayName", filter.display_name.as_deref())
            .push_opt("id", ids)
            .push_opt("locationId", filter.location_id.as_deref())
            .push_opt("callingData", filter.calling_data)
            .push_opt(
                "orgId",
                filter
                    .org_id
                    .as_deref()
                    .or(self.session.config().org_id.as_deref()),
            )
            .push_opt("max", self.session.page_size(filter.max));
        self.get_page(&self.ep(None), query)
    }

    pub fn details(&self, person_id: &str, calling_data: bool, org_id: Option<&str>) -> ApiCall<Person> {
        let query = self
            .session
            .org_query(org_id)
            .push_opt("callingData", calling_data.then_some(true));
        self.get(&self.ep(Some(person_id)), query)
    }

    /// The person owning the access token.
    pub fn me(&self, calling_data: bool) -> ApiCall<Person> {
        let query = QueryParams::new().push_opt("callingData", calling_data.then_some(true));
        self.get(&self.ep(Some("me")), query)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::{HttpMethod, HttpResponse};

    fn session() -> ApiSession {
        ApiSession::new(ClientConfig::new("t").with_base_url("http://localhost:3000"))
    }

    #[test]
    fn list_encodes_filters() {
        let session = session();
        let filter = ListPeople {
            display_name: Some("Jane".to_string()),
            ids: vec!["p1".to_string(), "p2".to_string()],
            calling_data: Some(true),
            max: Some(100),
            ..ListPeople::default()
        };
        let call = PeopleApi::new(&session).list(&filter);
        assert_eq!(call.request.method, HttpMethod::Get);
        assert_eq!(
            call.request.path,
            "http://localhost:3000/people?displayName=Jane&id=p1%2Cp2&callingData=true&max=100"
        );
    }

    #[test]
    fn list_uses_configured_page_size() {
        let session = ApiSession::new(
            ClientConfig::new("t")
                .with_base_url("http://localhost:3000")
                .with_page_size(25),
        );
        let call = PeopleApi::new(&session).list(&ListPeople::default());
        assert_eq!(call.request.path, "http://localhost:3000/people?max=25");
    }

    #[test]
    fn details_with_calling_data() {
        let session = session();
        let call = PeopleApi::new(&session).details("p1", true, Some("o1"));
        assert_eq!(
            call.request.path,
            "http://localhost:3000/people/p1?orgId=o1&callingData=true"
        );
    }

    #[test]
    fn me_without_calling_data() {
        let session = session();
        let call = PeopleApi::new(&session).me(false);
        assert_eq!(call.request.path, "http://localhost:3000/people/me");
    }

    #[test]
    fn parse_person_with_calling_data() {
        let session = session();
        let call = PeopleApi::new(&session).details("p1", true, None);
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{
                "id": "p1",
                "emails": ["jane@example.com"],
                "phoneNumbers": [{"type": "work", "value": "+14085551234", "primary": true}],
                "extension": "1234",
                "locationId": "loc1",
                "displayName": "Jane Doe",
                "created": "2023-03-01T10:00:00.000Z",
                "status": "active",
                "type": "person"
            }"#
            .to_string(),
        };
        let person = call.parse(response).unwrap();
        assert_eq!(person.extension.as_deref(), Some("1234"));
        assert_eq!(person.phone_numbers[0].value, "+14085551234");
        assert_eq!(person.status, Some(PresenceStatus::Active));
        assert_eq!(person.person_type, Some(PersonType::Person));
        assert!(person.created.is_some());
    }
}
