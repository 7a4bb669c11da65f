use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api_child::{ApiCall, ApiChild, ApiSession, QueryParams};
use crate::pagination::Page;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub id: String,
    pub display_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created: Option<DateTime<Utc>>,
}

pub struct OrganizationsApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for OrganizationsApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "organizations".to_string()
    }
}

impl<'a> OrganizationsApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    /// Organizations visible to the token; partner admins see customer orgs too.
    pub fn list(&self) -> ApiCall<Page<Organization>> {
        self.get_page(&self.ep(None), QueryParams::new())
    }

    pub fn details(&self, org_id: &str) -> ApiCall<Organization> {
        self.get(&self.ep(Some(org_id)), QueryParams::new())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::HttpResponse;

    #[test]
    fn list_parses_page() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let call = OrganizationsApi::new(&session).list();
        assert_eq!(call.request.path, "http://h/organizations");
        let response = HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: r#"{"items":[{"id":"o1","displayName":"Acme","created":"2020-01-01T00:00:00Z"}]}"#
                .to_string(),
        };
        let page = call.parse(response).unwrap();
        assert_eq!(page.items.len(), 1);
        assert_eq!(page.items[0].display_name, "Acme");
        assert!(page.next.is_none());
    }
}
