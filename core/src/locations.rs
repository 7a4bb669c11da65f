//! Locations of an organization.

use serde::{Deserialize, Serialize};

use crate::api_child::{decode_id, to_json, ApiCall, ApiChild, ApiSession, QueryParams};
use crate::common::Address;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::pagination::Page;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Location {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub time_zone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub preferred_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub announcement_language: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub address: Option<Address>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub latitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub longitude: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Location {
    /// Copy without the server-assigned fields, as sent on create and update.
    fn for_write(&self) -> Location {
        Location {
            id: None,
            org_id: None,
            ..self.clone()
        }
    }
}

pub struct LocationsApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for LocationsApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "locations".to_string()
    }
}

impl<'a> LocationsApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    pub fn list(
        &self,
        name: Option<&str>,
        location_id: Option<&str>,
        org_id: Option<&str>,
        max: Option<u32>,
    ) -> ApiCall<Page<Location>> {
        let query = QueryParams::new()
            .push_opt("name", name)
            .push_opt("id", location_id)
            .push_opt("orgId", org_id.or(self.session.config().org_id.as_deref()))
            .push_opt("max", self.session.page_size(max));
        self.get_page(&self.ep(None), query)
    }

    pub fn details(&self, location_id: &str, org_id: Option<&str>) -> ApiCall<Location> {
        self.get(&self.ep(Some(location_id)), self.session.org_query(org_id))
    }

    /// Create a location; the call yields the new location id.
    pub fn create(&self, location: &Location, org_id: Option<&str>) -> Result<ApiCall<String>, ApiError> {
        let body = to_json(&location.for_write())?;
        Ok(self.session.call(
            HttpMethod::Post,
            &self.ep(None),
            &self.session.org_query(org_id),
            Some(body),
            decode_id,
        ))
    }

    pub fn update(
        &self,
        location_id: &str,
        location: &Location,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.ep(Some(location_id)),
            self.session.org_query(org_id),
            &location.for_write(),
        )
    }
}
