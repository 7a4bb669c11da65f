//! Do not disturb.

use serde::{Deserialize, Serialize};

use super::{person_feature_api, PersonFeature};
use crate::api_child::{ApiCall, ApiChild};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dnd {
    pub enabled: bool,
    /// Play a ring splash on the person's devices while DND is on.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_splash_enabled: Option<bool>,
}

person_feature_api!(DndApi, "doNotDisturb");

impl DndApi<'_> {
    pub fn read(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<Dnd> {
        self.get(&self.feature_ep(person_id, None), self.session.org_query(org_id))
    }

    pub fn configure(&self, person_id: &str, dnd: &Dnd, org_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.put(&self.feature_ep(person_id, None), self.session.org_query(org_id), dnd)
    }
}
