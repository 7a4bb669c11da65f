//! Call waiting.

use super::{person_feature_api, PersonFeature};
use crate::api_child::{ApiCall, ApiChild};
use crate::common::Enabled;
use crate::error::ApiError;

person_feature_api!(CallWaitingApi, "callWaiting");

impl CallWaitingApi<'_> {
    /// Whether call waiting is enabled.
    pub fn read(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<Enabled> {
        self.get(&self.feature_ep(person_id, None), self.session.org_query(org_id))
    }

    pub fn configure(&self, person_id: &str, enabled: bool, org_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.feature_ep(person_id, None),
            self.session.org_query(org_id),
            &Enabled { enabled },
        )
    }
}
