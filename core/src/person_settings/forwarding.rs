//! Call forwarding of a person.

use serde::{Deserialize, Serialize};

use super::{person_feature_api, PersonFeature};
use crate::api_child::{ApiCall, ApiChild};
use crate::error::ApiError;

/// Forwarding leg with a destination: busy and business continuity.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingCommon {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Send to the destination's voicemail; only for internal destinations.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingAlways {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    /// Play a short ring to the person when a call is forwarded.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_reminder_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingNoAnswer {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_rings: Option<u32>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_max_number_of_rings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallForwardingPerson {
    pub always: CallForwardingAlways,
    pub busy: CallForwardingCommon,
    pub no_answer: CallForwardingNoAnswer,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonForwardingSetting {
    pub call_forwarding: CallForwardingPerson,
    /// Forwarding applied when the person's devices are not registered.
    pub business_continuity: CallForwardingCommon,
}

person_feature_api!(PersonForwardingApi, "callForwarding");

impl PersonForwardingApi<'_> {
    pub fn read(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<PersonForwardingSetting> {
        self.get(
            &self.feature_ep(person_id, None),
            self.session.org_query(org_id),
        )
    }

    pub fn configure(
        &self,
        person_id: &str,
        forwarding: &PersonForwardingSetting,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        let mut body = forwarding.clone();
        body.call_forwarding.no_answer.system_max_number_of_rings = None;
        self.put(
            &self.feature_ep(person_id, None),
            self.session.org_query(org_id),
            &body,
        )
    }
}
