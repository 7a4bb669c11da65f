//! Voicemail settings of a person.

use serde::{Deserialize, Serialize};

use super::{person_feature_api, PersonFeature};
use crate::api_child::{ApiCall, ApiChild};
use crate::common::{Enabled, Greeting};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailBusy {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<Greeting>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting_uploaded: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailUnanswered {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting: Option<Greeting>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub greeting_uploaded: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_rings: Option<u32>,
    /// Read-only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub system_max_number_of_rings: Option<u32>,
}

/// Enabled flag plus a destination, used by notifications and transfer-to-number.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailDestination {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailCopyOfMessage {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_id: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum StorageType {
    /// Messages stay in the calling platform's mailbox.
    Internal,
    /// Messages are sent to an external email address.
    External,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailMessageStorage {
    /// Message waiting indicator.
    pub mwi_enabled: bool,
    pub storage_type: StorageType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub external_email: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailFax {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailSettings {
    pub enabled: bool,
    /// Send every incoming call straight to voicemail.
    pub send_all_calls: Enabled,
    pub send_busy_calls: VoicemailBusy,
    pub send_unanswered_calls: VoicemailUnanswered,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notifications: Option<VoicemailDestination>,
    /// Caller presses 0 to reach this number.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transfer_to_number: Option<VoicemailDestination>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email_copy_of_message: Option<VoicemailCopyOfMessage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message_storage: Option<VoicemailMessageStorage>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_message: Option<VoicemailFax>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_message_forwarding_enabled: Option<bool>,
}

impl VoicemailSettings {
    /// Copy without read-only fields, as sent on configure.
    fn for_update(&self) -> VoicemailSettings {
        let mut settings = self.clone();
        settings.send_busy_calls.greeting_uploaded = None;
        settings.send_unanswered_calls.greeting_uploaded = None;
        settings.send_unanswered_calls.system_max_number_of_rings = None;
        settings
    }
}

person_feature_api!(VoicemailApi, "voicemail");

impl VoicemailApi<'_> {
    pub fn read(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<VoicemailSettings> {
        self.get(&self.feature_ep(person_id, None), self.session.org_query(org_id))
    }

    pub fn configure(
        &self,
        person_id: &str,
        settings: &VoicemailSettings,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.feature_ep(person_id, None),
            self.session.org_query(org_id),
            &settings.for_update(),
        )
    }

    /// Reset the voicemail PIN to the organization default.
    pub fn reset_pin(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<()> {
        self.invoke(
            &self.feature_ep(person_id, Some("actions/resetPin/invoke")),
            self.session.org_query(org_id),
        )
    }
}
