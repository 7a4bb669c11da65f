//! Voicemail administration for an organization and its locations.

use serde::{Deserialize, Serialize};

use crate::api_child::{ApiCall, ApiChild, ApiSession};
use crate::error::ApiError;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgVoicemailSettings {
    pub message_expiry_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_days_for_message_expiry: Option<u32>,
    /// Delete expired messages instead of moving them to the trash.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub strict_deletion_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub voice_message_forwarding_enabled: Option<bool>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasscodeAge {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_days: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockPreviousPasscodes {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_passcodes: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockRepeatedDigits {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BlockContiguousSequences {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_ascending_digits: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number_of_descending_digits: Option<u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PasscodeLength {
    pub min: u32,
    pub max: u32,
}

/// Passcode rules fixed by the platform; read-only.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PinRules {
    #[serde(default)]
    pub block_repeated_patterns_enabled: bool,
    #[serde(default)]
    pub block_repeated_digits: BlockRepeatedDigits,
    #[serde(default)]
    pub block_contiguous_sequences: BlockContiguousSequences,
    #[serde(default)]
    pub length: PasscodeLength,
    #[serde(default)]
    pub default_voicemail_pin_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailRules {
    #[serde(default)]
    pub default_voicemail_pin_rules: PinRules,
    #[serde(default)]
    pub expire_passcode: PasscodeAge,
    #[serde(default)]
    pub change_passcode: PasscodeAge,
    #[serde(default)]
    pub block_previous_passcodes: BlockPreviousPasscodes,
}

/// Writable part of the passcode rules.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoicemailRulesUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_voicemail_pin_enabled: Option<bool>,
    /// Write-only; never returned by reads.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_voicemail_pin: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expire_passcode: Option<PasscodeAge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub change_passcode: Option<PasscodeAge>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub block_previous_passcodes: Option<BlockPreviousPasscodes>,
}

impl From<&VoicemailRules> for VoicemailRulesUpdate {
    fn from(rules: &VoicemailRules) -> Self {
        Self {
            default_voicemail_pin_enabled: Some(rules.default_voicemail_pin_rules.default_voicemail_pin_enabled),
            default_voicemail_pin: None,
            expire_passcode: Some(rules.expire_passcode),
            change_passcode: Some(rules.change_passcode),
            block_previous_passcodes: Some(rules.block_previous_passcodes),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LocationVoicemailSettings {
    pub voicemail_transcription_enabled: bool,
}

pub struct OrgVoicemailApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for OrgVoicemailApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "telephony/config/voicemail".to_string()
    }
}

impl<'a> OrgVoicemailApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    pub fn read_settings(&self, org_id: Option<&str>) -> ApiCall<OrgVoicemailSettings> {
        self.get(&self.ep(Some("settings")), self.session.org_query(org_id))
    }

    pub fn configure_settings(
        &self,
        settings: &OrgVoicemailSettings,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(&self.ep(Some("settings")), self.session.org_query(org_id), settings)
    }

    pub fn read_rules(&self, org_id: Option<&str>) -> ApiCall<VoicemailRules> {
        self.get(&self.ep(Some("rules")), self.session.org_query(org_id))
    }

    pub fn configure_rules(
        &self,
        rules: &VoicemailRulesUpdate,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(&self.ep(Some("rules")), self.session.org_query(org_id), rules)
    }
}

pub struct LocationVoicemailApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for LocationVoicemailApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "telephony/config/locations".to_string()
    }
}

impl<'a> LocationVoicemailApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    pub fn read(&self, location_id: &str, org_id: Option<&str>) -> ApiCall<LocationVoicemailSettings> {
        self.get(
            &self.ep(Some(&format!("{location_id}/voicemail"))),
            self.session.org_query(org_id),
        )
    }

    pub fn configure(
        &self,
        location_id: &str,
        settings: &LocationVoicemailSettings,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.ep(Some(&format!("{location_id}/voicemail"))),
            self.session.org_query(org_id),
            settings,
        )
    }
}
