//! Selective forward: forward calls matching a criteria.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct SelectiveForward;

impl SelectiveFeature for SelectiveForward {
    const SEGMENT: &'static str = "selectiveForward";
    const ENABLED_KEY: &'static str = "forwardEnabled";
    type Settings = SelectiveForwardSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveForwardSettings {
    pub enabled: bool,
    /// Used by criteria that don't name their own destination.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default_phone_number_to_forward: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ring_reminder_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}
