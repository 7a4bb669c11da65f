//! Selective reject: reject calls matching a criteria.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct SelectiveReject;

impl SelectiveFeature for SelectiveReject {
    const SEGMENT: &'static str = "selectiveReject";
    const ENABLED_KEY: &'static str = "rejectEnabled";
    type Settings = SelectiveRejectSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveRejectSettings {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}
