//! Sequential ring: ring additional numbers one after another.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct SequentialRing;

impl SelectiveFeature for SequentialRing {
    const SEGMENT: &'static str = "sequentialRing";
    const ENABLED_KEY: &'static str = "ringEnabled";
    type Settings = SequentialRingSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequentialRingNumber {
    pub phone_number: String,
    /// Callee must press a key before the call connects.
    #[serde(default)]
    pub answer_confirmation_required_enabled: bool,
    pub number_of_rings: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SequentialRingSettings {
    pub enabled: bool,
    /// Ring the person's own devices before the listed numbers.
    #[serde(default)]
    pub ring_base_location_first_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_location_number_of_rings: Option<u32>,
    #[serde(default)]
    pub continue_if_base_location_is_busy_enabled: bool,
    #[serde(default)]
    pub calls_to_voicemail_enabled: bool,
    /// Up to five numbers, rung in order.
    #[serde(default)]
    pub phone_numbers: Vec<SequentialRingNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::ApiSession;
    use crate::common::Selector;
    use crate::config::ClientConfig;
    use crate::http::HttpResponse;
    use crate::person_settings::selective::SelectiveApi;

    #[test]
    fn settings_roundtrip_through_api() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let api = SelectiveApi::<SequentialRing>::new(&session, Selector::People);
        let settings = api
            .read_settings("p1", None)
            .parse(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: r#"{
                    "enabled": true,
                    "ringBaseLocationFirstEnabled": true,
                    "baseLocationNumberOfRings": 2,
                    "continueIfBaseLocationIsBusyEnabled": true,
                    "callsToVoicemailEnabled": false,
                    "phoneNumbers": [
                        {"phoneNumber": "+14085551000", "answerConfirmationRequiredEnabled": true, "numberOfRings": 3}
                    ],
                    "criteria": [{"id": "c1", "source": "ALL_NUMBERS", "ringEnabled": true}]
                }"#
                .to_string(),
            })
            .unwrap();
        assert_eq!(settings.phone_numbers[0].number_of_rings, 3);
        assert!(settings.criteria[0].enabled);

        let call = api.configure_settings("p1", &settings, None).unwrap();
        let body: serde_json::Value =
            serde_json::from_str(call.request.body.as_deref().unwrap()).unwrap();
        assert!(body.get("criteria").is_none());
        assert_eq!(body["baseLocationNumberOfRings"], 2);
        assert_eq!(body["phoneNumbers"][0]["phoneNumber"], "+14085551000");
    }
}
