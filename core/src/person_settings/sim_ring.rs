//! Simultaneous ring: ring additional numbers together with the person.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct SimultaneousRing;

impl SelectiveFeature for SimultaneousRing {
    const SEGMENT: &'static str = "simultaneousRing";
    const ENABLED_KEY: &'static str = "ringEnabled";
    type Settings = SimRingSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimRingNumber {
    pub phone_number: String,
    #[serde(default)]
    pub answer_confirmation_required_enabled: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SimRingSettings {
    pub enabled: bool,
    #[serde(default)]
    pub do_not_ring_if_on_call_enabled: bool,
    /// Up to ten numbers.
    #[serde(default)]
    pub phone_numbers: Vec<SimRingNumber>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::ApiSession;
    use crate::common::Selector;
    use crate::config::ClientConfig;
    use crate::person_settings::selective::{SelectiveApi, SelectiveCriteria};

    #[test]
    fn criteria_uses_ring_flag() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let api = SelectiveApi::<SimultaneousRing>::new(&session, Selector::People);
        let call = api
            .create_criteria("p1", &SelectiveCriteria::for_numbers(["5000"], false), None)
            .unwrap();
        assert_eq!(
            call.request.path,
            "http://h/telephony/config/people/p1/simultaneousRing/criteria"
        );
        let body: serde_json::Value =
            serde_json::from_str(call.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["ringEnabled"], false);
        assert_eq!(body["phoneNumbers"], serde_json::json!(["5000"]));
    }
}
