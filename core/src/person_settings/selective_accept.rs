//! Selective accept: only accept calls matching a criteria.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct SelectiveAccept;

impl SelectiveFeature for SelectiveAccept {
    const SEGMENT: &'static str = "selectiveAccept";
    const ENABLED_KEY: &'static str = "acceptEnabled";
    type Settings = SelectiveAcceptSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveAcceptSettings {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::ApiSession;
    use crate::common::Selector;
    use crate::config::ClientConfig;
    use crate::http::HttpMethod;
    use crate::person_settings::selective::{ScheduleLevel, ScheduleType, SelectiveApi, SelectiveCriteria};

    #[test]
    fn configure_criteria_uses_accept_flag() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let api = SelectiveApi::<SelectiveAccept>::new(&session, Selector::People);
        let criteria = SelectiveCriteria {
            id: Some("c1".to_string()),
            schedule_name: Some("Business".to_string()),
            schedule_type: Some(ScheduleType::BusinessHours),
            schedule_level: Some(ScheduleLevel::Location),
            enabled: true,
            ..SelectiveCriteria::default()
        };
        let call = api.configure_criteria("p1", "c1", &criteria, None).unwrap();
        assert_eq!(call.request.method, HttpMethod::Put);
        assert_eq!(
            call.request.path,
            "http://h/telephony/config/people/p1/selectiveAccept/criteria/c1"
        );
        let body: serde_json::Value =
            serde_json::from_str(call.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({
                "scheduleName": "Business",
                "scheduleType": "businessHours",
                "scheduleLevel": "LOCATION",
                "acceptEnabled": true
            })
        );
    }

    #[test]
    fn configure_settings_omits_criteria() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let api = SelectiveApi::<SelectiveAccept>::new(&session, Selector::People);
        let settings = SelectiveAcceptSettings {
            enabled: true,
            criteria: vec![CriteriaSummary {
                id: "c1".to_string(),
                schedule_name: None,
                source: None,
                enabled: true,
            }],
        };
        let call = api.configure_settings("p1", &settings, None).unwrap();
        assert_eq!(call.request.body.as_deref(), Some(r#"{"enabled":true}"#));
    }
}
