//! Priority alert: distinctive ring for calls matching a criteria.

use serde::{Deserialize, Serialize};

use super::selective::{CriteriaSummary, SelectiveFeature};

pub struct PriorityAlert;

impl SelectiveFeature for PriorityAlert {
    const SEGMENT: &'static str = "priorityAlert";
    const ENABLED_KEY: &'static str = "notificationEnabled";
    type Settings = PriorityAlertSettings;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriorityAlertSettings {
    pub enabled: bool,
    /// Read-only; manage entries through the criteria operations.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub criteria: Vec<CriteriaSummary>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::ApiSession;
    use crate::common::Selector;
    use crate::config::ClientConfig;
    use crate::http::{HttpMethod, HttpResponse};
    use crate::person_settings::selective::{SelectiveApi, SelectiveCriteria, SelectiveFrom, SelectiveSource};

    fn session() -> ApiSession {
        ApiSession::new(ClientConfig::new("t").with_base_url("http://h"))
    }

    fn ok(body: &str) -> HttpResponse {
        HttpResponse {
            status: 200,
            headers: Vec::new(),
            body: body.to_string(),
        }
    }

    #[test]
    fn read_settings_normalizes_criteria() {
        let session = session();
        let api = SelectiveApi::<PriorityAlert>::new(&session, Selector::People);
        let call = api.read_settings("p1", None);
        assert_eq!(call.request.path, "http://h/telephony/config/people/p1/priorityAlert");
        let settings = call
            .parse(ok(r#"{
                "enabled": true,
                "criteria": [
                    {"id": "c1", "scheduleName": "Office", "source": "SPECIFIC_NUMBERS", "notificationEnabled": true}
                ]
            }"#))
            .unwrap();
        assert!(settings.enabled);
        assert_eq!(settings.criteria[0].source, Some(SelectiveSource::SpecificNumbers));
        assert!(settings.criteria[0].enabled);
    }

    #[test]
    fn create_criteria_uses_notification_flag() {
        let session = session();
        let api = SelectiveApi::<PriorityAlert>::new(&session, Selector::People);
        let criteria = SelectiveCriteria::for_numbers(["+14085551234"], true);
        let call = api.create_criteria("p1", &criteria, Some("o1")).unwrap();
        assert_eq!(call.request.method, HttpMethod::Post);
        assert_eq!(
            call.request.path,
            "http://h/telephony/config/people/p1/priorityAlert/criteria?orgId=o1"
        );
        let body: serde_json::Value =
            serde_json::from_str(call.request.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["notificationEnabled"], true);
        assert!(body.get("enabled").is_none());
        assert_eq!(body["callsFrom"], "SELECT_PHONE_NUMBERS");
        assert_eq!(call.parse(ok(r#"{"id":"c9"}"#)).unwrap(), "c9");
    }

    #[test]
    fn read_criteria_for_workspace() {
        let session = session();
        let api = SelectiveApi::<PriorityAlert>::new(&session, Selector::Workspaces);
        let call = api.read_criteria("w1", "c1", None);
        assert_eq!(
            call.request.path,
            "http://h/telephony/config/workspaces/w1/priorityAlert/criteria/c1"
        );
        let criteria = call
            .parse(ok(r#"{"id":"c1","callsFrom":"ANY_INTERNAL","notificationEnabled":false}"#))
            .unwrap();
        assert_eq!(criteria.calls_from, Some(SelectiveFrom::AnyInternal));
        assert!(!criteria.enabled);
    }
}
