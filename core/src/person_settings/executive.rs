//! Executive settings: how an executive's calls are alerted to assistants,
//! which assistants are assigned, and call screening.

use serde::{Deserialize, Serialize};

use crate::api_child::{ApiCall, ApiChild, ApiSession};
use crate::error::ApiError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertingMode {
    Sequential,
    Simultaneous,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RolloverAction {
    VoiceMessaging,
    Forward,
    NoAnswerProcessing,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClidNameMode {
    ExecutiveOriginator,
    OriginatorExecutive,
    Executive,
    Originator,
    Custom,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ClidPhoneNumberMode {
    Executive,
    Originator,
    Custom,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveAlert {
    pub alerting_mode: AlertingMode,
    /// Rings before moving to the next assistant in sequential mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_assistant_number_of_rings: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover_action: Option<RolloverAction>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover_forward_to_phone_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub rollover_wait_time_in_secs: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub clid_name_mode: Option<ClidNameMode>,
    #[serde(
        rename = "customCLIDName",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_clid_name: Option<String>,
    #[serde(
        rename = "clidPhoneNumberMode",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub clid_phone_number_mode: Option<ClidPhoneNumberMode>,
    #[serde(
        rename = "customCLIDPhoneNumber",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub custom_clid_phone_number: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveAssistant {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub direct_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    /// Whether the assistant has opted in to this executive's pool.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub opt_in_enabled: Option<bool>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveAssistants {
    #[serde(default)]
    pub allow_opt_in_out_enabled: bool,
    #[serde(default)]
    pub assistants: Vec<ExecutiveAssistant>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AssistantsUpdate<'a> {
    allow_opt_in_out_enabled: bool,
    assistant_ids: Vec<&'a str>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScreeningAlertType {
    Silent,
    RingSplash,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExecutiveScreening {
    pub enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_type: Option<ScreeningAlertType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_anywhere_location_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_mobility_location_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub alert_shared_call_appearance_location_enabled: Option<bool>,
}

pub struct ExecutiveApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for ExecutiveApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "telephony/config/people".to_string()
    }
}

impl<'a> ExecutiveApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    fn executive_ep(&self, person_id: &str, path: &str) -> String {
        self.ep(Some(&format!("{person_id}/executive/{path}")))
    }

    pub fn read_alert(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<ExecutiveAlert> {
        self.get(&self.executive_ep(person_id, "alert"), self.session.org_query(org_id))
    }

    pub fn configure_alert(
        &self,
        person_id: &str,
        alert: &ExecutiveAlert,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(&self.executive_ep(person_id, "alert"), self.session.org_query(org_id), alert)
    }

    pub fn read_assistants(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<ExecutiveAssistants> {
        self.get(
            &self.executive_ep(person_id, "assistants"),
            self.session.org_query(org_id),
        )
    }

    /// Replace the assistant pool. Only ids are sent; the remaining assistant
    /// fields are informational.
    pub fn configure_assistants(
        &self,
        person_id: &str,
        assistants: &ExecutiveAssistants,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        let body = AssistantsUpdate {
            allow_opt_in_out_enabled: assistants.allow_opt_in_out_enabled,
            assistant_ids: assistants.assistants.iter().map(|a| a.id.as_str()).collect(),
        };
        self.put(
            &self.executive_ep(person_id, "assistants"),
            self.session.org_query(org_id),
            &body,
        )
    }

    pub fn read_screening(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<ExecutiveScreening> {
        self.get(
            &self.executive_ep(person_id, "screening"),
            self.session.org_query(org_id),
        )
    }

    pub fn configure_screening(
        &self,
        person_id: &str,
        screening: &ExecutiveScreening,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.executive_ep(person_id, "screening"),
            self.session.org_query(org_id),
            screening,
        )
    }
}
