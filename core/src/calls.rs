//! Call control for the authenticated user.
//!
//! All operations act on the user behind the access token; none take an
//! `orgId`. Actions answer either nothing or a [`CallInfo`] identifying the
//! new call leg.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api_child::{decode_json, ApiCall, ApiChild, ApiSession, QueryParams};
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::pagination::decode_items;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallPersonality {
    Originator,
    Terminator,
    ClickToDial,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallState {
    Connecting,
    Alerting,
    Connected,
    Held,
    RemoteHeld,
    Disconnected,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RecordingState {
    Pending,
    Started,
    Paused,
    Stopped,
    Failed,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CallType {
    Location,
    Organization,
    External,
    Emergency,
    Repair,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RedirectionReason {
    Busy,
    NoAnswer,
    Unavailable,
    Unconditional,
    TimeOfDay,
    Divert,
    FollowMe,
    HuntGroup,
    CallQueue,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum RejectAction {
    Busy,
    TemporarilyUnavailable,
    Ignore,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum HistoryType {
    Placed,
    Missed,
    Received,
}

impl HistoryType {
    pub fn as_str(&self) -> &'static str {
        match self {
            HistoryType::Placed => "placed",
            HistoryType::Missed => "missed",
            HistoryType::Received => "received",
        }
    }
}

/// Identifies a call leg created by dial, retrieve, pickup or barge-in.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallInfo {
    pub call_id: String,
    pub call_session_id: String,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyParty {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub person_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub place_id: Option<String>,
    #[serde(default)]
    pub privacy_enabled: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub call_type: Option<CallType>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirection {
    pub reason: RedirectionReason,
    pub redirecting_party: TelephonyParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recall {
    /// Only `park` today.
    #[serde(rename = "type")]
    pub recall_type: String,
    pub party: TelephonyParty,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TelephonyCall {
    pub id: String,
    pub call_session_id: String,
    pub personality: CallPersonality,
    pub state: CallState,
    pub remote_party: TelephonyParty,
    /// Line appearance the call is on, when the device has several.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appearance: Option<u32>,
    pub created: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub answered: Option<DateTime<Utc>>,
    #[serde(default)]
    pub redirections: Vec<Redirection>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recall: Option<Recall>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recording_state: Option<RecordingState>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallHistoryRecord {
    #[serde(rename = "type")]
    pub history_type: HistoryType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub number: Option<String>,
    #[serde(default)]
    pub privacy_enabled: bool,
    pub time: DateTime<Utc>,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParkResult {
    /// Where the call was parked.
    pub parked_against: TelephonyParty,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DialBody<'a> {
    destination: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct CallIdBody<'a> {
    call_id: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct OptionalCallIdBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct AnswerBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RejectBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    action: Option<RejectAction>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DivertBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    to_voicemail: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TransferBody<'a> {
    #[serde(rename = "callId1", skip_serializing_if = "Option::is_none")]
    call_id1: Option<&'a str>,
    #[serde(rename = "callId2", skip_serializing_if = "Option::is_none")]
    call_id2: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ParkBody<'a> {
    call_id: &'a str,
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(skip_serializing_if = "std::ops::Not::not")]
    is_group_park: bool,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct RetrieveBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    destination: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_id: Option<&'a str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DtmfBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    call_id: Option<&'a str>,
    dtmf: &'a str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TargetBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    target: Option<&'a str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    endpoint_id: Option<&'a str>,
}

pub struct CallsApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for CallsApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "telephony/calls".to_string()
    }
}

impl<'a> CallsApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    fn action<B: Serialize>(&self, action: &str, body: &B) -> Result<ApiCall<()>, ApiError> {
        self.post_no_content(&self.ep(Some(action)), QueryParams::new(), body)
    }

    fn action_with_info<B: Serialize>(&self, action: &str, body: &B) -> Result<ApiCall<CallInfo>, ApiError> {
        self.post(&self.ep(Some(action)), QueryParams::new(), body)
    }

    /// Place a call to `destination` (number, SIP URI or extension).
    pub fn dial(&self, destination: &str, endpoint_id: Option<&str>) -> Result<ApiCall<CallInfo>, ApiError> {
        self.action_with_info(
            "dial",
            &DialBody {
                destination,
                endpoint_id,
            },
        )
    }

    pub fn answer(&self, call_id: &str, endpoint_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("answer", &AnswerBody { call_id, endpoint_id })
    }

    pub fn reject(&self, call_id: &str, action: Option<RejectAction>) -> Result<ApiCall<()>, ApiError> {
        self.action("reject", &RejectBody { call_id, action })
    }

    pub fn hangup(&self, call_id: &str) -> Result<ApiCall<()>, ApiError> {
        self.action("hangup", &CallIdBody { call_id })
    }

    pub fn hold(&self, call_id: &str) -> Result<ApiCall<()>, ApiError> {
        self.action("hold", &CallIdBody { call_id })
    }

    pub fn resume(&self, call_id: &str) -> Result<ApiCall<()>, ApiError> {
        self.action("resume", &CallIdBody { call_id })
    }

    /// Send an incoming call to `destination`, or to the user's voicemail.
    pub fn divert(
        &self,
        call_id: &str,
        destination: Option<&str>,
        to_voicemail: bool,
    ) -> Result<ApiCall<()>, ApiError> {
        self.action(
            "divert",
            &DivertBody {
                call_id,
                destination,
                to_voicemail,
            },
        )
    }

    /// Join two calls (attended) or transfer one call to `destination` (blind).
    pub fn transfer(
        &self,
        call_id1: Option<&str>,
        call_id2: Option<&str>,
        destination: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.action(
            "transfer",
            &TransferBody {
                call_id1,
                call_id2,
                destination,
            },
        )
    }

    pub fn park(
        &self,
        call_id: &str,
        destination: Option<&str>,
        is_group_park: bool,
    ) -> Result<ApiCall<ParkResult>, ApiError> {
        self.post(
            &self.ep(Some("park")),
            QueryParams::new(),
            &ParkBody {
                call_id,
                destination,
                is_group_park,
            },
        )
    }

    pub fn retrieve(&self, destination: Option<&str>, endpoint_id: Option<&str>) -> Result<ApiCall<CallInfo>, ApiError> {
        self.action_with_info(
            "retrieve",
            &RetrieveBody {
                destination,
                endpoint_id,
            },
        )
    }

    pub fn start_recording(&self, call_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("startRecording", &OptionalCallIdBody { call_id })
    }

    pub fn stop_recording(&self, call_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("stopRecording", &OptionalCallIdBody { call_id })
    }

    pub fn pause_recording(&self, call_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("pauseRecording", &OptionalCallIdBody { call_id })
    }

    pub fn resume_recording(&self, call_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("resumeRecording", &OptionalCallIdBody { call_id })
    }

    /// Send DTMF digits (`0-9`, `*`, `#`, `,` for a pause) on a connected call.
    pub fn transmit_dtmf(&self, call_id: Option<&str>, dtmf: &str) -> Result<ApiCall<()>, ApiError> {
        self.action("transmitDtmf", &DtmfBody { call_id, dtmf })
    }

    /// Push a call from the app to the user's desk phone.
    pub fn push(&self, call_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.action("push", &OptionalCallIdBody { call_id })
    }

    pub fn pickup(&self, target: Option<&str>, endpoint_id: Option<&str>) -> Result<ApiCall<CallInfo>, ApiError> {
        self.action_with_info("pickup", &TargetBody { target, endpoint_id })
    }

    pub fn barge_in(&self, target: &str, endpoint_id: Option<&str>) -> Result<ApiCall<CallInfo>, ApiError> {
        self.action_with_info(
            "bargeIn",
            &TargetBody {
                target: Some(target),
                endpoint_id,
            },
        )
    }

    /// Active calls of the user; the endpoint does not paginate.
    pub fn list_calls(&self) -> ApiCall<Vec<TelephonyCall>> {
        self.session.call(
            HttpMethod::Get,
            &self.ep(None),
            &QueryParams::new(),
            None,
            decode_items::<TelephonyCall>,
        )
    }

    pub fn call_details(&self, call_id: &str) -> ApiCall<TelephonyCall> {
        self.session.call(
            HttpMethod::Get,
            &self.ep(Some(call_id)),
            &QueryParams::new(),
            None,
            decode_json::<TelephonyCall>,
        )
    }

    pub fn call_history(&self, history_type: Option<HistoryType>) -> ApiCall<Vec<CallHistoryRecord>> {
        let query = QueryParams::new().push_opt("type", history_type.map(|t| t.as_str()));
        self.session.call(
            HttpMethod::Get,
            &self.ep(Some("history")),
            &query,
            None,
            decode_items::<CallHistoryRecord>,
        )
    }
}
