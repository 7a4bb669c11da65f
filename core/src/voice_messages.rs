//! Voicemail box of the authenticated user.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::api_child::{ApiCall, ApiChild, ApiSession, QueryParams};
use crate::calls::TelephonyParty;
use crate::error::ApiError;
use crate::http::HttpMethod;
use crate::pagination::decode_items;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageSummary {
    #[serde(default)]
    pub new_messages: u32,
    #[serde(default)]
    pub old_messages: u32,
    #[serde(default)]
    pub new_urgent_messages: u32,
    #[serde(default)]
    pub old_urgent_messages: u32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceMessageDetails {
    pub id: String,
    /// Seconds; absent for fax messages.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<u32>,
    pub calling_party: TelephonyParty,
    #[serde(default)]
    pub urgent: bool,
    #[serde(default)]
    pub confidential: bool,
    #[serde(default)]
    pub read: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fax_page_count: Option<u32>,
    pub created: DateTime<Utc>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct MarkBody<'a> {
    #[serde(skip_serializing_if = "Option::is_none")]
    message_id: Option<&'a str>,
}

pub struct VoiceMessagesApi<'a> {
    session: &'a ApiSession,
}

impl ApiChild for VoiceMessagesApi<'_> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        "telephony/voiceMessages".to_string()
    }
}

impl<'a> VoiceMessagesApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    pub fn summary(&self) -> ApiCall<MessageSummary> {
        self.get(&self.ep(Some("summary")), QueryParams::new())
    }

    pub fn list(&self) -> ApiCall<Vec<VoiceMessageDetails>> {
        self.session.call(
            HttpMethod::Get,
            &self.ep(None),
            &QueryParams::new(),
            None,
            decode_items::<VoiceMessageDetails>,
        )
    }

    pub fn delete_message(&self, message_id: &str) -> ApiCall<()> {
        self.delete(&self.ep(Some(message_id)), QueryParams::new())
    }

    /// Mark one message as read, or all messages when `message_id` is `None`.
    pub fn mark_as_read(&self, message_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.post_no_content(&self.ep(Some("markAsRead")), QueryParams::new(), &MarkBody { message_id })
    }

    /// Mark one message as unread, or all messages when `message_id` is `None`.
    pub fn mark_as_unread(&self, message_id: Option<&str>) -> Result<ApiCall<()>, ApiError> {
        self.post_no_content(&self.ep(Some("markAsUnread")), QueryParams::new(), &MarkBody { message_id })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClientConfig;
    use crate::http::HttpResponse;

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
    fn summary_counts() {
        let session = session();
        let call = VoiceMessagesApi::new(&session).summary();
        assert_eq!(call.request.path, "http://h/telephony/voiceMessages/summary");
        let summary = call.parse(ok(r#"{"newMessages":2,"oldMessages":5}"#)).unwrap();
        assert_eq!(summary.new_messages, 2);
        assert_eq!(summary.new_urgent_messages, 0);
    }

    #[test]
    fn list_parses_messages() {
        let session = session();
        let messages = VoiceMessagesApi::new(&session)
            .list()
            .parse(ok(r#"{"items":[{
                "id": "m1",
                "duration": 12,
                "callingParty": {"name": "Ann", "number": "2003", "privacyEnabled": false},
                "urgent": true,
                "read": false,
                "created": "2024-05-01T09:00:00Z"
            }]}"#))
            .unwrap();
        assert_eq!(messages[0].duration, Some(12));
        assert!(messages[0].urgent);
        assert_eq!(messages[0].calling_party.name.as_deref(), Some("Ann"));
    }

    #[test]
    fn mark_all_as_read_sends_empty_object() {
        let session = session();
        let api = VoiceMessagesApi::new(&session);
        let call = api.mark_as_read(None).unwrap();
        assert_eq!(call.request.path, "http://h/telephony/voiceMessages/markAsRead");
        assert_eq!(call.request.body.as_deref(), Some("{}"));
        let call = api.mark_as_unread(Some("m1")).unwrap();
        assert_eq!(call.request.body.as_deref(), Some(r#"{"messageId":"m1"}"#));
    }

    #[test]
    fn delete_targets_message() {
        let session = session();
        let call = VoiceMessagesApi::new(&session).delete_message("m1");
        assert_eq!(call.request.method, HttpMethod::Delete);
        assert_eq!(call.request.path, "http://h/telephony/voiceMessages/m1");
    }
}
