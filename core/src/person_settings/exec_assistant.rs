//! Executive/assistant role of a person.

use serde::{Deserialize, Serialize};

use super::{person_feature_api, PersonFeature};
use crate::api_child::{decode_json, ApiCall, ApiChild};
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ExecAssistantType {
    /// Neither executive nor assistant.
    Unassigned,
    Executive,
    ExecutiveAssistant,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
struct ExecAssistantBody {
    #[serde(rename = "type")]
    assistant_type: ExecAssistantType,
}

fn decode_type(response: &HttpResponse) -> Result<ExecAssistantType, ApiError> {
    decode_json::<ExecAssistantBody>(response).map(|body| body.assistant_type)
}

person_feature_api!(ExecAssistantApi, "executiveAssistant");

impl ExecAssistantApi<'_> {
    pub fn read(&self, person_id: &str, org_id: Option<&str>) -> ApiCall<ExecAssistantType> {
        self.session.call(
            HttpMethod::Get,
            &self.feature_ep(person_id, None),
            &self.session.org_query(org_id),
            None,
            decode_type,
        )
    }

    pub fn configure(
        &self,
        person_id: &str,
        assistant_type: ExecAssistantType,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        self.put(
            &self.feature_ep(person_id, None),
            self.session.org_query(org_id),
            &ExecAssistantBody { assistant_type },
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_child::ApiSession;
    use crate::config::ClientConfig;

    #[test]
    fn read_unwraps_type() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let call = ExecAssistantApi::new(&session).read("p1", None);
        assert_eq!(
            call.request.path,
            "http://h/people/p1/features/executiveAssistant"
        );
        let t = call
            .parse(HttpResponse {
                status: 200,
                headers: Vec::new(),
                body: r#"{"type":"EXECUTIVE_ASSISTANT"}"#.to_string(),
            })
            .unwrap();
        assert_eq!(t, ExecAssistantType::ExecutiveAssistant);
    }

    #[test]
    fn configure_wraps_type() {
        let session = ApiSession::new(ClientConfig::new("t").with_base_url("http://h"));
        let call = ExecAssistantApi::new(&session)
            .configure("p1", ExecAssistantType::Executive, None)
            .unwrap();
        assert_eq!(call.request.body.as_deref(), Some(r#"{"type":"EXECUTIVE"}"#));
    }
}
