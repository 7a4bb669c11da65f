//! Entry point owning the session every resource wrapper borrows.
//!
//! # Design
//! `WebexClient` holds only an `ApiSession` (base URL, token, defaults) and
//! carries no mutable state between calls. Accessors hand out lightweight
//! wrappers that build `ApiCall` values; the caller executes the round-trip
//! itself or passes a `Transport`.

use crate::api_child::ApiSession;
use crate::calls::CallsApi;
use crate::config::ClientConfig;
use crate::error::ApiError;
use crate::locations::LocationsApi;
use crate::organizations::OrganizationsApi;
use crate::people::PeopleApi;
use crate::person_settings::PersonSettingsApi;
use crate::voice_messages::VoiceMessagesApi;
use crate::voicemail_config::{LocationVoicemailApi, OrgVoicemailApi};

#[derive(Debug, Clone)]
pub struct WebexClient {
    session: ApiSession,
}

impl WebexClient {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            session: ApiSession::new(config),
        }
    }

    /// Client configured from `WEBEX_*` environment variables.
    pub fn from_env() -> Result<Self, ApiError> {
        ClientConfig::from_env().map(Self::new)
    }

    pub fn session(&self) -> &ApiSession {
        &self.session
    }

    pub fn people(&self) -> PeopleApi<'_> {
        PeopleApi::new(&self.session)
    }

    pub fn organizations(&self) -> OrganizationsApi<'_> {
        OrganizationsApi::new(&self.session)
    }

    pub fn locations(&self) -> LocationsApi<'_> {
        LocationsApi::new(&self.session)
    }

    pub fn person_settings(&self) -> PersonSettingsApi<'_> {
        PersonSettingsApi::new(&self.session)
    }

    pub fn calls(&self) -> CallsApi<'_> {
        CallsApi::new(&self.session)
    }

    pub fn voice_messages(&self) -> VoiceMessagesApi<'_> {
        VoiceMessagesApi::new(&self.session)
    }

    pub fn org_voicemail(&self) -> OrgVoicemailApi<'_> {
        OrgVoicemailApi::new(&self.session)
    }

    pub fn location_voicemail(&self) -> LocationVoicemailApi<'_> {
        LocationVoicemailApi::new(&self.session)
    }
}
