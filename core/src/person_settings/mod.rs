//! Calling settings of a single person.
//!
//! # Design
//! Most settings live below `people/{person_id}/features/{feature}`; the
//! [`PersonFeature`] trait builds those endpoints for each wrapper. The
//! executive settings and the selective call-handling features live below
//! `telephony/config/...` instead and build their own endpoints.
//!
//! Every operation accepts an optional `org_id`, sent as `orgId` and falling
//! back to the configured default organization.

/// Declares a wrapper struct rooted at `people` implementing `ApiChild`.
macro_rules! person_feature_api {
    ($name:ident, $feature:literal) => {
        pub struct $name<'a> {
            session: &'a $crate::api_child::ApiSession,
        }

        impl<'a> $name<'a> {
            pub fn new(session: &'a $crate::api_child::ApiSession) -> Self {
                Self { session }
            }
        }

        impl $crate::api_child::ApiChild for $name<'_> {
            fn session(&self) -> &$crate::api_child::ApiSession {
                self.session
            }

            fn base(&self) -> String {
                "people".to_string()
            }
        }

        impl $crate::person_settings::PersonFeature for $name<'_> {
            const FEATURE: &'static str = $feature;
        }
    };
}

pub(crate) use person_feature_api;

pub mod call_waiting;
pub mod dnd;
pub mod exec_assistant;
pub mod executive;
pub mod forwarding;
pub mod priority_alert;
pub mod selective;
pub mod selective_accept;
pub mod selective_forward;
pub mod selective_reject;
pub mod sequential_ring;
pub mod sim_ring;
pub mod voicemail;

use crate::api_child::{ApiChild, ApiSession};
use crate::common::Selector;

use call_waiting::CallWaitingApi;
use dnd::DndApi;
use exec_assistant::ExecAssistantApi;
use executive::ExecutiveApi;
use forwarding::PersonForwardingApi;
use priority_alert::PriorityAlert;
use selective::SelectiveApi;
use selective_accept::SelectiveAccept;
use selective_forward::SelectiveForward;
use selective_reject::SelectiveReject;
use sequential_ring::SequentialRing;
use sim_ring::SimultaneousRing;
use voicemail::VoicemailApi;

/// Endpoint construction for settings below `people/{id}/features/`.
pub trait PersonFeature: ApiChild {
    /// Feature segment, e.g. `callForwarding`.
    const FEATURE: &'static str;

    fn feature_ep(&self, person_id: &str, path: Option<&str>) -> String {
        let mut ep = format!("{person_id}/features/{}", Self::FEATURE);
        if let Some(path) = path {
            ep.push('/');
            ep.push_str(path.trim_start_matches('/'));
        }
        self.ep(Some(&ep))
    }
}

/// Accessors for every per-person settings wrapper.
pub struct PersonSettingsApi<'a> {
    session: &'a ApiSession,
}

impl<'a> PersonSettingsApi<'a> {
    pub fn new(session: &'a ApiSession) -> Self {
        Self { session }
    }

    pub fn forwarding(&self) -> PersonForwardingApi<'a> {
        PersonForwardingApi::new(self.session)
    }

    pub fn dnd(&self) -> DndApi<'a> {
        DndApi::new(self.session)
    }

    pub fn call_waiting(&self) -> CallWaitingApi<'a> {
        CallWaitingApi::new(self.session)
    }

    pub fn voicemail(&self) -> VoicemailApi<'a> {
        VoicemailApi::new(self.session)
    }

    pub fn exec_assistant(&self) -> ExecAssistantApi<'a> {
        ExecAssistantApi::new(self.session)
    }

    pub fn executive(&self) -> ExecutiveApi<'a> {
        ExecutiveApi::new(self.session)
    }

    pub fn priority_alert(&self) -> SelectiveApi<'a, PriorityAlert> {
        SelectiveApi::new(self.session, Selector::People)
    }

    pub fn selective_accept(&self) -> SelectiveApi<'a, SelectiveAccept> {
        SelectiveApi::new(self.session, Selector::People)
    }

    pub fn selective_reject(&self) -> SelectiveApi<'a, SelectiveReject> {
        SelectiveApi::new(self.session, Selector::People)
    }

    pub fn selective_forward(&self) -> SelectiveApi<'a, SelectiveForward> {
        SelectiveApi::new(self.session, Selector::People)
    }

    pub fn sequential_ring(&self) -> SelectiveApi<'a, SequentialRing> {
        SelectiveApi::new(self.session, Selector::People)
    }

    pub fn sim_ring(&self) -> SelectiveApi<'a, SimultaneousRing> {
        SelectiveApi::new(self.session, Selector::People)
    }
}
