//! Typed client core for the Webex Calling REST API.
//!
//! # Overview
//! Builds `HttpRequest` values and parses `HttpResponse` values without
//! touching the network (host-does-IO pattern). Every operation returns an
//! [`ApiCall<T>`]: the request plus the decoder for its response. The caller
//! executes the round-trip, or hands the call a [`Transport`]; with the
//! default `blocking` feature [`UreqTransport`] does it over HTTP.
//!
//! # Design
//! - `WebexClient` is stateless beyond its `ApiSession` (base URL, token,
//!   default org and page size).
//! - Resource wrappers implement [`ApiChild`] for endpoint construction and
//!   one helper per HTTP verb.
//! - Models are serde structs with camelCase wire names; optional fields are
//!   omitted on write.
//! - List endpoints return [`Page<T>`]; `follow` / `collect_all` walk the
//!   `Link: rel="next"` chain.
//! - The selective call-handling features share one criteria model; the
//!   feature-specific enabled flag is normalized to `enabled`.

pub mod api_child;
pub mod calls;
pub mod client;
pub mod common;
pub mod config;
pub mod error;
pub mod http;
pub mod locations;
pub mod organizations;
pub mod pagination;
pub mod people;
pub mod person_settings;
pub mod transport;
pub mod voice_messages;
pub mod voicemail_config;

pub use api_child::{ApiCall, ApiChild, ApiSession, QueryParams};
pub use client::WebexClient;
pub use common::Selector;
pub use config::ClientConfig;
pub use error::ApiError;
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use pagination::{Page, PageIter};
pub use person_settings::selective::{SelectiveApi, SelectiveCriteria, SelectiveFeature};
pub use transport::Transport;
#[cfg(feature = "blocking")]
pub use transport::UreqTransport;
