//! C-ABI wrapper around `wxc-core`.
//!
//! # Overview
//! Exposes a slice of the Webex Calling client through `extern "C"`
//! functions so any language with a C FFI can build requests and parse
//! responses while doing the HTTP itself.
//!
//! # Design
//! - Every `extern "C"` function wraps its body in `catch_unwind` so panics
//!   never cross the FFI boundary.
//! - `wxc_build_*` returns an `FfiHttpRequest` (null on bad input);
//!   `wxc_parse_*` returns an `FfiWxcResult` envelope tagged by
//!   `FfiDataTag`. Parsing is stateless and takes no client.
//! - Payloads with no fixed C layout come back as JSON in the core model's
//!   shape, so selective criteria always carry `enabled` regardless of the
//!   feature's wire name.
//! - The caller owns every returned pointer and releases it with the
//!   matching `wxc_free_*` function.

pub mod types;

use std::ffi::{CStr, CString};
use std::os::raw::c_char;
use std::panic::{catch_unwind, AssertUnwindSafe};

use wxc_core::api_child::{decode_empty, decode_json, to_json};
use wxc_core::calls::{CallInfo, TelephonyCall};
use wxc_core::error::{check_status, ApiError};
use wxc_core::http::{HttpRequest, HttpResponse};
use wxc_core::pagination::decode_items;
use wxc_core::person_settings::dnd::Dnd;
use wxc_core::person_settings::forwarding::PersonForwardingSetting;
use wxc_core::person_settings::priority_alert::PriorityAlert;
use wxc_core::person_settings::selective::{decode_criteria, decode_settings};
use wxc_core::person_settings::selective_accept::SelectiveAccept;
use wxc_core::person_settings::selective_forward::SelectiveForward;
use wxc_core::person_settings::selective_reject::SelectiveReject;
use wxc_core::person_settings::sequential_ring::SequentialRing;
use wxc_core::person_settings::sim_ring::SimultaneousRing;
use wxc_core::{ClientConfig, SelectiveApi, WebexClient};

use types::*;

/// Run `$body` with `$f` aliased to the core feature type selected by
/// `$feature`.
macro_rules! with_feature {
    ($feature:expr, $f:ident => $body:expr) => {
        match $feature {
            FfiSelectiveFeature::PriorityAlert => {
                type $f = PriorityAlert;
                $body
            }
            FfiSelectiveFeature::SelectiveAccept => {
                type $f = SelectiveAccept;
                $body
            }
            FfiSelectiveFeature::SelectiveReject => {
                type $f = SelectiveReject;
                $body
            }
            FfiSelectiveFeature::SelectiveForward => {
                type $f = SelectiveForward;
                $body
            }
            FfiSelectiveFeature::SequentialRing => {
                type $f = SequentialRing;
                $body
            }
            FfiSelectiveFeature::SimultaneousRing => {
                type $f = SimultaneousRing;
                $body
            }
        }
    };
}

/// Borrow a C string. `None` for null or non-UTF-8 input.
fn c_str<'a>(ptr: *const c_char) -> Option<&'a str> {
    if ptr.is_null() {
        return None;
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok()
}

/// Borrow an optional C string. Null is `Some(None)`; non-UTF-8 input is
/// `None` so callers reject it instead of dropping the argument.
fn opt_c_str<'a>(ptr: *const c_char) -> Option<Option<&'a str>> {
    if ptr.is_null() {
        return Some(None);
    }
    unsafe { CStr::from_ptr(ptr) }.to_str().ok().map(Some)
}

/// Run a builder behind `catch_unwind` and hand the request to C.
fn build_request<F>(name: &str, build: F) -> *mut FfiHttpRequest
where
    F: FnOnce() -> Option<HttpRequest>,
{
    match catch_unwind(AssertUnwindSafe(build)) {
        Ok(Some(req)) => FfiHttpRequest::from_core(req),
        Ok(None) => {
            tracing::debug!(function = name, "request not built");
            std::ptr::null_mut()
        }
        Err(_) => {
            tracing::error!(function = name, "panic caught at FFI boundary");
            std::ptr::null_mut()
        }
    }
}

// ---------------------------------------------------------------------------
// Client lifecycle
// ---------------------------------------------------------------------------

/// Create a client. `base_url` may be null to use the public Webex API.
///
/// Returns null if `access_token` is null, if either string is not UTF-8, or
/// on an internal panic.
/// Free the result with `wxc_client_free`.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_client_new(base_url: *const c_char, access_token: *const c_char) -> *mut FfiWxcClient {
    catch_unwind(|| {
        let Some(token) = c_str(access_token) else {
            return std::ptr::null_mut();
        };
        let Some(base_url) = opt_c_str(base_url) else {
            return std::ptr::null_mut();
        };
        let mut config = ClientConfig::new(token);
        if let Some(url) = base_url {
            config = config.with_base_url(url);
        }
        Box::into_raw(Box::new(FfiWxcClient {
            inner: WebexClient::new(config),
        }))
    })
    .unwrap_or(std::ptr::null_mut())
}

/// Free a client created by `wxc_client_new`. Safe to call with null.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_client_free(client: *mut FfiWxcClient) {
    if !client.is_null() {
        let _ = catch_unwind(|| {
            drop(unsafe { Box::from_raw(client) });
        });
    }
}

// ---------------------------------------------------------------------------
// Build request functions
//
// `org_id` is optional everywhere it appears. Free results with
// `wxc_free_request`.
// ---------------------------------------------------------------------------

/// GET a person's call forwarding settings.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_forwarding_read(
    client: *const FfiWxcClient,
    person_id: *const c_char,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_forwarding_read", || {
        let client = unsafe { client.as_ref() }?;
        let call = client
            .inner
            .person_settings()
            .forwarding()
            .read(c_str(person_id)?, opt_c_str(org_id)?);
        Some(call.into_request())
    })
}

/// PUT a person's call forwarding settings given as JSON in the shape
/// returned by `wxc_parse_forwarding`.
///
/// Returns null if the JSON does not describe forwarding settings.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_forwarding_configure(
    client: *const FfiWxcClient,
    person_id: *const c_char,
    settings_json: *const c_char,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_forwarding_configure", || {
        let client = unsafe { client.as_ref() }?;
        let settings: PersonForwardingSetting = match serde_json::from_str(c_str(settings_json)?) {
            Ok(settings) => settings,
            Err(e) => {
                tracing::warn!(error = %e, "invalid forwarding settings json");
                return None;
            }
        };
        client
            .inner
            .person_settings()
            .forwarding()
            .configure(c_str(person_id)?, &settings, opt_c_str(org_id)?)
            .ok()
            .map(|call| call.into_request())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_dnd_read(
    client: *const FfiWxcClient,
    person_id: *const c_char,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_dnd_read", || {
        let client = unsafe { client.as_ref() }?;
        let call = client
            .inner
            .person_settings()
            .dnd()
            .read(c_str(person_id)?, opt_c_str(org_id)?);
        Some(call.into_request())
    })
}

/// PUT do-not-disturb. `ring_splash_enabled` is tri-state:
/// -1 = leave out, 0 = false, 1 = true.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_dnd_configure(
    client: *const FfiWxcClient,
    person_id: *const c_char,
    enabled: bool,
    ring_splash_enabled: i32,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_dnd_configure", || {
        let client = unsafe { client.as_ref() }?;
        let dnd = Dnd {
            enabled,
            ring_splash_enabled: match ring_splash_enabled {
                0 => Some(false),
                1 => Some(true),
                _ => None,
            },
        };
        client
            .inner
            .person_settings()
            .dnd()
            .configure(c_str(person_id)?, &dnd, opt_c_str(org_id)?)
            .ok()
            .map(|call| call.into_request())
    })
}

/// GET the settings of a selective feature for a person, workspace or
/// virtual line.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_selective_settings_read(
    client: *const FfiWxcClient,
    feature: FfiSelectiveFeature,
    selector: FfiSelector,
    entity_id: *const c_char,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_selective_settings_read", || {
        let client = unsafe { client.as_ref() }?;
        let entity_id = c_str(entity_id)?;
        let session = client.inner.session();
        let req = with_feature!(feature, F => SelectiveApi::<F>::new(session, selector.into())
            .read_settings(entity_id, opt_c_str(org_id)?)
            .into_request());
        Some(req)
    })
}

/// GET one criteria of a selective feature.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_selective_criteria_read(
    client: *const FfiWxcClient,
    feature: FfiSelectiveFeature,
    selector: FfiSelector,
    entity_id: *const c_char,
    criteria_id: *const c_char,
    org_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_selective_criteria_read", || {
        let client = unsafe { client.as_ref() }?;
        let entity_id = c_str(entity_id)?;
        let criteria_id = c_str(criteria_id)?;
        let session = client.inner.session();
        let req = with_feature!(feature, F => SelectiveApi::<F>::new(session, selector.into())
            .read_criteria(entity_id, criteria_id, opt_c_str(org_id)?)
            .into_request());
        Some(req)
    })
}

/// POST a dial on behalf of the token's user. `endpoint_id` may be null.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_dial(
    client: *const FfiWxcClient,
    destination: *const c_char,
    endpoint_id: *const c_char,
) -> *mut FfiHttpRequest {
    build_request("wxc_build_dial", || {
        let client = unsafe { client.as_ref() }?;
        client
            .inner
            .calls()
            .dial(c_str(destination)?, opt_c_str(endpoint_id)?)
            .ok()
            .map(|call| call.into_request())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_hangup(client: *const FfiWxcClient, call_id: *const c_char) -> *mut FfiHttpRequest {
    build_request("wxc_build_hangup", || {
        let client = unsafe { client.as_ref() }?;
        client
            .inner
            .calls()
            .hangup(c_str(call_id)?)
            .ok()
            .map(|call| call.into_request())
    })
}

#[unsafe(no_mangle)]
pub extern "C" fn wxc_build_list_calls(client: *const FfiWxcClient) -> *mut FfiHttpRequest {
    build_request("wxc_build_list_calls", || {
        let client = unsafe { client.as_ref() }?;
        Some(client.inner.calls().list_calls().into_request())
    })
}

// ---------------------------------------------------------------------------
// Parse response functions
// ---------------------------------------------------------------------------

fn ffi_response_to_core(resp: &FfiHttpResponse) -> HttpResponse {
    let headers = if resp.headers.is_null() || resp.headers_len == 0 {
        Vec::new()
    } else {
        unsafe { std::slice::from_raw_parts(resp.headers, resp.headers_len as usize) }
            .iter()
            .filter_map(|h| Some((c_str(h.key)?.to_string(), c_str(h.value)?.to_string())))
            .collect()
    };
    HttpResponse {
        status: resp.status,
        headers,
        body: c_str(resp.body).unwrap_or("").to_string(),
    }
}

/// Check the status, decode, and wrap the outcome in a result envelope.
fn parse_response<T, D, K>(name: &str, response: *const FfiHttpResponse, decode: D, ok: K) -> *mut FfiWxcResult
where
    D: FnOnce(&HttpResponse) -> Result<T, ApiError>,
    K: FnOnce(T) -> *mut FfiWxcResult,
{
    catch_unwind(AssertUnwindSafe(|| {
        let Some(resp) = (unsafe { response.as_ref() }) else {
            return FfiWxcResult::null_arg("response");
        };
        let resp = ffi_response_to_core(resp);
        match check_status(&resp).and_then(|()| decode(&resp)) {
            Ok(value) => ok(value),
            Err(e) => FfiWxcResult::from_error(e),
        }
    }))
    .unwrap_or_else(|_| {
        tracing::error!(function = name, "panic caught at FFI boundary");
        FfiWxcResult::panic(&format!("panic in {name}"))
    })
}

/// Re-serialize a decoded model as JSON for C callers.
fn json_result<T: serde::Serialize>(value: T) -> *mut FfiWxcResult {
    match to_json(&value) {
        Ok(json) => FfiWxcResult::ok_json(json),
        Err(e) => FfiWxcResult::from_error(e),
    }
}

fn decode_selective_settings_json(feature: FfiSelectiveFeature, resp: &HttpResponse) -> Result<String, ApiError> {
    with_feature!(feature, F => to_json(&decode_settings::<F>(resp)?))
}

fn decode_selective_criteria_json(feature: FfiSelectiveFeature, resp: &HttpResponse) -> Result<String, ApiError> {
    with_feature!(feature, F => to_json(&decode_criteria::<F>(resp)?))
}

/// Parse the response to any request without a payload (configure, hangup).
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_empty(response: *const FfiHttpResponse) -> *mut FfiWxcResult {
    parse_response("wxc_parse_empty", response, decode_empty, |()| FfiWxcResult::ok_empty())
}

/// `data_tag = Json` with the forwarding settings on success.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_forwarding(response: *const FfiHttpResponse) -> *mut FfiWxcResult {
    parse_response(
        "wxc_parse_forwarding",
        response,
        decode_json::<PersonForwardingSetting>,
        json_result,
    )
}

/// `data_tag = Dnd` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_dnd(response: *const FfiHttpResponse) -> *mut FfiWxcResult {
    parse_response("wxc_parse_dnd", response, decode_json::<Dnd>, FfiWxcResult::ok_dnd)
}

/// `data_tag = Json` with the feature's settings. The feature's own flag
/// name in each criteria summary is reported as `enabled`.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_selective_settings(
    feature: FfiSelectiveFeature,
    response: *const FfiHttpResponse,
) -> *mut FfiWxcResult {
    parse_response(
        "wxc_parse_selective_settings",
        response,
        |resp| decode_selective_settings_json(feature, resp),
        FfiWxcResult::ok_json,
    )
}

/// `data_tag = Json` with one criteria, its flag reported as `enabled`.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_selective_criteria(
    feature: FfiSelectiveFeature,
    response: *const FfiHttpResponse,
) -> *mut FfiWxcResult {
    parse_response(
        "wxc_parse_selective_criteria",
        response,
        |resp| decode_selective_criteria_json(feature, resp),
        FfiWxcResult::ok_json,
    )
}

/// `data_tag = CallInfo` on success.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_dial(response: *const FfiHttpResponse) -> *mut FfiWxcResult {
    parse_response(
        "wxc_parse_dial",
        response,
        decode_json::<CallInfo>,
        FfiWxcResult::ok_call_info,
    )
}

/// `data_tag = Json` with an array of active calls.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_parse_list_calls(response: *const FfiHttpResponse) -> *mut FfiWxcResult {
    parse_response(
        "wxc_parse_list_calls",
        response,
        decode_items::<TelephonyCall>,
        json_result,
    )
}

// ---------------------------------------------------------------------------
// Free functions
// ---------------------------------------------------------------------------

/// Free a request returned by any `wxc_build_*` function. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_free_request(req: *mut FfiHttpRequest) {
    if req.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let req = unsafe { Box::from_raw(req) };
        free_c_string(req.path);
        free_c_string(req.body);
        if !req.headers.is_null() && req.headers_len > 0 {
            let len = req.headers_len as usize;
            let headers = unsafe { Vec::from_raw_parts(req.headers, len, len) };
            for h in headers {
                free_c_string(h.key);
                free_c_string(h.value);
            }
        }
    });
}

/// Free a result returned by any `wxc_parse_*` function. Safe with null.
/// `data_tag` decides what `data` points to.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_free_result(result: *mut FfiWxcResult) {
    if result.is_null() {
        return;
    }
    let _ = catch_unwind(|| {
        let result = unsafe { Box::from_raw(result) };
        free_c_string(result.error_message);
        if result.data.is_null() {
            return;
        }
        match result.data_tag {
            FfiDataTag::Dnd => drop(unsafe { Box::from_raw(result.data as *mut FfiDnd) }),
            FfiDataTag::CallInfo => {
                let info = unsafe { Box::from_raw(result.data as *mut FfiCallInfo) };
                free_c_string(info.call_id);
                free_c_string(info.call_session_id);
            }
            FfiDataTag::Json => free_c_string(result.data as *mut c_char),
            FfiDataTag::None => {}
        }
    });
}

fn free_c_string(s: *mut c_char) {
    if !s.is_null() {
        drop(unsafe { CString::from_raw(s) });
    }
}

/// Free a C string allocated by this library. Safe with null.
#[unsafe(no_mangle)]
pub extern "C" fn wxc_free_string(s: *mut c_char) {
    let _ = catch_unwind(|| free_c_string(s));
}

// ---------------------------------------------------------------------------
// Unit tests
// ---------------------------------------------------------------------------
