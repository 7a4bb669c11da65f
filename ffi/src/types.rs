//! `#[repr(C)]` types for the FFI boundary.
//!
//! # Design
//! Each type mirrors a core type with C-compatible representations:
//! `*mut c_char` for strings, pointer plus length for arrays, and enums with
//! explicit discriminants. Payloads without a fixed C shape (forwarding
//! settings, selective settings, call lists) cross as normalized JSON text.

use std::ffi::{c_void, CString};
use std::os::raw::c_char;

use wxc_core::calls::CallInfo;
use wxc_core::error::ApiError;
use wxc_core::http::HttpMethod;
use wxc_core::person_settings::dnd::Dnd;
use wxc_core::Selector;

/// Opaque handle to a `WebexClient`. C callers receive a pointer to this
/// and pass it back into every build function.
pub struct FfiWxcClient {
    pub(crate) inner: wxc_core::WebexClient,
}

/// Move `s` into a C string owned by the caller. Interior NULs are dropped.
pub(crate) fn into_c_string(s: String) -> *mut c_char {
    let s = if s.contains('\0') { s.replace('\0', "") } else { s };
    CString::new(s).unwrap_or_default().into_raw()
}

/// Hand a vector to C as a raw pointer, or null when empty.
fn into_raw_parts<T>(items: Vec<T>) -> (*mut T, u32) {
    if items.is_empty() {
        return (std::ptr::null_mut(), 0);
    }
    let mut items = items.into_boxed_slice();
    let len = items.len() as u32;
    let ptr = items.as_mut_ptr();
    std::mem::forget(items);
    (ptr, len)
}

// ---------------------------------------------------------------------------
// Request types
// ---------------------------------------------------------------------------

#[repr(C)]
pub enum FfiHttpMethod {
    Get = 0,
    Post = 1,
    Put = 2,
    Delete = 3,
}

impl From<HttpMethod> for FfiHttpMethod {
    fn from(m: HttpMethod) -> Self {
        match m {
            HttpMethod::Get => FfiHttpMethod::Get,
            HttpMethod::Post => FfiHttpMethod::Post,
            HttpMethod::Put => FfiHttpMethod::Put,
            HttpMethod::Delete => FfiHttpMethod::Delete,
        }
    }
}

/// A single HTTP header as a key-value pair of C strings.
#[repr(C)]
pub struct FfiHeader {
    pub key: *mut c_char,
    pub value: *mut c_char,
}

/// An HTTP request described as plain data.
///
/// Built by the `wxc_build_*` functions. `path` is the absolute URL with the
/// query string already encoded. The caller executes the request and hands
/// the response to the matching `wxc_parse_*` function.
#[repr(C)]
pub struct FfiHttpRequest {
    pub method: FfiHttpMethod,
    pub path: *mut c_char,
    pub headers: *mut FfiHeader,
    pub headers_len: u32,
    pub body: *mut c_char,
}

impl FfiHttpRequest {
    pub(crate) fn from_core(req: wxc_core::HttpRequest) -> *mut Self {
        let headers: Vec<FfiHeader> = req
            .headers
            .into_iter()
            .map(|(k, v)| FfiHeader {
                key: into_c_string(k),
                value: into_c_string(v),
            })
            .collect();
        let (headers, headers_len) = into_raw_parts(headers);

        Box::into_raw(Box::new(FfiHttpRequest {
            method: req.method.into(),
            path: into_c_string(req.path),
            headers,
            headers_len,
            body: req.body.map_or(std::ptr::null_mut(), into_c_string),
        }))
    }
}

// ---------------------------------------------------------------------------
// Response input (caller-owned)
// ---------------------------------------------------------------------------

#[repr(C)]
pub struct FfiResponseHeader {
    pub key: *const c_char,
    pub value: *const c_char,
}

/// An HTTP response as received by the caller.
///
/// Headers are optional (`headers` may be null); pass them when available so
/// `Retry-After` and `TrackingID` reach the error result. The FFI layer reads
/// but never frees these fields.
#[repr(C)]
pub struct FfiHttpResponse {
    pub status: u16,
    pub headers: *const FfiResponseHeader,
    pub headers_len: u32,
    pub body: *const c_char,
}

// ---------------------------------------------------------------------------
// Selection enums
// ---------------------------------------------------------------------------

/// Entity kind that owns a selective feature.
#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiSelector {
    People = 0,
    Workspaces = 1,
    VirtualLines = 2,
}

impl From<FfiSelector> for Selector {
    fn from(s: FfiSelector) -> Self {
        match s {
            FfiSelector::People => Selector::People,
            FfiSelector::Workspaces => Selector::Workspaces,
            FfiSelector::VirtualLines => Selector::VirtualLines,
        }
    }
}

#[repr(C)]
#[derive(Clone, Copy)]
pub enum FfiSelectiveFeature {
    PriorityAlert = 0,
    SelectiveAccept = 1,
    SelectiveReject = 2,
    SelectiveForward = 3,
    SequentialRing = 4,
    SimultaneousRing = 5,
}

// ---------------------------------------------------------------------------
// Result types
// ---------------------------------------------------------------------------

#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiErrorCode {
    Ok = 0,
    NotFound = 1,
    Unauthorized = 2,
    RateLimited = 3,
    Http = 4,
    Deserialization = 5,
    Serialization = 6,
    InvalidUrl = 7,
    Transport = 8,
    Config = 9,
    Panic = 10,
    NullArg = 11,
}

/// Tag that tells `wxc_free_result` what `FfiWxcResult::data` points to.
#[repr(C)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FfiDataTag {
    None = 0,
    Dnd = 1,
    CallInfo = 2,
    /// `data` is a NUL-terminated JSON document (`char *`).
    Json = 3,
}

/// Do-not-disturb state. `ring_splash_enabled` is -1 when the server did not
/// report it, otherwise 0 or 1.
#[repr(C)]
pub struct FfiDnd {
    pub enabled: bool,
    pub ring_splash_enabled: i32,
}

impl From<Dnd> for FfiDnd {
    fn from(dnd: Dnd) -> Self {
        FfiDnd {
            enabled: dnd.enabled,
            ring_splash_enabled: dnd.ring_splash_enabled.map_or(-1, i32::from),
        }
    }
}

#[repr(C)]
pub struct FfiCallInfo {
    pub call_id: *mut c_char,
    pub call_session_id: *mut c_char,
}

/// Result envelope for all parse operations.
///
/// On success `error_code` is `Ok`, `error_message` is null and `data`
/// points to the payload described by `data_tag`. On failure `data` is null,
/// `error_message` is a readable C string and `http_status` holds the status
/// when the error came from a response. `retry_after_secs` is -1 unless the
/// server sent `Retry-After` with a 429.
#[repr(C)]
pub struct FfiWxcResult {
    pub error_code: FfiErrorCode,
    pub error_message: *mut c_char,
    pub http_status: u16,
    pub retry_after_secs: i64,
    pub data_tag: FfiDataTag,
    pub data: *mut c_void,
}

impl FfiWxcResult {
    fn ok(data_tag: FfiDataTag, data: *mut c_void) -> *mut Self {
        Box::into_raw(Box::new(FfiWxcResult {
            error_code: FfiErrorCode::Ok,
            error_message: std::ptr::null_mut(),
            http_status: 0,
            retry_after_secs: -1,
            data_tag,
            data,
        }))
    }

    fn failure(error_code: FfiErrorCode, msg: String, http_status: u16, retry_after_secs: i64) -> *mut Self {
        Box::into_raw(Box::new(FfiWxcResult {
            error_code,
            error_message: into_c_string(msg),
            http_status,
            retry_after_secs,
            data_tag: FfiDataTag::None,
            data: std::ptr::null_mut(),
        }))
    }

    /// Success with no payload (configure, hangup).
    pub(crate) fn ok_empty() -> *mut Self {
        Self::ok(FfiDataTag::None, std::ptr::null_mut())
    }

    pub(crate) fn ok_dnd(dnd: Dnd) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiDnd::from(dnd)));
        Self::ok(FfiDataTag::Dnd, data as *mut c_void)
    }

    pub(crate) fn ok_call_info(info: CallInfo) -> *mut Self {
        let data = Box::into_raw(Box::new(FfiCallInfo {
            call_id: into_c_string(info.call_id),
            call_session_id: into_c_string(info.call_session_id),
        }));
        Self::ok(FfiDataTag::CallInfo, data as *mut c_void)
    }

    pub(crate) fn ok_json(json: String) -> *mut Self {
        Self::ok(FfiDataTag::Json, into_c_string(json) as *mut c_void)
    }

    pub(crate) fn from_error(err: ApiError) -> *mut Self {
        let http_status = err.status().unwrap_or(0);
        let mut retry_after_secs = -1;
        let error_code = match &err {
            ApiError::NotFound => FfiErrorCode::NotFound,
            ApiError::Unauthorized { .. } => FfiErrorCode::Unauthorized,
            ApiError::RateLimited { retry_after } => {
                retry_after_secs = retry_after.map_or(-1, |s| i64::try_from(s).unwrap_or(i64::MAX));
                FfiErrorCode::RateLimited
            }
            ApiError::HttpError { .. } => FfiErrorCode::Http,
            ApiError::DeserializationError(_) => FfiErrorCode::Deserialization,
            ApiError::SerializationError(_) => FfiErrorCode::Serialization,
            ApiError::InvalidUrl(_) => FfiErrorCode::InvalidUrl,
            ApiError::Transport(_) => FfiErrorCode::Transport,
            ApiError::Config(_) => FfiErrorCode::Config,
        };
        Self::failure(error_code, err.to_string(), http_status, retry_after_secs)
    }

    pub(crate) fn null_arg(name: &str) -> *mut Self {
        Self::failure(FfiErrorCode::NullArg, format!("null argument: {name}"), 0, -1)
    }

    pub(crate) fn panic(msg: &str) -> *mut Self {
        Self::failure(FfiErrorCode::Panic, msg.to_string(), 0, -1)
    }
}
