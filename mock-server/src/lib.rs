use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, Request, State},
    http::{header, HeaderMap, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};
use tokio::{net::TcpListener, sync::RwLock};
use url::form_urlencoded;
use uuid::Uuid;

/// Bearer token accepted by [`app`].
pub const TOKEN: &str = "mock-token";
/// Organization every seeded entity belongs to.
pub const ORG_ID: &str = "org-1";

const DEFAULT_PAGE_SIZE: usize = 100;

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Person {
    pub id: String,
    pub emails: Vec<String>,
    pub display_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
    pub org_id: String,
}

/// Criteria list and settings of one selective feature, kept as wire JSON.
#[derive(Clone, Debug, Default)]
pub struct SelectiveStore {
    pub settings: Map<String, Value>,
    pub criteria: Vec<Map<String, Value>>,
}

#[derive(Debug)]
pub struct MockState {
    pub token: String,
    pub people: Vec<Person>,
    pub locations: Vec<Map<String, Value>>,
    /// Keyed by `(person_id, feature)`.
    pub features: HashMap<(String, String), Value>,
    /// Keyed by `selector/entity_id/feature`.
    pub selective: HashMap<String, SelectiveStore>,
    pub calls: Vec<Value>,
}

impl MockState {
    pub fn new(token: &str) -> Self {
        Self {
            token: token.to_string(),
            people: Vec::new(),
            locations: Vec::new(),
            features: HashMap::new(),
            selective: HashMap::new(),
            calls: Vec::new(),
        }
    }

    /// Five people in one location.
    pub fn seeded() -> Self {
        let mut state = Self::new(TOKEN);
        let names = ["Alice Adams", "Bob Baker", "Carol Chen", "Dan Diaz", "Eve Evans"];
        for (i, name) in names.iter().enumerate() {
            let first = name.split(' ').next().unwrap_or(name).to_lowercase();
            state.people.push(Person {
                id: format!("person-{}", i + 1),
                emails: vec![format!("{first}@example.com")],
                display_name: name.to_string(),
                location_id: Some("location-1".to_string()),
                extension: Some(format!("100{}", i + 1)),
                org_id: ORG_ID.to_string(),
            });
        }
        if let Value::Object(location) = json!({
            "id": "location-1",
            "name": "Headquarters",
            "orgId": ORG_ID,
            "timeZone": "America/Los_Angeles",
            "preferredLanguage": "en_us",
            "announcementLanguage": "en_us",
            "address": {
                "address1": "771 Alder Drive",
                "city": "Milpitas",
                "state": "CA",
                "postalCode": "95035",
                "country": "US"
            }
        }) {
            state.locations.push(location);
        }
        state
    }
}

pub type Db = Arc<RwLock<MockState>>;

pub fn app() -> Router {
    app_with_state(MockState::seeded())
}

pub fn app_with_state(state: MockState) -> Router {
    let db: Db = Arc::new(RwLock::new(state));
    Router::new()
        .route("/people", get(list_people))
        .route("/people/me", get(get_me))
        .route("/people/{id}", get(get_person))
        .route(
            "/people/{id}/features/{feature}",
            get(read_feature).put(configure_feature),
        )
        .route(
            "/people/{id}/features/voicemail/actions/resetPin/invoke",
            post(reset_pin),
        )
        .route("/locations", get(list_locations).post(create_location))
        .route("/locations/{id}", get(get_location).put(update_location))
        .route(
            "/telephony/config/{selector}/{id}/{feature}",
            get(read_selective_settings).put(configure_selective_settings),
        )
        .route(
            "/telephony/config/{selector}/{id}/{feature}/criteria",
            post(create_criteria),
        )
        .route(
            "/telephony/config/{selector}/{id}/{feature}/criteria/{criteria_id}",
            get(read_criteria).put(configure_criteria).delete(delete_criteria),
        )
        .route("/telephony/calls", get(list_calls))
        .route("/telephony/calls/dial", post(dial))
        .route("/telephony/calls/hangup", post(hangup))
        .route("/telephony/calls/{call_id}", get(call_details))
        .layer(middleware::from_fn_with_state(db.clone(), require_bearer))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn error(status: StatusCode, message: &str) -> Response {
    (status, Json(json!({ "message": message }))).into_response()
}

async fn require_bearer(State(db): State<Db>, request: Request, next: Next) -> Response {
    let expected = format!("Bearer {}", db.read().await.token);
    let presented = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    if presented != Some(expected.as_str()) {
        tracing::warn!(uri = %request.uri(), "rejected request without valid token");
        return error(
            StatusCode::UNAUTHORIZED,
            "The request requires a valid access token set in the Authorization request header.",
        );
    }
    next.run(request).await
}

/// Serve one page of `items` and advertise the next one in a `Link` header.
fn paginate<T: Serialize>(
    items: &[T],
    params: &HashMap<String, String>,
    headers: &HeaderMap,
    path: &str,
) -> Response {
    let max = params
        .get("max")
        .and_then(|m| m.parse::<usize>().ok())
        .filter(|m| *m > 0)
        .unwrap_or(DEFAULT_PAGE_SIZE);
    let start = params
        .get("start")
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(0);
    let page: Vec<&T> = items.iter().skip(start).take(max).collect();
    let body = Json(json!({ "items": page }));

    let next = start.saturating_add(max);
    if next >= items.len() {
        return body.into_response();
    }
    let host = headers
        .get(header::HOST)
        .and_then(|h| h.to_str().ok())
        .unwrap_or("localhost");
    let mut keys: Vec<&String> = params.keys().filter(|k| *k != "start").collect();
    keys.sort();
    let mut query = form_urlencoded::Serializer::new(String::new());
    for key in keys {
        query.append_pair(key, &params[key]);
    }
    query.append_pair("start", &next.to_string());
    let link = format!("<http://{host}{path}?{}>; rel=\"next\"", query.finish());
    ([(header::LINK, link)], body).into_response()
}

/// Recursively overwrite `target` with the keys of `patch`.
fn merge(target: &mut Value, patch: Value) {
    match (target, patch) {
        (Value::Object(target), Value::Object(patch)) => {
            for (key, value) in patch {
                merge(target.entry(key).or_insert(Value::Null), value);
            }
        }
        (target, patch) => *target = patch,
    }
}

// --- people ---

async fn list_people(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let state = db.read().await;
    let ids: Option<Vec<&str>> = params.get("id").map(|ids| ids.split(',').collect());
    let people: Vec<&Person> = state
        .people
        .iter()
        .filter(|p| params.get("displayName").is_none_or(|n| p.display_name.starts_with(n.as_str())))
        .filter(|p| params.get("email").is_none_or(|e| p.emails.contains(e)))
        .filter(|p| {
            params
                .get("locationId")
                .is_none_or(|l| p.location_id.as_deref() == Some(l.as_str()))
        })
        .filter(|p| ids.as_ref().is_none_or(|ids| ids.contains(&p.id.as_str())))
        .collect();
    paginate(&people, &params, &headers, "/people")
}

async fn get_me(State(db): State<Db>) -> Result<Json<Person>, StatusCode> {
    let state = db.read().await;
    state.people.first().cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn get_person(State(db): State<Db>, Path(id): Path<String>) -> Result<Json<Person>, StatusCode> {
    let state = db.read().await;
    state
        .people
        .iter()
        .find(|p| p.id == id)
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

/// Settings a person starts with, per feature segment.
fn default_feature(feature: &str) -> Option<Value> {
    let value = match feature {
        "callForwarding" => json!({
            "callForwarding": {
                "always": {"enabled": false, "ringReminderEnabled": false, "destinationVoicemailEnabled": false},
                "busy": {"enabled": false, "destinationVoicemailEnabled": false},
                "noAnswer": {"enabled": false, "numberOfRings": 3, "systemMaxNumberOfRings": 20, "destinationVoicemailEnabled": false}
            },
            "businessContinuity": {"enabled": false, "destinationVoicemailEnabled": false}
        }),
        "doNotDisturb" => json!({"enabled": false, "ringSplashEnabled": false}),
        "callWaiting" => json!({"enabled": true}),
        "executiveAssistant" => json!({"type": "UNASSIGNED"}),
        "voicemail" => json!({
            "enabled": true,
            "sendAllCalls": {"enabled": false},
            "sendBusyCalls": {"enabled": true, "greeting": "DEFAULT", "greetingUploaded": false},
            "sendUnansweredCalls": {
                "enabled": true,
                "greeting": "DEFAULT",
                "greetingUploaded": false,
                "numberOfRings": 3,
                "systemMaxNumberOfRings": 15
            },
            "notifications": {"enabled": false},
            "transferToNumber": {"enabled": false},
            "emailCopyOfMessage": {"enabled": false},
            "messageStorage": {"mwiEnabled": true, "storageType": "INTERNAL"},
            "faxMessage": {"enabled": false},
            "voiceMessageForwardingEnabled": false
        }),
        _ => return None,
    };
    Some(value)
}

async fn read_feature(
    State(db): State<Db>,
    Path((id, feature)): Path<(String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    if !state.people.iter().any(|p| p.id == id) {
        return Err(StatusCode::NOT_FOUND);
    }
    let stored = state.features.get(&(id, feature.clone())).cloned();
    stored
        .or_else(|| default_feature(&feature))
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn configure_feature(
    State(db): State<Db>,
    Path((id, feature)): Path<(String, String)>,
    Json(patch): Json<Value>,
) -> StatusCode {
    let mut state = db.write().await;
    if !state.people.iter().any(|p| p.id == id) {
        return StatusCode::NOT_FOUND;
    }
    let Some(default) = default_feature(&feature) else {
        return StatusCode::NOT_FOUND;
    };
    tracing::debug!(person = %id, %feature, "configure feature");
    let current = state.features.entry((id, feature)).or_insert(default);
    merge(current, patch);
    StatusCode::NO_CONTENT
}

async fn reset_pin(State(db): State<Db>, Path(id): Path<String>) -> StatusCode {
    let state = db.read().await;
    if state.people.iter().any(|p| p.id == id) {
        StatusCode::NO_CONTENT
    } else {
        StatusCode::NOT_FOUND
    }
}

// --- locations ---

async fn list_locations(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    headers: HeaderMap,
) -> Response {
    let state = db.read().await;
    let locations: Vec<&Map<String, Value>> = state
        .locations
        .iter()
        .filter(|l| {
            params
                .get("name")
                .is_none_or(|n| l.get("name").and_then(Value::as_str) == Some(n.as_str()))
        })
        .filter(|l| {
            params
                .get("id")
                .is_none_or(|id| l.get("id").and_then(Value::as_str) == Some(id.as_str()))
        })
        .collect();
    paginate(&locations, &params, &headers, "/locations")
}

fn find_location<'a>(state: &'a MockState, id: &str) -> Option<&'a Map<String, Value>> {
    state
        .locations
        .iter()
        .find(|l| l.get("id").and_then(Value::as_str) == Some(id))
}

async fn get_location(
    State(db): State<Db>,
    Path(id): Path<String>,
) -> Result<Json<Map<String, Value>>, StatusCode> {
    let state = db.read().await;
    find_location(&state, &id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}

async fn create_location(
    State(db): State<Db>,
    Query(params): Query<HashMap<String, String>>,
    Json(mut location): Json<Map<String, Value>>,
) -> Response {
    if !location.get("name").is_some_and(Value::is_string) {
        return error(StatusCode::BAD_REQUEST, "name is required");
    }
    if location.contains_key("id") {
        return error(StatusCode::BAD_REQUEST, "id is assigned by the server");
    }
    let id = Uuid::new_v4().to_string();
    let org_id = params.get("orgId").map(String::as_str).unwrap_or(ORG_ID);
    location.insert("id".to_string(), Value::String(id.clone()));
    location.insert("orgId".to_string(), Value::String(org_id.to_string()));
    db.write().await.locations.push(location);
    tracing::info!(location = %id, "created location");
    (StatusCode::CREATED, Json(json!({ "id": id }))).into_response()
}

async fn update_location(
    State(db): State<Db>,
    Path(id): Path<String>,
    Json(patch): Json<Value>,
) -> StatusCode {
    let mut state = db.write().await;
    let Some(location) = state
        .locations
        .iter_mut()
        .find(|l| l.get("id").and_then(Value::as_str) == Some(id.as_str()))
    else {
        return StatusCode::NOT_FOUND;
    };
    let mut current = Value::Object(std::mem::take(location));
    merge(&mut current, patch);
    if let Value::Object(mut merged) = current {
        merged.insert("id".to_string(), Value::String(id));
        *location = merged;
    }
    StatusCode::NO_CONTENT
}

// --- selective call handling ---

/// Wire name of the criteria enabled flag per feature segment.
fn enabled_key(feature: &str) -> Option<&'static str> {
    match feature {
        "priorityAlert" => Some("notificationEnabled"),
        "selectiveAccept" => Some("acceptEnabled"),
        "selectiveReject" => Some("rejectEnabled"),
        "selectiveForward" => Some("forwardEnabled"),
        "sequentialRing" | "simultaneousRing" => Some("ringEnabled"),
        _ => None,
    }
}

fn selective_key(state: &MockState, selector: &str, id: &str, feature: &str) -> Option<String> {
    let known = match selector {
        "people" => state.people.iter().any(|p| p.id == id),
        "workspaces" | "virtualLines" => true,
        _ => false,
    };
    (known && enabled_key(feature).is_some()).then(|| format!("{selector}/{id}/{feature}"))
}

/// Entry of a settings `criteria` list, derived from a stored criteria.
fn criteria_summary(criteria: &Map<String, Value>, key: &str) -> Value {
    let mut summary = Map::new();
    if let Some(id) = criteria.get("id") {
        summary.insert("id".to_string(), id.clone());
    }
    if let Some(name) = criteria.get("scheduleName") {
        summary.insert("scheduleName".to_string(), name.clone());
    }
    let source = match criteria.get("callsFrom").and_then(Value::as_str) {
        Some("SELECT_PHONE_NUMBERS") => "SPECIFIC_NUMBERS",
        _ => "ALL_NUMBERS",
    };
    summary.insert("source".to_string(), Value::String(source.to_string()));
    summary.insert(
        key.to_string(),
        criteria.get(key).cloned().unwrap_or(Value::Bool(false)),
    );
    Value::Object(summary)
}

/// Criteria bodies carry the feature's own flag name and never an id.
fn validate_criteria(body: &Map<String, Value>) -> Result<(), Response> {
    if body.contains_key("enabled") {
        return Err(error(
            StatusCode::BAD_REQUEST,
            "unknown field `enabled` in criteria",
        ));
    }
    if body.contains_key("id") {
        return Err(error(StatusCode::BAD_REQUEST, "criteria id is read-only"));
    }
    Ok(())
}

async fn read_selective_settings(
    State(db): State<Db>,
    Path((selector, id, feature)): Path<(String, String, String)>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    let key = selective_key(&state, &selector, &id, &feature).ok_or(StatusCode::NOT_FOUND)?;
    let flag = enabled_key(&feature).ok_or(StatusCode::NOT_FOUND)?;
    let store = state.selective.get(&key).cloned().unwrap_or_default();
    let mut settings = store.settings;
    settings
        .entry("enabled".to_string())
        .or_insert(Value::Bool(false));
    let criteria = store
        .criteria
        .iter()
        .map(|c| criteria_summary(c, flag))
        .collect();
    settings.insert("criteria".to_string(), Value::Array(criteria));
    Ok(Json(Value::Object(settings)))
}

async fn configure_selective_settings(
    State(db): State<Db>,
    Path((selector, id, feature)): Path<(String, String, String)>,
    Json(mut body): Json<Map<String, Value>>,
) -> Response {
    let mut state = db.write().await;
    let Some(key) = selective_key(&state, &selector, &id, &feature) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if body.remove("criteria").is_some() {
        return error(StatusCode::BAD_REQUEST, "criteria are read-only in settings");
    }
    let store = state.selective.entry(key).or_default();
    let mut current = Value::Object(std::mem::take(&mut store.settings));
    merge(&mut current, Value::Object(body));
    if let Value::Object(merged) = current {
        store.settings = merged;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn create_criteria(
    State(db): State<Db>,
    Path((selector, id, feature)): Path<(String, String, String)>,
    Json(mut body): Json<Map<String, Value>>,
) -> Response {
    let mut state = db.write().await;
    let Some(key) = selective_key(&state, &selector, &id, &feature) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(response) = validate_criteria(&body) {
        return response;
    }
    let criteria_id = Uuid::new_v4().to_string();
    body.insert("id".to_string(), Value::String(criteria_id.clone()));
    state.selective.entry(key).or_default().criteria.push(body);
    tracing::info!(%selector, entity = %id, %feature, criteria = %criteria_id, "created criteria");
    (StatusCode::CREATED, Json(json!({ "id": criteria_id }))).into_response()
}

async fn read_criteria(
    State(db): State<Db>,
    Path((selector, id, feature, criteria_id)): Path<(String, String, String, String)>,
) -> Result<Json<Map<String, Value>>, StatusCode> {
    let state = db.read().await;
    let key = selective_key(&state, &selector, &id, &feature).ok_or(StatusCode::NOT_FOUND)?;
    state
        .selective
        .get(&key)
        .and_then(|store| {
            store
                .criteria
                .iter()
                .find(|c| c.get("id").and_then(Value::as_str) == Some(criteria_id.as_str()))
        })
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}

async fn configure_criteria(
    State(db): State<Db>,
    Path((selector, id, feature, criteria_id)): Path<(String, String, String, String)>,
    Json(body): Json<Map<String, Value>>,
) -> Response {
    let mut state = db.write().await;
    let Some(key) = selective_key(&state, &selector, &id, &feature) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if let Err(response) = validate_criteria(&body) {
        return response;
    }
    let Some(criteria) = state.selective.get_mut(&key).and_then(|store| {
        store
            .criteria
            .iter_mut()
            .find(|c| c.get("id").and_then(Value::as_str) == Some(criteria_id.as_str()))
    }) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let mut current = Value::Object(std::mem::take(criteria));
    merge(&mut current, Value::Object(body));
    if let Value::Object(merged) = current {
        *criteria = merged;
    }
    StatusCode::NO_CONTENT.into_response()
}

async fn delete_criteria(
    State(db): State<Db>,
    Path((selector, id, feature, criteria_id)): Path<(String, String, String, String)>,
) -> StatusCode {
    let mut state = db.write().await;
    let Some(key) = selective_key(&state, &selector, &id, &feature) else {
        return StatusCode::NOT_FOUND;
    };
    let Some(store) = state.selective.get_mut(&key) else {
        return StatusCode::NOT_FOUND;
    };
    let before = store.criteria.len();
    store
        .criteria
        .retain(|c| c.get("id").and_then(Value::as_str) != Some(criteria_id.as_str()));
    if store.criteria.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

// --- call control ---

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialRequest {
    pub destination: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CallIdRequest {
    pub call_id: String,
}

async fn dial(State(db): State<Db>, Json(input): Json<DialRequest>) -> Response {
    if input.destination.trim().is_empty() {
        return error(StatusCode::BAD_REQUEST, "destination is required");
    }
    let call_id = Uuid::new_v4().to_string();
    let session_id = Uuid::new_v4().to_string();
    let call_type = if input.destination.starts_with('+') {
        "external"
    } else {
        "organization"
    };
    let call = json!({
        "id": call_id,
        "callSessionId": session_id,
        "personality": "originator",
        "state": "connecting",
        "remoteParty": {
            "number": input.destination,
            "privacyEnabled": false,
            "callType": call_type
        },
        "created": chrono::Utc::now().to_rfc3339_opts(chrono::SecondsFormat::Millis, true),
        "redirections": []
    });
    db.write().await.calls.push(call);
    tracing::info!(call = %call_id, "dialed");
    (
        StatusCode::CREATED,
        Json(json!({ "callId": call_id, "callSessionId": session_id })),
    )
        .into_response()
}

async fn hangup(State(db): State<Db>, Json(input): Json<CallIdRequest>) -> StatusCode {
    let mut state = db.write().await;
    let before = state.calls.len();
    state
        .calls
        .retain(|c| c.get("id").and_then(Value::as_str) != Some(input.call_id.as_str()));
    if state.calls.len() == before {
        StatusCode::NOT_FOUND
    } else {
        StatusCode::NO_CONTENT
    }
}

async fn list_calls(State(db): State<Db>) -> Json<Value> {
    let state = db.read().await;
    Json(json!({ "items": state.calls }))
}

async fn call_details(
    State(db): State<Db>,
    Path(call_id): Path<String>,
) -> Result<Json<Value>, StatusCode> {
    let state = db.read().await;
    state
        .calls
        .iter()
        .find(|c| c.get("id").and_then(Value::as_str) == Some(call_id.as_str()))
        .cloned()
        .map(Json)
        .ok_or(StatusCode::NOT_FOUND)
}
