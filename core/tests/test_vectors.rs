//! Verify build/parse pairs against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Bodies are compared as parsed JSON so field
//! order does not matter; tracking ids are random and not compared.

use std::fmt::Debug;

use serde::de::DeserializeOwned;
use serde_json::Value;
use wxc_core::calls::{CallInfo, TelephonyCall};
use wxc_core::person_settings::dnd::Dnd;
use wxc_core::person_settings::forwarding::PersonForwardingSetting;
use wxc_core::person_settings::priority_alert::PriorityAlert;
use wxc_core::person_settings::selective_accept::SelectiveAccept;
use wxc_core::person_settings::selective_forward::SelectiveForward;
use wxc_core::person_settings::selective_reject::SelectiveReject;
use wxc_core::person_settings::sequential_ring::SequentialRing;
use wxc_core::person_settings::sim_ring::SimultaneousRing;
use wxc_core::{
    ApiCall, ApiError, ClientConfig, HttpMethod, HttpResponse, SelectiveApi, SelectiveCriteria,
    SelectiveFeature, Selector, WebexClient,
};

const BASE_URL: &str = "http://localhost:3000";

fn client() -> WebexClient {
    WebexClient::new(
        ClientConfig::new("vector-token")
            .with_base_url(BASE_URL)
            .with_org_id("org-default"),
    )
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

fn opt_str(case: &Value, key: &str) -> Option<String> {
    case.get(key).and_then(Value::as_str).map(str::to_string)
}

fn str_of<'a>(case: &'a Value, key: &str) -> &'a str {
    case[key].as_str().unwrap()
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    let headers = sim
        .get("headers")
        .and_then(Value::as_array)
        .map(|headers| {
            headers
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (
                        pair[0].as_str().unwrap().to_string(),
                        pair[1].as_str().unwrap().to_string(),
                    )
                })
                .collect()
        })
        .unwrap_or_default();
    HttpResponse {
        status: sim["status"].as_u64().unwrap() as u16,
        headers,
        body: sim["body"].as_str().unwrap().to_string(),
    }
}

/// Compare the built request with `expected_request`.
fn check_request<T>(name: &str, call: &ApiCall<T>, case: &Value) {
    let expected = &case["expected_request"];
    let req = &call.request;
    assert_eq!(req.method, parse_method(str_of(expected, "method")), "{name}: method");
    assert_eq!(req.path, format!("{BASE_URL}{}", str_of(expected, "path")), "{name}: path");
    assert_eq!(req.header("authorization"), Some("Bearer vector-token"), "{name}: auth");
    match expected.get("body") {
        Some(body) => {
            let actual: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&actual, body, "{name}: body");
            assert_eq!(req.header("content-type"), Some("application/json"), "{name}: content-type");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

/// Parse the simulated response and compare with `expected_result` or `expected_error`.
fn check_parse<T>(name: &str, call: &ApiCall<T>, case: &Value)
where
    T: DeserializeOwned + PartialEq + Debug,
{
    let result = call.parse(simulated_response(case));
    if let Some(expected_error) = case.get("expected_error") {
        let err = result.unwrap_err();
        match expected_error.as_str().unwrap() {
            "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
            "RateLimited" => assert!(
                matches!(err, ApiError::RateLimited { retry_after: Some(_) }),
                "{name}: expected RateLimited"
            ),
            other => panic!("{name}: unknown expected_error: {other}"),
        }
        return;
    }
    let actual = result.unwrap();
    if let Some(expected) = case.get("expected_result") {
        let expected: T = serde_json::from_value(expected.clone()).unwrap();
        assert_eq!(actual, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Person settings
// ---------------------------------------------------------------------------

#[test]
fn person_settings_test_vectors() {
    let c = client();
    let settings = c.person_settings();
    for case in load(include_str!("../../test-vectors/person_settings.json")) {
        let name = str_of(&case, "name");
        let person_id = str_of(&case, "person_id");
        let org_id = opt_str(&case, "org_id");
        match str_of(&case, "operation") {
            "forwarding_read" => {
                let call = settings.forwarding().read(person_id, org_id.as_deref());
                check_request(name, &call, &case);
                check_parse::<PersonForwardingSetting>(name, &call, &case);
            }
            "forwarding_configure" => {
                let input: PersonForwardingSetting =
                    serde_json::from_value(case["input"].clone()).unwrap();
                let call = settings
                    .forwarding()
                    .configure(person_id, &input, org_id.as_deref())
                    .unwrap();
                check_request(name, &call, &case);
                assert!(call.parse(simulated_response(&case)).is_ok(), "{name}: parse");
            }
            "dnd_read" => {
                let call = settings.dnd().read(person_id, org_id.as_deref());
                check_request(name, &call, &case);
                check_parse::<Dnd>(name, &call, &case);
            }
            other => panic!("{name}: unknown operation: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Selective criteria
// ---------------------------------------------------------------------------

fn run_selective<F>(case: &Value)
where
    F: SelectiveFeature,
    F::Settings: PartialEq + Debug,
{
    let c = client();
    let api = SelectiveApi::<F>::new(c.session(), Selector::People);
    let name = str_of(case, "name");
    let entity_id = str_of(case, "entity_id");
    match str_of(case, "operation") {
        "read_settings" => {
            let call = api.read_settings(entity_id, None);
            check_request(name, &call, case);
            check_parse::<F::Settings>(name, &call, case);
        }
        "read_criteria" => {
            let call = api.read_criteria(entity_id, str_of(case, "criteria_id"), None);
            check_request(name, &call, case);
            check_parse::<SelectiveCriteria>(name, &call, case);
        }
        "create_criteria" => {
            let input: SelectiveCriteria = serde_json::from_value(case["input"].clone()).unwrap();
            let call = api.create_criteria(entity_id, &input, None).unwrap();
            check_request(name, &call, case);
            check_parse::<String>(name, &call, case);
        }
        other => panic!("{name}: unknown operation: {other}"),
    }
}

#[test]
fn selective_test_vectors() {
    for case in load(include_str!("../../test-vectors/selective.json")) {
        match str_of(&case, "feature") {
            "priorityAlert" => run_selective::<PriorityAlert>(&case),
            "selectiveAccept" => run_selective::<SelectiveAccept>(&case),
            "selectiveReject" => run_selective::<SelectiveReject>(&case),
            "selectiveForward" => run_selective::<SelectiveForward>(&case),
            "sequentialRing" => run_selective::<SequentialRing>(&case),
            "simultaneousRing" => run_selective::<SimultaneousRing>(&case),
            other => panic!("unknown feature: {other}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Call control
// ---------------------------------------------------------------------------

#[test]
fn calls_test_vectors() {
    let c = client();
    let calls = c.calls();
    for case in load(include_str!("../../test-vectors/calls.json")) {
        let name = str_of(&case, "name");
        match str_of(&case, "operation") {
            "dial" => {
                let call = calls.dial(str_of(&case, "destination"), None).unwrap();
                check_request(name, &call, &case);
                check_parse::<CallInfo>(name, &call, &case);
            }
            "hangup" => {
                let call = calls.hangup(str_of(&case, "call_id")).unwrap();
                check_request(name, &call, &case);
                check_parse::<()>(name, &call, &case);
            }
            "list_calls" => {
                let call = calls.list_calls();
                check_request(name, &call, &case);
                check_parse::<Vec<TelephonyCall>>(name, &call, &case);
            }
            other => panic!("{name}: unknown operation: {other}"),
        }
    }
}
