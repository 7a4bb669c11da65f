//! Selective call-handling rules shared by priority alert, selective
//! accept/reject/forward, sequential ring and simultaneous ring.
//!
//! # Design
//! The six features expose the same two resources below
//! `telephony/config/{selector}/{id}/{feature}`: the feature settings and a
//! list of criteria (schedule + caller match + enabled flag). They differ
//! mostly in the wire name of the criteria's enabled flag
//! (`notificationEnabled`, `acceptEnabled`, `ringEnabled`, ...).
//!
//! [`SelectiveCriteria`] and [`CriteriaSummary`] always call that flag
//! `enabled`. Decoders rename the feature's key to `enabled` on the way in and
//! encoders rename it back on the way out, so one model and one
//! [`SelectiveApi`] serve all six features.

use std::marker::PhantomData;

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::api_child::{decode_empty, decode_id, decode_json, ApiCall, ApiChild, ApiSession};
use crate::common::Selector;
use crate::error::ApiError;
use crate::http::{HttpMethod, HttpResponse};

/// One selective call-handling feature.
pub trait SelectiveFeature {
    /// Path segment below the entity, e.g. `priorityAlert`.
    const SEGMENT: &'static str;
    /// Wire name of the criteria's enabled flag.
    const ENABLED_KEY: &'static str;
    type Settings: Serialize + DeserializeOwned;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ScheduleType {
    BusinessHours,
    Holidays,
    #[serde(other)]
    Other,
}

/// Where the schedule referenced by a criteria is defined.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ScheduleLevel {
    People,
    Location,
    Group,
    #[serde(other)]
    Other,
}

/// Which callers a criteria matches.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectiveFrom {
    AnyPhoneNumber,
    SelectPhoneNumbers,
    AnyInternal,
    AnyExternal,
    Forwarded,
    #[serde(other)]
    Other,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SelectiveSource {
    AllNumbers,
    SpecificNumbers,
    #[serde(other)]
    Other,
}

/// A criteria as listed in the feature settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CriteriaSummary {
    pub id: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<SelectiveSource>,
    #[serde(default)]
    pub enabled: bool,
}

/// A single criteria with the feature-specific enabled flag normalized to
/// `enabled`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SelectiveCriteria {
    /// Never sent; the id is part of the URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_type: Option<ScheduleType>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schedule_level: Option<ScheduleLevel>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calls_from: Option<SelectiveFrom>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub anonymous_callers_enabled: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unavailable_callers_enabled: Option<bool>,
    /// Matched numbers when `calls_from` is `SELECT_PHONE_NUMBERS`.
    /// `Some(vec![])` is sent as `[]` and clears the stored list.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone_numbers: Option<Vec<String>>,
    #[serde(default)]
    pub enabled: bool,
    /// Selective forward only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub forward_to_phone_number: Option<String>,
    /// Selective forward only.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub destination_voicemail_enabled: Option<bool>,
}

impl SelectiveCriteria {
    /// Criteria matching a fixed set of numbers at any time.
    pub fn for_numbers<I, S>(numbers: I, enabled: bool) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            calls_from: Some(SelectiveFrom::SelectPhoneNumbers),
            phone_numbers: Some(numbers.into_iter().map(Into::into).collect()),
            enabled,
            ..Self::default()
        }
    }
}

fn rename_key(object: &mut Map<String, Value>, from: &str, to: &str) {
    if from == to {
        return;
    }
    if let Some(value) = object.remove(from) {
        object.insert(to.to_string(), value);
    }
}

/// Rename the feature key to `enabled` in a criteria object.
pub fn criteria_from_wire(value: &mut Value, enabled_key: &str) {
    if let Value::Object(object) = value {
        rename_key(object, enabled_key, "enabled");
    }
}

/// Rename `enabled` to the feature key in a criteria object and drop its id.
pub fn criteria_to_wire(value: &mut Value, enabled_key: &str) {
    if let Value::Object(object) = value {
        object.remove("id");
        rename_key(object, "enabled", enabled_key);
    }
}

/// Normalize every entry of a settings object's `criteria` list.
pub fn settings_from_wire(value: &mut Value, enabled_key: &str) {
    if let Some(Value::Array(criteria)) = value.get_mut("criteria") {
        for entry in criteria.iter_mut() {
            criteria_from_wire(entry, enabled_key);
        }
    }
}

fn from_value<T: DeserializeOwned>(value: Value) -> Result<T, ApiError> {
    serde_json::from_value(value).map_err(|e| {
        tracing::warn!(error = %e, "selective payload does not match model");
        ApiError::DeserializationError(e.to_string())
    })
}

fn to_value<T: Serialize + ?Sized>(model: &T) -> Result<Value, ApiError> {
    serde_json::to_value(model).map_err(|e| ApiError::SerializationError(e.to_string()))
}

/// Criteria of feature `F` with its flag renamed to `enabled`.
pub fn decode_criteria<F: SelectiveFeature>(response: &HttpResponse) -> Result<SelectiveCriteria, ApiError> {
    let mut value = decode_json::<Value>(response)?;
    criteria_from_wire(&mut value, F::ENABLED_KEY);
    from_value(value)
}

/// Settings of feature `F`, criteria summaries included.
pub fn decode_settings<F: SelectiveFeature>(response: &HttpResponse) -> Result<F::Settings, ApiError> {
    let mut value = decode_json::<Value>(response)?;
    settings_from_wire(&mut value, F::ENABLED_KEY);
    from_value(value)
}

/// Wire body for a criteria of feature `F`.
pub fn encode_criteria<F: SelectiveFeature>(criteria: &SelectiveCriteria) -> Result<String, ApiError> {
    let mut value = to_value(criteria)?;
    criteria_to_wire(&mut value, F::ENABLED_KEY);
    Ok(value.to_string())
}

/// Wire body for the settings of feature `F`; the criteria list is read-only.
pub fn encode_settings<F: SelectiveFeature>(settings: &F::Settings) -> Result<String, ApiError> {
    let mut value = to_value(settings)?;
    if let Value::Object(object) = &mut value {
        object.remove("criteria");
    }
    Ok(value.to_string())
}

/// Settings and criteria of one selective feature for people, workspaces or
/// virtual lines.
pub struct SelectiveApi<'a, F> {
    session: &'a ApiSession,
    selector: Selector,
    _feature: PhantomData<F>,
}

impl<F: SelectiveFeature> ApiChild for SelectiveApi<'_, F> {
    fn session(&self) -> &ApiSession {
        self.session
    }

    fn base(&self) -> String {
        format!("telephony/config/{}", self.selector)
    }
}

impl<'a, F: SelectiveFeature> SelectiveApi<'a, F> {
    pub fn new(session: &'a ApiSession, selector: Selector) -> Self {
        Self {
            session,
            selector,
            _feature: PhantomData,
        }
    }

    fn feature_ep(&self, entity_id: &str, path: Option<&str>) -> String {
        match path {
            Some(path) => self.ep(Some(&format!("{entity_id}/{}/{path}", F::SEGMENT))),
            None => self.ep(Some(&format!("{entity_id}/{}", F::SEGMENT))),
        }
    }

    fn criteria_ep(&self, entity_id: &str, criteria_id: Option<&str>) -> String {
        match criteria_id {
            Some(id) => self.feature_ep(entity_id, Some(&format!("criteria/{id}"))),
            None => self.feature_ep(entity_id, Some("criteria")),
        }
    }

    pub fn read_settings(&self, entity_id: &str, org_id: Option<&str>) -> ApiCall<F::Settings> {
        self.session.call(
            HttpMethod::Get,
            &self.feature_ep(entity_id, None),
            &self.session.org_query(org_id),
            None,
            decode_settings::<F>,
        )
    }

    pub fn configure_settings(
        &self,
        entity_id: &str,
        settings: &F::Settings,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        let body = encode_settings::<F>(settings)?;
        Ok(self.session.call(
            HttpMethod::Put,
            &self.feature_ep(entity_id, None),
            &self.session.org_query(org_id),
            Some(body),
            decode_empty,
        ))
    }

    pub fn read_criteria(
        &self,
        entity_id: &str,
        criteria_id: &str,
        org_id: Option<&str>,
    ) -> ApiCall<SelectiveCriteria> {
        self.session.call(
            HttpMethod::Get,
            &self.criteria_ep(entity_id, Some(criteria_id)),
            &self.session.org_query(org_id),
            None,
            decode_criteria::<F>,
        )
    }

    pub fn configure_criteria(
        &self,
        entity_id: &str,
        criteria_id: &str,
        criteria: &SelectiveCriteria,
        org_id: Option<&str>,
    ) -> Result<ApiCall<()>, ApiError> {
        let body = encode_criteria::<F>(criteria)?;
        Ok(self.session.call(
            HttpMethod::Put,
            &self.criteria_ep(entity_id, Some(criteria_id)),
            &self.session.org_query(org_id),
            Some(body),
            decode_empty,
        ))
    }

    /// Create a criteria; the call yields the new criteria id.
    pub fn create_criteria(
        &self,
        entity_id: &str,
        criteria: &SelectiveCriteria,
        org_id: Option<&str>,
    ) -> Result<ApiCall<String>, ApiError> {
        let body = encode_criteria::<F>(criteria)?;
        Ok(self.session.call(
            HttpMethod::Post,
            &self.criteria_ep(entity_id, None),
            &self.session.org_query(org_id),
            Some(body),
            decode_id,
        ))
    }

    pub fn delete_criteria(&self, entity_id: &str, criteria_id: &str, org_id: Option<&str>) -> ApiCall<()> {
        self.delete(
            &self.criteria_ep(entity_id, Some(criteria_id)),
            self.session.org_query(org_id),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn criteria_from_wire_renames_flag() {
        let mut value = json!({"id": "c1", "notificationEnabled": true, "callsFrom": "ANY_PHONE_NUMBER"});
        criteria_from_wire(&mut value, "notificationEnabled");
        assert_eq!(value, json!({"id": "c1", "enabled": true, "callsFrom": "ANY_PHONE_NUMBER"}));
    }

    #[test]
    fn criteria_to_wire_drops_id() {
        let mut value = json!({"id": "c1", "enabled": false, "scheduleName": "Weekends"});
        criteria_to_wire(&mut value, "rejectEnabled");
        assert_eq!(value, json!({"rejectEnabled": false, "scheduleName": "Weekends"}));
    }

    #[test]
    fn settings_from_wire_only_touches_criteria_entries() {
        let mut value = json!({
            "enabled": true,
            "ringEnabled": "left alone",
            "criteria": [
                {"id": "c1", "source": "ALL_NUMBERS", "ringEnabled": true},
                {"id": "c2", "source": "SPECIFIC_NUMBERS", "ringEnabled": false}
            ]
        });
        settings_from_wire(&mut value, "ringEnabled");
        assert_eq!(value["ringEnabled"], "left alone");
        assert_eq!(value["criteria"][0]["enabled"], true);
        assert_eq!(value["criteria"][1]["enabled"], false);
        assert!(value["criteria"][0].get("ringEnabled").is_none());
    }

    #[test]
    fn settings_without_criteria_are_untouched() {
        let mut value = json!({"enabled": false});
        settings_from_wire(&mut value, "acceptEnabled");
        assert_eq!(value, json!({"enabled": false}));
    }

    #[test]
    fn for_numbers_selects_phone_numbers() {
        let criteria = SelectiveCriteria::for_numbers(["+14085551234", "2001"], true);
        assert_eq!(criteria.calls_from, Some(SelectiveFrom::SelectPhoneNumbers));
        assert_eq!(
            criteria.phone_numbers.as_deref(),
            Some(&["+14085551234".to_string(), "2001".to_string()][..])
        );
        assert!(criteria.enabled);
    }

    #[test]
    fn emptied_phone_numbers_are_sent() {
        let mut criteria = SelectiveCriteria::for_numbers(["2001"], true);
        criteria.calls_from = Some(SelectiveFrom::AnyPhoneNumber);
        criteria.phone_numbers = Some(Vec::new());
        let body: Value = serde_json::from_str(&encode_criteria::<Reject>(&criteria).unwrap()).unwrap();
        assert_eq!(body["phoneNumbers"], json!([]));

        criteria.phone_numbers = None;
        let body: Value = serde_json::from_str(&encode_criteria::<Reject>(&criteria).unwrap()).unwrap();
        assert!(body.get("phoneNumbers").is_none());
    }

    #[test]
    fn unknown_enum_values_decode_as_other() {
        let criteria: SelectiveCriteria = serde_json::from_value(json!({
            "scheduleType": "specialDays",
            "scheduleLevel": "ORGANIZATION",
            "callsFrom": "ANY_TEAMS_USER"
        }))
        .unwrap();
        assert_eq!(criteria.schedule_type, Some(ScheduleType::Other));
        assert_eq!(criteria.schedule_level, Some(ScheduleLevel::Other));
        assert_eq!(criteria.calls_from, Some(SelectiveFrom::Other));

        let summary: CriteriaSummary =
            serde_json::from_value(json!({"id": "c1", "source": "SOME_NUMBERS"})).unwrap();
        assert_eq!(summary.source, Some(SelectiveSource::Other));
    }

    struct Reject;

    impl SelectiveFeature for Reject {
        const SEGMENT: &'static str = "selectiveReject";
        const ENABLED_KEY: &'static str = "rejectEnabled";
        type Settings = Value;
    }
}
