use std::collections::BTreeMap;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::domain::common::entities::app_errors::CoreError;

/// A Firestore REST typed value, e.g. `{"stringValue": "oats"}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Value {
    NullValue(()),
    BooleanValue(bool),
    /// int64 travels as a decimal string.
    IntegerValue(String),
    DoubleValue(f64),
    TimestampValue(DateTime<Utc>),
    StringValue(String),
    BytesValue(String),
    ReferenceValue(String),
    GeoPointValue(serde_json::Value),
    ArrayValue(ArrayValue),
    MapValue(MapValue),
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ArrayValue {
    #[serde(default)]
    pub values: Vec<Value>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct MapValue {
    #[serde(default)]
    pub fields: Fields,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Document {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Fields,
}

/// Field map of a document with typed accessors.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Fields(BTreeMap<String, Value>);

impl Fields {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with(mut self, key: &str, value: Value) -> Self {
        self.0.insert(key.to_string(), value);
        self
    }

    pub fn string(self, key: &str, value: impl Into<String>) -> Self {
        self.with(key, Value::StringValue(value.into()))
    }

    pub fn opt_string(self, key: &str, value: Option<&str>) -> Self {
        match value {
            Some(value) => self.string(key, value),
            None => self.with(key, Value::NullValue(())),
        }
    }

    pub fn integer(self, key: &str, value: i64) -> Self {
        self.with(key, Value::IntegerValue(value.to_string()))
    }

    pub fn double(self, key: &str, value: f64) -> Self {
        self.with(key, Value::DoubleValue(value))
    }

    pub fn opt_double(self, key: &str, value: Option<f64>) -> Self {
        match value {
            Some(value) => self.double(key, value),
            None => self.with(key, Value::NullValue(())),
        }
    }

    pub fn timestamp(self, key: &str, value: DateTime<Utc>) -> Self {
        self.with(key, Value::TimestampValue(value))
    }

    /// Dates are stored as ISO `YYYY-MM-DD` strings so they sort lexically.
    pub fn date(self, key: &str, value: NaiveDate) -> Self {
        self.string(key, value.format("%Y-%m-%d").to_string())
    }

    pub fn strings<S: AsRef<str>>(self, key: &str, values: &[S]) -> Self {
        let values = values
            .iter()
            .map(|v| Value::StringValue(v.as_ref().to_string()))
            .collect();
        self.with(key, Value::ArrayValue(ArrayValue { values }))
    }

    pub fn map(self, key: &str, fields: Fields) -> Self {
        self.with(key, Value::MapValue(MapValue { fields }))
    }

    fn get(&self, key: &str) -> Option<&Value> {
        match self.0.get(key) {
            None | Some(Value::NullValue(())) => None,
            Some(value) => Some(value),
        }
    }

    fn require(&self, key: &str) -> Result<&Value, CoreError> {
        self.get(key)
            .ok_or_else(|| malformed(key, "missing field"))
    }

    pub fn get_string(&self, key: &str) -> Result<String, CoreError> {
        match self.require(key)? {
            Value::StringValue(value) => Ok(value.clone()),
            other => Err(malformed(key, &format!("expected string, got {other:?}"))),
        }
    }

    pub fn get_opt_string(&self, key: &str) -> Result<Option<String>, CoreError> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.get_string(key).map(Some),
        }
    }

    pub fn get_i64(&self, key: &str) -> Result<i64, CoreError> {
        match self.require(key)? {
            Value::IntegerValue(raw) => raw
                .parse()
                .map_err(|_| malformed(key, &format!("invalid integer `{raw}`"))),
            Value::DoubleValue(value) if value.fract() == 0.0 => Ok(*value as i64),
            other => Err(malformed(key, &format!("expected integer, got {other:?}"))),
        }
    }

    pub fn get_f64(&self, key: &str) -> Result<f64, CoreError> {
        match self.require(key)? {
            Value::DoubleValue(value) => Ok(*value),
            Value::IntegerValue(raw) => raw
                .parse::<i64>()
                .map(|v| v as f64)
                .map_err(|_| malformed(key, &format!("invalid integer `{raw}`"))),
            other => Err(malformed(key, &format!("expected number, got {other:?}"))),
        }
    }

    pub fn get_opt_f64(&self, key: &str) -> Result<Option<f64>, CoreError> {
        match self.get(key) {
            None => Ok(None),
            Some(_) => self.get_f64(key).map(Some),
        }
    }

    pub fn get_timestamp(&self, key: &str) -> Result<DateTime<Utc>, CoreError> {
        match self.require(key)? {
            Value::TimestampValue(value) => Ok(*value),
            Value::StringValue(raw) => DateTime::parse_from_rfc3339(raw)
                .map(|v| v.to_utc())
                .map_err(|_| malformed(key, &format!("invalid timestamp `{raw}`"))),
            other => Err(malformed(key, &format!("expected timestamp, got {other:?}"))),
        }
    }

    pub fn get_date(&self, key: &str) -> Result<NaiveDate, CoreError> {
        let raw = self.get_string(key)?;
        NaiveDate::parse_from_str(&raw, "%Y-%m-%d")
            .map_err(|_| malformed(key, &format!("invalid date `{raw}`")))
    }

    /// Missing arrays read as empty.
    pub fn get_strings(&self, key: &str) -> Result<Vec<String>, CoreError> {
        match self.get(key) {
            None => Ok(Vec::new()),
            Some(Value::ArrayValue(array)) => array
                .values
                .iter()
                .map(|value| match value {
                    Value::StringValue(value) => Ok(value.clone()),
                    other => Err(malformed(key, &format!("expected string item, got {other:?}"))),
                })
                .collect(),
            Some(other) => Err(malformed(key, &format!("expected array, got {other:?}"))),
        }
    }

    pub fn get_map(&self, key: &str) -> Result<Fields, CoreError> {
        match self.require(key)? {
            Value::MapValue(map) => Ok(map.fields.clone()),
            other => Err(malformed(key, &format!("expected map, got {other:?}"))),
        }
    }
}

fn malformed(key: &str, detail: &str) -> CoreError {
    error!("Malformed Firestore document field `{}`: {}", key, detail);
    CoreError::InternalServerError
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn values_use_rest_type_tags() {
        let fields = Fields::new()
            .string("name", "Asha")
            .integer("age", 34)
            .opt_double("bmi", None)
            .strings("allergies", &["nuts"]);

        assert_eq!(
            serde_json::to_value(&fields).unwrap(),
            json!({
                "name": {"stringValue": "Asha"},
                "age": {"integerValue": "34"},
                "bmi": {"nullValue": null},
                "allergies": {"arrayValue": {"values": [{"stringValue": "nuts"}]}},
            })
        );
    }

    #[test]
    fn decodes_a_document_returned_by_the_api() {
        let document: Document = serde_json::from_value(json!({
            "name": "projects/p/databases/(default)/documents/users/u-1",
            "fields": {
                "age": {"integerValue": "41"},
                "weight_kg": {"doubleValue": 61.5},
                "height_cm": {"integerValue": "160"},
                "created_at": {"timestampValue": "2025-02-03T04:05:06.123456Z"},
                "plan_date": {"stringValue": "2025-02-03"},
                "empty": {"arrayValue": {}},
                "meal_plan": {"mapValue": {"fields": {"notes": {"arrayValue": {"values": []}}}}}
            },
            "createTime": "2025-02-03T04:05:06.123456Z",
            "updateTime": "2025-02-03T04:05:06.123456Z"
        }))
        .unwrap();

        let fields = document.fields;
        assert_eq!(fields.get_i64("age").unwrap(), 41);
        assert_eq!(fields.get_f64("weight_kg").unwrap(), 61.5);
        assert_eq!(fields.get_f64("height_cm").unwrap(), 160.0);
        assert_eq!(
            fields.get_timestamp("created_at").unwrap().to_rfc3339(),
            "2025-02-03T04:05:06.123456+00:00"
        );
        assert_eq!(
            fields.get_date("plan_date").unwrap(),
            NaiveDate::from_ymd_opt(2025, 2, 3).unwrap()
        );
        assert!(fields.get_strings("empty").unwrap().is_empty());
        assert!(fields.get_strings("absent").unwrap().is_empty());
        assert!(fields.get_map("meal_plan").unwrap().get_strings("notes").unwrap().is_empty());
    }

    #[test]
    fn missing_or_mistyped_fields_are_errors() {
        let fields = Fields::new().string("age", "forty");
        assert_eq!(fields.get_i64("age"), Err(CoreError::InternalServerError));
        assert_eq!(fields.get_string("name"), Err(CoreError::InternalServerError));
        assert_eq!(fields.get_opt_string("name"), Ok(None));
    }
}
