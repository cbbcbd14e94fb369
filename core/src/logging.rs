use crate::device::{ReactiveActuator, ScheduledActuator, Sensor};
use crate::document::new_id;
use crate::error::DocumentError;
use crate::time::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Reading {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub sensor_id: String,
    #[serde(deserialize_with = "number_or_string")]
    pub value: f64,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(Reading, "readings", "Reading", parent(sensor_id => Sensor));

impl crate::LogEntry for Reading {
    const PARENT_FIELD: &'static str = "sensor_id";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduledAction {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub actuator_id: String,
    pub data: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(
    ScheduledAction,
    "scheduled_actions",
    "Scheduled action",
    parent(actuator_id => ScheduledActuator)
);

impl crate::LogEntry for ScheduledAction {
    const PARENT_FIELD: &'static str = "actuator_id";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReactiveAction {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub actuator_id: String,
    pub data: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(
    ReactiveAction,
    "reactive_actions",
    "Reactive action",
    parent(actuator_id => ReactiveActuator)
);

impl crate::LogEntry for ReactiveAction {
    const PARENT_FIELD: &'static str = "actuator_id";
}

/// Firmware posts readings as strings, e.g. `"5"`
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(f64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s
            .trim()
            .parse::<f64>()
            .map_err(|_| serde::de::Error::custom(DocumentError::InvalidNumber(s))),
    }
}
