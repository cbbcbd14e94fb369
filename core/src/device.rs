use crate::document::{merge, new_id, Patch};
use crate::garden::Garden;
use crate::time::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Sensor {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub garden_id: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(Sensor, "sensors", "Sensor", parent(garden_id => Garden));

/// Actuator switched on a fixed timetable, e.g. a water pump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ScheduledActuator {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub garden_id: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(ScheduledActuator, "scheduled_actuators", "Scheduled actuator");

/// Actuator driven by the readings of a sensor, e.g. a ph down pump
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ReactiveActuator {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub sensor_id: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(ReactiveActuator, "reactive_actuators", "Reactive actuator");

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SensorUpdate {
    pub name: Option<String>,
    pub garden_id: Option<String>,
}

impl Patch<Sensor> for SensorUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.garden_id.is_none()
    }

    fn apply(self, target: &mut Sensor) {
        merge!(self, target, [name, garden_id]);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct SAUpdate {
    pub name: Option<String>,
    pub garden_id: Option<String>,
}

impl Patch<ScheduledActuator> for SAUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.garden_id.is_none()
    }

    fn apply(self, target: &mut ScheduledActuator) {
        merge!(self, target, [name, garden_id]);
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct RAUpdate {
    pub name: Option<String>,
    pub sensor_id: Option<String>,
}

impl Patch<ReactiveActuator> for RAUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none() && self.sensor_id.is_none()
    }

    fn apply(self, target: &mut ReactiveActuator) {
        merge!(self, target, [name, sensor_id]);
    }
}
