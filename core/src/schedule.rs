use crate::document::{merge, new_id, Patch};
use crate::time::{self, timestamp, timestamp_list};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Polling and actuation plan a garden's devices run with
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct GardenConfig {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub sensor_schedule: Vec<SensorSchedule>,
    pub ra_schedule: Vec<RASchedule>,
    pub sa_schedule: Vec<SASchedule>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(GardenConfig, "configs", "Config");

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SensorSchedule {
    pub sensor_id: String,
    /// Seconds between two measurements
    pub interval: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct RASchedule {
    pub ra_id: String,
    pub interval: f64,
    pub threshold: f64,
    pub duration: f64,
    /// 1: ceiling, 0: floor
    pub threshold_type: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SASchedule {
    pub sa_id: String,
    #[serde(with = "timestamp_list")]
    #[schema(value_type = Vec<String>)]
    pub on: Vec<DateTime<Utc>>,
    #[serde(with = "timestamp_list")]
    #[schema(value_type = Vec<String>)]
    pub off: Vec<DateTime<Utc>>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct ConfigUpdate {
    pub name: Option<String>,
    pub sensor_schedule: Option<Vec<SensorSchedule>>,
    pub ra_schedule: Option<Vec<RASchedule>>,
    pub sa_schedule: Option<Vec<SASchedule>>,
}

impl Patch<GardenConfig> for ConfigUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.sensor_schedule.is_none()
            && self.ra_schedule.is_none()
            && self.sa_schedule.is_none()
    }

    fn apply(self, target: &mut GardenConfig) {
        merge!(self, target, [name, sensor_schedule, ra_schedule, sa_schedule]);
    }
}
