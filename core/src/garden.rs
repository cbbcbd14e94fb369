use crate::document::{merge, new_id, Patch};
use crate::time::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Garden {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub location: String,
    #[serde(default)]
    pub config_id: Option<String>,
    #[serde(default)]
    pub pods: Option<Vec<Pod>>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(Garden, "gardens", "Garden");

impl Garden {
    pub fn pods(&self) -> &[Pod] {
        self.pods.as_deref().unwrap_or(&[])
    }

    pub fn pod_mut(&mut self, pod_id: &str) -> Option<&mut Pod> {
        self.pods
            .as_mut()
            .and_then(|pods| pods.iter_mut().find(|p| p.id == pod_id))
    }

    pub fn push_pod(&mut self, pod: Pod) {
        self.pods.get_or_insert_with(Vec::new).push(pod);
    }
}

/// A planting slot, stored embedded in its garden's `pods` list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Pod {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    pub name: String,
    pub garden_id: String,
    /// `[row, column]` inside the garden
    pub location: Vec<i64>,
    #[serde(default)]
    pub plant: Option<String>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct GardenUpdate {
    pub name: Option<String>,
    pub location: Option<String>,
    pub config_id: Option<String>,
    pub pods: Option<Vec<Pod>>,
}

impl Patch<Garden> for GardenUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.location.is_none()
            && self.config_id.is_none()
            && self.pods.is_none()
    }

    fn apply(self, target: &mut Garden) {
        merge!(self, target, [name, location]);
        if let Some(config_id) = self.config_id {
            target.config_id = Some(config_id);
        }
        if let Some(pods) = self.pods {
            target.pods = Some(pods);
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize, ToSchema)]
pub struct PodUpdate {
    pub name: Option<String>,
    pub garden_id: Option<String>,
    pub location: Option<Vec<i64>>,
    pub plant: Option<String>,
}

impl Patch<Pod> for PodUpdate {
    fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.garden_id.is_none()
            && self.location.is_none()
            && self.plant.is_none()
    }

    fn apply(self, target: &mut Pod) {
        merge!(self, target, [name, garden_id, location]);
        if let Some(plant) = self.plant {
            target.plant = Some(plant);
        }
    }
}
