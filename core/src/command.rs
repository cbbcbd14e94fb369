use crate::document::{new_id, Patch};
use crate::time::{self, timestamp};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// An instruction queued for the device side of a garden.
/// Devices poll for commands with `executed == "false"` and flip the flag once done.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Command {
    #[serde(rename = "_id", alias = "id", default = "new_id")]
    pub id: String,
    /// Id of the actuator or sensor the command targets
    pub ref_id: String,
    pub cmd: i64,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(default = "not_executed")]
    pub executed: String,
    pub garden_id: String,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub created_at: DateTime<Utc>,
    #[serde(with = "timestamp", default = "time::now")]
    #[schema(value_type = String, format = DateTime)]
    pub updated_at: DateTime<Utc>,
}

crate::document!(Command, "commands", "Command");

pub const NOT_EXECUTED: &str = "false";

fn not_executed() -> String {
    NOT_EXECUTED.to_owned()
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct CommandUpdate {
    pub executed: String,
}

impl Patch<Command> for CommandUpdate {
    fn is_empty(&self) -> bool {
        false
    }

    fn apply(self, target: &mut Command) {
        target.executed = self.executed;
    }
}
