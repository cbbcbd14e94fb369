use super::*;
use crate::models::MemoryStore;
use chrono::Duration;
use garden_core::{
    CommandUpdate, GardenUpdate, Reading, ReactiveAction, ReactiveActuator, ScheduledAction,
    Sensor, SensorUpdate,
};
use serde::de::DeserializeOwned;
use serde_json::json;

fn build_controller() -> Controller {
    Controller::new(Arc::new(DocumentStore::Memory(MemoryStore::new())))
}

fn parse<D: DeserializeOwned>(value: serde_json::Value) -> D {
    serde_json::from_value(value).unwrap()
}

async fn insert_garden(controller: &Controller) -> Garden {
    let garden: Garden = parse(json!({"name": "Og Garden", "location": "Backyard"}));
    controller.create(garden).await.unwrap()
}

async fn insert_sensor(controller: &Controller, garden_id: &str) -> Sensor {
    let sensor: Sensor = parse(json!({"name": "Humidity", "garden_id": garden_id}));
    controller.create(sensor).await.unwrap()
}

#[tokio::test]
async fn test_create_and_get() {
    // prepare
    let controller = build_controller();

    // execute
    let garden = insert_garden(&controller).await;
    let fetched: Garden = controller.get(&garden.id).await.unwrap();

    // validate
    assert!(!garden.id.is_empty());
    assert_eq!(garden, fetched);
}

#[tokio::test]
async fn test_get_unknown() {
    let controller = build_controller();

    let res = controller.get::<Garden>("nope").await;

    match res {
        Err(ServiceError::NotFound(msg)) => assert_eq!("Garden with ID nope not found", msg),
        other => panic!("Unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_create_checks_parent() {
    // prepare
    let controller = build_controller();
    let sensor: Sensor = parse(json!({"name": "Humidity", "garden_id": "unknown"}));

    // execute
    let res = controller.create(sensor).await;

    // validate
    assert!(matches!(res, Err(ServiceError::NotFound(_))));
    assert!(controller.list::<Sensor>(10).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_duplicate_id() {
    // prepare
    let controller = build_controller();
    let garden = insert_garden(&controller).await;

    // execute
    let res = controller.create(garden).await;

    // validate
    assert!(matches!(res, Err(ServiceError::Conflict(_))));
}

#[tokio::test]
async fn test_unchecked_parents() {
    // Actuators and gardens do not validate their references
    let controller = build_controller();
    let actuator: ReactiveActuator = parse(json!({"name": "Pump", "sensor_id": "unknown"}));
    let garden: Garden = parse(json!({"name": "G", "location": "L", "config_id": "unknown"}));

    assert!(controller.create(actuator).await.is_ok());
    assert!(controller.create(garden).await.is_ok());
}

#[tokio::test]
async fn test_list_order_and_limit() {
    // prepare
    let controller = build_controller();
    let first = insert_garden(&controller).await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let second = insert_garden(&controller).await;
    tokio::time::sleep(std::time::Duration::from_millis(2)).await;
    let third = insert_garden(&controller).await;
    let update = GardenUpdate {
        name: Some("Touched".to_owned()),
        ..Default::default()
    };
    controller.update::<Garden, _>(&first.id, update).await.unwrap();

    // execute
    let all: Vec<Garden> = controller.list(1000).await.unwrap();
    let limited: Vec<Garden> = controller.list(2).await.unwrap();

    // validate
    let ids: Vec<&str> = all.iter().map(|g| g.id.as_str()).collect();
    assert_eq!(vec![first.id.as_str(), third.id.as_str(), second.id.as_str()], ids);
    assert_eq!(2, limited.len());
}

#[tokio::test]
async fn test_update_merges_fields() {
    // prepare
    let controller = build_controller();
    let garden = insert_garden(&controller).await;
    let update = GardenUpdate {
        name: Some("X".to_owned()),
        ..Default::default()
    };

    // execute
    let updated: Garden = controller.update(&garden.id, update).await.unwrap();

    // validate
    assert_eq!("X", updated.name);
    assert_eq!(garden.location, updated.location);
    assert_eq!(garden.created_at, updated.created_at);
    assert!(updated.updated_at > garden.updated_at);
}

#[tokio::test]
async fn test_empty_update_is_noop() {
    let controller = build_controller();
    let garden = insert_garden(&controller).await;

    let updated: Garden = controller
        .update(&garden.id, GardenUpdate::default())
        .await
        .unwrap();

    assert_eq!(garden, updated);
}

#[tokio::test]
async fn test_update_unknown() {
    let controller = build_controller();

    let res = controller
        .update::<Sensor, _>("nope", SensorUpdate::default())
        .await;

    assert!(matches!(res, Err(ServiceError::NotFound(_))));
}

#[tokio::test]
async fn test_delete() {
    // prepare
    let controller = build_controller();
    let garden = insert_garden(&controller).await;
    let sensor = insert_sensor(&controller, &garden.id).await;

    // execute
    let first = controller.delete::<Sensor>(&sensor.id).await;
    let second = controller.delete::<Sensor>(&sensor.id).await;

    // validate
    assert!(first.is_ok());
    assert!(matches!(second, Err(ServiceError::NotFound(_))));
    assert!(controller.get::<Sensor>(&sensor.id).await.is_err());
}

#[tokio::test]
async fn test_window_bounds() {
    // prepare
    let controller = build_controller();
    let garden = insert_garden(&controller).await;
    let sensor = insert_sensor(&controller, &garden.id).await;
    let created_at = "2023-02-17T20:19:00.536083+00:00";
    let reading: Reading = parse(json!({
        "sensor_id": sensor.id,
        "value": 5,
        "created_at": created_at,
    }));
    let reading = controller.create(reading).await.unwrap();
    let t = reading.created_at;

    // execute
    let hit = TimeWindow::new(t, t + Duration::seconds(1));
    let miss = TimeWindow::new(t - Duration::seconds(1), t);
    let found = controller
        .window::<Reading>(Some(&sensor.id), hit, 1000)
        .await
        .unwrap();
    let missed = controller.window::<Reading>(None, miss, 1000).await;

    // validate
    assert_eq!(vec![reading], found);
    assert!(matches!(missed, Err(ServiceError::EmptyWindow(_))));
}

#[tokio::test]
async fn test_window_filters_parent() {
    // prepare
    let controller = build_controller();
    let actuator: ReactiveActuator = parse(json!({"name": "Pump", "sensor_id": "s"}));
    let actuator = controller.create(actuator).await.unwrap();
    for _ in 0..3 {
        let action: ReactiveAction = parse(json!({"actuator_id": actuator.id, "data": "on"}));
        controller.create(action).await.unwrap();
    }
    let window = TimeWindow::parse(None, None).unwrap();
    let window = TimeWindow::new(window.start(), window.end() + Duration::seconds(5));

    // execute
    let all = controller
        .window::<ReactiveAction>(Some(&actuator.id), window, 1000)
        .await
        .unwrap();
    let limited = controller
        .window::<ReactiveAction>(None, window, 2)
        .await
        .unwrap();
    let other = controller
        .window::<ReactiveAction>(Some("other"), window, 1000)
        .await;

    // validate
    assert_eq!(3, all.len());
    assert_eq!(2, limited.len());
    assert!(other.is_err());
}

#[tokio::test]
async fn test_action_needs_actuator() {
    let controller = build_controller();
    let action: ScheduledAction = parse(json!({"actuator_id": "unknown", "data": "on"}));

    let res = controller.create(action).await;

    match res {
        Err(ServiceError::NotFound(msg)) => {
            assert_eq!("Scheduled actuator with ID unknown not found", msg)
        }
        other => panic!("Unexpected result {:?}", other),
    }
}

#[tokio::test]
async fn test_pods() {
    // prepare
    let controller = build_controller();
    let garden = insert_garden(&controller).await;
    let pod: Pod = parse(json!({"name": "Tomato", "garden_id": garden.id, "location": [1, 2]}));
    let pod_id = pod.id.clone();

    // execute
    let with_pod = controller.add_pod(pod).await.unwrap();
    let update = PodUpdate {
        plant: Some("Basil".to_owned()),
        ..Default::default()
    };
    let updated = controller.update_pod(&pod_id, update).await.unwrap();
    let pods = controller.pods(&garden.id).await.unwrap();

    // validate
    assert_eq!(1, with_pod.pods().len());
    assert!(updated.updated_at > with_pod.updated_at);
    assert_eq!(1, pods.len());
    assert_eq!(Some("Basil".to_owned()), pods[0].plant);
    assert_eq!("Tomato", pods[0].name);
    assert!(pods[0].updated_at > with_pod.pods()[0].updated_at);
}

#[tokio::test]
async fn test_pod_unknown_garden() {
    let controller = build_controller();
    let pod: Pod = parse(json!({"name": "Tomato", "garden_id": "unknown", "location": [0, 0]}));

    assert!(matches!(
        controller.add_pod(pod).await,
        Err(ServiceError::NotFound(_))
    ));
    assert!(matches!(
        controller.update_pod("unknown", PodUpdate::default()).await,
        Err(ServiceError::NotFound(_))
    ));
}

#[tokio::test]
async fn test_commands() {
    // prepare
    let controller = build_controller();
    let commands: Vec<Command> = parse(json!([
        {"ref_id": "a", "cmd": 1, "type": "reactive actuator", "garden_id": "g"},
        {"ref_id": "b", "cmd": 0, "type": "scheduled actuator", "garden_id": "g"},
    ]));

    // execute
    let created = controller.create_commands(commands).await.unwrap();
    let done = CommandUpdate {
        executed: "true".to_owned(),
    };
    controller
        .update::<Command, _>(&created[0].id, done)
        .await
        .unwrap();
    let pending = controller.list_commands(None, 1000).await.unwrap();
    let executed = controller.list_commands(Some("true"), 1000).await.unwrap();

    // validate
    assert_eq!(2, created.len());
    assert_eq!(1, pending.len());
    assert_eq!(created[1].id, pending[0].id);
    assert_eq!(1, executed.len());
    assert_eq!(created[0].id, executed[0].id);
}
