use super::dto::ErrorResponseDto;
use super::metric_routes::HealthyDto;
use super::{actuator_routes, command_routes, config_routes, garden_routes, logging_routes};
use super::{metric_routes, sensor_routes};
use garden_core::{
    Command, CommandUpdate, ConfigUpdate, Garden, GardenConfig, GardenUpdate, Pod, PodUpdate,
    RASchedule, RAUpdate, ReactiveAction, ReactiveActuator, Reading, SASchedule, SAUpdate,
    ScheduledAction, ScheduledActuator, Sensor, SensorSchedule, SensorUpdate,
};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_swagger_ui::Config;
use warp::Filter;
use warp::{
    http::Uri,
    hyper::{Response, StatusCode},
    path::{FullPath, Tail},
    Rejection, Reply,
};

const API_JSON: &str = "/docs/api.json";

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Garden tracker API",
        description = "Gardens, their devices and schedules, plus sensor and actuator logs"
    ),
    paths(
        garden_routes::create_garden,
        garden_routes::list_gardens,
        garden_routes::get_garden,
        garden_routes::update_garden,
        garden_routes::garden_pods,
        garden_routes::add_pod,
        garden_routes::update_pod,
        sensor_routes::register_sensor,
        sensor_routes::list_sensors,
        sensor_routes::sensor,
        sensor_routes::update_sensor,
        sensor_routes::delete_sensor,
        actuator_routes::create_sa,
        actuator_routes::list_sa,
        actuator_routes::get_sa,
        actuator_routes::update_sa,
        actuator_routes::create_ra,
        actuator_routes::list_ra,
        actuator_routes::get_ra,
        actuator_routes::update_ra,
        command_routes::create_commands,
        command_routes::list_commands,
        command_routes::command,
        command_routes::update_command,
        config_routes::create_config,
        config_routes::list_configs,
        config_routes::config,
        config_routes::update_config,
        logging_routes::log_reading,
        logging_routes::readings,
        logging_routes::log_scheduled_action,
        logging_routes::scheduled_actions,
        logging_routes::log_reactive_action,
        logging_routes::reactive_actions,
        metric_routes::health,
    ),
    components(schemas(
        Garden,
        GardenUpdate,
        Pod,
        PodUpdate,
        Sensor,
        SensorUpdate,
        ScheduledActuator,
        SAUpdate,
        ReactiveActuator,
        RAUpdate,
        Command,
        CommandUpdate,
        GardenConfig,
        ConfigUpdate,
        SensorSchedule,
        RASchedule,
        SASchedule,
        Reading,
        ScheduledAction,
        ReactiveAction,
        ErrorResponseDto,
        HealthyDto,
    )),
    tags(
        (name = "garden", description = "Gardens and their embedded pods"),
        (name = "sensor", description = "Sensors attached to a garden"),
        (name = "actuator", description = "Scheduled and reactive actuators"),
        (name = "command", description = "Commands queued for devices"),
        (name = "config", description = "Sensor and actuator schedules"),
        (name = "logging", description = "Readings and actuator actions"),
        (name = "health", description = "Service status"),
    )
)]
pub struct ApiDoc;

/// GET /docs/ serves Swagger UI, GET /docs/api.json the OpenAPI document
pub fn routes() -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    let api = Arc::new(ApiDoc::openapi());
    let config = Arc::new(Config::from(API_JSON));

    warp::path!("docs" / "api.json")
        .and(warp::get())
        .map(move || warp::reply::json(api.as_ref()))
        .or(warp::path("docs")
            .and(warp::get())
            .and(warp::path::full())
            .and(warp::path::tail())
            .and(warp::any().map(move || config.clone()))
            .and_then(serve_swagger))
}

async fn serve_swagger(
    full_path: FullPath,
    tail: Tail,
    config: Arc<Config<'static>>,
) -> Result<Box<dyn Reply + 'static>, Rejection> {
    if full_path.as_str() == "/docs" {
        return Ok(Box::new(warp::redirect::found(Uri::from_static("/docs/"))));
    }

    let path = tail.as_str();
    match utoipa_swagger_ui::serve(path, config) {
        Ok(Some(file)) => Ok(Box::new(
            Response::builder()
                .header("Content-Type", file.content_type)
                .body(file.bytes),
        )),
        Ok(None) => Ok(Box::new(StatusCode::NOT_FOUND)),
        Err(error) => Ok(Box::new(
            Response::builder()
                .status(StatusCode::INTERNAL_SERVER_ERROR)
                .body(error.to_string()),
        )),
    }
}
