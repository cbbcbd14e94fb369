use super::dto::LimitQuery;
use super::resource;
use crate::controller::Controller;
use garden_core::{Sensor, SensorUpdate};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

const PREFIX: &str = "sensor";

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    register_sensor(controller)
        .or(list_sensors(controller))
        .or(sensor(controller))
        .or(update_sensor(controller))
        .or(delete_sensor(controller))
}

/// POST /sensor/
///
/// Register a sensor with an existing garden
#[utoipa::path(
    post,
    path = "/sensor/",
    tag = "sensor",
    request_body = Sensor,
    responses(
        (status = 201, description = "Stored sensor", body = Sensor),
        (status = 404, description = "Unknown garden", body = ErrorResponseDto),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn register_sensor(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::create::<Sensor>(PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/sensor/",
    tag = "sensor",
    params(LimitQuery),
    responses((status = 200, description = "Sensors", body = [Sensor]))
)]
pub(super) fn list_sensors(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::list::<Sensor>(PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/sensor/{id}",
    tag = "sensor",
    params(("id" = String, Path, description = "Sensor id")),
    responses(
        (status = 200, description = "Sensor", body = Sensor),
        (status = 404, description = "Unknown sensor", body = ErrorResponseDto),
    )
)]
pub(super) fn sensor(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<Sensor>(PREFIX, controller.clone())
}

#[utoipa::path(
    put,
    path = "/sensor/{id}",
    tag = "sensor",
    params(("id" = String, Path, description = "Sensor id")),
    request_body = SensorUpdate,
    responses(
        (status = 200, description = "Updated sensor", body = Sensor),
        (status = 404, description = "Unknown sensor", body = ErrorResponseDto),
    )
)]
pub(super) fn update_sensor(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<Sensor, SensorUpdate>(PREFIX, controller.clone())
}

/// DELETE /sensor/:id
///
/// Removes the sensor only, its readings are kept
#[utoipa::path(
    delete,
    path = "/sensor/{id}",
    tag = "sensor",
    params(("id" = String, Path, description = "Sensor id")),
    responses(
        (status = 204, description = "Sensor removed"),
        (status = 404, description = "Unknown sensor", body = ErrorResponseDto),
    )
)]
pub(super) fn delete_sensor(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::delete::<Sensor>(PREFIX, controller.clone())
}
