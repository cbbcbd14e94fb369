use super::dto::LimitQuery;
use super::resource;
use crate::controller::Controller;
use garden_core::{ConfigUpdate, GardenConfig};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

const PREFIX: &str = "config";

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_config(controller)
        .or(list_configs(controller))
        .or(config(controller))
        .or(update_config(controller))
}

/// POST /config/
///
/// Stores the sensor and actuator schedules of a garden
#[utoipa::path(
    post,
    path = "/config/",
    tag = "config",
    request_body = GardenConfig,
    responses(
        (status = 201, description = "Stored config", body = GardenConfig),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn create_config(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::create::<GardenConfig>(PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/config/",
    tag = "config",
    params(LimitQuery),
    responses((status = 200, description = "Configs", body = [GardenConfig]))
)]
pub(super) fn list_configs(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::list::<GardenConfig>(PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/config/{id}",
    tag = "config",
    params(("id" = String, Path, description = "Config id")),
    responses(
        (status = 200, description = "Config", body = GardenConfig),
        (status = 404, description = "Unknown config", body = ErrorResponseDto),
    )
)]
pub(super) fn config(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<GardenConfig>(PREFIX, controller.clone())
}

/// Replaces whole schedule lists, entries are not merged
#[utoipa::path(
    put,
    path = "/config/{id}",
    tag = "config",
    params(("id" = String, Path, description = "Config id")),
    request_body = ConfigUpdate,
    responses(
        (status = 200, description = "Updated config", body = GardenConfig),
        (status = 404, description = "Unknown config", body = ErrorResponseDto),
    )
)]
pub(super) fn update_config(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<GardenConfig, ConfigUpdate>(PREFIX, controller.clone())
}
