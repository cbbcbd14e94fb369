use super::dto::LimitQuery;
use super::resource;
use crate::controller::Controller;
use garden_core::{RAUpdate, ReactiveActuator, SAUpdate, ScheduledActuator};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

const SA_PREFIX: &str = "sa";
const RA_PREFIX: &str = "ra";

/// Scheduled actuators under `/sa/`, reactive actuators under `/ra/`
pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_sa(controller)
        .or(list_sa(controller))
        .or(get_sa(controller))
        .or(update_sa(controller))
        .or(create_ra(controller))
        .or(list_ra(controller))
        .or(get_ra(controller))
        .or(update_ra(controller))
}

#[utoipa::path(
    post,
    path = "/sa/",
    tag = "actuator",
    request_body = ScheduledActuator,
    responses(
        (status = 201, description = "Stored scheduled actuator", body = ScheduledActuator),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn create_sa(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::create::<ScheduledActuator>(SA_PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/sa/",
    tag = "actuator",
    params(LimitQuery),
    responses((status = 200, description = "Scheduled actuators", body = [ScheduledActuator]))
)]
pub(super) fn list_sa(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::list::<ScheduledActuator>(SA_PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/sa/{id}",
    tag = "actuator",
    params(("id" = String, Path, description = "Scheduled actuator id")),
    responses(
        (status = 200, description = "Scheduled actuator", body = ScheduledActuator),
        (status = 404, description = "Unknown actuator", body = ErrorResponseDto),
    )
)]
pub(super) fn get_sa(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<ScheduledActuator>(SA_PREFIX, controller.clone())
}

#[utoipa::path(
    put,
    path = "/sa/{id}",
    tag = "actuator",
    params(("id" = String, Path, description = "Scheduled actuator id")),
    request_body = SAUpdate,
    responses(
        (status = 200, description = "Updated scheduled actuator", body = ScheduledActuator),
        (status = 404, description = "Unknown actuator", body = ErrorResponseDto),
    )
)]
pub(super) fn update_sa(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<ScheduledActuator, SAUpdate>(SA_PREFIX, controller.clone())
}

/// The referenced sensor is not checked
#[utoipa::path(
    post,
    path = "/ra/",
    tag = "actuator",
    request_body = ReactiveActuator,
    responses(
        (status = 201, description = "Stored reactive actuator", body = ReactiveActuator),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn create_ra(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::create::<ReactiveActuator>(RA_PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/ra/",
    tag = "actuator",
    params(LimitQuery),
    responses((status = 200, description = "Reactive actuators", body = [ReactiveActuator]))
)]
pub(super) fn list_ra(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::list::<ReactiveActuator>(RA_PREFIX, controller.clone())
}

#[utoipa::path(
    get,
    path = "/ra/{id}",
    tag = "actuator",
    params(("id" = String, Path, description = "Reactive actuator id")),
    responses(
        (status = 200, description = "Reactive actuator", body = ReactiveActuator),
        (status = 404, description = "Unknown actuator", body = ErrorResponseDto),
    )
)]
pub(super) fn get_ra(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<ReactiveActuator>(RA_PREFIX, controller.clone())
}

#[utoipa::path(
    put,
    path = "/ra/{id}",
    tag = "actuator",
    params(("id" = String, Path, description = "Reactive actuator id")),
    request_body = RAUpdate,
    responses(
        (status = 200, description = "Updated reactive actuator", body = ReactiveActuator),
        (status = 404, description = "Unknown actuator", body = ErrorResponseDto),
    )
)]
pub(super) fn update_ra(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<ReactiveActuator, RAUpdate>(RA_PREFIX, controller.clone())
}
