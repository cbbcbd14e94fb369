//! Time series endpoints for sensor readings and actuator actions.
//!
//! Window queries take `start` and `end` as `%Y-%m-%dT%H:%M:%S.%f%z`, where the
//! fraction is mandatory. Send a `+` offset as `%2B`; an unencoded `+` decodes
//! to a space, which is read back as `+`.
use super::dto::WindowQuery;
use super::{build_created, build_response, json_body};
use crate::controller::Controller;
use crate::error::ServiceError;
use garden_core::{LogEntry, ReactiveAction, Reading, ScheduledAction, TimeWindow};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    log_reading(controller)
        .or(readings(controller))
        .or(log_scheduled_action(controller))
        .or(scheduled_actions(controller))
        .or(log_reactive_action(controller))
        .or(reactive_actions(controller))
}

#[utoipa::path(
    post,
    path = "/sensors/logging/",
    tag = "logging",
    request_body = Reading,
    responses(
        (status = 201, description = "Stored reading", body = Reading),
        (status = 404, description = "Unknown sensor", body = ErrorResponseDto),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn log_reading(controller: &Controller) -> BoxedFilter<(Response,)> {
    log_entry::<Reading>(warp::path!("sensors" / "logging").boxed(), controller.clone())
}

/// Readings created within the window, newest update first
#[utoipa::path(
    get,
    path = "/sensors/logging/{sensor_id}",
    tag = "logging",
    params(
        ("sensor_id" = String, Path, description = "Restrict to one sensor, may be omitted"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Readings", body = [Reading]),
        (status = 400, description = "Invalid time format", body = ErrorResponseDto),
        (status = 404, description = "No readings within the window", body = ErrorResponseDto),
    )
)]
pub(super) fn readings(controller: &Controller) -> BoxedFilter<(Response,)> {
    window::<Reading>(warp::path!("sensors" / "logging" / ..).boxed(), controller.clone())
}

#[utoipa::path(
    post,
    path = "/sa/logging/actions/",
    tag = "logging",
    request_body = ScheduledAction,
    responses(
        (status = 201, description = "Stored action", body = ScheduledAction),
        (status = 404, description = "Unknown scheduled actuator", body = ErrorResponseDto),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn log_scheduled_action(controller: &Controller) -> BoxedFilter<(Response,)> {
    log_entry::<ScheduledAction>(
        warp::path!("sa" / "logging" / "actions").boxed(),
        controller.clone(),
    )
}

#[utoipa::path(
    get,
    path = "/sa/logging/actions/{actuator_id}",
    tag = "logging",
    params(
        ("actuator_id" = String, Path, description = "Restrict to one actuator, may be omitted"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Scheduled actions", body = [ScheduledAction]),
        (status = 400, description = "Invalid time format", body = ErrorResponseDto),
        (status = 404, description = "No actions within the window", body = ErrorResponseDto),
    )
)]
pub(super) fn scheduled_actions(controller: &Controller) -> BoxedFilter<(Response,)> {
    window::<ScheduledAction>(
        warp::path!("sa" / "logging" / "actions" / ..).boxed(),
        controller.clone(),
    )
}

#[utoipa::path(
    post,
    path = "/ra/logging/actions/",
    tag = "logging",
    request_body = ReactiveAction,
    responses(
        (status = 201, description = "Stored action", body = ReactiveAction),
        (status = 404, description = "Unknown reactive actuator", body = ErrorResponseDto),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn log_reactive_action(controller: &Controller) -> BoxedFilter<(Response,)> {
    log_entry::<ReactiveAction>(
        warp::path!("ra" / "logging" / "actions").boxed(),
        controller.clone(),
    )
}

#[utoipa::path(
    get,
    path = "/ra/logging/actions/{actuator_id}",
    tag = "logging",
    params(
        ("actuator_id" = String, Path, description = "Restrict to one actuator, may be omitted"),
        WindowQuery,
    ),
    responses(
        (status = 200, description = "Reactive actions", body = [ReactiveAction]),
        (status = 400, description = "Invalid time format", body = ErrorResponseDto),
        (status = 404, description = "No actions within the window", body = ErrorResponseDto),
    )
)]
pub(super) fn reactive_actions(controller: &Controller) -> BoxedFilter<(Response,)> {
    window::<ReactiveAction>(
        warp::path!("ra" / "logging" / "actions" / ..).boxed(),
        controller.clone(),
    )
}

/// POST on the exact `path`
fn log_entry<D: LogEntry>(path: BoxedFilter<()>, controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(path)
        .and(warp::post())
        .and(json_body::<D>())
        .and_then(|controller: Controller, entry: D| async move {
            build_created(controller.create(entry).await)
        })
        .boxed()
}

/// GET on `path` with an optional trailing parent id
fn window<D: LogEntry>(prefix: BoxedFilter<()>, controller: Controller) -> BoxedFilter<(Response,)> {
    let parent = warp::path::param::<String>()
        .map(Some)
        .or(warp::any().map(|| None::<String>))
        .unify();

    warp::any()
        .map(move || controller.clone())
        .and(prefix)
        .and(parent)
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<WindowQuery>())
        .and_then(
            |controller: Controller, parent_id: Option<String>, query: WindowQuery| async move {
                let resp = match TimeWindow::parse(query.start.as_deref(), query.end.as_deref()) {
                    Ok(window) => {
                        controller
                            .window::<D>(parent_id.as_deref(), window, query.limit())
                            .await
                    }
                    Err(err) => Err(ServiceError::from(err)),
                };
                build_response(resp)
            },
        )
        .boxed()
}
