use super::dto::LimitQuery;
use super::{build_created, build_response, json_body, resource};
use crate::controller::Controller;
use garden_core::{Garden, GardenUpdate, Pod, PodUpdate};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

const PREFIX: &str = "garden";

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    // pod routes go first, `/garden/pod/` must not be read as a garden id
    add_pod(controller.clone())
        .or(update_pod(controller.clone()))
        .or(garden_pods(controller.clone()))
        .or(create_garden(controller))
        .or(list_gardens(controller))
        .or(get_garden(controller))
        .or(update_garden(controller))
}

/// Create a garden
#[utoipa::path(
    post,
    path = "/garden/",
    tag = "garden",
    request_body = Garden,
    responses(
        (status = 201, description = "Stored garden", body = Garden),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn create_garden(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::create::<Garden>(PREFIX, controller.clone())
}

/// List gardens, most recently updated first
#[utoipa::path(
    get,
    path = "/garden/",
    tag = "garden",
    params(LimitQuery),
    responses((status = 200, description = "Gardens", body = [Garden]))
)]
pub(super) fn list_gardens(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::list::<Garden>(PREFIX, controller.clone())
}

/// Fetch a garden
#[utoipa::path(
    get,
    path = "/garden/{id}",
    tag = "garden",
    params(("id" = String, Path, description = "Garden id")),
    responses(
        (status = 200, description = "Garden", body = Garden),
        (status = 404, description = "Unknown garden", body = ErrorResponseDto),
    )
)]
pub(super) fn get_garden(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<Garden>(PREFIX, controller.clone())
}

/// Update the supplied fields of a garden
#[utoipa::path(
    put,
    path = "/garden/{id}",
    tag = "garden",
    params(("id" = String, Path, description = "Garden id")),
    request_body = GardenUpdate,
    responses(
        (status = 200, description = "Updated garden", body = Garden),
        (status = 404, description = "Unknown garden", body = ErrorResponseDto),
    )
)]
pub(super) fn update_garden(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<Garden, GardenUpdate>(PREFIX, controller.clone())
}

/// GET /garden/:id/pods
///
/// Returns the pods embedded in a garden
#[utoipa::path(
    get,
    path = "/garden/{id}/pods",
    tag = "garden",
    params(("id" = String, Path, description = "Garden id")),
    responses(
        (status = 200, description = "Pods of the garden", body = [Pod]),
        (status = 404, description = "Unknown garden", body = ErrorResponseDto),
    )
)]
pub(super) fn garden_pods(controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("garden" / String / "pods"))
        .and(warp::get())
        .and_then(|controller: Controller, garden_id: String| async move {
            build_response(controller.pods(&garden_id).await)
        })
        .boxed()
}

/// POST /garden/pod/
///
/// Adds a pod to the garden named by its `garden_id`.
/// Returns the updated garden.
#[utoipa::path(
    post,
    path = "/garden/pod/",
    tag = "garden",
    request_body = Pod,
    responses(
        (status = 201, description = "Garden holding the new pod", body = Garden),
        (status = 404, description = "Unknown garden", body = ErrorResponseDto),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn add_pod(controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("garden" / "pod"))
        .and(warp::post())
        .and(json_body::<Pod>())
        .and_then(|controller: Controller, pod: Pod| async move {
            build_created(controller.add_pod(pod).await)
        })
        .boxed()
}

/// PUT /garden/pod/:pod_id
///
/// Returns the garden that holds the updated pod
#[utoipa::path(
    put,
    path = "/garden/pod/{pod_id}",
    tag = "garden",
    params(("pod_id" = String, Path, description = "Pod id")),
    request_body = PodUpdate,
    responses(
        (status = 200, description = "Garden holding the pod", body = Garden),
        (status = 404, description = "Unknown pod", body = ErrorResponseDto),
    )
)]
pub(super) fn update_pod(controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("garden" / "pod" / String))
        .and(warp::put())
        .and(json_body::<PodUpdate>())
        .and_then(
            |controller: Controller, pod_id: String, patch: PodUpdate| async move {
                build_response(controller.update_pod(&pod_id, patch).await)
            },
        )
        .boxed()
}
