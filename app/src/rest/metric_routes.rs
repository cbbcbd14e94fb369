use super::build_response;
use crate::controller::Controller;
use tracing::warn;
use warp::Filter;

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    health(controller.clone())
}

/// GET /health
///
/// Reports the selected store backend and whether it answers
#[utoipa::path(
    get,
    path = "/health",
    tag = "health",
    responses((status = 200, description = "Service status", body = HealthyDto))
)]
pub(super) fn health(
    controller: Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("health"))
        .and(warp::get())
        .and_then(|controller: Controller| async move {
            let store = controller.store();
            let database_state = match store.ping().await {
                Ok(()) => "connected".to_owned(),
                Err(err) => {
                    warn!(%err, "Health check failed to reach the store");
                    format!("unreachable: {}", err)
                }
            };
            let ret = dto::HealthyDto {
                healthy: true,
                backend: store.backend().to_owned(),
                database_state,
                version: garden_core::CORE_VERSION.to_owned(),
            };
            build_response(Ok(ret))
        })
        .boxed()
}

pub use dto::HealthyDto;

mod dto {
    use serde::Serialize;
    use utoipa::ToSchema;

    #[derive(Debug, Serialize, ToSchema)]
    pub struct HealthyDto {
        pub healthy: bool,
        pub backend: String,
        pub database_state: String,
        pub version: String,
    }
}
