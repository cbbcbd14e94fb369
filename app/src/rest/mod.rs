use crate::config::Config;
use crate::controller::Controller;
use crate::error::ServiceError;
use serde::{de::DeserializeOwned, Serialize};
use std::convert::Infallible;
use tracing::{debug, error, info, warn};
use warp::http::StatusCode;
use warp::hyper::body::Bytes;
use warp::reply::Response;
use warp::{Filter, Rejection, Reply};

mod actuator_routes;
mod command_routes;
mod config_routes;
mod doc_routes;
mod garden_routes;
mod logging_routes;
mod metric_routes;
mod resource;
mod sensor_routes;

pub use dto::ErrorResponseDto;

pub const DEFAULT_LIMIT: usize = 1000;
const MAX_BODY_BYTES: u64 = 1024 * 1024;

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = Infallible> + Clone {
    let cors = warp::cors()
        .allow_any_origin()
        .allow_methods(vec!["GET", "POST", "PUT", "DELETE"])
        .allow_headers(vec!["content-type"]);

    garden_routes::routes(controller)
        .or(sensor_routes::routes(controller))
        .or(actuator_routes::routes(controller))
        .or(command_routes::routes(controller))
        .or(config_routes::routes(controller))
        .or(logging_routes::routes(controller))
        .or(metric_routes::routes(controller))
        .or(doc_routes::routes())
        .with(cors)
        .recover(handle_rejection)
        .with(warp::trace::request())
}

pub async fn dispatch_server(config: &Config, controller: Controller) -> Result<(), warp::Error> {
    let shutdown = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            error!(%err, "Failed to listen for shutdown signal");
        }
        info!("Shutting down webserver");
    };
    let (addr, server) =
        warp::serve(routes(&controller)).try_bind_with_graceful_shutdown(config.server_addr(), shutdown)?;

    info!(%addr, backend = controller.store().backend(), "Starting webserver");
    server.await;
    Ok(())
}

pub fn build_response<T: Serialize>(resp: Result<T, ServiceError>) -> Result<Response, Rejection> {
    build_with_status(resp, StatusCode::OK)
}

pub fn build_created<T: Serialize>(resp: Result<T, ServiceError>) -> Result<Response, Rejection> {
    build_with_status(resp, StatusCode::CREATED)
}

pub fn build_deleted(resp: Result<(), ServiceError>) -> Result<Response, Rejection> {
    match resp {
        Ok(()) => Ok(StatusCode::NO_CONTENT.into_response()),
        Err(err) => Ok(error_response(err)),
    }
}

fn build_with_status<T: Serialize>(
    resp: Result<T, ServiceError>,
    status: StatusCode,
) -> Result<Response, Rejection> {
    match resp {
        Ok(data) => Ok(warp::reply::with_status(warp::reply::json(&data), status).into_response()),
        Err(err) => Ok(error_response(err)),
    }
}

fn error_response(err: ServiceError) -> Response {
    if err.is_internal() {
        error!(%err, "Request failed");
        return error_reply(err.status(), "Internal server error");
    }
    warn!(%err, status = err.status().as_u16(), "Rejected request");
    error_reply(err.status(), &err.to_string())
}

fn error_reply(status: StatusCode, message: &str) -> Response {
    let body = ErrorResponseDto {
        error: message.to_owned(),
    };
    warp::reply::with_status(warp::reply::json(&body), status).into_response()
}

/// Request body that could not be read as the expected JSON document
#[derive(Debug)]
struct InvalidBody(String);

impl warp::reject::Reject for InvalidBody {}

/// JSON body filter that rejects with 422 instead of warp's 400
fn json_body<T: DeserializeOwned + Send + 'static>(
) -> impl Filter<Extract = (T,), Error = Rejection> + Clone {
    warp::body::content_length_limit(MAX_BODY_BYTES)
        .and(warp::body::bytes())
        .and_then(|bytes: Bytes| async move {
            serde_json::from_slice::<T>(&bytes)
                .map_err(|err| warp::reject::custom(InvalidBody(err.to_string())))
        })
}

async fn handle_rejection(err: Rejection) -> Result<Response, Infallible> {
    let (status, message) = if err.is_not_found() {
        (StatusCode::NOT_FOUND, "Not Found".to_owned())
    } else if let Some(InvalidBody(msg)) = err.find::<InvalidBody>() {
        (StatusCode::UNPROCESSABLE_ENTITY, msg.clone())
    } else if let Some(invalid) = err.find::<warp::reject::InvalidQuery>() {
        (StatusCode::UNPROCESSABLE_ENTITY, invalid.to_string())
    } else if err.find::<warp::reject::PayloadTooLarge>().is_some() {
        (StatusCode::PAYLOAD_TOO_LARGE, "Payload too large".to_owned())
    } else if err.find::<warp::reject::LengthRequired>().is_some() {
        (StatusCode::LENGTH_REQUIRED, "Content-Length required".to_owned())
    } else if let Some(forbidden) = err.find::<warp::cors::CorsForbidden>() {
        (StatusCode::FORBIDDEN, forbidden.to_string())
    } else if err.find::<warp::reject::MethodNotAllowed>().is_some() {
        (StatusCode::METHOD_NOT_ALLOWED, "Method Not Allowed".to_owned())
    } else {
        error!(?err, "Unhandled rejection");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            "Internal server error".to_owned(),
        )
    };

    debug!(status = status.as_u16(), %message, "Rejected request");
    Ok(error_reply(status, &message))
}

///
/// DTO
///
pub mod dto {
    use super::DEFAULT_LIMIT;
    use serde::{Deserialize, Serialize};
    use utoipa::{IntoParams, ToSchema};

    #[derive(Debug, Serialize, Deserialize, ToSchema)]
    pub struct ErrorResponseDto {
        pub error: String,
    }

    #[derive(Debug, Default, Deserialize, IntoParams)]
    #[into_params(parameter_in = Query)]
    pub struct LimitQuery {
        /// Maximum number of returned documents, defaults to 1000
        pub limit: Option<usize>,
    }

    impl LimitQuery {
        pub fn limit(&self) -> usize {
            self.limit.unwrap_or(DEFAULT_LIMIT)
        }
    }

    #[derive(Debug, Default, Deserialize, IntoParams)]
    #[into_params(parameter_in = Query)]
    pub struct CommandQuery {
        pub limit: Option<usize>,
        /// Value of the `executed` flag to match, defaults to `"false"`
        pub executed: Option<String>,
    }

    impl CommandQuery {
        pub fn limit(&self) -> usize {
            self.limit.unwrap_or(DEFAULT_LIMIT)
        }
    }

    /// Creation time range, e.g. `2023-02-17T20:19:00.536083+00:00`.
    /// `start` defaults to one day ago and `end` to now.
    #[derive(Debug, Default, Deserialize, IntoParams)]
    #[into_params(parameter_in = Query)]
    pub struct WindowQuery {
        pub start: Option<String>,
        pub end: Option<String>,
        pub limit: Option<usize>,
    }

    impl WindowQuery {
        pub fn limit(&self) -> usize {
            self.limit.unwrap_or(DEFAULT_LIMIT)
        }
    }
}
