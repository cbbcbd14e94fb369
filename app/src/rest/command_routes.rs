use super::dto::CommandQuery;
use super::{build_created, build_response, json_body, resource};
use crate::controller::Controller;
use garden_core::{Command, CommandUpdate};
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

const PREFIX: &str = "cmd";

pub fn routes(
    controller: &Controller,
) -> impl Filter<Extract = impl warp::Reply, Error = warp::Rejection> + Clone {
    create_commands(controller.clone())
        .or(list_commands(controller.clone()))
        .or(command(controller))
        .or(update_command(controller))
}

/// POST /cmd/
///
/// Queues a batch of commands, the body is a list.
/// Returns every stored command.
#[utoipa::path(
    post,
    path = "/cmd/",
    tag = "command",
    request_body = [Command],
    responses(
        (status = 201, description = "Stored commands", body = [Command]),
        (status = 422, description = "Missing or malformed field", body = ErrorResponseDto),
    )
)]
pub(super) fn create_commands(controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("cmd"))
        .and(warp::post())
        .and(json_body::<Vec<Command>>())
        .and_then(|controller: Controller, commands: Vec<Command>| async move {
            build_created(controller.create_commands(commands).await)
        })
        .boxed()
}

/// GET /cmd/?executed=&limit=
///
/// Devices poll this for their pending commands
#[utoipa::path(
    get,
    path = "/cmd/",
    tag = "command",
    params(CommandQuery),
    responses((status = 200, description = "Matching commands", body = [Command]))
)]
pub(super) fn list_commands(controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path!("cmd"))
        .and(warp::get())
        .and(warp::query::<CommandQuery>())
        .and_then(|controller: Controller, query: CommandQuery| async move {
            let resp = controller
                .list_commands(query.executed.as_deref(), query.limit())
                .await;
            build_response(resp)
        })
        .boxed()
}

#[utoipa::path(
    get,
    path = "/cmd/{id}",
    tag = "command",
    params(("id" = String, Path, description = "Command id")),
    responses(
        (status = 200, description = "Command", body = Command),
        (status = 404, description = "Unknown command", body = ErrorResponseDto),
    )
)]
pub(super) fn command(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::get::<Command>(PREFIX, controller.clone())
}

/// Marks a command as executed, or resets it
#[utoipa::path(
    put,
    path = "/cmd/{id}",
    tag = "command",
    params(("id" = String, Path, description = "Command id")),
    request_body = CommandUpdate,
    responses(
        (status = 200, description = "Updated command", body = Command),
        (status = 404, description = "Unknown command", body = ErrorResponseDto),
        (status = 422, description = "Missing `executed`", body = ErrorResponseDto),
    )
)]
pub(super) fn update_command(controller: &Controller) -> BoxedFilter<(Response,)> {
    resource::update::<Command, CommandUpdate>(PREFIX, controller.clone())
}

///
/// TEST
///
#[cfg(test)]
mod test {
    use super::super::test::{body_of, build_routes};
    use serde_json::json;

    #[tokio::test]
    async fn test_rest_commands() {
        // Prepare
        let (_, routes) = build_routes();
        let dto = json!([
            {"ref_id": "btnrj", "cmd": 1, "type": "reactive actuator", "garden_id": "g1"},
            {"ref_id": "sprnk", "cmd": 0, "type": "scheduled actuator", "garden_id": "g1"},
        ]);

        // Execute
        let created = warp::test::request()
            .method("POST")
            .path("/cmd/")
            .json(&dto)
            .reply(&routes)
            .await;
        let created = body_of(&created);
        let first = created[0]["_id"].as_str().unwrap().to_owned();
        let done = warp::test::request()
            .method("PUT")
            .path(&format!("/cmd/{}", first))
            .json(&json!({"executed": "true"}))
            .reply(&routes)
            .await;
        let pending = warp::test::request().path("/cmd/").reply(&routes).await;
        let executed = warp::test::request()
            .path("/cmd/?executed=true")
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(2, created.as_array().unwrap().len());
        assert_eq!("false", created[0]["executed"]);
        assert_eq!("reactive actuator", created[0]["type"]);
        assert_eq!(200, done.status());
        assert_eq!("true", body_of(&done)["executed"]);
        let pending = body_of(&pending);
        assert_eq!(1, pending.as_array().unwrap().len());
        assert_eq!(created[1]["_id"], pending[0]["_id"]);
        let executed = body_of(&executed);
        assert_eq!(1, executed.as_array().unwrap().len());
        assert_eq!(first, executed[0]["_id"]);
    }

    #[tokio::test]
    async fn test_rest_command_validation() {
        // Prepare
        let (_, routes) = build_routes();

        // Execute
        let single = warp::test::request()
            .method("POST")
            .path("/cmd/")
            .json(&json!({"ref_id": "btnrj", "cmd": 1, "type": "t", "garden_id": "g1"}))
            .reply(&routes)
            .await;
        let missing_flag = warp::test::request()
            .method("PUT")
            .path("/cmd/unknown")
            .json(&json!({}))
            .reply(&routes)
            .await;
        let unknown = warp::test::request()
            .method("PUT")
            .path("/cmd/unknown")
            .json(&json!({"executed": "true"}))
            .reply(&routes)
            .await;

        // Validate
        assert_eq!(422, single.status());
        assert_eq!(422, missing_flag.status());
        assert_eq!(404, unknown.status());
    }
}
