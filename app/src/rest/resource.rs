//! Route builders shared by every collection.
//!
//! Each builder serves one operation below `/<prefix>/`, the entity specific
//! modules pick the ones their collection supports.
use super::dto::LimitQuery;
use super::{build_created, build_deleted, build_response, json_body};
use crate::controller::Controller;
use garden_core::{Document, Patch};
use serde::de::DeserializeOwned;
use warp::filters::BoxedFilter;
use warp::reply::Response;
use warp::Filter;

/// POST /<prefix>/
pub fn create<D: Document>(prefix: &'static str, controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path(prefix))
        .and(warp::path::end())
        .and(warp::post())
        .and(json_body::<D>())
        .and_then(|controller: Controller, doc: D| async move {
            build_created(controller.create(doc).await)
        })
        .boxed()
}

/// GET /<prefix>/?limit=
pub fn list<D: Document>(prefix: &'static str, controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path(prefix))
        .and(warp::path::end())
        .and(warp::get())
        .and(warp::query::<LimitQuery>())
        .and_then(|controller: Controller, query: LimitQuery| async move {
            build_response(controller.list::<D>(query.limit()).await)
        })
        .boxed()
}

/// GET /<prefix>/:id
pub fn get<D: Document>(prefix: &'static str, controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path(prefix))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::get())
        .and_then(|controller: Controller, id: String| async move {
            build_response(controller.get::<D>(&id).await)
        })
        .boxed()
}

/// PUT /<prefix>/:id
///
/// Merges the supplied fields, an empty body returns the document unchanged
pub fn update<D, P>(prefix: &'static str, controller: Controller) -> BoxedFilter<(Response,)>
where
    D: Document,
    P: Patch<D> + DeserializeOwned + Send + 'static,
{
    warp::any()
        .map(move || controller.clone())
        .and(warp::path(prefix))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::put())
        .and(json_body::<P>())
        .and_then(|controller: Controller, id: String, patch: P| async move {
            build_response(controller.update::<D, P>(&id, patch).await)
        })
        .boxed()
}

/// DELETE /<prefix>/:id
pub fn delete<D: Document>(prefix: &'static str, controller: Controller) -> BoxedFilter<(Response,)> {
    warp::any()
        .map(move || controller.clone())
        .and(warp::path(prefix))
        .and(warp::path::param::<String>())
        .and(warp::path::end())
        .and(warp::delete())
        .and_then(|controller: Controller, id: String| async move {
            build_deleted(controller.delete::<D>(&id).await)
        })
        .boxed()
}
