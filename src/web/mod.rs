pub mod controller;
pub mod render;
pub mod view_model;

use crate::error::AppError;
use axum::{
    extract::State,
    http::Method,
    response::{IntoResponse, Redirect, Response},
    routing::get,
    Form, Json, Router,
};
use controller::{Action, RoomController};
use render::Views;
use serde::Serialize;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use view_model::CreateRoomViewModel;

#[derive(Clone)]
pub struct WebState {
    controller: Arc<RoomController>,
    views: Arc<Views>,
}

#[derive(Debug, Serialize)]
struct OkResponse {
    ok: bool,
}

pub fn router(controller: Arc<RoomController>, views: Arc<Views>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(Any);

    Router::new()
        .route("/", get(index))
        .route("/api/health", get(health))
        .route(Action::List.path(), get(list_rooms))
        .route(Action::Create.path(), get(create_room_form).post(create_room))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(WebState { controller, views })
}

async fn health() -> impl IntoResponse {
    Json(OkResponse { ok: true })
}

async fn index() -> Redirect {
    Redirect::to(Action::List.path())
}

async fn list_rooms(State(state): State<WebState>) -> Result<Response, AppError> {
    let result = state.controller.list().await?;
    state.views.respond(result)
}

async fn create_room_form(State(state): State<WebState>) -> Result<Response, AppError> {
    state.views.respond(state.controller.create_form())
}

async fn create_room(
    State(state): State<WebState>,
    Form(view_model): Form<CreateRoomViewModel>,
) -> Result<Response, AppError> {
    let result = state.controller.create(view_model).await?;
    state.views.respond(result)
}
