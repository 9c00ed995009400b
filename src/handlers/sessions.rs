use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::Json,
};
use serde_json::{json, Value};
use std::sync::Arc;
use uuid::Uuid;

use crate::app::AppState;
use crate::services::checkout_session::{BuyerForm, CheckoutSession, Snapshot};

type SessionResult = Result<Json<Snapshot>, (StatusCode, Json<Value>)>;

fn not_found() -> (StatusCode, Json<Value>) {
    (
        StatusCode::NOT_FOUND,
        Json(json!({ "error": "Sessao de checkout nao encontrada" })),
    )
}

fn lookup(state: &AppState, id: Uuid) -> Result<Arc<CheckoutSession>, (StatusCode, Json<Value>)> {
    state.sessions.get(id).ok_or_else(not_found)
}

pub async fn open_session(State(state): State<AppState>) -> Json<Snapshot> {
    let session = state.sessions.open();
    Json(session.snapshot())
}

pub async fn get_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    Ok(Json(lookup(&state, id)?.snapshot()))
}

pub async fn submit_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
    Json(form): Json<BuyerForm>,
) -> SessionResult {
    Ok(Json(lookup(&state, id)?.submit(form).await))
}

pub async fn copy_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    Ok(Json(lookup(&state, id)?.mark_copied()))
}

pub async fn back_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    Ok(Json(lookup(&state, id)?.back()))
}

pub async fn retry_session(State(state): State<AppState>, Path(id): Path<Uuid>) -> SessionResult {
    Ok(Json(lookup(&state, id)?.retry()))
}

pub async fn close_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, (StatusCode, Json<Value>)> {
    if state.sessions.close(id) {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(not_found())
    }
}
