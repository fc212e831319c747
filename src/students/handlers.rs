use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use tracing::instrument;

use crate::error::ApiError;
use crate::state::AppState;
use crate::students::dto::Student;

pub fn read_routes() -> Router<AppState> {
    Router::new()
        .route("/students", get(list_students))
        .route("/students/:id", get(get_student))
}

pub fn write_routes() -> Router<AppState> {
    Router::new()
        .route("/students", post(create_student))
        .route("/students/:id", put(update_student).delete(delete_student))
}

#[instrument(skip(state))]
pub async fn list_students(
    State(state): State<AppState>,
) -> Result<Json<Vec<Student>>, ApiError> {
    let students = state.students.get_students().await?;
    Ok(Json(students))
}

#[instrument(skip(state))]
pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Json<Student>, ApiError> {
    let student = state.students.get_student(id).await?;
    Ok(Json(student))
}

#[instrument(skip(state, body))]
pub async fn create_student(
    State(state): State<AppState>,
    Json(body): Json<Student>,
) -> Result<Json<Student>, ApiError> {
    let created = state.students.create_student(body).await?;
    Ok(Json(created))
}

#[instrument(skip(state, body))]
pub async fn update_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Json(body): Json<Student>,
) -> Result<Json<Student>, ApiError> {
    let updated = state.students.update_student(id, body).await?;
    Ok(Json(updated))
}

#[instrument(skip(state))]
pub async fn delete_student(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<StatusCode, ApiError> {
    state.students.delete_student(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
