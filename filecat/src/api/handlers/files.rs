use crate::AppState;
use crate::api::extractors::JsonBody;
use crate::api::models::files::{FilePageResponse, FileUploadRequest, SearchFilesQuery, StatusResponse, UploadResponse};
use crate::errors::Result;
use axum::{
    Json,
    extract::{Path, Query, State},
};

#[utoipa::path(
    post,
    path = "/file",
    tag = "files",
    summary = "Upload file metadata",
    description = "Validates the record, appends the category tag implied by the name's extension, and stores it.",
    request_body = FileUploadRequest,
    responses(
        (status = 200, description = "File stored", body = UploadResponse),
        (status = 400, description = "Invalid record (blank name, missing or negative size) or malformed body", body = StatusResponse),
        (status = 500, description = "Internal server error", body = StatusResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_file(State(state): State<AppState>, JsonBody(request): JsonBody<FileUploadRequest>) -> Result<Json<UploadResponse>> {
    let file = state.files.upload(request.into()).await?;
    Ok(Json(UploadResponse { id: file.id }))
}

#[utoipa::path(
    delete,
    path = "/file/{id}",
    tag = "files",
    summary = "Delete a file record",
    params(("id" = String, Path, description = "File ID")),
    responses(
        (status = 200, description = "File deleted", body = StatusResponse),
        (status = 404, description = "File not found", body = StatusResponse),
        (status = 500, description = "Internal server error", body = StatusResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn delete_file(State(state): State<AppState>, Path(id): Path<String>) -> Result<Json<StatusResponse>> {
    state.files.delete(&id).await?;
    Ok(Json(StatusResponse::ok()))
}

#[utoipa::path(
    post,
    path = "/file/{id}/tags",
    tag = "files",
    summary = "Set tags",
    description = "Replaces the record's tags with exactly the supplied list.",
    params(("id" = String, Path, description = "File ID")),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Tags replaced", body = StatusResponse),
        (status = 400, description = "Body is not a JSON array of strings", body = StatusResponse),
        (status = 404, description = "File not found", body = StatusResponse),
        (status = 500, description = "Internal server error", body = StatusResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn add_tags(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(tags): JsonBody<Vec<String>>,
) -> Result<Json<StatusResponse>> {
    state.files.add_tags(&id, &tags).await?;
    Ok(Json(StatusResponse::ok()))
}

#[utoipa::path(
    delete,
    path = "/file/{id}/tags",
    tag = "files",
    summary = "Remove tags",
    description = "Removes every supplied tag. If any of them is not on the record, nothing is removed.",
    params(("id" = String, Path, description = "File ID")),
    request_body = Vec<String>,
    responses(
        (status = 200, description = "Tags removed", body = StatusResponse),
        (status = 400, description = "Tag not found on file, or body is not a JSON array of strings", body = StatusResponse),
        (status = 404, description = "File not found", body = StatusResponse),
        (status = 500, description = "Internal server error", body = StatusResponse)
    )
)]
#[tracing::instrument(skip_all, fields(id = %id))]
pub async fn remove_tags(
    State(state): State<AppState>,
    Path(id): Path<String>,
    JsonBody(tags): JsonBody<Vec<String>>,
) -> Result<Json<StatusResponse>> {
    state.files.remove_tags(&id, &tags).await?;
    Ok(Json(StatusResponse::ok()))
}

#[utoipa::path(
    get,
    path = "/file",
    tag = "files",
    summary = "Search files",
    description = "Returns records carrying all of the given tags whose name contains `q`, in insertion order.",
    params(SearchFilesQuery),
    responses(
        (status = 200, description = "One page of matching records", body = FilePageResponse),
        (status = 500, description = "Internal server error", body = StatusResponse)
    )
)]
#[tracing::instrument(skip_all)]
pub async fn search_files(State(state): State<AppState>, Query(query): Query<SearchFilesQuery>) -> Result<Json<FilePageResponse>> {
    let tags = query.tag_list();
    let page = query.pagination.to_request(&state.config.search);

    let result = state.files.search(Some(&tags), query.q.as_deref(), page).await?;
    Ok(Json(result.into()))
}
