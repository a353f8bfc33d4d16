/// Cover upload and serving routes
use crate::{
    error::{Result, ServerError},
    middleware::RequestOrigin,
    state::AppState,
};
use axum::{
    body::Body,
    extract::{Path, Request, State},
    http::{header, HeaderMap},
    response::{IntoResponse, Response},
    Json,
};
use catalog_core::{cover_url, MessageResponse, UploadResponse};
use tower::ServiceExt;
use tower_http::services::ServeFile;

/// Multipart field the cover file is sent in
pub const COVER_FIELD: &str = "cover";

/// POST /upload-cover
/// Accepts a multipart form with a single file in the `cover` field
pub async fn upload_cover(
    State(app_state): State<AppState>,
    origin: RequestOrigin,
    headers: HeaderMap,
    body: Body,
) -> Result<Json<UploadResponse>> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|h| h.to_str().ok())
        .ok_or_else(|| ServerError::BadRequest("No file uploaded.".to_string()))?;

    let boundary = multer::parse_boundary(content_type)
        .map_err(|_| ServerError::BadRequest("No file uploaded.".to_string()))?;

    let max_bytes = app_state.covers.max_bytes();
    let constraints = multer::Constraints::new()
        .size_limit(multer::SizeLimit::new().per_field(max_bytes));
    let mut multipart =
        multer::Multipart::with_constraints(body.into_data_stream(), boundary, constraints);

    let mut upload: Option<(String, Vec<u8>)> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(COVER_FIELD) || upload.is_some() {
            continue;
        }

        // A form field without a filename (or an empty file input) is not a file
        let Some(file_name) = field
            .file_name()
            .filter(|name| !name.is_empty())
            .map(str::to_string)
        else {
            continue;
        };

        let data = field.bytes().await.map_err(multipart_error)?;
        upload = Some((file_name, data.to_vec()));
    }

    let (original_name, data) =
        upload.ok_or_else(|| ServerError::BadRequest("No file uploaded.".to_string()))?;

    let filename = app_state.covers.store(&original_name, &data).await?;
    let cover_url = cover_url(origin.as_str(), Some(filename.as_str())).unwrap_or_default();

    Ok(Json(UploadResponse {
        filename,
        cover_url,
    }))
}

/// GET /covers/:filename
pub async fn serve_cover(
    Path(filename): Path<String>,
    State(app_state): State<AppState>,
    request: Request,
) -> Result<Response> {
    let path = app_state
        .covers
        .path_for(&filename)
        .map_err(|_| ServerError::NotFound("Cover not found.".to_string()))?;

    if !app_state.covers.exists(&filename).await {
        return Err(ServerError::NotFound("Cover not found.".to_string()));
    }

    match ServeFile::new(path).oneshot(request).await {
        Ok(response) => Ok(response.into_response()),
        Err(never) => match never {},
    }
}

/// DELETE /covers/:filename
/// Removes an upload that ended up not being referenced
pub async fn delete_cover(
    Path(filename): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    app_state.covers.delete(&filename).await?;
    Ok(Json(MessageResponse::new("Cover deleted.")))
}

fn multipart_error(err: multer::Error) -> ServerError {
    match err {
        multer::Error::FieldSizeExceeded { .. } | multer::Error::StreamSizeExceeded { .. } => {
            ServerError::PayloadTooLarge("File too large.".to_string())
        }
        other => ServerError::BadRequest(format!("Failed to parse multipart: {}", other)),
    }
}
