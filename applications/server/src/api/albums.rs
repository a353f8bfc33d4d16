/// Albums API routes
use crate::{
    error::{Result, ServerError},
    middleware::RequestOrigin,
    state::AppState,
};
use axum::{
    extract::{rejection::JsonRejection, Path, Query, State},
    http::StatusCode,
    Json,
};
use catalog_core::{AlbumFilter, AlbumId, AlbumView, CreateAlbum, MessageResponse, UpdateAlbum};

/// GET /albums?band=&genre=
pub async fn list_albums(
    State(app_state): State<AppState>,
    origin: RequestOrigin,
    Query(filter): Query<AlbumFilter>,
) -> Result<Json<Vec<AlbumView>>> {
    let albums = app_state.albums.list(&filter).await;
    tracing::debug!(count = albums.len(), ?filter, "Listing albums");

    Ok(Json(
        albums
            .into_iter()
            .map(|album| album.with_cover_url(origin.as_str()))
            .collect(),
    ))
}

/// GET /albums/:id
pub async fn get_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    origin: RequestOrigin,
) -> Result<Json<AlbumView>> {
    let album = app_state.albums.get(parse_id(&id)?).await?;
    Ok(Json(album.with_cover_url(origin.as_str())))
}

/// POST /albums
pub async fn create_album(
    State(app_state): State<AppState>,
    origin: RequestOrigin,
    payload: std::result::Result<Json<CreateAlbum>, JsonRejection>,
) -> Result<(StatusCode, Json<AlbumView>)> {
    let Json(request) = payload.map_err(bad_json)?;
    let album = app_state.albums.create(request).await?;
    Ok((
        StatusCode::CREATED,
        Json(album.with_cover_url(origin.as_str())),
    ))
}

/// PUT /albums/:id
/// Only the supplied fields are overwritten
pub async fn update_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
    origin: RequestOrigin,
    payload: std::result::Result<Json<UpdateAlbum>, JsonRejection>,
) -> Result<Json<AlbumView>> {
    let id = parse_id(&id)?;
    let Json(update) = payload.map_err(bad_json)?;
    let album = app_state.albums.update(id, update).await?;
    Ok(Json(album.with_cover_url(origin.as_str())))
}

/// DELETE /albums/:id
pub async fn delete_album(
    Path(id): Path<String>,
    State(app_state): State<AppState>,
) -> Result<Json<MessageResponse>> {
    app_state.albums.delete(parse_id(&id)?).await?;
    Ok(Json(MessageResponse::new("Album deleted.")))
}

/// Ids that do not parse can never match an album
fn parse_id(raw: &str) -> Result<AlbumId> {
    raw.trim()
        .parse()
        .map_err(|_| ServerError::NotFound("Album not found.".to_string()))
}

fn bad_json(rejection: JsonRejection) -> ServerError {
    ServerError::BadRequest(format!("Invalid JSON body: {}", rejection.body_text()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_id() {
        assert_eq!(parse_id("3").unwrap(), 3);
        assert!(matches!(parse_id("abc"), Err(ServerError::NotFound(_))));
        assert!(matches!(parse_id("-1"), Err(ServerError::NotFound(_))));
    }
}
