use axum::{
    extract::{Path, Query, State},
    http::{header, StatusCode},
    response::{Html, IntoResponse, Response},
    Json,
};
use tracing::error;
use uuid::Uuid;

use crate::{
    adapters::inbound::http::{
        dto::{DetailQueryDto, ErrorResponseDto, HealthResponseDto, TractorDetailDto},
        router::AppState,
        views,
    },
    domain::{
        errors::{CatalogError, StorageError},
        models::{DetailRequest, ListingCard},
        value_objects::ImageFilename,
    },
};

type ApiError = (StatusCode, Json<ErrorResponseDto>);

fn api_error(e: CatalogError) -> ApiError {
    let status = StatusCode::from(&e);
    if status.is_server_error() {
        error!(error = %e, "Catalog request failed");
    }
    (status, Json(ErrorResponseDto::from_catalog_error(&e)))
}

/// Public catalog page
pub async fn catalog_page(State(app_state): State<AppState>) -> Response {
    match app_state.catalog_service.list_available().await {
        Ok(cards) => Html(views::catalog_page(&cards).into_string()).into_response(),
        Err(e) => {
            error!(error = %e, "Error fetching tractors");
            (
                StatusCode::from(&e),
                Html(
                    views::error_page("Erro ao carregar", "Não foi possível carregar o catálogo.")
                        .into_string(),
                ),
            )
                .into_response()
        }
    }
}

/// Product detail page, with carousel position and lightbox taken from the query
pub async fn detail_page(
    State(app_state): State<AppState>,
    Path(id): Path<String>,
    Query(query): Query<DetailQueryDto>,
) -> Response {
    let not_found = || {
        (
            StatusCode::NOT_FOUND,
            Html(views::not_found_page().into_string()),
        )
            .into_response()
    };

    let Ok(id) = id.parse::<Uuid>() else {
        return not_found();
    };

    let request = DetailRequest {
        image_index: query.image.unwrap_or(0),
        lightbox: query.lightbox.unwrap_or(false),
    };

    match app_state.catalog_service.listing_detail(id, request).await {
        Ok(detail) => Html(views::detail_page(&detail).into_string()).into_response(),
        Err(CatalogError::TractorNotFound { .. }) => not_found(),
        Err(e) => {
            error!(tractor_id = %id, error = %e, "Error fetching tractor");
            (
                StatusCode::from(&e),
                Html(
                    views::error_page("Erro ao carregar", "Não foi possível carregar o trator.")
                        .into_string(),
                ),
            )
                .into_response()
        }
    }
}

/// Handle listing available tractors
pub async fn list_tractors(
    State(app_state): State<AppState>,
) -> Result<Json<Vec<ListingCard>>, ApiError> {
    let cards = app_state
        .catalog_service
        .list_available()
        .await
        .map_err(api_error)?;

    Ok(Json(cards))
}

/// Handle tractor detail retrieval
pub async fn get_tractor(
    State(app_state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<TractorDetailDto>, ApiError> {
    let detail = app_state
        .catalog_service
        .listing_detail(id, DetailRequest::default())
        .await
        .map_err(api_error)?;

    Ok(Json(TractorDetailDto::from(detail)))
}

pub async fn health() -> Json<HealthResponseDto> {
    Json(HealthResponseDto::ok())
}

fn guess_content_type(filename: &ImageFilename) -> &'static str {
    match filename.extension().map(str::to_ascii_lowercase).as_deref() {
        Some("png") => "image/png",
        Some("jpg" | "jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("gif") => "image/gif",
        Some("avif") => "image/avif",
        _ => "application/octet-stream",
    }
}

/// Serve a stored image straight from the image store
pub async fn get_image(State(app_state): State<AppState>, Path(filename): Path<String>) -> Response {
    let Ok(filename) = ImageFilename::new(filename) else {
        return StatusCode::NOT_FOUND.into_response();
    };

    match app_state.images.fetch(&filename).await {
        Ok(image) => {
            let content_type = image
                .content_type
                .unwrap_or_else(|| guess_content_type(&filename).to_string());
            (
                [
                    (header::CONTENT_TYPE, content_type),
                    (header::CACHE_CONTROL, "max-age=3600".to_string()),
                ],
                image.data,
            )
                .into_response()
        }
        Err(StorageError::ObjectNotFound { .. }) => StatusCode::NOT_FOUND.into_response(),
        Err(e) => {
            error!(filename = %filename, error = %e, "Error reading image");
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_guess_content_type() {
        let png = ImageFilename::new("a1b2.PNG".to_string()).unwrap();
        let bare = ImageFilename::new("a1b2".to_string()).unwrap();
        assert_eq!(guess_content_type(&png), "image/png");
        assert_eq!(guess_content_type(&bare), "application/octet-stream");
    }
}
