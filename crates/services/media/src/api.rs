use axum::{
    extract::{DefaultBodyLimit, Path},
    http::{header, Method},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use axum_typed_multipart::{FieldData, TryFromMultipart, TypedMultipart};
use civitas_config::config;
use civitas_result::{create_error, Result};
use log::info;
use serde::Serialize;
use tower_http::cors::{AllowHeaders, Any, CorsLayer};
use utoipa::ToSchema;

use crate::mime_type::determine_mime_type;

/// Build the API router
pub async fn router() -> Router {
    let config = config().await;

    let cors = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST])
        .allow_headers(AllowHeaders::mirror_request())
        .allow_origin(Any);

    Router::new()
        .route("/", get(root))
        .route(
            "/photos",
            post(upload_photo).layer(DefaultBodyLimit::max(config.files.limit.photo_size)),
        )
        .route("/photos/:photo_id", get(fetch_photo))
        .layer(cors)
}

/// Successful root response
#[derive(Serialize, Debug, ToSchema)]
pub struct RootResponse {
    media: &'static str,
    version: &'static str,
}

/// Capture crate version from Cargo
static CRATE_VERSION: &str = env!("CARGO_PKG_VERSION");

/// Root response from service
#[utoipa::path(
    get,
    path = "/",
    responses(
        (status = 200, description = "Echo response", body = RootResponse)
    )
)]
pub async fn root() -> Json<RootResponse> {
    Json(RootResponse {
        media: "Hello, I am a photo server!",
        version: CRATE_VERSION,
    })
}

/// Request body for upload
#[derive(ToSchema, TryFromMultipart)]
pub struct UploadPayload {
    #[schema(value_type = String, format = Binary)]
    #[form_data(limit = "unlimited")] // handled by axum
    file: FieldData<axum::body::Bytes>,
}

/// Successful upload response
#[derive(Serialize, Debug, ToSchema)]
pub struct UploadResponse {
    /// Id to attach the uploaded photo to a report
    id: String,
}

/// Upload a photo
///
/// Only still images (JPEG, PNG, WebP, GIF) are accepted.
#[utoipa::path(
    post,
    path = "/photos",
    responses(
        (status = 200, description = "Upload was successful", body = UploadResponse)
    ),
    request_body(content_type = "multipart/form-data", content = UploadPayload)
)]
pub async fn upload_photo(
    TypedMultipart(UploadPayload { file }): TypedMultipart<UploadPayload>,
) -> Result<Json<UploadResponse>> {
    let config = config().await;

    let buf = file.contents;

    // Ensure the photo is not empty
    if buf.len() < config.files.limit.min_file_size {
        return Err(create_error!(FileTooSmall));
    }

    if buf.len() > config.files.limit.photo_size {
        return Err(create_error!(FileTooLarge {
            max: config.files.limit.photo_size
        }));
    }

    // Use magic signatures to determine the mime type, we never trust
    // the client-provided filename or content type
    let mime_type = determine_mime_type(&buf);
    if !matches!(
        mime_type,
        "image/jpeg" | "image/png" | "image/webp" | "image/gif"
    ) {
        return Err(create_error!(FileTypeNotAllowed));
    }

    // Generate an id for this photo
    let id = nanoid::nanoid!(42);

    let path = std::path::Path::new(&config.files.storage_path).join(&id);
    tokio::fs::write(&path, &buf)
        .await
        .map_err(|_| create_error!(InternalError))?;

    info!("Stored photo {} ({} bytes, {}).", id, buf.len(), mime_type);

    Ok(Json(UploadResponse { id }))
}

/// Fetch a photo by its id
#[utoipa::path(
    get,
    path = "/photos/{photo_id}",
    responses(
        (status = 200, description = "Photo contents")
    ),
    params(
        ("photo_id" = String, Path, description = "Id returned by a previous upload")
    )
)]
pub async fn fetch_photo(Path(photo_id): Path<String>) -> Result<impl IntoResponse> {
    let config = config().await;

    // Ids are generated by us and never contain path separators
    if photo_id.contains(['/', '\\', '.']) {
        return Err(create_error!(NotFound));
    }

    let path = std::path::Path::new(&config.files.storage_path).join(&photo_id);
    let buf = tokio::fs::read(&path)
        .await
        .map_err(|_| create_error!(NotFound))?;

    let mime_type = determine_mime_type(&buf);
    Ok(([(header::CONTENT_TYPE, mime_type)], buf))
}
