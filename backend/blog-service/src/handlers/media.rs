/// Media upload handler
///
/// The 10MB size bound and the image/video whitelist are enforced here at
/// the boundary, before the ownership check runs and before any byte
/// reaches the file store.
use crate::config::Config;
use crate::error::{AppError, Result};
use crate::middleware::AuthenticatedUser;
use crate::models::MediaKind;
use crate::services::MediaService;
use crate::storage::FileStore;
use actix_multipart::Multipart;
use actix_web::{web, HttpResponse};
use futures_util::stream::StreamExt;
use sqlx::PgPool;
use std::sync::Arc;
use uuid::Uuid;

const ALLOWED_FILE_TYPES: &[&str] = &["image", "video"];

/// Upload a media attachment for a post
pub async fn upload_media(
    pool: web::Data<PgPool>,
    store: web::Data<Arc<dyn FileStore>>,
    config: web::Data<Config>,
    user: AuthenticatedUser,
    post_id: web::Path<Uuid>,
    mut payload: Multipart,
) -> Result<HttpResponse> {
    let max_bytes = config.media.max_upload_bytes;

    let mut file_bytes: Vec<u8> = Vec::new();
    let mut file_name = String::from("upload");
    let mut file_type = String::from("image");

    while let Some(item) = payload.next().await {
        let mut field = item
            .map_err(|e| AppError::ValidationError(format!("malformed multipart payload: {e}")))?;

        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "file" => {
                if let Some(name) = field
                    .content_disposition()
                    .and_then(|cd| cd.get_filename())
                {
                    file_name = name.to_string();
                }

                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        AppError::ValidationError(format!("failed to read upload: {e}"))
                    })?;
                    if file_bytes.len() + bytes.len() > max_bytes {
                        return Err(AppError::ValidationError(
                            "File size exceeds 10MB limit".to_string(),
                        ));
                    }
                    file_bytes.extend_from_slice(&bytes);
                }
            }
            "file_type" => {
                let mut buf = Vec::new();
                while let Some(chunk) = field.next().await {
                    let bytes = chunk.map_err(|e| {
                        AppError::ValidationError(format!("failed to read file_type: {e}"))
                    })?;
                    buf.extend_from_slice(&bytes);
                }
                file_type = String::from_utf8_lossy(&buf).trim().to_ascii_lowercase();
            }
            _ => {
                // Drain unknown fields so the stream can finish
                while let Some(chunk) = field.next().await {
                    chunk.map_err(|e| {
                        AppError::ValidationError(format!("malformed multipart payload: {e}"))
                    })?;
                }
            }
        }
    }

    if file_bytes.is_empty() {
        return Err(AppError::ValidationError("File is empty".to_string()));
    }

    if !ALLOWED_FILE_TYPES.contains(&file_type.as_str()) {
        return Err(AppError::ValidationError(
            "Invalid file type. Allowed types: image, video".to_string(),
        ));
    }

    // Whitelist membership guarantees the parse succeeds
    let kind = MediaKind::parse(&file_type)
        .ok_or_else(|| AppError::ValidationError("Invalid file type".to_string()))?;

    let service = MediaService::new((**pool).clone(), store.get_ref().clone());
    let media = service
        .attach_media(&user, *post_id, &file_name, kind, file_bytes)
        .await?;

    Ok(HttpResponse::Created().json(media))
}
