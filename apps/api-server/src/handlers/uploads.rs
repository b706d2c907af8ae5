//! Media upload endpoint.
//!
//! `POST /api/upload/{kind}` accepts a multipart body, spools the first
//! file part to the local temp area under a random name, and hands it to
//! the media pipeline. The response carries only the public URL of the
//! stored artifact; the pipeline removes the temp files either way.

use std::path::Path;

use actix_multipart::{Field, Multipart};
use actix_web::{HttpResponse, web};
use futures_util::TryStreamExt;
use tokio::io::AsyncWriteExt;
use uuid::Uuid;

use quill_infra::{TempUpload, UploadKind};
use quill_shared::dto::UploadResponse;

use crate::middleware::auth::Identity;
use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

/// POST /api/upload/{kind}
pub async fn upload(
    state: web::Data<AppState>,
    identity: Identity,
    kind: web::Path<String>,
    payload: Multipart,
) -> AppResult<HttpResponse> {
    let kind = UploadKind::from_segment(&kind)
        .ok_or_else(|| AppError::BadRequest(format!("Unknown upload kind: {}", kind)))?;

    let upload = spool(payload, &state).await?;

    tracing::debug!(
        user_id = %identity.user_id,
        kind = ?kind,
        original = %upload.original_name,
        "upload received"
    );

    let url = state.pipeline.process(&upload, kind).await?;

    Ok(HttpResponse::Ok().json(UploadResponse { url }))
}

/// Write the first file part of the multipart body to the temp area.
/// The temp name is a fresh uuid with no extension; the original
/// filename is kept alongside for the video extension check. A failure
/// mid-stream (truncated body, disconnect, write error) removes the
/// partially-written file before the error propagates; only a fully
/// spooled upload reaches the pipeline's own cleanup.
async fn spool(mut payload: Multipart, state: &AppState) -> AppResult<TempUpload> {
    while let Some(mut field) = payload
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        let original_name = match field
            .content_disposition()
            .and_then(|cd| cd.get_filename())
        {
            Some(name) => name.to_string(),
            // Plain form fields have no filename; skip them.
            None => continue,
        };

        let path = state.temp_dir.join(Uuid::new_v4().to_string());
        if let Err(e) = write_field(&mut field, &path).await {
            discard(&path).await;
            return Err(e);
        }

        return Ok(TempUpload {
            path,
            original_name,
        });
    }

    Err(AppError::BadRequest("No file uploaded".to_string()))
}

async fn write_field(field: &mut Field, path: &Path) -> AppResult<()> {
    let mut file = tokio::fs::File::create(path).await?;
    while let Some(chunk) = field
        .try_next()
        .await
        .map_err(|e| AppError::BadRequest(e.to_string()))?
    {
        file.write_all(&chunk).await?;
    }
    file.flush().await?;
    Ok(())
}

async fn discard(path: &Path) {
    if let Err(e) = tokio::fs::remove_file(path).await {
        if e.kind() != std::io::ErrorKind::NotFound {
            tracing::warn!(path = %path.display(), error = %e, "temp file cleanup failed");
        }
    }
}
