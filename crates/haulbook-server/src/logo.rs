//! Organization logo upload and serving.
//!
//! The database stores only a filename; the image bytes live under the
//! configured `upload_dir`. Stored names are UUID-derived, so nothing
//! user-controlled ever becomes a path on disk.

use axum::{
  Json,
  body::Body,
  extract::{Path, Request, State},
  http::{StatusCode, header},
  response::Response,
};
use haulbook_core::{organization::Organization, store::LedgerStore};
use sha2::{Digest as _, Sha256};
use uuid::Uuid;

use crate::{AppState, error::Error};

/// Uploads larger than this are rejected outright.
pub const MAX_LOGO_BYTES: usize = 16 * 1024 * 1024;

fn extension_for(content_type: &str) -> Option<&'static str> {
  match content_type.split(';').next().map(str::trim) {
    Some("image/png") => Some("png"),
    Some("image/jpeg") => Some("jpg"),
    Some("image/gif") => Some("gif"),
    _ => None,
  }
}

fn content_type_for(filename: &str) -> &'static str {
  match filename.rsplit_once('.').map(|(_, ext)| ext) {
    Some("png") => "image/png",
    Some("jpg" | "jpeg") => "image/jpeg",
    Some("gif") => "image/gif",
    _ => "application/octet-stream",
  }
}

// ─── Upload ──────────────────────────────────────────────────────────────────

/// `POST /api/organization/logo` — raw image body.
///
/// Requires an existing profile. Replacing a logo removes the previous file
/// once the profile row points at the new one.
pub async fn upload<S>(
  State(state): State<AppState<S>>,
  req: Request,
) -> Result<Json<Organization>, Error>
where
  S: LedgerStore + Clone + Send + Sync + 'static,
  S::Error: std::error::Error + Send + Sync + 'static,
{
  let content_type = req
    .headers()
    .get(header::CONTENT_TYPE)
    .and_then(|v| v.to_str().ok())
    .unwrap_or("")
    .to_owned();
  let ext = extension_for(&content_type)
    .ok_or(Error::UnsupportedMediaType(content_type))?;

  let current = state
    .store
    .organization()
    .await
    .map_err(|e| Error::Store(Box::new(e)))?
    .ok_or(Error::ProfileMissing)?;

  let bytes = axum::body::to_bytes(req.into_body(), MAX_LOGO_BYTES)
    .await
    .map_err(|_| Error::PayloadTooLarge)?;
  if bytes.is_empty() {
    return Err(Error::BadRequest("empty upload".into()));
  }

  let digest = hex::encode(Sha256::digest(&bytes));
  let filename = format!("{}.{ext}", Uuid::new_v4());

  tokio::fs::create_dir_all(&state.config.upload_dir).await?;
  let path = state.config.upload_dir.join(&filename);
  tokio::fs::write(&path, &bytes).await?;

  let updated = match state.store.set_organization_logo(filename.clone()).await
  {
    Ok(organization) => organization,
    Err(e) => {
      // The stored file would be orphaned; remove it before failing.
      tokio::fs::remove_file(&path).await.ok();
      return Err(Error::Store(Box::new(e)));
    }
  };

  if let Some(old) = current.logo_filename
    && old != filename
  {
    tokio::fs::remove_file(state.config.upload_dir.join(old))
      .await
      .ok();
  }

  tracing::info!(file = %filename, sha256 = %digest, "organization logo stored");

  Ok(Json(updated))
}

// ─── Serve ───────────────────────────────────────────────────────────────────

/// `GET /uploads/:filename`
pub async fn serve<S>(
  State(state): State<AppState<S>>,
  Path(filename): Path<String>,
) -> Result<Response, Error>
where
  S: LedgerStore + Clone + Send + Sync + 'static,
{
  // Stored names are UUID-derived; anything resembling a path is not ours.
  if filename.contains(['/', '\\']) || filename.contains("..") {
    return Err(Error::NotFound);
  }

  let path = state.config.upload_dir.join(&filename);
  let bytes = match tokio::fs::read(&path).await {
    Ok(bytes) => bytes,
    Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
      return Err(Error::NotFound);
    }
    Err(e) => return Err(Error::Io(e)),
  };

  Ok(
    Response::builder()
      .status(StatusCode::OK)
      .header(header::CONTENT_TYPE, content_type_for(&filename))
      .header(header::CONTENT_LENGTH, bytes.len())
      .body(Body::from(bytes))
      .unwrap(),
  )
}
