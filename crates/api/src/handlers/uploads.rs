//! Admin image upload.

use axum::extract::multipart::MultipartError;
use axum::extract::{Multipart, State};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::Json;
use image::ImageFormat;
use serde::Serialize;

use crate::error::{AppError, AppResult};
use crate::response::DataResponse;
use crate::state::AppState;

/// Accepted file extensions (lower-case, without the dot).
pub const SUPPORTED_IMAGE_EXTENSIONS: &[&str] = &["jpg", "jpeg", "png", "webp", "avif"];

/// Folders an upload may target. Anything else lands in [`DEFAULT_FOLDER`].
pub const UPLOAD_FOLDERS: &[&str] = &["vehicles", "gear"];

pub const DEFAULT_FOLDER: &str = "misc";

#[derive(Debug, Serialize)]
pub struct UploadedImage {
    pub key: String,
    pub url: String,
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge(err.body_text())
    } else {
        AppError::BadRequest(err.body_text())
    }
}

/// Lower-cased extension of `filename` if it is an accepted image type.
pub fn image_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    let ext = ext.to_ascii_lowercase();
    SUPPORTED_IMAGE_EXTENSIONS
        .contains(&ext.as_str())
        .then_some(ext)
}

/// Map the requested folder onto an allowed one.
pub fn resolve_folder(requested: Option<&str>) -> &'static str {
    requested
        .map(str::trim)
        .and_then(|f| UPLOAD_FOLDERS.iter().copied().find(|allowed| *allowed == f))
        .unwrap_or(DEFAULT_FOLDER)
}

/// Sniff the image format from its leading bytes.
pub fn sniff_image(data: &[u8]) -> Option<ImageFormat> {
    match image::guess_format(data) {
        Ok(format @ (ImageFormat::Jpeg | ImageFormat::Png | ImageFormat::WebP | ImageFormat::Avif)) => {
            Some(format)
        }
        _ => None,
    }
}

/// Extension used in the object key, taken from the sniffed content so that
/// a PNG named `photo.jpg` is still stored as `.png`.
pub fn stored_extension(format: ImageFormat) -> &'static str {
    match format {
        ImageFormat::Jpeg => "jpg",
        ImageFormat::Png => "png",
        ImageFormat::WebP => "webp",
        ImageFormat::Avif => "avif",
        other => other.extensions_str().first().copied().unwrap_or("bin"),
    }
}

/// POST /api/v1/admin/uploads
///
/// Multipart form with a required `file` field and an optional `folder`
/// field (`vehicles` or `gear`). Returns the public URL of the stored image.
pub async fn upload_image(
    State(state): State<AppState>,
    mut multipart: Multipart,
) -> AppResult<impl IntoResponse> {
    let mut file_data: Option<(String, Vec<u8>)> = None;
    let mut folder: Option<String> = None;

    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        let name = field.name().unwrap_or("").to_string();
        match name.as_str() {
            "file" => {
                let filename = field.file_name().unwrap_or("").to_string();
                let data = field.bytes().await.map_err(multipart_error)?;
                file_data = Some((filename, data.to_vec()));
            }
            "folder" => {
                folder = Some(field.text().await.map_err(multipart_error)?);
            }
            _ => {} // ignore unknown fields
        }
    }

    let (filename, data) =
        file_data.ok_or_else(|| AppError::BadRequest("Missing required 'file' field".into()))?;

    let max = state.config.upload_max_bytes;
    if data.len() > max {
        return Err(AppError::PayloadTooLarge(format!(
            "File is {} bytes; the limit is {max} bytes",
            data.len()
        )));
    }

    if image_extension(&filename).is_none() {
        return Err(AppError::BadRequest(format!(
            "Unsupported image file '{filename}'. Supported: {}",
            SUPPORTED_IMAGE_EXTENSIONS.join(", ")
        )));
    }
    let format = sniff_image(&data)
        .ok_or_else(|| AppError::BadRequest("File content is not a supported image".into()))?;

    let folder = resolve_folder(folder.as_deref());
    let key = format!(
        "{folder}/{}.{}",
        uuid::Uuid::new_v4(),
        stored_extension(format)
    );
    let size = data.len();

    let url = state
        .object_store
        .put(&key, data, format.to_mime_type())
        .await?;

    tracing::info!(key = %key, size, "Image uploaded");

    Ok((
        StatusCode::CREATED,
        Json(DataResponse {
            data: UploadedImage { key, url },
        }),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extension_is_checked_case_insensitively() {
        assert_eq!(image_extension("photo.JPG").as_deref(), Some("jpg"));
        assert_eq!(image_extension("a.b.webp").as_deref(), Some("webp"));
        assert_eq!(image_extension("doc.pdf"), None);
        assert_eq!(image_extension("noext"), None);
    }

    #[test]
    fn unknown_folders_fall_back_to_misc() {
        assert_eq!(resolve_folder(Some("vehicles")), "vehicles");
        assert_eq!(resolve_folder(Some(" gear ")), "gear");
        assert_eq!(resolve_folder(Some("../etc")), DEFAULT_FOLDER);
        assert_eq!(resolve_folder(None), DEFAULT_FOLDER);
    }

    #[test]
    fn sniffing_accepts_png_and_rejects_text() {
        let png = [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A, 0, 0, 0, 0];
        assert_eq!(sniff_image(&png), Some(ImageFormat::Png));
        assert_eq!(sniff_image(b"hello world, not an image"), None);
    }

    #[test]
    fn key_extension_follows_content() {
        assert_eq!(stored_extension(ImageFormat::Jpeg), "jpg");
        assert_eq!(stored_extension(ImageFormat::Png), "png");
        assert_eq!(stored_extension(ImageFormat::WebP), "webp");
        assert_eq!(stored_extension(ImageFormat::Avif), "avif");
    }
}
