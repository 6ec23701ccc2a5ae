use axum::extract::Multipart;
use common::storage::{ImageUpload, StorageError};
use serde::de::DeserializeOwned;

use crate::error::AppError;

/// Reasons an uploaded image name is refused.
#[derive(Debug)]
pub enum ImageNameError {
    Empty,
    ContainsPathSeparator,
    ControlCharacter,
    Hidden,
    NotAnImage,
}

impl ImageNameError {
    pub fn message(&self) -> &'static str {
        match self {
            Self::Empty => "Image filename cannot be empty",
            Self::ContainsPathSeparator => "Invalid filename: path separators are not allowed",
            Self::ControlCharacter => "Invalid filename: control characters are not allowed",
            Self::Hidden => "Invalid filename: hidden files (starting with '.') are not allowed",
            Self::NotAnImage => "Attached file must be an image",
        }
    }
}

/// Validates the client-supplied name of an image and returns it trimmed.
pub fn validate_image_filename(filename: &str) -> Result<&str, ImageNameError> {
    let trimmed = filename.trim();

    if trimmed.is_empty() {
        return Err(ImageNameError::Empty);
    }
    // Also rejects NUL and CR/LF.
    if trimmed.chars().any(|c| c.is_ascii_control()) {
        return Err(ImageNameError::ControlCharacter);
    }
    if trimmed.contains('/') || trimmed.contains('\\') {
        return Err(ImageNameError::ContainsPathSeparator);
    }
    if trimmed.starts_with('.') {
        return Err(ImageNameError::Hidden);
    }
    Ok(trimmed)
}

/// Image MIME type of an upload: the declared type when it is an image, otherwise the
/// type guessed from the file extension.
pub fn image_content_type(filename: &str, declared: Option<&str>) -> Option<String> {
    if let Some(declared) = declared
        && declared.starts_with("image/")
    {
        return Some(declared.to_string());
    }
    mime_guess::from_path(filename)
        .iter()
        .find(|m| m.type_() == mime_guess::mime::IMAGE)
        .map(|m| m.to_string())
}

/// Parts of an article form: the JSON `request` and an optional `file`.
pub struct ArticleForm<T> {
    pub request: T,
    pub image: Option<ImageUpload>,
}

/// Read an article multipart form.
///
/// The `request` part is required. A `file` part with no name and no bytes counts as absent.
pub async fn read_article_form<T: DeserializeOwned>(
    multipart: &mut Multipart,
    max_image_size: u64,
) -> Result<ArticleForm<T>, AppError> {
    let mut request: Option<T> = None;
    let mut image: Option<ImageUpload> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Multipart error: {e}")))?
    {
        match field.name() {
            Some("request") => {
                let text = field
                    .text()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read request: {e}")))?;
                request = Some(serde_json::from_str(&text).map_err(|e| {
                    AppError::Validation(format!("Invalid request JSON: {e}"))
                })?);
            }
            Some("file") => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let declared = field.content_type().map(|s| s.to_string());
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| AppError::Validation(format!("Failed to read file: {e}")))?;
                if filename.trim().is_empty() && data.is_empty() {
                    continue;
                }

                let filename = validate_image_filename(&filename)
                    .map_err(|e| AppError::Validation(e.message().into()))?
                    .to_string();
                let content_type = image_content_type(&filename, declared.as_deref())
                    .ok_or_else(|| AppError::Validation(ImageNameError::NotAnImage.message().into()))?;
                if data.len() as u64 > max_image_size {
                    return Err(StorageError::SizeLimitExceeded {
                        actual: data.len() as u64,
                        limit: max_image_size,
                    }
                    .into());
                }

                image = Some(ImageUpload {
                    filename,
                    content_type: Some(content_type),
                    data: data.to_vec(),
                });
            }
            _ => {} // Ignore unknown fields.
        }
    }

    let request = request.ok_or_else(|| AppError::Validation("Missing 'request' field".into()))?;
    Ok(ArticleForm { request, image })
}
