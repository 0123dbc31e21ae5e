//! Common utilities for the upload handler

use axum::extract::Multipart;
use scenedrop_core::AppError;

/// Parsed multipart upload: an optional code and the artifact payload.
pub struct UploadForm {
    pub code: Option<String>,
    pub data: Vec<u8>,
    pub original_filename: String,
}

/// Extract the `code` and `file` fields from the multipart form.
/// Exactly one field named "file" is accepted; other fields are ignored.
pub async fn extract_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut code: Option<String> = None;
    let mut file_data: Option<Vec<u8>> = None;
    let mut filename: Option<String> = None;

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::InvalidInput(format!("Failed to read multipart: {}", e)))?
    {
        let field_name = field.name().map(|s| s.to_string()).unwrap_or_default();

        match field_name.as_str() {
            "code" => {
                code = Some(field.text().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read code field: {}", e))
                })?);
            }
            "file" => {
                if file_data.is_some() {
                    return Err(AppError::InvalidInput(
                        "Multiple file fields are not allowed; send exactly one field named 'file'"
                            .to_string(),
                    ));
                }
                filename = field.file_name().map(|s: &str| s.to_string());

                let data = field.bytes().await.map_err(|e| {
                    AppError::InvalidInput(format!("Failed to read file data: {}", e))
                })?;

                file_data = Some(data.to_vec());
            }
            _ => {}
        }
    }

    let data = file_data.ok_or_else(|| AppError::InvalidInput("Missing file field.".to_string()))?;

    Ok(UploadForm {
        code,
        data,
        original_filename: filename.unwrap_or_default(),
    })
}

/// Validate file size
pub fn validate_file_size(file_size: usize, max_size: usize) -> Result<(), AppError> {
    if file_size > max_size {
        return Err(AppError::InvalidInput(format!(
            "File exceeds the maximum size of {} MB.",
            max_size / 1024 / 1024
        )));
    }
    Ok(())
}

/// Validate the original filename carries the expected artifact extension;
/// returns the normalized extension.
pub fn validate_file_extension(filename: &str, expected: &str) -> Result<String, AppError> {
    let extension = filename
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_lowercase())
        .unwrap_or_default();

    if extension != expected {
        return Err(AppError::InvalidInput(format!(
            "Only .{} files are accepted.",
            expected
        )));
    }

    Ok(extension)
}
