//! Axum route handlers for CSV import.

use axum::{
    extract::{multipart::MultipartError, Multipart, Query, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use serde::Deserialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::ingest::importer::run_import;
use crate::ingest::models::ImportType;
use crate::ingest::report::ImportReport;
use crate::state::AppState;

#[derive(Deserialize)]
pub struct UserIdQuery {
    pub user_id: Uuid,
}

/// Fields of a CSV upload form.
#[derive(Debug, Default)]
pub struct UploadForm {
    pub file: Option<Bytes>,
    pub import_type: Option<String>,
}

/// Reads the `file` and `type` fields; other fields are ignored.
pub async fn read_upload(multipart: &mut Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| upload_error("Invalid multipart body", e))?
    {
        let name = field.name().map(str::to_owned);
        match name.as_deref() {
            Some("file") => {
                let data = field
                    .bytes()
                    .await
                    .map_err(|e| upload_error("Failed to read file", e))?;
                form.file = Some(data);
            }
            Some("type") => {
                let value = field
                    .text()
                    .await
                    .map_err(|e| upload_error("Failed to read type", e))?;
                form.import_type = Some(value);
            }
            _ => {}
        }
    }

    Ok(form)
}

/// Bodies over the upload limit surface as 413; anything else is a bad request.
fn upload_error(context: &str, err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge("Upload exceeds the size limit".to_string())
    } else {
        AppError::Validation(format!("{context}: {}", err.body_text()))
    }
}

/// An absent or empty `type` means `posts`.
pub fn parse_import_type(raw: Option<&str>) -> Result<ImportType, AppError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(ImportType::Posts),
        Some(s) => s
            .parse()
            .map_err(|_| AppError::Validation("Invalid import type".to_string())),
    }
}

/// POST /api/v1/import?user_id=
///
/// Multipart upload (`file`, optional `type`). Returns the per-row import report,
/// or a 400 when the file cannot be parsed or lacks the required column.
pub async fn handle_import(
    State(state): State<AppState>,
    Query(params): Query<UserIdQuery>,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>, AppError> {
    let form = read_upload(&mut multipart).await?;
    let file = form
        .file
        .ok_or_else(|| AppError::Validation("No file provided".to_string()))?;
    let import_type = parse_import_type(form.import_type.as_deref())?;

    state.store.ensure_owner(params.user_id).await?;
    let report = run_import(state.store.as_ref(), params.user_id, import_type, &file).await?;

    Ok(Json(report))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_import_type_defaults_to_posts() {
        assert_eq!(parse_import_type(None).unwrap(), ImportType::Posts);
        assert_eq!(parse_import_type(Some("")).unwrap(), ImportType::Posts);
        assert_eq!(
            parse_import_type(Some("analytics")).unwrap(),
            ImportType::Analytics
        );
    }

    #[test]
    fn test_unknown_import_type_is_rejected() {
        let err = parse_import_type(Some("followers")).unwrap_err();
        assert!(matches!(err, AppError::Validation(msg) if msg == "Invalid import type"));
    }
}
