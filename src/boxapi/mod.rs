//! Box file upload with conflict versioning.
//!
//! A name collision in the target folder (HTTP 409) is resolved by
//! uploading the bytes as a new version of the existing file instead of
//! failing or duplicating. Upload failures never endanger the local
//! report; the caller treats them as non-fatal.

pub mod error;
pub mod token;

use std::path::Path;

use serde_json::json;

use self::error::BoxError;
use crate::session::ApiSession;

pub const UPLOAD_URL: &str = "https://upload.box.com/api/2.0/files/content";

fn version_url(file_id: &str) -> String {
    format!("https://upload.box.com/api/2.0/files/{}/content", file_id)
}

/// Pull the conflicting file id out of a 409 error body.
fn conflict_file_id(body: &str) -> Option<String> {
    let parsed: serde_json::Value = serde_json::from_str(body).ok()?;
    parsed["context_info"]["conflicts"]["id"]
        .as_str()
        .map(str::to_string)
}

/// Upload the report file into a Box folder with a non-empty bearer token.
///
/// On a 409 name conflict, issues exactly one follow-up request to the
/// version endpoint of the conflicting file; identity is implied by the
/// URL, so no attributes blob is sent. Any other non-200/201 final status
/// is an error carrying the status and raw body.
pub async fn upload_report(
    session: &dyn ApiSession,
    file_path: &Path,
    folder_id: &str,
    token: &str,
) -> Result<(), BoxError> {
    let file_name = file_path
        .file_name()
        .and_then(|n| n.to_str())
        .ok_or_else(|| anyhow::anyhow!("Invalid report file name: {}", file_path.display()))?
        .to_string();
    let bytes = tokio::fs::read(file_path).await?;

    let attributes = json!({
        "name": file_name,
        "parent": { "id": folder_id }
    })
    .to_string();

    let mut reply = session
        .upload(UPLOAD_URL, token, &file_name, bytes.clone(), Some(attributes))
        .await?;

    // File name exists: upload a new version instead.
    if reply.status == 409 {
        let conflict_id = conflict_file_id(&reply.body)
            .ok_or_else(|| BoxError::ConflictWithoutId(reply.body.clone()))?;
        tracing::info!(
            "Report already exists in Box (file id {}), uploading new version",
            conflict_id
        );
        reply = session
            .upload(&version_url(&conflict_id), token, &file_name, bytes, None)
            .await?;
    }

    if !matches!(reply.status, 200 | 201) {
        return Err(BoxError::UploadFailed {
            status: reply.status,
            body: reply.body,
        });
    }

    tracing::info!("Uploaded report to Box via API successfully.");
    Ok(())
}
