use axum::extract::{Multipart, State};

use common::content::{ContentItem, Upload};

use super::{PinResponse, PinRouteError};
use crate::ServiceState;

/// Multipart field carrying the files to pin; repeat it to pin a directory
pub const FILE_FIELD: &str = "file";

pub async fn handler(
    State(state): State<ServiceState>,
    mut multipart: Multipart,
) -> Result<PinResponse, PinRouteError> {
    let mut items: Vec<ContentItem> = Vec::new();

    // Parse multipart form data
    while let Some(field) = multipart.next_field().await? {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }

        let filename = field.file_name().map(|s| s.to_string());
        // Fall back to guessing the MIME type from the file extension
        let content_type = field
            .content_type()
            .map(|s| s.to_string())
            .or_else(|| {
                filename
                    .as_deref()
                    .and_then(|name| mime_guess::from_path(name).first())
                    .map(|mime| mime.to_string())
            });

        let data = field.bytes().await?;

        let mut item = ContentItem::new(data);
        if let Some(filename) = filename {
            item = item.with_name(filename);
        }
        if let Some(content_type) = content_type {
            item = item.with_content_type(content_type);
        }
        items.push(item);
    }

    tracing::info!("Pinning {} file(s)", items.len());

    let upload = Upload::from_items(items)?;
    let result = state.pinner().pin_files(upload).await?;
    Ok(result.into())
}
