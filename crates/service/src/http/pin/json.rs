use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::Json;

use super::{PinResponse, PinRouteError};
use crate::ServiceState;

/// Pin a JSON object under the CID of its serialized form
pub async fn handler(
    State(state): State<ServiceState>,
    payload: Result<Json<serde_json::Value>, JsonRejection>,
) -> Result<PinResponse, PinRouteError> {
    let Json(document) = payload.map_err(|e| PinRouteError::InvalidRequest(e.body_text()))?;

    if !document.is_object() {
        return Err(PinRouteError::InvalidRequest(
            "body must be a JSON object".into(),
        ));
    }

    let result = state.pinner().pin_json(&document).await?;
    Ok(result.into())
}
