//! `POST /process`: log in with the caller's credentials, translate the
//! receipt and submit it to the vendor.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use receipt_core::{translate_and_prune, SourceReceipt};
use serde_json::Value;

use crate::{error::AppError, middleware::BasicCredentials, services::record_receipt, AppState};

pub async fn process_receipt(
    State(state): State<AppState>,
    credentials: BasicCredentials,
    payload: Result<Json<SourceReceipt>, JsonRejection>,
) -> Result<Json<Value>, AppError> {
    let Json(source) = payload.map_err(|e| {
        record_receipt("invalid");
        AppError::BadRequest(e.body_text())
    })?;

    let session = state.vendor.login(&credentials).await.inspect_err(|_| {
        record_receipt("login_failed");
    })?;

    let device_id = source
        .device_number
        .as_deref()
        .or(state.vendor.settings().default_device_id.as_deref());

    let document = translate_and_prune(&source, session.org_id.as_deref(), device_id)?;

    tracing::info!(
        external_id = ?source.external_id,
        items = source.receipt.as_ref().map_or(0, |r| r.items.len()),
        "Submitting translated receipt"
    );

    match state.vendor.submit_receipt(&session, &document).await {
        Ok(response) => {
            record_receipt("forwarded");
            Ok(Json(response))
        }
        Err(e) => {
            record_receipt("rejected");
            Err(e)
        }
    }
}
