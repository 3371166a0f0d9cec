use crate::error::{ClientError, HostError};
use crate::ipc::error::{err, host_err, ok_serialized};
use crate::ipc::handlers::str_param;
use crate::ipc::types::{AppState, Request};

/// The outer `Err` is a ready-made error response; the inner result is the
/// picker's own outcome.
#[allow(clippy::type_complexity)]
fn parse_outcome(req: &Request) -> Result<Result<String, ClientError>, serde_json::Value> {
    match str_param(req, "outcome") {
        Some("picked") => match str_param(req, "uri").map(str::trim) {
            Some(uri) if !uri.is_empty() => Ok(Ok(uri.to_string())),
            _ => Err(host_err(&req.id, &HostError::MissingParam("uri"))),
        },
        Some("permissionDenied") => Ok(Err(ClientError::PermissionDenied(
            "media library".to_string(),
        ))),
        Some("cancelled") => Ok(Err(ClientError::UserCancelled)),
        Some(other) => Err(err(&req.id, "bad_params", format!("unknown outcome: {other}"))),
        None => Err(host_err(&req.id, &HostError::MissingParam("outcome"))),
    }
}

fn handle_image_picked(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(screen_id) = str_param(req, "screenId") else {
        return host_err(&req.id, &HostError::MissingParam("screenId"));
    };
    let outcome = match parse_outcome(req) {
        Ok(v) => v,
        Err(resp) => return resp,
    };
    match state.host.image_picked(screen_id, outcome) {
        Ok(result) => ok_serialized(&req.id, &result),
        Err(e) => host_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "device.imagePicked" => Some(handle_image_picked(state, req)),
        _ => None,
    }
}
