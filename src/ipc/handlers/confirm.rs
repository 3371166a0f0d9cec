use crate::error::HostError;
use crate::ipc::error::{host_err, ok, ok_serialized};
use crate::ipc::handlers::str_param;
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn handle_request_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(screen_id) = str_param(req, "screenId") else {
        return host_err(&req.id, &HostError::MissingParam("screenId"));
    };
    let Some(record_id) = str_param(req, "recordId") else {
        return host_err(&req.id, &HostError::MissingParam("recordId"));
    };
    match state.host.request_delete(screen_id, record_id) {
        Ok(prompt) => ok_serialized(&req.id, &prompt),
        Err(e) => host_err(&req.id, &e),
    }
}

fn handle_confirm_answer(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(confirmation_id) = str_param(req, "confirmationId") else {
        return host_err(&req.id, &HostError::MissingParam("confirmationId"));
    };
    let Some(accepted) = req.params.get("accepted").and_then(|v| v.as_bool()) else {
        return host_err(&req.id, &HostError::MissingParam("accepted"));
    };
    match state.host.answer(confirmation_id, accepted) {
        Ok(started) => ok(&req.id, json!({ "mutationStarted": started })),
        Err(e) => host_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "screen.requestDelete" => Some(handle_request_delete(state, req)),
        "confirm.answer" => Some(handle_confirm_answer(state, req)),
        _ => None,
    }
}
