use crate::error::HostError;
use crate::ipc::error::{err, host_err, ok, ok_serialized};
use crate::ipc::handlers::str_param;
use crate::ipc::types::{AppState, Request};
use crate::screens::ScreenKind;
use serde_json::json;

fn screen_id<'a>(req: &'a Request) -> Result<&'a str, HostError> {
    str_param(req, "screenId").ok_or(HostError::MissingParam("screenId"))
}

fn handle_screen_open(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(session) = state.session.as_ref() else {
        return host_err(&req.id, &HostError::NoSession);
    };
    let Some(name) = str_param(req, "screen") else {
        return err(&req.id, "bad_params", "missing screen");
    };
    let Some(kind) = ScreenKind::parse(name) else {
        return host_err(&req.id, &HostError::UnknownScreenKind(name.to_string()));
    };
    let route = req.params.get("params").cloned().unwrap_or(json!({}));
    match state.host.open(kind, &session.identity, &route) {
        Ok(snapshot) => ok_serialized(&req.id, &snapshot),
        Err(e) => host_err(&req.id, &e),
    }
}

fn handle_screen_view(state: &mut AppState, req: &Request) -> serde_json::Value {
    let res = screen_id(req).and_then(|id| state.host.snapshot(id));
    match res {
        Ok(snapshot) => ok_serialized(&req.id, &snapshot),
        Err(e) => host_err(&req.id, &e),
    }
}

fn handle_screen_refresh(state: &mut AppState, req: &Request) -> serde_json::Value {
    let res = screen_id(req).and_then(|id| state.host.refresh(id));
    match res {
        Ok(snapshot) => ok_serialized(&req.id, &snapshot),
        Err(e) => host_err(&req.id, &e),
    }
}

fn handle_screen_close(state: &mut AppState, req: &Request) -> serde_json::Value {
    match screen_id(req).and_then(|id| state.host.close(id)) {
        Ok(()) => ok(&req.id, json!({ "closed": true })),
        Err(e) => host_err(&req.id, &e),
    }
}

fn handle_screen_save_picture(state: &mut AppState, req: &Request) -> serde_json::Value {
    let res = screen_id(req).and_then(|id| {
        state.host.save_picture(id)?;
        state.host.snapshot(id)
    });
    match res {
        Ok(snapshot) => ok_serialized(&req.id, &snapshot),
        Err(e) => host_err(&req.id, &e),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "screen.open" => Some(handle_screen_open(state, req)),
        "screen.view" => Some(handle_screen_view(state, req)),
        "screen.refresh" => Some(handle_screen_refresh(state, req)),
        "screen.close" => Some(handle_screen_close(state, req)),
        "screen.savePicture" => Some(handle_screen_save_picture(state, req)),
        _ => None,
    }
}
