use crate::graphql::HttpTransport;
use crate::ipc::error::{err, ok};
use crate::ipc::handlers::str_param;
use crate::ipc::types::{AppState, Request, Session};
use crate::screens::Identity;
use serde_json::json;
use std::sync::Arc;

fn handle_health(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(
        &req.id,
        json!({
            "version": env!("CARGO_PKG_VERSION"),
            "endpoint": state.session.as_ref().map(|s| s.endpoint.as_str()),
            "openScreens": state.host.open_count(),
        }),
    )
}

fn handle_session_start(state: &mut AppState, req: &Request) -> serde_json::Value {
    let Some(user) = req.params.get("user") else {
        return err(&req.id, "bad_params", "missing params.user");
    };
    let identity: Identity = match serde_json::from_value(user.clone()) {
        Ok(v) => v,
        Err(e) => return err(&req.id, "bad_params", format!("params.user: {e}")),
    };
    if identity.dni.trim().is_empty() {
        return err(&req.id, "bad_params", "user.dni must not be empty");
    }

    let endpoint = str_param(req, "endpoint")
        .map(str::to_string)
        .unwrap_or_else(|| state.config.endpoint.clone());
    let token = str_param(req, "token").map(str::to_string);
    let transport = match HttpTransport::new(&endpoint, token, state.config.request_timeout) {
        Ok(t) => t,
        Err(e) => return err(&req.id, "transport_failed", format!("{e:?}")),
    };

    // A new identity must not see screens bound to the previous one.
    state.host.close_all();
    tracing::info!(endpoint = %endpoint, role = identity.role.as_str(), "session started");
    let result = json!({ "endpoint": endpoint, "user": identity });
    state.session = Some(Session {
        identity,
        endpoint,
        transport: Arc::new(transport),
    });
    ok(&req.id, result)
}

fn handle_session_end(state: &mut AppState, req: &Request) -> serde_json::Value {
    state.host.close_all();
    let had_session = state.session.take().is_some();
    if had_session {
        tracing::info!("session ended");
    }
    ok(&req.id, json!({ "ended": had_session }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "health" => Some(handle_health(state, req)),
        "session.start" => Some(handle_session_start(state, req)),
        "session.end" => Some(handle_session_end(state, req)),
        _ => None,
    }
}
