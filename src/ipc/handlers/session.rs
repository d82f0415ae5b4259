use crate::ipc::error::{err, ok};
use crate::ipc::helpers::{get_required_str, HandlerErr};
use crate::ipc::types::{AppState, Request};
use serde_json::json;

fn session_login(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let login = get_required_str(params, "login")?;
    let password = get_required_str(params, "password")?;
    let identity = state
        .session
        .login(&mut state.store, &state.admin, login, password)?
        .ok_or_else(|| HandlerErr::new("invalid_credentials", "invalid login or password"))?;
    Ok(json!({ "currentUser": identity }))
}

fn handle_session_login(state: &mut AppState, req: &Request) -> serde_json::Value {
    match session_login(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_session_logout(state: &mut AppState, req: &Request) -> serde_json::Value {
    match state.session.logout(&mut state.store) {
        Ok(()) => ok(&req.id, json!({ "currentUser": null })),
        Err(e) => err(&req.id, e.code(), e.to_string(), None),
    }
}

fn handle_session_current(state: &mut AppState, req: &Request) -> serde_json::Value {
    ok(&req.id, json!({ "currentUser": state.session.identity() }))
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "session.login" => Some(handle_session_login(state, req)),
        "session.logout" => Some(handle_session_logout(state, req)),
        "session.current" => Some(handle_session_current(state, req)),
        _ => None,
    }
}
