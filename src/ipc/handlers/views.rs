use crate::ipc::error::ok;
use crate::ipc::helpers::{get_optional_str, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::views;
use serde_json::json;

fn views_dashboard(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let identity = state
        .session
        .identity()
        .ok_or_else(|| HandlerErr::new("not_authenticated", "log in first"))?;
    let data = state.store.load_dataset();
    let dashboard = views::dashboard(identity, &data, get_optional_str(params, "childId"));
    Ok(json!({
        "name": identity.name,
        "dashboard": to_json(&dashboard)?,
    }))
}

fn handle_views_dashboard(state: &mut AppState, req: &Request) -> serde_json::Value {
    match views_dashboard(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "views.dashboard" => Some(handle_views_dashboard(state, req)),
        _ => None,
    }
}
