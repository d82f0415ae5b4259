use crate::ipc::error::ok;
use crate::ipc::helpers::{get_form_str, get_required_str, get_string_list, parse_patch, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Parent;
use crate::relations::{self, NewParent, ParentPatch};
use serde_json::json;

fn parents_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let parents: Vec<Parent> = state.store.load();
    Ok(json!({ "parents": parents }))
}

fn parents_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let req = NewParent {
        name: get_form_str(params, "name"),
        children_ids: get_string_list(params, "childrenIds")?,
        login: get_form_str(params, "login"),
        password: get_form_str(params, "password"),
    };

    let mut data = state.store.load_dataset();
    let Some(parent) = relations::create_parent(&mut data, req) else {
        return Ok(json!({ "created": false }));
    };
    state.store.save(&data.parents)?;
    state.store.save(&data.students)?;
    Ok(json!({ "created": true, "parent": parent }))
}

fn parents_update(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let parent_id = get_required_str(params, "parentId")?;
    let patch: ParentPatch = parse_patch(params)?;

    let mut data = state.store.load_dataset();
    let parent = relations::update_parent(&mut data, parent_id, patch)?;
    state.store.save(&data.parents)?;
    state.store.save(&data.students)?;
    Ok(json!({ "parent": parent }))
}

fn parents_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let parent_id = get_required_str(params, "parentId")?;

    let mut data = state.store.load_dataset();
    let removed = relations::delete_parent(&mut data, parent_id)?;
    state.store.save(&data.parents)?;
    Ok(json!({ "deleted": removed.id }))
}

fn handle_parents_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match parents_list(state) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_parents_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match parents_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_parents_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    match parents_update(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_parents_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match parents_delete(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "parents.list" => Some(handle_parents_list(state, req)),
        "parents.create" => Some(handle_parents_create(state, req)),
        "parents.update" => Some(handle_parents_update(state, req)),
        "parents.delete" => Some(handle_parents_delete(state, req)),
        _ => None,
    }
}
