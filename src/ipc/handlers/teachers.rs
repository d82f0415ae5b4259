use crate::ipc::error::ok;
use crate::ipc::helpers::{get_form_str, get_required_str, get_string_list, parse_patch, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Teacher;
use crate::relations::{self, NewTeacher, TeacherPatch};
use serde_json::json;

fn teachers_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let teachers: Vec<Teacher> = state.store.load();
    Ok(json!({ "teachers": teachers }))
}

fn teachers_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let req = NewTeacher {
        name: get_form_str(params, "name"),
        subjects: get_string_list(params, "subjects")?,
        class_ids: get_string_list(params, "classIds")?,
        login: get_form_str(params, "login"),
        password: get_form_str(params, "password"),
    };

    let mut data = state.store.load_dataset();
    let Some(teacher) = relations::create_teacher(&mut data, req) else {
        return Ok(json!({ "created": false }));
    };
    state.store.save(&data.teachers)?;
    Ok(json!({ "created": true, "teacher": teacher }))
}

fn teachers_update(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher_id = get_required_str(params, "teacherId")?;
    let patch: TeacherPatch = parse_patch(params)?;

    let mut data = state.store.load_dataset();
    let teacher = relations::update_teacher(&mut data, teacher_id, patch)?;
    state.store.save(&data.teachers)?;
    Ok(json!({ "teacher": teacher }))
}

fn teachers_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let teacher_id = get_required_str(params, "teacherId")?;

    let mut data = state.store.load_dataset();
    let removed = relations::delete_teacher(&mut data, teacher_id)?;
    state.store.save(&data.teachers)?;
    Ok(json!({ "deleted": removed.id }))
}

fn handle_teachers_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match teachers_list(state) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_teachers_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match teachers_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_teachers_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    match teachers_update(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_teachers_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match teachers_delete(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "teachers.list" => Some(handle_teachers_list(state, req)),
        "teachers.create" => Some(handle_teachers_create(state, req)),
        "teachers.update" => Some(handle_teachers_update(state, req)),
        "teachers.delete" => Some(handle_teachers_delete(state, req)),
        _ => None,
    }
}
