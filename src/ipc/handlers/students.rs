use crate::ipc::error::ok;
use crate::ipc::helpers::{get_form_str, get_required_str, parse_patch, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Student;
use crate::relations::{self, NewStudent, StudentPatch};
use serde_json::json;

fn students_list(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let mut students: Vec<Student> = state.store.load();
    if let Some(class_id) = params.get("classId").and_then(|v| v.as_str()) {
        students.retain(|s| s.class_id == class_id);
    }
    Ok(json!({ "students": students }))
}

fn students_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let req = NewStudent {
        name: get_form_str(params, "name"),
        class_id: get_form_str(params, "classId"),
        login: get_form_str(params, "login"),
        password: get_form_str(params, "password"),
    };

    let mut data = state.store.load_dataset();
    let Some(student) = relations::create_student(&mut data, req) else {
        return Ok(json!({ "created": false }));
    };
    // Two separate writes; nothing rolls back the first if the second fails.
    state.store.save(&data.students)?;
    state.store.save(&data.classes)?;
    Ok(json!({ "created": true, "student": student }))
}

fn students_update(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let patch: StudentPatch = parse_patch(params)?;

    let mut data = state.store.load_dataset();
    let student = relations::update_student(&mut data, student_id, patch)?;
    state.store.save(&data.students)?;
    state.store.save(&data.classes)?;
    state.store.save(&data.parents)?;
    Ok(json!({ "student": student }))
}

fn students_delete(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;

    let mut data = state.store.load_dataset();
    let removed = relations::delete_student(&mut data, student_id)?;
    state.store.save(&data.students)?;
    state.store.save(&data.classes)?;
    Ok(json!({ "deleted": removed.id }))
}

fn handle_students_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_list(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_update(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_update(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_students_delete(state: &mut AppState, req: &Request) -> serde_json::Value {
    match students_delete(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "students.list" => Some(handle_students_list(state, req)),
        "students.create" => Some(handle_students_create(state, req)),
        "students.update" => Some(handle_students_update(state, req)),
        "students.delete" => Some(handle_students_delete(state, req)),
        _ => None,
    }
}
