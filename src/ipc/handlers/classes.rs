use crate::ipc::error::ok;
use crate::ipc::helpers::{get_form_str, get_optional_str, get_required_i64, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::Class;
use crate::relations;
use crate::views::ClassSummary;
use serde_json::json;

const GRADE_RANGE: std::ops::RangeInclusive<i64> = 1..=11;

fn classes_list(state: &mut AppState) -> Result<serde_json::Value, HandlerErr> {
    let classes: Vec<Class> = state.store.load();
    let summaries: Vec<ClassSummary> = classes.iter().map(ClassSummary::from).collect();
    Ok(json!({ "classes": classes, "summaries": to_json(&summaries)? }))
}

fn classes_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let name = get_form_str(params, "name");
    let grade = get_required_i64(params, "grade")?;
    if !GRADE_RANGE.contains(&grade) {
        return Err(HandlerErr::bad_params("grade must be in 1..=11"));
    }

    let mut data = state.store.load_dataset();
    let teacher_id = get_optional_str(params, "teacherId");
    let Some(class) = relations::create_class(&mut data, name, grade, teacher_id) else {
        return Ok(json!({ "created": false }));
    };
    state.store.save(&data.classes)?;
    if teacher_id.is_some() {
        state.store.save(&data.teachers)?;
    }
    Ok(json!({ "created": true, "class": class }))
}

fn handle_classes_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match classes_list(state) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_classes_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match classes_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "classes.list" => Some(handle_classes_list(state, req)),
        "classes.create" => Some(handle_classes_create(state, req)),
        _ => None,
    }
}
