use crate::calc;
use crate::ipc::error::ok;
use crate::ipc::helpers::{get_required_i64, get_required_str, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::relations;
use serde_json::json;

fn grades_add(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;
    let subject = get_required_str(params, "subject")?;
    let mark = get_required_i64(params, "mark")?;

    let mut data = state.store.load_dataset();
    let student = relations::add_grade(&mut data, student_id, subject, mark)?;
    state.store.save(&data.students)?;
    Ok(json!({
        "studentId": student.id,
        "subject": subject.trim(),
        "marks": student.grades.get(subject.trim()),
    }))
}

fn grades_summary(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let student_id = get_required_str(params, "studentId")?;

    let data = state.store.load_dataset();
    let student = data
        .student(student_id)
        .ok_or_else(|| HandlerErr::new("not_found", "student not found"))?;
    let summary = calc::grade_summary(&student.grades);
    Ok(json!({
        "studentId": student.id,
        "summary": to_json(&summary)?,
    }))
}

fn handle_grades_add(state: &mut AppState, req: &Request) -> serde_json::Value {
    match grades_add(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_grades_summary(state: &mut AppState, req: &Request) -> serde_json::Value {
    match grades_summary(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "grades.add" => Some(handle_grades_add(state, req)),
        "grades.summary" => Some(handle_grades_summary(state, req)),
        _ => None,
    }
}
