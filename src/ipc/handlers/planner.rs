use crate::ipc::error::ok;
use crate::ipc::helpers::{get_form_str, get_optional_str, to_json, HandlerErr};
use crate::ipc::types::{AppState, Request};
use crate::model::{Homework, Schedule, Weekday};
use crate::relations::{self, NewHomework, NewSchedule};
use crate::views;
use serde_json::json;

fn schedules_list(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let all: Vec<Schedule> = state.store.load();
    let picked: Vec<&Schedule> = match (
        get_optional_str(params, "classId"),
        get_optional_str(params, "teacherId"),
    ) {
        (Some(class_id), _) => views::schedule_for_class(&all, class_id),
        (None, Some(teacher_id)) => views::schedule_for_teacher(&all, teacher_id),
        (None, None) => all.iter().collect(),
    };
    let by_day = views::group_by_day(picked.iter().copied());
    Ok(json!({
        "schedules": picked,
        "byDay": to_json(&by_day)?,
    }))
}

fn schedules_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let day_raw = get_form_str(params, "day");
    let day = Weekday::parse(day_raw)
        .ok_or_else(|| HandlerErr::bad_params(format!("unknown day: {}", day_raw)))?;
    let req = NewSchedule {
        class_id: get_form_str(params, "classId"),
        day,
        time: get_form_str(params, "time"),
        subject: get_form_str(params, "subject"),
        teacher_id: get_form_str(params, "teacherId"),
    };

    let mut data = state.store.load_dataset();
    let Some(entry) = relations::create_schedule(&mut data, req) else {
        return Ok(json!({ "created": false }));
    };
    state.store.save(&data.schedules)?;
    Ok(json!({ "created": true, "schedule": entry }))
}

fn homeworks_list(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let all: Vec<Homework> = state.store.load();
    let picked: Vec<&Homework> = match (
        get_optional_str(params, "classId"),
        get_optional_str(params, "teacherId"),
    ) {
        (Some(class_id), _) => views::homework_for_class(&all, class_id),
        (None, Some(teacher_id)) => views::homework_for_teacher(&all, teacher_id),
        (None, None) => all.iter().collect(),
    };
    Ok(json!({ "homeworks": picked }))
}

fn homeworks_create(state: &mut AppState, params: &serde_json::Value) -> Result<serde_json::Value, HandlerErr> {
    let req = NewHomework {
        class_id: get_form_str(params, "classId"),
        subject: get_form_str(params, "subject"),
        description: get_form_str(params, "description"),
        deadline: get_form_str(params, "deadline"),
        teacher_id: get_form_str(params, "teacherId"),
    };

    let mut data = state.store.load_dataset();
    let Some(hw) = relations::create_homework(&mut data, req) else {
        return Ok(json!({ "created": false }));
    };
    state.store.save(&data.homeworks)?;
    Ok(json!({ "created": true, "homework": hw }))
}

fn handle_schedules_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match schedules_list(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_schedules_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match schedules_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_homeworks_list(state: &mut AppState, req: &Request) -> serde_json::Value {
    match homeworks_list(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

fn handle_homeworks_create(state: &mut AppState, req: &Request) -> serde_json::Value {
    match homeworks_create(state, &req.params) {
        Ok(result) => ok(&req.id, result),
        Err(error) => error.response(&req.id),
    }
}

pub fn try_handle(state: &mut AppState, req: &Request) -> Option<serde_json::Value> {
    match req.method.as_str() {
        "schedules.list" => Some(handle_schedules_list(state, req)),
        "schedules.create" => Some(handle_schedules_create(state, req)),
        "homeworks.list" => Some(handle_homeworks_list(state, req)),
        "homeworks.create" => Some(handle_homeworks_create(state, req)),
        _ => None,
    }
}
