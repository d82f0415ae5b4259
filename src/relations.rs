//! Create/update/delete over a loaded [`Dataset`], keeping the reverse
//! references `Class.students` and `Parent.childrenIds` / `Student.parentId`
//! in step with the forward ones.
//!
//! Creates and updates only accept references to records that exist. Deletes
//! do not cascade: removing a student leaves parents' `childrenIds`
//! untouched, and removing a teacher or parent leaves schedules, homework and
//! classes pointing at the old id. Readers treat those as dangling references.

use crate::calc::is_valid_mark;
use crate::error::{SchoolError, SchoolResult};
use crate::model::{
    Class, Dataset, Grades, Homework, Parent, Schedule, Student, Teacher, Weekday,
};
use crate::store::Record;
use serde::Deserialize;
use uuid::Uuid;

/// Timestamp-derived id, unique within `existing`.
pub fn next_id<'a, T: Record + 'a>(existing: impl IntoIterator<Item = &'a T>) -> String {
    let base = chrono::Utc::now().timestamp_millis().to_string();
    let taken: Vec<&str> = existing.into_iter().map(|r| r.id()).collect();
    if !taken.contains(&base.as_str()) {
        return base;
    }
    let suffix = Uuid::new_v4().simple().to_string();
    format!("{}-{}", base, &suffix[..8])
}

fn present(values: &[&str]) -> bool {
    values.iter().all(|v| !v.trim().is_empty())
}

fn all_exist<T: Record>(records: &[T], ids: &[String]) -> bool {
    ids.iter().all(|id| records.iter().any(|r| r.id() == id))
}

fn first_missing<'a, T: Record>(records: &[T], ids: &'a [String]) -> Option<&'a str> {
    ids.iter()
        .map(|id| id.as_str())
        .find(|id| !records.iter().any(|r| r.id() == *id))
}

/// Puts `student_id` on the roster of `class_id` and off every other roster.
fn enroll(classes: &mut [Class], student_id: &str, class_id: &str) {
    for class in classes.iter_mut() {
        if class.id == class_id {
            if !class.students.iter().any(|s| s == student_id) {
                class.students.push(student_id.to_string());
            }
        } else {
            class.students.retain(|s| s != student_id);
        }
    }
}

/// A student has at most one parent: linking moves the child off any other
/// parent's `childrenIds`.
fn attach_child(data: &mut Dataset, parent_id: &str, student_id: &str) {
    for parent in data.parents.iter_mut() {
        if parent.id == parent_id {
            if !parent.children_ids.iter().any(|c| c == student_id) {
                parent.children_ids.push(student_id.to_string());
            }
        } else {
            parent.children_ids.retain(|c| c != student_id);
        }
    }
    if let Some(student) = data.students.iter_mut().find(|s| s.id == student_id) {
        student.parent_id = Some(parent_id.to_string());
    }
}

/// Creates a class, optionally with a class teacher. The class is also added
/// to that teacher's `classIds`.
pub fn create_class(
    data: &mut Dataset,
    name: &str,
    grade: i64,
    teacher_id: Option<&str>,
) -> Option<Class> {
    if !present(&[name]) {
        return None;
    }
    if let Some(tid) = teacher_id {
        data.teacher(tid)?;
    }
    let class = Class {
        id: next_id(&data.classes),
        name: name.trim().to_string(),
        grade,
        students: Vec::new(),
        teacher_id: teacher_id.map(str::to_string),
    };
    if let Some(teacher) = data
        .teachers
        .iter_mut()
        .find(|t| Some(t.id.as_str()) == teacher_id)
    {
        teacher.class_ids.push(class.id.clone());
    }
    data.classes.push(class.clone());
    Some(class)
}

#[derive(Debug, Clone)]
pub struct NewStudent<'a> {
    pub name: &'a str,
    pub class_id: &'a str,
    pub login: &'a str,
    pub password: &'a str,
}

/// Appends the student and registers it on its class. The caller saves both
/// the student and class collections.
pub fn create_student(data: &mut Dataset, req: NewStudent<'_>) -> Option<Student> {
    if !present(&[req.name, req.class_id, req.login, req.password]) {
        return None;
    }
    data.class(req.class_id)?;
    let student = Student {
        id: next_id(&data.students),
        name: req.name.trim().to_string(),
        class_id: req.class_id.to_string(),
        grades: Grades::new(),
        login: req.login.to_string(),
        password: req.password.to_string(),
        parent_id: None,
    };
    data.students.push(student.clone());
    enroll(&mut data.classes, &student.id, &student.class_id);
    Some(student)
}

pub fn delete_student(data: &mut Dataset, id: &str) -> SchoolResult<Student> {
    let pos = data
        .students
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| SchoolError::not_found("student", id))?;
    let removed = data.students.remove(pos);
    for class in data.classes.iter_mut() {
        class.students.retain(|sid| sid != id);
    }
    Ok(removed)
}

#[derive(Debug, Clone)]
pub struct NewTeacher<'a> {
    pub name: &'a str,
    pub subjects: Vec<String>,
    pub class_ids: Vec<String>,
    pub login: &'a str,
    pub password: &'a str,
}

pub fn create_teacher(data: &mut Dataset, req: NewTeacher<'_>) -> Option<Teacher> {
    if !present(&[req.name, req.login, req.password]) || req.subjects.is_empty() {
        return None;
    }
    if !all_exist(&data.classes, &req.class_ids) {
        return None;
    }
    let teacher = Teacher {
        id: next_id(&data.teachers),
        name: req.name.trim().to_string(),
        subjects: req.subjects,
        class_ids: req.class_ids,
        login: req.login.to_string(),
        password: req.password.to_string(),
    };
    data.teachers.push(teacher.clone());
    Some(teacher)
}

#[derive(Debug, Clone)]
pub struct NewParent<'a> {
    pub name: &'a str,
    pub children_ids: Vec<String>,
    pub login: &'a str,
    pub password: &'a str,
}

/// Appends the parent and points every listed child at it.
pub fn create_parent(data: &mut Dataset, req: NewParent<'_>) -> Option<Parent> {
    if !present(&[req.name, req.login, req.password]) {
        return None;
    }
    if !all_exist(&data.students, &req.children_ids) {
        return None;
    }
    let id = next_id(&data.parents);
    data.parents.push(Parent {
        id: id.clone(),
        name: req.name.trim().to_string(),
        children_ids: Vec::new(),
        login: req.login.to_string(),
        password: req.password.to_string(),
    });
    for child in &req.children_ids {
        attach_child(data, &id, child);
    }
    data.parent(&id).cloned()
}

#[derive(Debug, Clone)]
pub struct NewSchedule<'a> {
    pub class_id: &'a str,
    pub day: Weekday,
    pub time: &'a str,
    pub subject: &'a str,
    pub teacher_id: &'a str,
}

pub fn create_schedule(data: &mut Dataset, req: NewSchedule<'_>) -> Option<Schedule> {
    if !present(&[req.class_id, req.time, req.subject, req.teacher_id]) {
        return None;
    }
    data.class(req.class_id)?;
    data.teacher(req.teacher_id)?;
    let entry = Schedule {
        id: next_id(&data.schedules),
        class_id: req.class_id.to_string(),
        day: req.day,
        time: req.time.trim().to_string(),
        subject: req.subject.trim().to_string(),
        teacher_id: req.teacher_id.to_string(),
    };
    data.schedules.push(entry.clone());
    Some(entry)
}

#[derive(Debug, Clone)]
pub struct NewHomework<'a> {
    pub class_id: &'a str,
    pub subject: &'a str,
    pub description: &'a str,
    pub deadline: &'a str,
    pub teacher_id: &'a str,
}

pub fn create_homework(data: &mut Dataset, req: NewHomework<'_>) -> Option<Homework> {
    if !present(&[
        req.class_id,
        req.subject,
        req.description,
        req.deadline,
        req.teacher_id,
    ]) {
        return None;
    }
    data.class(req.class_id)?;
    data.teacher(req.teacher_id)?;
    let hw = Homework {
        id: next_id(&data.homeworks),
        class_id: req.class_id.to_string(),
        subject: req.subject.trim().to_string(),
        description: req.description.trim().to_string(),
        deadline: req.deadline.trim().to_string(),
        teacher_id: req.teacher_id.to_string(),
    };
    data.homeworks.push(hw.clone());
    Some(hw)
}

// Partial updates: a `None` field keeps the stored value. A new `classId`
// moves the student between rosters and a new `parentId` moves it between
// parents' `childrenIds`.

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentPatch {
    pub name: Option<String>,
    pub class_id: Option<String>,
    pub grades: Option<Grades>,
    pub login: Option<String>,
    pub password: Option<String>,
    pub parent_id: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherPatch {
    pub name: Option<String>,
    pub subjects: Option<Vec<String>>,
    pub class_ids: Option<Vec<String>>,
    pub login: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ParentPatch {
    pub name: Option<String>,
    pub children_ids: Option<Vec<String>>,
    pub login: Option<String>,
    pub password: Option<String>,
}

fn merge<T>(slot: &mut T, value: Option<T>) {
    if let Some(v) = value {
        *slot = v;
    }
}

/// The caller saves students, classes and parents.
pub fn update_student(data: &mut Dataset, id: &str, patch: StudentPatch) -> SchoolResult<Student> {
    let pos = data
        .students
        .iter()
        .position(|s| s.id == id)
        .ok_or_else(|| SchoolError::not_found("student", id))?;
    if let Some(class_id) = patch.class_id.as_deref() {
        data.class(class_id)
            .ok_or_else(|| SchoolError::not_found("class", class_id))?;
    }
    if let Some(parent_id) = patch.parent_id.as_deref() {
        data.parent(parent_id)
            .ok_or_else(|| SchoolError::not_found("parent", parent_id))?;
    }

    let student = &mut data.students[pos];
    merge(&mut student.name, patch.name);
    merge(&mut student.class_id, patch.class_id);
    merge(&mut student.grades, patch.grades);
    merge(&mut student.login, patch.login);
    merge(&mut student.password, patch.password);
    let class_id = student.class_id.clone();

    enroll(&mut data.classes, id, &class_id);
    if let Some(parent_id) = patch.parent_id {
        attach_child(data, &parent_id, id);
    }
    Ok(data.students[pos].clone())
}

pub fn update_teacher(data: &mut Dataset, id: &str, patch: TeacherPatch) -> SchoolResult<Teacher> {
    if let Some(missing) = patch
        .class_ids
        .as_deref()
        .and_then(|ids| first_missing(&data.classes, ids))
    {
        return Err(SchoolError::not_found("class", missing));
    }
    let teacher = data
        .teachers
        .iter_mut()
        .find(|t| t.id == id)
        .ok_or_else(|| SchoolError::not_found("teacher", id))?;
    merge(&mut teacher.name, patch.name);
    merge(&mut teacher.subjects, patch.subjects);
    merge(&mut teacher.class_ids, patch.class_ids);
    merge(&mut teacher.login, patch.login);
    merge(&mut teacher.password, patch.password);
    Ok(teacher.clone())
}

/// A new `childrenIds` list unlinks dropped children that still point here
/// and links the listed ones. The caller saves parents and students.
pub fn update_parent(data: &mut Dataset, id: &str, patch: ParentPatch) -> SchoolResult<Parent> {
    if let Some(missing) = patch
        .children_ids
        .as_deref()
        .and_then(|ids| first_missing(&data.students, ids))
    {
        return Err(SchoolError::not_found("student", missing));
    }
    let parent = data
        .parents
        .iter_mut()
        .find(|p| p.id == id)
        .ok_or_else(|| SchoolError::not_found("parent", id))?;
    merge(&mut parent.name, patch.name);
    merge(&mut parent.login, patch.login);
    merge(&mut parent.password, patch.password);

    if let Some(children) = patch.children_ids {
        let previous = std::mem::take(&mut parent.children_ids);
        for student in data
            .students
            .iter_mut()
            .filter(|s| previous.contains(&s.id) && !children.contains(&s.id))
        {
            if student.parent_id.as_deref() == Some(id) {
                student.parent_id = None;
            }
        }
        for child in &children {
            attach_child(data, id, child);
        }
    }
    data.parent(id)
        .cloned()
        .ok_or_else(|| SchoolError::not_found("parent", id))
}

pub fn delete_teacher(data: &mut Dataset, id: &str) -> SchoolResult<Teacher> {
    let pos = data
        .teachers
        .iter()
        .position(|t| t.id == id)
        .ok_or_else(|| SchoolError::not_found("teacher", id))?;
    Ok(data.teachers.remove(pos))
}

pub fn delete_parent(data: &mut Dataset, id: &str) -> SchoolResult<Parent> {
    let pos = data
        .parents
        .iter()
        .position(|p| p.id == id)
        .ok_or_else(|| SchoolError::not_found("parent", id))?;
    Ok(data.parents.remove(pos))
}

/// Appends `mark` to the student's marks for `subject`.
pub fn add_grade(
    data: &mut Dataset,
    student_id: &str,
    subject: &str,
    mark: i64,
) -> SchoolResult<Student> {
    let subject = subject.trim();
    if subject.is_empty() {
        return Err(SchoolError::BadParams("subject must not be empty".into()));
    }
    if !is_valid_mark(mark) {
        return Err(SchoolError::BadParams(format!(
            "mark must be in 2..=5, got {}",
            mark
        )));
    }
    let student = data
        .students
        .iter_mut()
        .find(|s| s.id == student_id)
        .ok_or_else(|| SchoolError::not_found("student", student_id))?;
    student
        .grades
        .entry(subject.to_string())
        .or_default()
        .push(mark);
    Ok(student.clone())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn with_class() -> Dataset {
        Dataset {
            classes: vec![Class {
                id: "1".into(),
                name: "11A".into(),
                grade: 11,
                students: vec![],
                teacher_id: None,
            }],
            ..Default::default()
        }
    }

    fn with_two_classes() -> Dataset {
        let mut data = with_class();
        data.classes.push(Class {
            id: "2".into(),
            name: "10B".into(),
            grade: 10,
            students: vec![],
            teacher_id: None,
        });
        data
    }

    fn anna(data: &mut Dataset) -> Teacher {
        create_teacher(
            data,
            NewTeacher {
                name: "Anna",
                subjects: vec!["Math".into()],
                class_ids: vec!["1".into()],
                login: "anna",
                password: "pw",
            },
        )
        .expect("teacher created")
    }

    fn parent_of(data: &mut Dataset, login: &str, children: &[&Student]) -> Parent {
        create_parent(
            data,
            NewParent {
                name: "Maria",
                children_ids: children.iter().map(|s| s.id.clone()).collect(),
                login,
                password: "pw",
            },
        )
        .expect("parent created")
    }

    fn ivan(data: &mut Dataset) -> Student {
        create_student(
            data,
            NewStudent {
                name: "Ivan",
                class_id: "1",
                login: "ivan",
                password: "pw",
            },
        )
        .expect("student created")
    }

    #[test]
    fn create_student_registers_on_class() {
        let mut data = with_class();
        let s = ivan(&mut data);

        assert_eq!(data.students.len(), 1);
        assert_eq!(data.students[0].name, "Ivan");
        assert_eq!(data.students[0].class_id, "1");
        assert!(data.students[0].grades.is_empty());
        assert_eq!(data.students[0].login, "ivan");
        assert_eq!(data.students[0].password, "pw");
        assert_eq!(data.students[0].parent_id, None);
        assert_eq!(data.classes[0].students, vec![s.id]);
    }

    #[test]
    fn student_ids_stay_unique_within_one_millisecond() {
        let mut data = with_class();
        let a = ivan(&mut data);
        let b = ivan(&mut data);
        assert_ne!(a.id, b.id);
        assert_eq!(data.classes[0].students, vec![a.id, b.id]);
    }

    #[test]
    fn incomplete_student_is_a_no_op() {
        let mut data = with_class();
        let created = create_student(
            &mut data,
            NewStudent {
                name: "  ",
                class_id: "1",
                login: "x",
                password: "y",
            },
        );
        assert!(created.is_none());
        assert!(data.students.is_empty());
        assert!(data.classes[0].students.is_empty());
    }

    #[test]
    fn delete_student_leaves_parent_children_alone() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let p = create_parent(
            &mut data,
            NewParent {
                name: "Maria",
                children_ids: vec![s.id.clone()],
                login: "maria",
                password: "pw",
            },
        )
        .expect("parent created");
        assert_eq!(data.students[0].parent_id.as_deref(), Some(p.id.as_str()));

        delete_student(&mut data, &s.id).expect("delete");
        assert!(data.students.is_empty());
        assert!(data.classes[0].students.is_empty());
        assert_eq!(data.parents[0].children_ids, vec![s.id]);
    }

    #[test]
    fn delete_unknown_student_is_not_found() {
        let mut data = with_class();
        let err = delete_student(&mut data, "nope").expect_err("missing");
        assert_eq!(err.code(), "not_found");
    }

    #[test]
    fn add_grade_appends_in_order() {
        let mut data = with_class();
        let s = ivan(&mut data);
        add_grade(&mut data, &s.id, "Math", 5).expect("grade");
        let after = add_grade(&mut data, &s.id, "Math", 3).expect("grade");
        assert_eq!(after.grades["Math"], vec![5, 3]);
        assert_eq!(crate::calc::average(&after.grades["Math"]).to_string(), "4.0");
    }

    #[test]
    fn add_grade_rejects_out_of_range_mark() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let err = add_grade(&mut data, &s.id, "Math", 7).expect_err("range");
        assert_eq!(err.code(), "bad_params");
        assert!(data.students[0].grades.is_empty());
    }

    #[test]
    fn update_is_a_shallow_merge() {
        let mut data = with_class();
        let s = ivan(&mut data);
        add_grade(&mut data, &s.id, "Math", 5).expect("grade");
        add_grade(&mut data, &s.id, "Art", 4).expect("grade");

        let mut replacement = Grades::new();
        replacement.insert("History".into(), vec![3]);
        let updated = update_student(
            &mut data,
            &s.id,
            StudentPatch {
                name: Some("Ivan P.".into()),
                grades: Some(replacement.clone()),
                ..Default::default()
            },
        )
        .expect("update");
        assert_eq!(updated.name, "Ivan P.");
        assert_eq!(updated.login, "ivan");
        assert_eq!(updated.grades, replacement);
    }

    #[test]
    fn teacher_update_and_delete_do_not_cascade() {
        let mut data = with_class();
        let t = create_teacher(
            &mut data,
            NewTeacher {
                name: "Anna",
                subjects: vec!["Math".into()],
                class_ids: vec!["1".into()],
                login: "anna",
                password: "pw",
            },
        )
        .expect("teacher");
        create_schedule(
            &mut data,
            NewSchedule {
                class_id: "1",
                day: Weekday::Monday,
                time: "08:30",
                subject: "Math",
                teacher_id: &t.id,
            },
        )
        .expect("schedule");

        let updated = update_teacher(
            &mut data,
            &t.id,
            TeacherPatch {
                subjects: Some(vec!["Math".into(), "Physics".into()]),
                ..Default::default()
            },
        )
        .expect("update");
        assert_eq!(updated.class_ids, vec!["1".to_string()]);
        assert_eq!(updated.subjects.len(), 2);

        delete_teacher(&mut data, &t.id).expect("delete");
        assert!(data.teachers.is_empty());
        assert_eq!(data.schedules.len(), 1);
        assert_eq!(data.schedules[0].teacher_id, t.id);
    }

    #[test]
    fn parent_update_and_delete() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let p = create_parent(
            &mut data,
            NewParent {
                name: "Maria",
                children_ids: vec![],
                login: "maria",
                password: "pw",
            },
        )
        .expect("parent");
        let updated = update_parent(
            &mut data,
            &p.id,
            ParentPatch {
                children_ids: Some(vec![s.id.clone()]),
                ..Default::default()
            },
        )
        .expect("update");
        assert_eq!(updated.children_ids, vec![s.id.clone()]);
        assert_eq!(updated.name, "Maria");

        assert_eq!(data.students[0].parent_id.as_deref(), Some(p.id.as_str()));

        delete_parent(&mut data, &p.id).expect("delete");
        assert!(data.parents.is_empty());
        assert_eq!(data.students[0].parent_id.as_deref(), Some(p.id.as_str()));
    }

    #[test]
    fn homework_requires_every_field() {
        let mut data = with_class();
        let t = anna(&mut data);
        let missing = create_homework(
            &mut data,
            NewHomework {
                class_id: "1",
                subject: "Math",
                description: "",
                deadline: "2026-11-01",
                teacher_id: &t.id,
            },
        );
        assert!(missing.is_none());
        let hw = create_homework(
            &mut data,
            NewHomework {
                class_id: "1",
                subject: "Math",
                description: "Exercises 1-10",
                deadline: "2026-11-01",
                teacher_id: &t.id,
            },
        )
        .expect("homework");
        assert_eq!(data.homeworks, vec![hw]);
    }

    #[test]
    fn moving_a_student_updates_both_rosters() {
        let mut data = with_two_classes();
        let s = ivan(&mut data);
        let moved = update_student(
            &mut data,
            &s.id,
            StudentPatch {
                class_id: Some("2".into()),
                ..Default::default()
            },
        )
        .expect("move");

        assert_eq!(moved.class_id, "2");
        assert!(data.classes[0].students.is_empty());
        assert_eq!(data.classes[1].students, vec![s.id.clone()]);

        // Moving onto the same class again keeps a single roster entry.
        update_student(
            &mut data,
            &s.id,
            StudentPatch {
                class_id: Some("2".into()),
                ..Default::default()
            },
        )
        .expect("same class");
        assert_eq!(data.classes[1].students, vec![s.id]);
    }

    #[test]
    fn moving_to_unknown_class_changes_nothing() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let err = update_student(
            &mut data,
            &s.id,
            StudentPatch {
                name: Some("Renamed".into()),
                class_id: Some("missing".into()),
                ..Default::default()
            },
        )
        .expect_err("unknown class");
        assert_eq!(err.code(), "not_found");
        assert_eq!(data.students[0].name, "Ivan");
        assert_eq!(data.students[0].class_id, "1");
        assert_eq!(data.classes[0].students, vec![s.id]);
    }

    #[test]
    fn replacing_children_relinks_students() {
        let mut data = with_class();
        let s1 = ivan(&mut data);
        let s2 = ivan(&mut data);
        let p = parent_of(&mut data, "maria", &[&s1]);

        let updated = update_parent(
            &mut data,
            &p.id,
            ParentPatch {
                children_ids: Some(vec![s2.id.clone()]),
                ..Default::default()
            },
        )
        .expect("update");

        assert_eq!(updated.children_ids, vec![s2.id.clone()]);
        assert_eq!(data.student(&s1.id).and_then(|s| s.parent_id.clone()), None);
        assert_eq!(
            data.student(&s2.id).and_then(|s| s.parent_id.clone()),
            Some(p.id)
        );
    }

    #[test]
    fn unknown_child_in_parent_patch_is_not_found() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let p = parent_of(&mut data, "maria", &[&s]);
        let err = update_parent(
            &mut data,
            &p.id,
            ParentPatch {
                children_ids: Some(vec!["ghost".into()]),
                ..Default::default()
            },
        )
        .expect_err("unknown child");
        assert_eq!(err.code(), "not_found");
        assert_eq!(data.parents[0].children_ids, vec![s.id.clone()]);
        assert_eq!(data.students[0].parent_id, Some(p.id));
    }

    #[test]
    fn student_parent_patch_moves_child_between_parents() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let first = parent_of(&mut data, "maria", &[&s]);
        let second = parent_of(&mut data, "oleg", &[]);

        update_student(
            &mut data,
            &s.id,
            StudentPatch {
                parent_id: Some(second.id.clone()),
                ..Default::default()
            },
        )
        .expect("relink");

        assert_eq!(data.students[0].parent_id, Some(second.id.clone()));
        assert_eq!(data.parent(&first.id).map(|p| p.children_ids.len()), Some(0));
        assert_eq!(
            data.parent(&second.id).map(|p| p.children_ids.clone()),
            Some(vec![s.id])
        );
    }

    #[test]
    fn creates_reject_references_to_missing_records() {
        let mut data = with_class();
        let stray = create_student(
            &mut data,
            NewStudent {
                name: "Ivan",
                class_id: "ZZZ",
                login: "ivan",
                password: "pw",
            },
        );
        assert!(stray.is_none());
        assert!(data.students.is_empty());

        let teacher = create_teacher(
            &mut data,
            NewTeacher {
                name: "Anna",
                subjects: vec!["Math".into()],
                class_ids: vec!["1".into(), "ZZZ".into()],
                login: "anna",
                password: "pw",
            },
        );
        assert!(teacher.is_none());

        let parent = create_parent(
            &mut data,
            NewParent {
                name: "Maria",
                children_ids: vec!["ghost".into()],
                login: "maria",
                password: "pw",
            },
        );
        assert!(parent.is_none());

        assert!(create_class(&mut data, "7C", 7, Some("ghost")).is_none());
        assert_eq!(data.classes.len(), 1);
        assert!(data.teachers.is_empty());
        assert!(data.parents.is_empty());
    }

    #[test]
    fn class_teacher_is_recorded_both_ways() {
        let mut data = with_class();
        let t = anna(&mut data);
        let class = create_class(&mut data, "7C", 7, Some(&t.id)).expect("class");
        assert_eq!(class.teacher_id.as_deref(), Some(t.id.as_str()));
        assert_eq!(
            data.teacher(&t.id).map(|t| t.class_ids.clone()),
            Some(vec!["1".to_string(), class.id])
        );
    }

    #[test]
    fn new_parent_takes_child_from_previous_parent() {
        let mut data = with_class();
        let s = ivan(&mut data);
        let first = parent_of(&mut data, "maria", &[&s, &s]);
        assert_eq!(first.children_ids, vec![s.id.clone()]);

        let second = parent_of(&mut data, "oleg", &[&s]);
        assert_eq!(data.parent(&first.id).map(|p| p.children_ids.len()), Some(0));
        assert_eq!(data.students[0].parent_id, Some(second.id));
    }
}
