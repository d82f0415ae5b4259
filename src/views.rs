use crate::calc::{self, Average, GradeSummary, Tier};
use crate::model::{
    Class, Dataset, Homework, Identity, Parent, Role, Schedule, Student, Teacher, Weekday,
};
use serde::Serialize;

pub fn schedule_for_class<'a>(schedules: &'a [Schedule], class_id: &str) -> Vec<&'a Schedule> {
    schedules.iter().filter(|s| s.class_id == class_id).collect()
}

pub fn homework_for_class<'a>(homeworks: &'a [Homework], class_id: &str) -> Vec<&'a Homework> {
    homeworks.iter().filter(|h| h.class_id == class_id).collect()
}

pub fn schedule_for_teacher<'a>(schedules: &'a [Schedule], teacher_id: &str) -> Vec<&'a Schedule> {
    schedules.iter().filter(|s| s.teacher_id == teacher_id).collect()
}

pub fn homework_for_teacher<'a>(homeworks: &'a [Homework], teacher_id: &str) -> Vec<&'a Homework> {
    homeworks.iter().filter(|h| h.teacher_id == teacher_id).collect()
}

pub fn classes_for_teacher<'a>(classes: &'a [Class], teacher: &Teacher) -> Vec<&'a Class> {
    classes
        .iter()
        .filter(|c| teacher.class_ids.contains(&c.id))
        .collect()
}

pub fn students_for_classes<'a>(students: &'a [Student], class_ids: &[String]) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| class_ids.contains(&s.class_id))
        .collect()
}

pub fn children_for_parent<'a>(students: &'a [Student], parent: &Parent) -> Vec<&'a Student> {
    students
        .iter()
        .filter(|s| parent.children_ids.contains(&s.id))
        .collect()
}

#[derive(Debug, Clone, Serialize)]
pub struct DaySchedule<'a> {
    pub day: Weekday,
    pub entries: Vec<&'a Schedule>,
}

/// Buckets entries Monday..Friday. Days without entries are left out.
pub fn group_by_day<'a, I>(schedules: I) -> Vec<DaySchedule<'a>>
where
    I: IntoIterator<Item = &'a Schedule>,
{
    let all: Vec<&Schedule> = schedules.into_iter().collect();
    Weekday::ALL
        .into_iter()
        .filter_map(|day| {
            let entries: Vec<&Schedule> = all.iter().copied().filter(|s| s.day == day).collect();
            if entries.is_empty() {
                None
            } else {
                Some(DaySchedule { day, entries })
            }
        })
        .collect()
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentRow<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub class_id: &'a str,
    pub class_name: Option<&'a str>,
    pub average: Average,
    pub tier: Option<Tier>,
}

fn student_row<'a>(data: &'a Dataset, s: &'a Student) -> StudentRow<'a> {
    let average = calc::overall_average(&s.grades);
    StudentRow {
        id: &s.id,
        name: &s.name,
        class_id: &s.class_id,
        class_name: data.class(&s.class_id).map(|c| c.name.as_str()),
        average,
        tier: average.tier(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClassSummary<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub grade: i64,
    pub student_count: usize,
}

impl<'a> From<&'a Class> for ClassSummary<'a> {
    fn from(c: &'a Class) -> Self {
        ClassSummary {
            id: &c.id,
            name: &c.name,
            grade: c.grade,
            student_count: c.students.len(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChildView<'a> {
    pub student: StudentRow<'a>,
    pub class: Option<ClassSummary<'a>>,
    pub schedule: Vec<DaySchedule<'a>>,
    pub homeworks: Vec<&'a Homework>,
    pub grades: GradeSummary,
}

/// What each role sees after login.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "role", rename_all = "lowercase")]
pub enum Dashboard<'a> {
    Admin {
        classes: Vec<ClassSummary<'a>>,
        students: Vec<StudentRow<'a>>,
        schedules: Vec<&'a Schedule>,
        homeworks: Vec<&'a Homework>,
    },
    #[serde(rename_all = "camelCase")]
    Teacher {
        classes: Vec<ClassSummary<'a>>,
        schedule: Vec<DaySchedule<'a>>,
        homeworks: Vec<&'a Homework>,
        students: Vec<StudentRow<'a>>,
    },
    #[serde(rename_all = "camelCase")]
    Student {
        class: Option<ClassSummary<'a>>,
        schedule: Vec<DaySchedule<'a>>,
        homeworks: Vec<&'a Homework>,
        grades: GradeSummary,
    },
    #[serde(rename_all = "camelCase")]
    Parent {
        children: Vec<StudentRow<'a>>,
        selected: Option<ChildView<'a>>,
    },
}

/// Builds the dashboard for `identity`. A record that has since been deleted
/// yields an empty view rather than an error.
pub fn dashboard<'a>(
    identity: &Identity,
    data: &'a Dataset,
    selected_child: Option<&str>,
) -> Dashboard<'a> {
    match identity.role {
        Role::Admin => Dashboard::Admin {
            classes: data.classes.iter().map(ClassSummary::from).collect(),
            students: data.students.iter().map(|s| student_row(data, s)).collect(),
            schedules: data.schedules.iter().collect(),
            homeworks: data.homeworks.iter().collect(),
        },
        Role::Teacher => teacher_dashboard(data, data.teacher(&identity.id)),
        Role::Student => match data.student(&identity.id) {
            Some(s) => Dashboard::Student {
                class: data.class(&s.class_id).map(ClassSummary::from),
                schedule: group_by_day(schedule_for_class(&data.schedules, &s.class_id)),
                homeworks: homework_for_class(&data.homeworks, &s.class_id),
                grades: calc::grade_summary(&s.grades),
            },
            None => Dashboard::Student {
                class: None,
                schedule: Vec::new(),
                homeworks: Vec::new(),
                grades: calc::grade_summary(&Default::default()),
            },
        },
        Role::Parent => parent_dashboard(data, data.parent(&identity.id), selected_child),
    }
}

fn teacher_dashboard<'a>(data: &'a Dataset, teacher: Option<&'a Teacher>) -> Dashboard<'a> {
    let Some(teacher) = teacher else {
        return Dashboard::Teacher {
            classes: Vec::new(),
            schedule: Vec::new(),
            homeworks: Vec::new(),
            students: Vec::new(),
        };
    };
    Dashboard::Teacher {
        classes: classes_for_teacher(&data.classes, teacher)
            .into_iter()
            .map(ClassSummary::from)
            .collect(),
        schedule: group_by_day(schedule_for_teacher(&data.schedules, &teacher.id)),
        homeworks: homework_for_teacher(&data.homeworks, &teacher.id),
        students: students_for_classes(&data.students, &teacher.class_ids)
            .into_iter()
            .map(|s| student_row(data, s))
            .collect(),
    }
}

fn parent_dashboard<'a>(
    data: &'a Dataset,
    parent: Option<&'a Parent>,
    selected_child: Option<&str>,
) -> Dashboard<'a> {
    let children = parent
        .map(|p| children_for_parent(&data.students, p))
        .unwrap_or_default();
    let chosen = match selected_child {
        Some(id) => children.iter().copied().find(|s| s.id == id),
        None => children.first().copied(),
    };
    let selected = chosen.map(|child| ChildView {
        student: student_row(data, child),
        class: data.class(&child.class_id).map(ClassSummary::from),
        schedule: group_by_day(schedule_for_class(&data.schedules, &child.class_id)),
        homeworks: homework_for_class(&data.homeworks, &child.class_id),
        grades: calc::grade_summary(&child.grades),
    });
    Dashboard::Parent {
        children: children.into_iter().map(|s| student_row(data, s)).collect(),
        selected,
    }
}
