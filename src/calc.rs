use crate::model::Grades;
use serde::{Serialize, Serializer};
use std::fmt;

pub const MIN_MARK: i64 = 2;
pub const MAX_MARK: i64 = 5;

/// Averages at or above this are shown in the good tier.
pub const GOOD_TIER_THRESHOLD: f64 = 4.0;

pub fn is_valid_mark(mark: i64) -> bool {
    (MIN_MARK..=MAX_MARK).contains(&mark)
}

/// Half-up rounding to one decimal place: `Int(10*x + 0.5) / 10`.
pub fn round_off_1_decimal(x: f64) -> f64 {
    ((10.0 * x) + 0.5).floor() / 10.0
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Average {
    NotAvailable,
    Value(f64),
}

impl Average {
    pub fn value(self) -> Option<f64> {
        match self {
            Average::NotAvailable => None,
            Average::Value(v) => Some(v),
        }
    }

    pub fn tier(self) -> Option<Tier> {
        self.value().map(Tier::of_average)
    }
}

impl fmt::Display for Average {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Average::NotAvailable => f.write_str("N/A"),
            Average::Value(v) => write!(f, "{:.1}", v),
        }
    }
}

impl Serialize for Average {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Tier {
    Good,
    Pass,
}

impl Tier {
    pub fn of_average(avg: f64) -> Self {
        if avg >= GOOD_TIER_THRESHOLD {
            Tier::Good
        } else {
            Tier::Pass
        }
    }

    pub fn of_mark(mark: i64) -> Self {
        Self::of_average(mark as f64)
    }
}

pub fn average(marks: &[i64]) -> Average {
    average_iter(marks.iter().copied())
}

/// All marks across all subjects, in subject order.
pub fn overall_average(grades: &Grades) -> Average {
    average_iter(grades.values().flatten().copied())
}

fn average_iter<I>(marks: I) -> Average
where
    I: IntoIterator<Item = i64>,
{
    let mut sum: i64 = 0;
    let mut count: usize = 0;
    for m in marks {
        sum += m;
        count += 1;
    }
    if count == 0 {
        return Average::NotAvailable;
    }
    Average::Value(round_off_1_decimal(sum as f64 / count as f64))
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MarkBadge {
    pub mark: i64,
    pub tier: Tier,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectAverage {
    pub subject: String,
    pub marks: Vec<MarkBadge>,
    pub average: Average,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GradeSummary {
    pub subjects: Vec<SubjectAverage>,
    pub overall: Average,
    pub tier: Option<Tier>,
}

pub fn subject_averages(grades: &Grades) -> Vec<SubjectAverage> {
    grades
        .iter()
        .map(|(subject, marks)| SubjectAverage {
            subject: subject.clone(),
            marks: marks
                .iter()
                .map(|&mark| MarkBadge {
                    mark,
                    tier: Tier::of_mark(mark),
                })
                .collect(),
            average: average(marks),
        })
        .collect()
}

pub fn grade_summary(grades: &Grades) -> GradeSummary {
    let overall = overall_average(grades);
    GradeSummary {
        subjects: subject_averages(grades),
        overall,
        tier: overall.tier(),
    }
}
