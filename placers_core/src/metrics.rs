//! Dashboard counters and ratios over the student collection.

use serde::Serialize;

use crate::model::{PipelineStatus, Student};

/// Integer percentage, rounded half-up; zero when `total` is zero.
#[must_use]
#[expect(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    reason = "dashboard counts stay far below f64 mantissa range and results lie in 0..=100"
)]
pub fn percentage(part: usize, total: usize) -> u32 {
    if total == 0 {
        return 0;
    }
    ((part as f64 / total as f64) * 100.0).round() as u32
}

#[must_use]
pub fn count_with_status(students: &[Student], status: PipelineStatus) -> usize {
    students
        .iter()
        .filter(|s| s.status == Some(status))
        .count()
}

/// Headline numbers on the placement-office overview.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary {
    pub total_students: usize,
    pub placed: usize,
    pub in_interview: usize,
    pub active_drives: usize,
    pub placement_rate: u32,
}

#[must_use]
pub fn summarize(students: &[Student], active_drives: usize) -> DashboardSummary {
    let placed = count_with_status(students, PipelineStatus::Selected);
    DashboardSummary {
        total_students: students.len(),
        placed,
        in_interview: count_with_status(students, PipelineStatus::Interview),
        active_drives,
        placement_rate: percentage(placed, students.len()),
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BranchPlacement {
    pub branch: String,
    pub placed: usize,
    pub total: usize,
    pub rate: u32,
}

/// Placed/total per branch, in the order the branches are given.
#[must_use]
pub fn placement_by_branch<S: AsRef<str>>(students: &[Student], branches: &[S]) -> Vec<BranchPlacement> {
    branches
        .iter()
        .map(|branch| {
            let branch = branch.as_ref();
            let in_branch = students
                .iter()
                .filter(|s| s.branch.as_deref() == Some(branch));
            let (total, placed) = in_branch.fold((0, 0), |(total, placed), s| {
                let selected = usize::from(s.status == Some(PipelineStatus::Selected));
                (total + 1, placed + selected)
            });
            BranchPlacement {
                branch: branch.to_string(),
                placed,
                total,
                rate: percentage(placed, total),
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CgpaBucket {
    pub label: &'static str,
    pub lo: f64,
    pub hi: f64,
    pub count: usize,
}

const CGPA_EDGES: [(&str, f64, f64); 4] = [
    ("6-7", 6.0, 7.0),
    ("7-8", 7.0, 8.0),
    ("8-9", 8.0, 9.0),
    ("9-10", 9.0, 10.0),
];

/// GPA histogram over fixed buckets. Buckets are `[lo, hi)` except the last,
/// which also takes a perfect 10.0. Students outside every bucket are not counted.
#[must_use]
pub fn cgpa_histogram(students: &[Student]) -> Vec<CgpaBucket> {
    let last = CGPA_EDGES.len() - 1;
    CGPA_EDGES
        .iter()
        .enumerate()
        .map(|(i, &(label, lo, hi))| {
            let count = students
                .iter()
                .filter_map(|s| s.cgpa)
                .filter(|&c| c >= lo && (c < hi || (i == last && c <= hi)))
                .count();
            CgpaBucket {
                label,
                lo,
                hi,
                count,
            }
        })
        .collect()
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FunnelStep {
    pub status: PipelineStatus,
    pub count: usize,
    pub percent: u32,
}

/// Count and share of students at each pipeline step, in pipeline order.
#[must_use]
pub fn status_funnel(students: &[Student]) -> Vec<FunnelStep> {
    PipelineStatus::STEPS
        .iter()
        .map(|&status| {
            let count = count_with_status(students, status);
            FunnelStep {
                status,
                count,
                percent: percentage(count, students.len()),
            }
        })
        .collect()
}
