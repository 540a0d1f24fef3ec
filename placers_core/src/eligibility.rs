//! Eligibility filtering for candidates and drives.
//!
//! All three predicates are conjunctive. An absent GPA, backlog count or branch
//! fails its predicate rather than defaulting to a neutral value.

use serde::{Deserialize, Serialize};

use crate::model::{BranchFilter, Drive, Student, UserProfile};

/// Number of eligible candidates shown in the placement-office table.
pub const DEFAULT_DISPLAY_CAP: usize = 10;

/// Academic metrics the filters look at.
pub trait Candidate {
    fn cgpa(&self) -> Option<f64>;
    fn backlogs(&self) -> Option<u32>;
    fn branch(&self) -> Option<&str>;
}

impl Candidate for Student {
    fn cgpa(&self) -> Option<f64> {
        self.cgpa
    }

    fn backlogs(&self) -> Option<u32> {
        self.backlogs
    }

    fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }
}

impl Candidate for UserProfile {
    fn cgpa(&self) -> Option<f64> {
        self.cgpa
    }

    fn backlogs(&self) -> Option<u32> {
        self.backlogs
    }

    fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }
}

/// Thresholds chosen in the placement-office criteria panel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EligibilityCriteria {
    pub min_cgpa: f64,
    pub max_backlogs: u32,
    pub branch: BranchFilter,
}

impl Default for EligibilityCriteria {
    fn default() -> Self {
        Self {
            min_cgpa: 6.0,
            max_backlogs: 0,
            branch: BranchFilter::All,
        }
    }
}

impl EligibilityCriteria {
    #[must_use]
    pub fn admits<C: Candidate + ?Sized>(&self, candidate: &C) -> bool {
        meets_cgpa(candidate.cgpa(), self.min_cgpa)
            && meets_backlogs(candidate.backlogs(), self.max_backlogs)
            && self.branch.admits(candidate.branch())
    }
}

fn meets_cgpa(cgpa: Option<f64>, min: f64) -> bool {
    // NaN compares false, so a corrupt value fails like an absent one.
    cgpa.is_some_and(|c| c >= min)
}

fn meets_backlogs(backlogs: Option<u32>, max: u32) -> bool {
    backlogs.is_some_and(|b| b <= max)
}

/// Candidates satisfying every threshold, in input order.
#[must_use]
pub fn filter_eligible<'a, C: Candidate>(
    candidates: &'a [C],
    criteria: &EligibilityCriteria,
) -> Vec<&'a C> {
    candidates.iter().filter(|c| criteria.admits(*c)).collect()
}

/// Drives whose own thresholds the candidate meets, in input order.
#[must_use]
pub fn eligible_drives<'a, C: Candidate + ?Sized>(candidate: &C, drives: &'a [Drive]) -> Vec<&'a Drive> {
    drives
        .iter()
        .filter(|d| {
            meets_cgpa(candidate.cgpa(), d.min_cgpa)
                && meets_backlogs(candidate.backlogs(), d.max_backlogs)
                && d.admits_branch(candidate.branch())
        })
        .collect()
}

/// Result of running the criteria panel: full count plus the capped display rows.
#[derive(Debug, Clone)]
pub struct EligibleView<'a, C> {
    pub total: usize,
    pub shown: Vec<&'a C>,
}

#[must_use]
pub fn eligible_view<'a, C: Candidate>(
    candidates: &'a [C],
    criteria: &EligibilityCriteria,
    display_cap: usize,
) -> EligibleView<'a, C> {
    let mut shown = filter_eligible(candidates, criteria);
    let total = shown.len();
    shown.truncate(display_cap);
    EligibleView { total, shown }
}
