#![deny(
    clippy::all,
    clippy::nursery,
    clippy::pedantic,
    clippy::style,
    clippy::complexity,
    clippy::perf,
    clippy::correctness,
    clippy::suspicious,
    clippy::unwrap_used,
    clippy::expect_used
)]
#![allow(
    clippy::similar_names,
    clippy::missing_safety_doc,
    clippy::missing_panics_doc,
    clippy::missing_errors_doc
)]

//! One-page resume: fixed layout over the resume form and a minimal PDF writer.

pub mod layout;
pub mod metrics;
pub mod pdf;

use std::path::{Path, PathBuf};

use placers_core::ResumeForm;
use thiserror::Error;
use tracing::info;

pub use layout::{Align, Color, DrawOp, Font, Page, layout};
pub use pdf::render_pdf;

pub const DEFAULT_FOOTER: &str =
    "Generated by PlacementPro - Intelligent Campus Recruitment Ecosystem";

#[derive(Debug, Error)]
pub enum ResumeError {
    #[error("Failed to write resume: {0}")]
    Io(#[from] std::io::Error),
}

/// `<name>_Resume.pdf`, or `Resume_Resume.pdf` when the name is blank.
#[must_use]
pub fn file_name(name: &str) -> String {
    let stem: String = name
        .trim()
        .chars()
        .filter_map(|c| match c {
            c if c.is_whitespace() => Some('_'),
            c if c.is_alphanumeric() || matches!(c, '-' | '_' | '.') => Some(c),
            _ => None,
        })
        .collect();
    let stem = stem.trim_matches('.');
    if stem.is_empty() {
        "Resume_Resume.pdf".to_string()
    } else {
        format!("{stem}_Resume.pdf")
    }
}

/// Lay out, render and write the resume into `dir`.
pub fn write_resume(form: &ResumeForm, footer: &str, dir: &Path) -> Result<PathBuf, ResumeError> {
    std::fs::create_dir_all(dir)?;
    let path = dir.join(file_name(&form.name));
    let bytes = render_pdf(&layout(form, footer));
    std::fs::write(&path, &bytes)?;
    info!("Wrote resume ({} bytes) to {}", bytes.len(), path.display());
    Ok(path)
}
