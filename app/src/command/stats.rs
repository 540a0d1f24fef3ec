use placers_core::metrics::{cgpa_histogram, placement_by_branch, status_funnel, summarize};
use placers_core::{Drive, Student};

use super::Context;

/// Strategy for the placement-office dashboard numbers.
#[derive(Debug, Clone, Copy)]
pub struct StatsStrategy;

impl super::CommandStrategy for StatsStrategy {
    type Input = ();

    async fn execute(&self, _input: Self::Input) -> anyhow::Result<()> {
        let ctx = Context::init().await?;
        let students = ctx.collection::<Student>().await;
        let drives = ctx.collection::<Drive>().await;
        let students = students.records();

        let summary = summarize(students, drives.records().len());
        println!("=== Placement Dashboard ===\n");
        println!("Total Students: {}", summary.total_students);
        println!("Placed:         {}", summary.placed);
        println!("In Interview:   {}", summary.in_interview);
        println!("Active Drives:  {}", summary.active_drives);
        println!("Placement Rate: {}%", summary.placement_rate);
        println!();

        println!("By Branch:");
        for row in placement_by_branch(students, &ctx.config.dashboard.branches) {
            println!(
                "  {:<6} {:>3}/{:<3} placed ({}%)",
                row.branch, row.placed, row.total, row.rate
            );
        }
        println!();

        println!("CGPA Distribution:");
        for bucket in cgpa_histogram(students) {
            println!("  {:<6} {:>3} {}", bucket.label, bucket.count, "#".repeat(bucket.count));
        }
        println!();

        println!("Pipeline:");
        for step in status_funnel(students) {
            println!("  {:<10} {:>3} ({}%)", step.status.as_str(), step.count, step.percent);
        }
        Ok(())
    }
}
