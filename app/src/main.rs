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

mod command;

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use command::{
    ApplyInput, ApplyStrategy, BookInput, BookStrategy, ChatInput, ChatStrategy, CommandStrategy,
    CriteriaArgs, DrivesInput, DrivesStrategy, ImportInput, ImportStrategy, InfoStrategy,
    InitStrategy, NotifyInput, NotifyStrategy, ProfileInput, ProfileStrategy, ReferInput,
    ReferStrategy, ResumeInput, ResumeStrategy, StatsStrategy, StudentsInput, StudentsStrategy,
    VersionStrategy,
};
use placers_core::Collection;
use tracing_subscriber::{EnvFilter, FmtSubscriber};

#[derive(Parser)]
#[command(name = "placers")]
#[command(about = "Campus placement dashboard", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Initialize configuration
    Init,
    /// Show configuration and local cache status
    Info,
    /// Show version
    Version,
    /// List students passing the eligibility criteria
    Students {
        #[command(flatten)]
        criteria: CriteriaArgs,

        /// Show every eligible student, not just the first page
        #[arg(long)]
        all: bool,
    },
    /// Notify eligible students about a drive
    Notify {
        /// Drive name shown in the notification
        #[arg(short, long)]
        drive: String,

        #[command(flatten)]
        criteria: CriteriaArgs,
    },
    /// Placement statistics
    Stats,
    /// Drives a student is eligible for, with skill gaps
    Drives {
        #[arg(short, long)]
        user: String,

        /// Comma-separated skills to check instead of the profile's
        #[arg(short, long)]
        skills: Option<String>,
    },
    /// Apply to a drive
    Apply {
        #[arg(short, long)]
        user: String,

        /// Drive id
        #[arg(short, long)]
        drive: String,
    },
    /// Book a mentorship slot
    Book {
        #[arg(short, long)]
        user: String,

        /// Slot id
        #[arg(long)]
        slot: String,
    },
    /// Edit your profile
    Profile {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        #[arg(long)]
        cgpa: Option<String>,
    },
    /// Post a referral as an alumnus
    Refer {
        #[arg(short, long)]
        user: String,

        #[arg(long)]
        company: String,

        #[arg(long)]
        role: String,

        #[arg(long, default_value = "")]
        package: String,

        /// Comma-separated skills
        #[arg(long, default_value = "")]
        skills: String,
    },
    /// Generate a one-page resume PDF
    Resume {
        /// Pre-fill from this user's profile
        #[arg(short, long)]
        user: Option<String>,

        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        email: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long)]
        branch: Option<String>,

        #[arg(long)]
        cgpa: Option<String>,

        #[arg(long)]
        marks10: Option<String>,

        #[arg(long)]
        marks12: Option<String>,

        /// Comma-separated skills
        #[arg(long)]
        skills: Option<String>,

        #[arg(long)]
        projects: Option<String>,

        #[arg(long)]
        github: Option<String>,

        /// Output directory (defaults to resume.output_dir)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
    /// Chat with PlacementBot
    Chat {
        /// Single message to send
        #[arg(short = 'm', long)]
        message: Option<String>,
    },
    /// Import records into a collection from a JSON array file
    Import {
        /// students, drives, alumni, referrals, mentorshipSlots or users
        collection: Collection,

        file: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .finish();

    tracing::subscriber::set_global_default(subscriber)?;

    let cli = Cli::parse();

    match cli.command {
        Commands::Init => InitStrategy.execute(()).await,
        Commands::Info => InfoStrategy.execute(()).await,
        Commands::Version => VersionStrategy.execute(()).await,
        Commands::Students { criteria, all } => {
            StudentsStrategy
                .execute(StudentsInput { criteria, all })
                .await
        }
        Commands::Notify { drive, criteria } => {
            NotifyStrategy
                .execute(NotifyInput {
                    drive_name: drive,
                    criteria,
                })
                .await
        }
        Commands::Stats => StatsStrategy.execute(()).await,
        Commands::Drives { user, skills } => {
            DrivesStrategy.execute(DrivesInput { user, skills }).await
        }
        Commands::Apply { user, drive } => ApplyStrategy.execute(ApplyInput { user, drive }).await,
        Commands::Book { user, slot } => BookStrategy.execute(BookInput { user, slot }).await,
        Commands::Profile {
            user,
            name,
            phone,
            branch,
            cgpa,
        } => {
            ProfileStrategy
                .execute(ProfileInput {
                    user,
                    name,
                    phone,
                    branch,
                    cgpa,
                })
                .await
        }
        Commands::Refer {
            user,
            company,
            role,
            package,
            skills,
        } => {
            ReferStrategy
                .execute(ReferInput {
                    user,
                    company,
                    role,
                    package,
                    skills,
                })
                .await
        }
        Commands::Resume {
            user,
            name,
            email,
            phone,
            branch,
            cgpa,
            marks10,
            marks12,
            skills,
            projects,
            github,
            output,
        } => {
            ResumeStrategy
                .execute(ResumeInput {
                    user,
                    name,
                    email,
                    phone,
                    branch,
                    cgpa,
                    marks10,
                    marks12,
                    skills,
                    projects,
                    github,
                    output,
                })
                .await
        }
        Commands::Chat { message } => ChatStrategy.execute(ChatInput { message }).await,
        Commands::Import { collection, file } => {
            ImportStrategy
                .execute(ImportInput { collection, file })
                .await
        }
    }
}
