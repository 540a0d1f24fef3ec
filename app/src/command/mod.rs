//! Static strategy pattern for CLI commands.
//!
//! Each command is a separate strategy with its own input type. Commands that
//! touch data share a [`Context`]: the loaded config, the remote store picked by
//! `backend.kind` and the SQLite snapshot cache.

use std::sync::Arc;

use placers_config::{BackendKind, Config};
use placers_core::state::{Action, AppState, View};
use placers_core::{
    DocumentStore, ProfileForm, Record, ReferralForm, ResumeForm, SnapshotCache, UserProfile,
    ValidationError,
};
use placers_store::{
    AccountService, CollectionCache, HttpStore, MemoryAuth, MemoryStore, SqliteSnapshotCache,
    WriteOutcome,
};
use tracing::info;

mod apply;
mod book;
mod chat;
mod drives;
mod import;
mod info;
mod init;
mod notify;
mod profile;
mod refer;
mod resume;
mod stats;
mod students;
mod version;

pub use apply::{ApplyInput, ApplyStrategy};
pub use book::{BookInput, BookStrategy};
pub use chat::{ChatInput, ChatStrategy};
pub use drives::{DrivesInput, DrivesStrategy};
pub use import::{ImportInput, ImportStrategy};
pub use info::InfoStrategy;
pub use init::InitStrategy;
pub use notify::{NotifyInput, NotifyStrategy};
pub use profile::{ProfileInput, ProfileStrategy};
pub use refer::{ReferInput, ReferStrategy};
pub use resume::{ResumeInput, ResumeStrategy};
pub use stats::StatsStrategy;
pub use students::{CriteriaArgs, StudentsInput, StudentsStrategy};
pub use version::VersionStrategy;

/// Core trait defining the contract for all command strategies.
///
/// # Example
/// ```rust
/// struct MyStrategy;
///
/// impl CommandStrategy for MyStrategy {
///     type Input = MyInput;
///
///     async fn execute(&self, input: Self::Input) -> anyhow::Result<()> {
///         // Command logic here
///         Ok(())
///     }
/// }
/// ```
pub trait CommandStrategy: Send + Sync + 'static {
    /// The input type this strategy accepts.
    type Input;

    /// Execute the command with the given input.
    ///
    /// # Errors
    /// Returns an error if command execution fails.
    async fn execute(&self, input: Self::Input) -> anyhow::Result<()>;
}

type Accounts = AccountService<MemoryAuth, Arc<dyn DocumentStore>, Arc<dyn SnapshotCache>>;

/// Shared components for data commands.
pub struct Context {
    pub config: Config,
    pub remote: Arc<dyn DocumentStore>,
    pub local: Arc<dyn SnapshotCache>,
    accounts: Accounts,
}

impl Context {
    pub async fn init() -> anyhow::Result<Self> {
        let config = Config::load()?;
        info!("Loaded config from ~/placers/config.json");

        let remote: Arc<dyn DocumentStore> = match config.backend.kind {
            BackendKind::Offline => {
                info!("Backend: offline, serving from local cache");
                Arc::new(MemoryStore::offline())
            }
            BackendKind::Http => {
                let base_url = config.backend.base_url.as_deref().ok_or_else(|| {
                    anyhow::anyhow!("backend.base_url is required when backend.kind is \"http\"")
                })?;
                Arc::new(
                    HttpStore::new(base_url)?
                        .with_api_key(config.backend.api_key.clone())
                        .with_poll_interval(config.backend.poll_interval()),
                )
            }
        };

        let cache_path = config.cache.resolve_path()?;
        info!("Local cache path: {}", cache_path.display());
        let local: Arc<dyn SnapshotCache> = Arc::new(SqliteSnapshotCache::open(&cache_path).await?);

        let accounts = AccountService::new(MemoryAuth::new(), remote.clone(), local.clone());

        Ok(Self {
            config,
            remote,
            local,
            accounts,
        })
    }

    /// Open a collection view, refreshed from the remote when it answers in time.
    pub async fn collection<T: Record>(&self) -> CollectionCache<T> {
        let mut cache = CollectionCache::open(self.remote.clone(), self.local.clone()).await;
        if self.config.backend.kind == BackendKind::Http
            && !cache.sync(self.config.backend.snapshot_timeout()).await
        {
            info!(
                "Serving {} cached {} records",
                cache.records().len(),
                T::COLLECTION
            );
        }
        cache
    }

    /// Look up a profile in `users`, falling back to the locally cached copy.
    pub async fn profile(&self, uid: &str) -> anyhow::Result<UserProfile> {
        let users = self.collection::<UserProfile>().await;
        if let Some(profile) = users.get(uid) {
            self.accounts.cache_profile(profile).await;
            return Ok(profile.clone());
        }
        self.accounts
            .cached_profile(uid)
            .await
            .ok_or_else(|| ValidationError::UnknownProfile(uid.to_string()).into())
    }

    pub async fn remember_profile(&self, profile: &UserProfile) {
        self.accounts.cache_profile(profile).await;
    }

    /// Dashboard state for a placement-office session with the configured criteria.
    #[must_use]
    pub fn office_state(&self) -> AppState {
        AppState {
            view: View::PlacementOffice,
            criteria: self.config.dashboard.default_criteria.clone(),
            resume: ResumeForm::default(),
            referral: ReferralForm::default(),
            profile: ProfileForm::default(),
            notice: None,
        }
    }

    #[must_use]
    pub fn user_state(&self, profile: &UserProfile) -> AppState {
        AppState::for_profile(profile, self.config.dashboard.default_criteria.clone())
    }
}

/// Fold a batch of actions into `state`.
fn apply_actions(state: AppState, actions: Vec<Action>) -> AppState {
    actions.into_iter().fold(state, placers_core::reduce)
}

fn criteria_actions(args: &CriteriaArgs) -> Vec<Action> {
    let mut actions = Vec::new();
    if let Some(min) = args.min_cgpa {
        actions.push(Action::SetMinCgpa(min));
    }
    if let Some(max) = args.max_backlogs {
        actions.push(Action::SetMaxBacklogs(max));
    }
    if let Some(branch) = &args.branch {
        actions.push(Action::SetBranch(branch.as_str().into()));
    }
    actions
}

const fn describe(outcome: WriteOutcome) -> &'static str {
    match outcome {
        WriteOutcome::Synced => "saved",
        WriteOutcome::LocalOnly => "saved offline, not yet synced",
    }
}
