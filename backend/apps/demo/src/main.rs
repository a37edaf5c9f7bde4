//! Identity Demo Entry Point
//!
//! Drives the login flow, guard and dashboard against a file-backed session
//! slot. Uses `anyhow` for startup errors; flow errors come back as
//! `identity::IdentityError` or as messages on the controllers' views.
//!
//! ```text
//! demo login <emirates-id>
//! demo status
//! demo logout
//! ```
//!
//! `--store-dir` / `IDENTITY_STORE_DIR` and `--min-id-length` /
//! `IDENTITY_MIN_ID_LENGTH` are read by clap, after `.env` is loaded.

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use identity::application::{
    Activation, DashboardController, LoginEntry, LoginFlowController, LoginFlowState,
    SubmitOutcome,
};
use identity::presentation::{Navigator, Route};
use identity::{Authenticator, IdentityConfig, IdentityService, KvSessionStore, RouteGuard};
use platform::delay::TokioSleeper;
use platform::storage::FileKeyValueStore;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser, Debug)]
#[command(name = "demo", about = "Mock national ID login against a local session slot")]
struct Cli {
    /// Directory holding the session slot
    #[arg(long, env = "IDENTITY_STORE_DIR", default_value = ".identity")]
    store_dir: PathBuf,

    /// Minimum identifier length after stripping separators
    #[arg(long, env = "IDENTITY_MIN_ID_LENGTH")]
    min_id_length: Option<usize>,

    /// Defaults to `status`
    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Sign in with an Emirates ID number
    Login { identifier: String },
    /// Show the current session
    Status,
    /// End the current session
    Logout,
}

type Service = IdentityService<KvSessionStore<FileKeyValueStore>, TokioSleeper>;
type Dashboard = DashboardController<Service, TokioSleeper, LogNavigator>;

/// Navigator for a headless client: records the destination in the log
struct LogNavigator;

impl Navigator for LogNavigator {
    fn navigate(&self, route: Route) {
        tracing::info!(path = route.path(), "Navigate");
    }
}

struct App {
    identity: Arc<Service>,
    sleeper: Arc<TokioSleeper>,
    navigator: Arc<LogNavigator>,
    config: Arc<IdentityConfig>,
}

impl App {
    async fn init(cli: &Cli) -> Self {
        let config = Arc::new(match cli.min_id_length {
            Some(min_length) => IdentityConfig::with_min_identifier_length(min_length),
            None => IdentityConfig::default(),
        });

        let sleeper = Arc::new(TokioSleeper);
        let store = Arc::new(KvSessionStore::new(
            FileKeyValueStore::new(&cli.store_dir),
            &config.storage_key,
        ));
        let identity = Arc::new(IdentityService::restore(store, sleeper.clone(), config.clone()).await);

        tracing::info!(
            store_dir = %cli.store_dir.display(),
            min_id_length = config.identifier_policy.min_length,
            authenticated = identity.is_authenticated(),
            "Identity client ready"
        );

        Self {
            identity,
            sleeper,
            navigator: Arc::new(LogNavigator),
            config,
        }
    }

    fn dashboard(&self) -> Dashboard {
        DashboardController::new(
            self.identity.clone(),
            self.sleeper.clone(),
            self.navigator.clone(),
            self.config.clone(),
        )
    }

    async fn login(&self, raw_identifier: &str) -> anyhow::Result<()> {
        let entry = LoginFlowController::open(
            self.identity.clone(),
            self.sleeper.clone(),
            self.navigator.clone(),
            self.config.clone(),
        );

        let controller = match entry {
            LoginEntry::AlreadyAuthenticated => {
                println!("Already signed in.");
                return self.status().await;
            }
            LoginEntry::Ready(controller) => Arc::new(controller),
        };

        // Narrate the flow as it moves through its states
        let mut states = controller.subscribe_state();
        let watcher = {
            let controller = controller.clone();
            tokio::spawn(async move {
                while states.changed().await.is_ok() {
                    let state = *states.borrow_and_update();
                    match state {
                        LoginFlowState::Verifying => println!("Contacting identity provider..."),
                        LoginFlowState::Approving => {
                            if let Some(code) = controller.view().verification_code {
                                println!("Approve the request on your phone. Code: {code}");
                            }
                        }
                        LoginFlowState::Success => println!("Approved."),
                        LoginFlowState::Idle => {}
                    }
                }
            })
        };

        let outcome = controller.submit(raw_identifier).await;
        watcher.abort();

        match outcome {
            SubmitOutcome::Completed(profile) => {
                println!("Welcome, {}.", profile.full_name_en);
                self.status().await
            }
            SubmitOutcome::Rejected | SubmitOutcome::Failed => {
                let message = controller
                    .view()
                    .error_message
                    .unwrap_or_else(|| "Authentication failed.".to_string());
                bail!(message)
            }
            SubmitOutcome::Ignored => bail!("A login is already in progress"),
        }
    }

    async fn status(&self) -> anyhow::Result<()> {
        let guard = RouteGuard::new(self.identity.subscribe());
        if !guard.can_activate(&Route::Dashboard, self.navigator.as_ref()) {
            println!("Not signed in.");
            return Ok(());
        }

        let dashboard = self.dashboard();
        if dashboard.activate().await == Activation::Redirected {
            println!("Not signed in.");
            return Ok(());
        }

        let view = dashboard.view();
        let Some(profile) = view.profile else {
            println!("Session is no longer available.");
            return Ok(());
        };

        println!("Name:        {}", profile.full_name_en);
        println!("Emirates ID: {}", profile.idn);
        println!("Email:       {}", profile.email);
        println!("Mobile:      {}", profile.mobile);
        println!("Nationality: {}", profile.nationality_en);
        println!("User type:   {}", profile.user_type);
        println!("Signed in:   {}", dashboard.formatted_login_time());
        println!("Expires:     {}", dashboard.formatted_expiry());
        Ok(())
    }

    async fn logout(&self) -> anyhow::Result<()> {
        self.dashboard()
            .logout()
            .await
            .context("Failed to clear the session")?;
        println!("Signed out.");
        Ok(())
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> anyhow::Result<()> {
    // Load .env file before clap reads the environment
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "demo=info,identity=info,platform=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let app = App::init(&cli).await;

    match cli.command.unwrap_or(Command::Status) {
        Command::Login { identifier } => app.login(&identifier).await,
        Command::Status => app.status().await,
        Command::Logout => app.logout().await,
    }
}
