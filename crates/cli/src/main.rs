//! Queue Toggle CLI - view and toggle queue membership per media type

mod config;
mod interactive;
mod logging;
mod prompt;
mod render;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand, ValueEnum};
use colored::Colorize;
use queue_toggle_core::application::{QueueToggleService, ToggleDebouncer};
use queue_toggle_core::domain::AgentSession;
use queue_toggle_core::port::id_provider::UuidProvider;
use queue_toggle_core::port::time_provider::SystemTimeProvider;
use queue_toggle_core::port::{Authenticator, IdProvider, TokenStore};
use queue_toggle_core::AppError;
use queue_toggle_infra_platform::{
    FileTokenStore, ImplicitGrantAuthenticator, PlatformClient, PlatformEnvironment,
    StaticTokenAuthenticator,
};
use std::path::PathBuf;
use std::sync::Arc;
use tokio::io::BufReader;
use tracing::info;

use crate::config::AppConfig;
use crate::prompt::StdinRedirectReceiver;

#[derive(Parser)]
#[command(name = "queue-toggle")]
#[command(about = "Toggle contact-center queue membership per media type", long_about = None)]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Configuration file (TOML)
    #[arg(long, env = "QUEUE_TOGGLE_CONFIG", global = true)]
    config: Option<PathBuf>,

    /// Platform environment host (e.g. mypurecloud.de)
    #[arg(long, global = true)]
    environment: Option<String>,

    /// Use this access token instead of logging in
    #[arg(long, global = true)]
    access_token: Option<String>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    verbose: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the login URL for the implicit grant
    LoginUrl,

    /// Show queue membership and per-media-type status
    Status,

    /// Join or leave every queue of one media type
    Toggle {
        /// Media type (chat, email, voice, ...)
        media_type: String,

        /// Desired status
        #[arg(value_enum)]
        switch: Switch,
    },

    /// Interactive console with debounced toggles
    Interactive,

    /// Forget the stored login
    Logout,
}

#[derive(Clone, Copy, ValueEnum)]
enum Switch {
    On,
    Off,
}

impl Switch {
    fn joined(self) -> bool {
        matches!(self, Switch::On)
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    logging::init(cli.verbose)?;

    let mut config = AppConfig::load(cli.config.as_deref())?;
    if let Some(environment) = cli.environment {
        config.environment = environment;
    }
    if let Some(token) = cli.access_token {
        config.access_token = Some(token);
    }

    let env = platform_environment(&config)?;

    if let Commands::LoginUrl = cli.command {
        let state = UuidProvider.generate_id();
        let url = implicit_grant(&config, &env)
            .authorize_url(&state)
            .context("Failed to build login URL")?;
        println!("{}", url);
        return Ok(());
    }

    if let Commands::Logout = cli.command {
        match login_store(&env) {
            Some(store) => {
                store
                    .clear()
                    .await
                    .context("Failed to remove stored login")?;
                println!(
                    "{}",
                    format!("✓ Stored login removed ({})", store.path().display()).green()
                );
            }
            None => println!("{}", "No login storage location on this platform".yellow()),
        }
        return Ok(());
    }

    let service = build_service(&config, &env)?;
    let transition = service.bootstrap(AgentSession::new()).await;
    let (session, outcome) = transition.into_parts();

    if let Err(e) = outcome {
        if let AppError::Authentication(reason) = &e {
            eprintln!("{}", render::auth_failure_panel(&reason.to_string()));
        } else {
            eprintln!("{} {}", "✗".red(), e);
        }
        return Err(e).context(format!("Startup failed ({})", session.phase));
    }
    info!(phase = %session.phase, "Session ready");

    match cli.command {
        Commands::LoginUrl | Commands::Logout => {}

        Commands::Status => {
            println!("{}", render::session(&session, service.whitelist()));
        }

        Commands::Toggle { media_type, switch } => {
            let (session, outcome) = service
                .toggle(session, &media_type, switch.joined())
                .await
                .into_parts();
            let report = outcome?;

            if report.patched == 0 {
                println!(
                    "{}",
                    format!("No {} queues assigned, nothing changed", report.media_type).yellow()
                );
            } else {
                let verb = if report.desired_status { "Joined" } else { "Left" };
                println!(
                    "{}",
                    format!("✓ {} {} {} queue(s)", verb, report.patched, report.media_type)
                        .green()
                        .bold()
                );
            }
            println!();
            println!("{}", render::session(&session, service.whitelist()));
        }

        Commands::Interactive => {
            let debouncer = ToggleDebouncer::new(config.debounce_interval());
            let input = BufReader::new(tokio::io::stdin());
            interactive::run(&service, session, debouncer, input).await?;
        }
    }

    Ok(())
}

fn platform_environment(config: &AppConfig) -> Result<PlatformEnvironment> {
    let env = match (&config.api_base_url, &config.login_base_url) {
        (Some(api), Some(login)) => PlatformEnvironment::with_bases(api, login),
        (None, None) => PlatformEnvironment::from_host(&config.environment),
        _ => anyhow::bail!("api_base_url and login_base_url must be set together"),
    };
    env.context("Invalid platform environment")
}

fn implicit_grant(config: &AppConfig, env: &PlatformEnvironment) -> ImplicitGrantAuthenticator {
    ImplicitGrantAuthenticator::new(
        env,
        config.client_id.clone(),
        config.redirect_uri.clone(),
        Arc::new(UuidProvider),
        Arc::new(SystemTimeProvider),
        Arc::new(StdinRedirectReceiver),
    )
}

fn build_service(config: &AppConfig, env: &PlatformEnvironment) -> Result<QueueToggleService> {
    let client = PlatformClient::new(env, config.request_timeout())
        .context("Failed to create platform client")?;

    let authenticator: Arc<dyn Authenticator> = match &config.access_token {
        Some(token) => Arc::new(StaticTokenAuthenticator::new(token.clone())),
        None => Arc::new(implicit_grant(config, env)),
    };

    let service = QueueToggleService::new(
        authenticator,
        Arc::new(client),
        config.whitelist()?,
        Arc::new(SystemTimeProvider),
    );

    let store = match (&config.access_token, config.persist_login) {
        (None, true) => login_store(env),
        _ => None,
    };
    Ok(match store {
        Some(store) => service.with_token_store(Arc::new(store)),
        None => service,
    })
}

fn login_store(env: &PlatformEnvironment) -> Option<FileTokenStore> {
    crate::config::default_login_path().map(|path| FileTokenStore::new(path, env))
}
