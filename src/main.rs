use std::process::ExitCode;
use std::sync::Arc;

use clap::Parser;
use navguard::config::{GateConfig, normalize_base_url};
use navguard::error::ConfigError;
use navguard::identity::HttpIdentityClient;
use navguard::{AuthState, Decision, Destination, Navigator, SessionGatekeeper};

#[derive(Parser, Debug)]
#[command(name = "navguard", about = "Run one navigation through the session gate")]
struct Cli {
    /// Route name to navigate to.
    #[arg(long, default_value = "Home")]
    route: String,

    /// Treat the route as protected.
    #[arg(long)]
    requires_auth: bool,

    /// Bearer token restored from storage.
    #[arg(long, env = "NAVGUARD_TOKEN")]
    token: Option<String>,

    /// Override `NAVGUARD_API_BASE_URL`.
    #[arg(long)]
    base_url: Option<String>,
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();
    match run(cli).await {
        Ok(Decision::Allow) => ExitCode::SUCCESS,
        Ok(Decision::RedirectToLogin(_)) => ExitCode::from(2),
        Err(e) => {
            tracing::error!(error = %e, "navguard failed");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<Decision, ConfigError> {
    let mut config = GateConfig::from_env()?;
    if let Some(base_url) = cli.base_url.as_deref() {
        config.api_base_url = normalize_base_url("--base-url", base_url)?;
    }

    let identity = HttpIdentityClient::new(&config.api_base_url, config.validate_timeout)?;
    tracing::info!(endpoint = identity.endpoint(), "identity endpoint configured");

    let gatekeeper = SessionGatekeeper::new(Arc::new(identity)).with_policy(config.revalidation);
    let state = cli.token.map_or_else(AuthState::new, AuthState::with_token);
    let mut navigator = Navigator::new(gatekeeper, state);

    let destination = Destination { route: cli.route, requires_auth: cli.requires_auth };
    let nav = navigator.navigate(destination).await;

    println!("{} ({:?})", nav.target.route, nav.decision);
    if let Some(user) = navigator.state().user() {
        println!("user: {}", user.as_value());
    }
    Ok(nav.decision)
}
