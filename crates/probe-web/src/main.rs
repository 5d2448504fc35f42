//! Server binary for the Gemini prompt tester.

use std::net::SocketAddr;

use clap::{Parser, ValueEnum};
use probe_session::{CredentialGate, Settings, View};
use probe_web::{build_app, AppState};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "probe-web", version, about = "Single-page tester for the Gemini API")]
struct Cli {
    /// Address to listen on
    #[arg(long, env = "PROBE_ADDR", default_value = "127.0.0.1:3000")]
    addr: SocketAddr,

    /// How a missing API_KEY is surfaced: a setup page, or an error on submit
    #[arg(long, env = "CREDENTIAL_GATE", value_enum, default_value_t = GateArg::Guide)]
    credential_gate: GateArg,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum GateArg {
    Guide,
    Inline,
}

impl From<GateArg> for CredentialGate {
    fn from(arg: GateArg) -> Self {
        match arg {
            GateArg::Guide => CredentialGate::SetupGuide,
            GateArg::Inline => CredentialGate::Inline,
        }
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let default_level = if cli.verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    // Read once; the credential does not change for the life of the process.
    let settings = Settings::from_env().with_gate(cli.credential_gate.into());
    let view = View::select(&settings);
    let app = build_app(AppState::new(view));

    let listener = tokio::net::TcpListener::bind(cli.addr).await?;
    tracing::info!("listening on http://{}", listener.local_addr()?);
    axum::serve(listener, app).await?;
    Ok(())
}
