//! SkillDesk CLI and skill editor HTTP server entry point.
//!
//! Binary name: `skilldesk`
//!
//! Parses CLI arguments, initializes the database and services, then
//! dispatches to a command handler or starts the HTTP server.

mod cli;
mod http;
mod state;

use std::sync::Arc;

use clap::Parser;
use clap_complete::generate;

use cli::{Cli, Commands};
use state::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = match cli.verbose {
        0 if cli.quiet => "error",
        0 => "warn",
        1 => "info,skilldesk=debug",
        _ => "trace",
    };
    skilldesk_observe::tracing_setup::init_tracing(filter, cli.otel)
        .map_err(|e| anyhow::anyhow!("failed to initialize tracing: {e}"))?;

    let result = run(cli).await;
    skilldesk_observe::tracing_setup::shutdown_tracing();
    result
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    // Shell completions don't need app state
    if let Commands::Completions { shell } = &cli.command {
        let mut cmd = <Cli as clap::CommandFactory>::command();
        generate(*shell, &mut cmd, "skilldesk", &mut std::io::stdout());
        return Ok(());
    }

    let mut state = AppState::init().await?;

    match cli.command {
        Commands::Serve {
            bind,
            enable_new_structures,
        } => {
            let mut config = (*state.config).clone();
            if let Some(bind) = bind {
                config.bind = bind;
            }
            if enable_new_structures {
                config.enable_new_structures = true;
            }
            state.config = Arc::new(config);

            let listener = tokio::net::TcpListener::bind(&state.config.bind).await?;
            let addr = listener.local_addr()?;

            tracing::info!(
                %addr,
                data_dir = %state.data_dir.display(),
                enable_new_structures = state.config.enable_new_structures,
                "skill editor server starting"
            );
            println!(
                "  {} SkillDesk listening on {}",
                console::style("⚡").bold(),
                console::style(format!("http://{addr}")).cyan()
            );
            if !state.config.enable_new_structures {
                println!(
                    "  {}",
                    console::style(
                        "Skill editor endpoints are disabled (set enable_new_structures = true)"
                    )
                    .yellow()
                );
            }
            println!("  {}", console::style("Press Ctrl+C to stop").dim());

            let router = http::router::build_router(state);

            axum::serve(listener, router)
                .with_graceful_shutdown(shutdown_signal())
                .await?;

            println!("\n  Server stopped.");
        }

        Commands::Skill { action } => {
            cli::skill::run(&state, action, cli.json).await?;
        }

        Commands::User { action } => {
            cli::user::run(&state, action, cli.json).await?;
        }

        Commands::Identity => {
            cli::identity::show_identity(&state, cli.json).await?;
        }

        Commands::Completions { .. } => unreachable!("handled above"),
    }

    Ok(())
}

/// Wait for Ctrl+C or SIGTERM for graceful shutdown.
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to install Ctrl+C handler: {e}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("failed to install SIGTERM handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("shutdown signal received");
}
