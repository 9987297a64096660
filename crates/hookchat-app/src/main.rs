mod cli;
mod render;
mod repl;
mod setup;

use std::process::ExitCode;
use std::sync::Arc;

use hookchat_core::{ChatSession, FileStore, KeyValueStore, MemoryStore, WebhookTransport};
use tracing_subscriber::EnvFilter;

use crate::render::Printer;

#[tokio::main]
async fn main() -> ExitCode {
    let args = cli::parse();

    // Config is read before logging so its level applies; errors are
    // reported once the subscriber is up.
    let loaded = match &args.config {
        Some(path) => hookchat_config::load_from_path(path),
        None => hookchat_config::load_default(),
    };

    let log_directive = args
        .log_level
        .clone()
        .or_else(|| loaded.as_ref().ok().map(|c| c.logging.level.directive().to_string()))
        .unwrap_or_else(|| "hookchat=info".to_string());
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::from_default_env().add_directive(
                log_directive
                    .parse()
                    .unwrap_or_else(|_| "hookchat=info".parse().unwrap()),
            ),
        )
        .init();

    tracing::info!("hookchat v{} starting", env!("CARGO_PKG_VERSION"));

    let config = match setup::resolve_config(loaded, &args) {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Config rejected: {e}");
            return ExitCode::FAILURE;
        }
    };

    let transport = match WebhookTransport::new() {
        Ok(transport) => transport,
        Err(e) => {
            tracing::error!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let store: Arc<dyn KeyValueStore> = match config.storage.resolved_path() {
        Some(path) => {
            tracing::debug!(path = %path.display(), "using file store");
            Arc::new(FileStore::new(path))
        }
        None => {
            tracing::warn!("No data directory, session ids will not be remembered");
            Arc::new(MemoryStore::new())
        }
    };

    let session = Arc::new(ChatSession::new(
        config.chat.clone(),
        Arc::new(transport),
        store,
    ));

    let mut printer = Printer::default();
    printer.print_new(session.initial_messages(), true);
    printer.finish_line();

    match session.load_previous_session().await {
        Ok(Some(id)) if session.current_session_id().get().is_some() => {
            tracing::info!(session = %id, "resumed");
            printer.print_new(&session.messages().get(), true);
            printer.finish_line();
        }
        Ok(_) => {}
        Err(e) => tracing::warn!("Could not resume previous session: {e}"),
    }
    if session.current_session_id().get().is_none() {
        session.start_new_session().await;
    }

    let follower = tokio::spawn(render::follow(
        session.messages().subscribe(),
        session.waiting_for_response().subscribe(),
        printer,
    ));

    repl::run(Arc::clone(&session), &config).await;

    follower.abort();
    tracing::info!("Shutdown complete");
    ExitCode::SUCCESS
}
