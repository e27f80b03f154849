use anyhow::Context;
use tokio::io::{AsyncBufReadExt, AsyncWriteExt, BufReader};
use tracing_subscriber::EnvFilter;

use campusd::config::Config;
use campusd::ipc::{self, AppState, Request};
use campusd::session;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // stdout carries the protocol, so logs go to stderr.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("campusd=info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let config = Config::from_env();
    let mut state = AppState::new(config).context("failed to start")?;
    state.session = match session::load(&state.config.state_dir) {
        Ok(session) => session,
        Err(e) => {
            tracing::warn!(error = format!("{e:#}"), "could not restore session");
            None
        }
    };
    tracing::info!(
        api_url = %state.config.api_url,
        state_dir = %state.config.state_dir.display(),
        authenticated = state.session.is_some(),
        "campusd ready"
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdout = tokio::io::stdout();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) | Err(_) => break,
        };
        if line.trim().is_empty() {
            continue;
        }

        let response = match serde_json::from_str::<Request>(&line) {
            Ok(req) => ipc::handle_request(&mut state, req).await,
            // The id never parsed, so the reply carries an empty one.
            Err(e) => serde_json::json!({
                "id": "",
                "ok": false,
                "error": { "code": "bad_json", "message": e.to_string() },
            }),
        };
        let mut text = serde_json::to_string(&response)
            .unwrap_or_else(|_| "{\"ok\":false}".to_string());
        text.push('\n');
        if stdout.write_all(text.as_bytes()).await.is_err() {
            break;
        }
        let _ = stdout.flush().await;
    }
    Ok(())
}
