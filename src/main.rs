//! gemchat: a terminal chat client for the Gemini chat backend.
//!
//! The session controller in `session` is headless; this binary is the
//! render surface, a line-oriented loop driven by the projection in `view`.

mod backend;
mod config;
mod message;
mod session;
mod view;

use backend::HttpBackend;
use session::ChatSession;
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::EnvFilter;
use view::{BubbleRole, ChatView};

/// Logs go to a rolling file under the data directory so the chat transcript
/// on stdout stays clean. The returned guard must live for the whole run.
fn init_logging() -> tracing_appender::non_blocking::WorkerGuard {
    let file_appender =
        tracing_appender::rolling::daily(config::get_app_data_dir().join("logs"), "gemchat.log");
    let (writer, guard) = tracing_appender::non_blocking(file_appender);
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().json().with_writer(writer))
        .init();
    guard
}

/// Prints bubbles the terminal has not shown yet. Printing on every history
/// change is the terminal analogue of the original UI's scroll-to-bottom.
fn render_new_bubbles(view: &ChatView, printed: &mut usize) {
    for bubble in &view.bubbles[*printed..] {
        let label = match bubble.role {
            BubbleRole::User => "you",
            BubbleRole::Bot => "bot",
            BubbleRole::Error => "error",
        };
        println!("[{}] {}: {}", bubble.time, label, bubble.text);
    }
    *printed = view.bubbles.len();
}

#[tokio::main]
async fn main() {
    let _log_guard = init_logging();
    let config = config::load_or_initialize_config();
    info!(base_url = %config.backend.base_url, "starting gemchat");

    let mut session = ChatSession::new(HttpBackend::new(config.backend.base_url));
    session.probe_connectivity().await;

    let mut printed = 0;
    let startup = view::project(&session);
    if !startup.connected {
        println!("warning: backend not reachable; replies will fail until it is running");
    }
    render_new_bubbles(&startup, &mut printed);
    println!("(/clear resets the conversation, /quit exits)");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        print!("> ");
        let _ = std::io::stdout().flush();

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            _ => break,
        };

        match line.trim() {
            "/quit" => break,
            "/clear" => {
                session.reset_conversation();
                printed = 0;
                render_new_bubbles(&view::project(&session), &mut printed);
            }
            _ => {
                session.set_draft(line);
                if !view::project(&session).send_enabled {
                    continue;
                }
                // The user's line is already on screen; skip its bubble.
                printed += 1;
                println!("...");
                session.submit().await;
                render_new_bubbles(&view::project(&session), &mut printed);
            }
        }
    }

    info!("gemchat exiting");
}
