//! Interactive loop: reads lines from stdin and drives the session.

use std::path::PathBuf;
use std::sync::Arc;

use hookchat_config::{config_to_json, HookchatConfig};
use hookchat_core::{Attachment, ChatSession, LiveSocket, SendMessageResponse};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::{debug, error, info, warn};

/// One line of user input.
#[derive(Debug, PartialEq, Eq)]
pub enum Command {
    Empty,
    New,
    Quit,
    Config,
    Attach(PathBuf),
    Message(String),
}

impl Command {
    pub fn parse(line: &str) -> Self {
        let line = line.trim();
        if line.is_empty() {
            return Command::Empty;
        }
        match line.split_once(char::is_whitespace) {
            Some(("/attach", path)) => Command::Attach(PathBuf::from(path.trim())),
            None if line == "/new" => Command::New,
            None if line == "/quit" || line == "/exit" => Command::Quit,
            None if line == "/config" => Command::Config,
            _ => Command::Message(line.to_string()),
        }
    }
}

pub async fn run(session: Arc<ChatSession>, config: &HookchatConfig) {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut attachments: Vec<Attachment> = Vec::new();

    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                error!(error = %e, "failed to read input");
                break;
            }
        };

        match Command::parse(&line) {
            Command::Empty => {}
            Command::Quit => break,
            Command::Config => println!("{}", config_to_json(config)),
            Command::New => {
                let id = session.start_new_session().await;
                println!("-- new session {id}");
            }
            Command::Attach(path) => match Attachment::from_path(&path).await {
                Ok(file) => {
                    println!("-- attached {} ({})", file.name, file.mime_type);
                    attachments.push(file);
                }
                Err(e) => println!("-- cannot attach {}: {e}", path.display()),
            },
            Command::Message(text) => {
                let files = std::mem::take(&mut attachments);
                match session.send_message(&text, files).await {
                    Ok(Some(response)) => follow_execution(&session, &response).await,
                    Ok(None) => {}
                    Err(e) => println!("-- {e}"),
                }
            }
        }
    }

    session.close_live_socket().await;
}

/// Connect the live socket for a reply that will arrive out of band.
async fn follow_execution(session: &Arc<ChatSession>, response: &SendMessageResponse) {
    let Some(base) = session.options().live_socket_url.as_deref() else {
        warn!("execution started but no live socket is configured; reply will not be shown");
        return;
    };
    let (Some(session_id), Some(execution_id)) =
        (session.current_session_id().get(), response.execution_id())
    else {
        warn!("execution started without an execution id");
        return;
    };

    let url = LiveSocket::execution_url(base, &session_id, &execution_id);
    let (socket, mut frames) = match LiveSocket::connect(&url).await {
        Ok(connected) => connected,
        Err(e) => {
            error!(url = %url, error = %e, "live socket connect failed");
            return;
        }
    };
    info!(execution = %execution_id, "waiting for reply on live socket");
    session.attach_live_socket(socket).await;

    let session = Arc::clone(session);
    tokio::spawn(async move {
        while let Some(text) = frames.recv().await {
            session.push_bot_message(text);
        }
        debug!("live socket stream ended");
    });
}
