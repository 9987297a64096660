//! WebSocket handle for replies that arrive outside the HTTP exchange.
//!
//! When a webhook answers `executionStarted`, the reply is pushed later
//! over a socket. The connection runs in a background task; text frames are
//! forwarded on a channel and the handle only sends commands.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::{SinkExt, StreamExt};
use hookchat_common::{SessionId, TransportError};
use tokio::net::TcpStream;
use tokio::sync::mpsc;
use tokio_tungstenite::tungstenite::Message as WsMessage;
use tokio_tungstenite::{MaybeTlsStream, WebSocketStream};
use tracing::{debug, info, warn};

const CONNECT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug)]
enum SocketCommand {
    Send(String),
    Close,
}

/// Cheap-to-clone handle to an open socket.
#[derive(Debug, Clone)]
pub struct LiveSocket {
    url: String,
    command_tx: mpsc::Sender<SocketCommand>,
    connected: Arc<AtomicBool>,
}

impl LiveSocket {
    /// Connect and start the background task.
    /// Returns `(socket, text_frame_receiver)`.
    pub async fn connect(url: &str) -> Result<(Self, mpsc::Receiver<String>), TransportError> {
        info!(url = %url.split('?').next().unwrap_or(""), "opening live socket");

        let (stream, _) = tokio::time::timeout(CONNECT_TIMEOUT, tokio_tungstenite::connect_async(url))
            .await
            .map_err(|_| TransportError::Socket("connect timed out".into()))?
            .map_err(|e| TransportError::Socket(e.to_string()))?;

        let (frame_tx, frame_rx) = mpsc::channel(64);
        let (command_tx, command_rx) = mpsc::channel(16);
        let connected = Arc::new(AtomicBool::new(true));

        tokio::spawn(socket_loop(
            stream,
            Arc::clone(&connected),
            frame_tx,
            command_rx,
        ));

        let socket = Self {
            url: url.to_string(),
            command_tx,
            connected,
        };
        Ok((socket, frame_rx))
    }

    /// Socket URL for a pending execution: `<base>?sessionId=..&executionId=..`.
    pub fn execution_url(base: &str, session_id: &SessionId, execution_id: &str) -> String {
        let separator = if base.contains('?') { '&' } else { '?' };
        format!("{base}{separator}sessionId={session_id}&executionId={execution_id}")
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn is_connected(&self) -> bool {
        self.connected.load(Ordering::Acquire)
    }

    pub async fn send_text(&self, text: impl Into<String>) -> Result<(), TransportError> {
        self.command_tx
            .send(SocketCommand::Send(text.into()))
            .await
            .map_err(|_| TransportError::Socket("socket is closed".into()))
    }

    /// Ask the background task to close the connection. Idempotent.
    pub async fn close(&self) {
        let _ = self.command_tx.send(SocketCommand::Close).await;
    }
}

async fn socket_loop(
    stream: WebSocketStream<MaybeTlsStream<TcpStream>>,
    connected: Arc<AtomicBool>,
    frame_tx: mpsc::Sender<String>,
    mut command_rx: mpsc::Receiver<SocketCommand>,
) {
    let (mut writer, mut reader) = stream.split();

    loop {
        tokio::select! {
            frame = reader.next() => match frame {
                Some(Ok(WsMessage::Text(text))) => {
                    if frame_tx.send(text.as_str().to_owned()).await.is_err() {
                        debug!("frame receiver dropped, closing live socket");
                        let _ = writer.send(WsMessage::Close(None)).await;
                        break;
                    }
                }
                Some(Ok(WsMessage::Ping(data))) => {
                    let _ = writer.send(WsMessage::Pong(data)).await;
                }
                Some(Ok(WsMessage::Close(_))) | None => {
                    info!("live socket closed by peer");
                    break;
                }
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    warn!(error = %e, "live socket error");
                    break;
                }
            },
            command = command_rx.recv() => match command {
                Some(SocketCommand::Send(text)) => {
                    if let Err(e) = writer.send(WsMessage::Text(text.into())).await {
                        warn!(error = %e, "live socket send failed");
                        break;
                    }
                }
                Some(SocketCommand::Close) | None => {
                    let _ = writer.send(WsMessage::Close(None)).await;
                    break;
                }
            },
        }
    }

    connected.store(false, Ordering::Release);
}
