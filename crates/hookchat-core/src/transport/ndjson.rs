//! Newline-delimited JSON stream reader.
//!
//! Streaming webhooks answer with one JSON frame per line:
//! `{"type":"begin"|"item"|"end"|"error","content":"..."}`. Lines that are
//! not frames are passed through as plain text chunks.

use futures_util::StreamExt;
use hookchat_common::TransportError;
use serde::Deserialize;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio_util::io::StreamReader;
use tracing::trace;

use crate::response::StreamOutcome;

use super::StreamHandlers;

#[derive(Debug, Deserialize)]
#[serde(rename_all = "lowercase")]
enum FrameKind {
    Begin,
    Item,
    End,
    Error,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Deserialize)]
struct StreamFrame {
    #[serde(rename = "type")]
    kind: FrameKind,
    #[serde(default)]
    content: Option<String>,
}

/// Read frames from `reader` until EOF, dispatching to `handlers`.
///
/// Plain-text lines are delivered exactly as received, line break included.
/// Blank lines are dropped only when they separate JSON frames.
pub(crate) async fn read_frames<R>(
    mut reader: R,
    handlers: &dyn StreamHandlers,
) -> Result<StreamOutcome, TransportError>
where
    R: AsyncBufRead + Unpin,
{
    let mut outcome = StreamOutcome::default();
    let mut line = String::new();
    let mut in_text = false;

    loop {
        line.clear();
        let read = reader
            .read_line(&mut line)
            .await
            .map_err(|e| TransportError::Network(e.to_string()))?;
        if read == 0 {
            break;
        }

        let trimmed = line.trim();
        if trimmed.is_empty() {
            if in_text {
                handlers.on_chunk(&line);
            }
            continue;
        }

        let frame = match serde_json::from_str::<StreamFrame>(trimmed) {
            Ok(frame) => frame,
            Err(_) => {
                handlers.on_chunk(&line);
                outcome.has_received_chunks = true;
                in_text = true;
                continue;
            }
        };
        in_text = false;

        match frame.kind {
            FrameKind::Begin => handlers.on_begin_message(),
            FrameKind::Item => {
                if let Some(content) = frame.content {
                    handlers.on_chunk(&content);
                    outcome.has_received_chunks = true;
                }
            }
            FrameKind::End => handlers.on_end_message(),
            FrameKind::Error => {
                let content = frame.content.as_deref().unwrap_or("Unknown error");
                handlers.on_chunk(&format!("Error: {content}"));
                outcome.has_received_chunks = true;
            }
            FrameKind::Unknown => trace!(line = trimmed, "ignoring unknown stream frame"),
        }
    }

    Ok(outcome)
}

/// Read frames from an HTTP response body.
pub(crate) async fn read_response_frames(
    response: reqwest::Response,
    handlers: &dyn StreamHandlers,
) -> Result<StreamOutcome, TransportError> {
    let byte_stream = response
        .bytes_stream()
        .map(|result| result.map_err(std::io::Error::other));
    let reader = tokio::io::BufReader::new(StreamReader::new(byte_stream));
    read_frames(reader, handlers).await
}
