//! Prints the message list as it changes.

use std::collections::HashMap;
use std::io::Write;

use hookchat_core::{ChatMessage, Sender};
use tokio::sync::watch;

/// Tracks how much of each message has been printed.
#[derive(Default)]
pub struct Printer {
    printed: HashMap<String, usize>,
    open_line: bool,
}

impl Printer {
    /// Print whatever is new in `messages`. User messages are echoed only
    /// when they were not typed here (e.g. a resumed history).
    pub fn print_new(&mut self, messages: &[ChatMessage], echo_user: bool) {
        let mut out = std::io::stdout().lock();
        for message in messages {
            let shown = self.printed.get(&message.id).copied();
            match shown {
                None => {
                    self.printed.insert(message.id.clone(), message.text.len());
                    if message.sender == Sender::User && !echo_user {
                        continue;
                    }
                    if self.open_line {
                        let _ = writeln!(out);
                    }
                    let _ = write!(out, "{}> {}", label(message.sender), message.text);
                    self.open_line = true;
                }
                Some(len) if message.text.len() > len && message.text.is_char_boundary(len) => {
                    let _ = write!(out, "{}", &message.text[len..]);
                    self.printed.insert(message.id.clone(), message.text.len());
                    self.open_line = true;
                }
                Some(_) => {}
            }
        }
        let _ = out.flush();
    }

    /// End the current line, if one is open.
    pub fn finish_line(&mut self) {
        if self.open_line {
            println!();
            self.open_line = false;
        }
    }
}

fn label(sender: Sender) -> &'static str {
    match sender {
        Sender::User => "you",
        Sender::Bot => "bot",
    }
}

/// Print message changes until the session is dropped. A line is closed
/// once no send is pending.
pub async fn follow(
    mut messages: watch::Receiver<Vec<ChatMessage>>,
    mut pending: watch::Receiver<bool>,
    mut printer: Printer,
) {
    loop {
        let changed = tokio::select! {
            changed = messages.changed() => changed,
            changed = pending.changed() => changed,
        };
        if changed.is_err() {
            break;
        }

        let snapshot = messages.borrow_and_update().clone();
        printer.print_new(&snapshot, false);
        if !*pending.borrow_and_update() {
            printer.finish_line();
        }
    }
    printer.finish_line();
}
