use std::path::PathBuf;

use clap::Parser;

/// hookchat: talk to a chat webhook from the terminal.
#[derive(Parser, Debug)]
#[command(name = "hookchat", version, about)]
pub struct Args {
    /// Config file path override.
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Webhook URL override.
    #[arg(short = 'w', long)]
    pub webhook_url: Option<String>,

    /// Request streamed replies.
    #[arg(short, long)]
    pub stream: bool,

    /// Resume the last session stored on this machine.
    #[arg(short, long)]
    pub resume: bool,

    /// Log filter override (e.g. debug, hookchat=trace).
    #[arg(long)]
    pub log_level: Option<String>,
}

pub fn parse() -> Args {
    Args::parse()
}
