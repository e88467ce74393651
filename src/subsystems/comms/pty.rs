//! PTY (console) channel: reads lines from stdin, prints replies to stdout.
//!
//! Keeps its own conversation history; `/clear` resets it. Runs until the
//! `shutdown` token is cancelled (Ctrl-C) or stdin is closed.

use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use super::state::{CommsEvent, CommsState, SubmitError};
use crate::chat::History;
use crate::error::AppError;
use crate::subsystems::runtime::{Component, ComponentFuture};

const CLEAR_COMMAND: &str = "/clear";

pub struct PtyChannel {
    channel_id: String,
    state: Arc<CommsState>,
}

impl PtyChannel {
    pub fn new(channel_id: impl Into<String>, state: Arc<CommsState>) -> Self {
        Self { channel_id: channel_id.into(), state }
    }
}

impl Component for PtyChannel {
    fn id(&self) -> &str {
        &self.channel_id
    }

    fn run(self: Box<Self>, shutdown: CancellationToken) -> ComponentFuture {
        Box::pin(run_pty(self.channel_id, self.state, shutdown))
    }
}

async fn run_pty(channel_id: String, state: Arc<CommsState>, shutdown: CancellationToken) -> Result<(), AppError> {
    info!(%channel_id, "pty channel started");
    println!("─────────────────────────────────────────────");
    println!(" {}  (/clear resets, Ctrl-C to quit)", crate::persona::DISPLAY_NAME);
    println!("─────────────────────────────────────────────");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut history = History::new();

    loop {
        print!("> ");
        use std::io::Write as _;
        let _ = std::io::stdout().flush();

        tokio::select! {
            biased;

            _ = shutdown.cancelled() => {
                println!();
                info!(%channel_id, "pty channel shutting down");
                break;
            }

            line = lines.next_line() => {
                let input = match line {
                    Err(e) => {
                        warn!("pty read error: {e}");
                        break;
                    }
                    Ok(None) => {
                        info!("pty stdin closed");
                        break;
                    }
                    Ok(Some(input)) => input,
                };
                let input = input.trim();
                if input == CLEAR_COMMAND {
                    history.clear();
                    state.report_event(CommsEvent::HistoryCleared { channel_id: channel_id.clone() });
                    println!("(history cleared)");
                    continue;
                }

                debug!(input, "pty received line");
                match state.chat(&channel_id, input, &mut history, None).await {
                    Ok(Some(reply)) => println!("{reply}"),
                    Ok(None) => {}
                    Err(SubmitError::QueueFull) => println!("(busy, try again in a moment)"),
                    Err(e) => {
                        warn!("pty chat failed: {e}, exiting");
                        break;
                    }
                }
            }
        }
    }

    state.report_event(CommsEvent::ChannelShutdown { channel_id });
    Ok(())
}
