//! Thani Thankan chat bot.
//!
//! [`router::ResponseRouter`] decides, per message, between a literal fact
//! answer, a model reply, and a canned persona phrase. The comms subsystem
//! puts it behind a console and an HTTP API.

pub mod chat;
pub mod config;
pub mod error;
pub mod llm;
pub mod logger;
pub mod persona;
pub mod router;
pub mod subsystems;
