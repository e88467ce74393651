//! Subsystem modules for the Thani bot.

pub mod comms;
pub mod runtime;
