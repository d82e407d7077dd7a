//! # numroll channels
//! Delivery channel implementations. Chat-platform transports plug in behind
//! the same [`Channel`] trait.

pub mod console;

use numroll_core::error::{NumrollError, Result};
use numroll_core::traits::Channel;

/// Create a channel by name.
pub fn create_channel(name: &str) -> Result<Box<dyn Channel>> {
    match name {
        "console" => Ok(Box::new(console::ConsoleChannel::new())),
        other => Err(NumrollError::channel(format!("Unknown channel: {other}"))),
    }
}
