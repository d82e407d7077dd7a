//! Delivery channel trait.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::OutgoingMessage;

/// A destination for composed notifications.
#[async_trait]
pub trait Channel: Send + Sync {
    /// Channel name (e.g., "console").
    fn name(&self) -> &str;

    /// Connect to the channel.
    async fn connect(&mut self) -> Result<()>;

    /// Disconnect from the channel.
    async fn disconnect(&mut self) -> Result<()>;

    /// Check if the channel is connected.
    fn is_connected(&self) -> bool;

    /// Send one message.
    async fn send(&self, message: OutgoingMessage) -> Result<()>;
}
