//! Console channel: writes notifications to stdout (or any writer).

use std::io::Write;
use std::sync::Mutex;

use async_trait::async_trait;
use numroll_core::error::{NumrollError, Result};
use numroll_core::traits::Channel;
use numroll_core::types::OutgoingMessage;

/// Prints one `[#channel] content` line per notification.
pub struct ConsoleChannel {
    writer: Mutex<Box<dyn Write + Send>>,
    connected: bool,
}

impl ConsoleChannel {
    pub fn new() -> Self {
        Self::with_writer(Box::new(std::io::stdout()))
    }

    pub fn with_writer(writer: Box<dyn Write + Send>) -> Self {
        Self {
            writer: Mutex::new(writer),
            connected: false,
        }
    }

    pub fn render_line(message: &OutgoingMessage) -> String {
        format!("[#{}] {}", message.thread_id, message.content)
    }
}

impl Default for ConsoleChannel {
    fn default() -> Self { Self::new() }
}

#[async_trait]
impl Channel for ConsoleChannel {
    fn name(&self) -> &str { "console" }

    async fn connect(&mut self) -> Result<()> {
        self.connected = true;
        tracing::debug!("Console channel connected");
        Ok(())
    }

    async fn disconnect(&mut self) -> Result<()> {
        self.connected = false;
        Ok(())
    }

    fn is_connected(&self) -> bool { self.connected }

    async fn send(&self, message: OutgoingMessage) -> Result<()> {
        if !self.connected {
            return Err(NumrollError::ChannelNotConnected(self.name().into()));
        }
        let mut writer = self
            .writer
            .lock()
            .map_err(|_| NumrollError::channel("console writer poisoned"))?;
        writeln!(writer, "{}", Self::render_line(&message))?;
        writer.flush()?;
        Ok(())
    }
}
