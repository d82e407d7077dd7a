//! Compose and deliver one notification per user.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use numroll_core::error::{NumrollError, Result};
use numroll_core::traits::Channel;
use numroll_core::types::OutgoingMessage;
use numroll_core::Settings;
use numroll_rules::{MessageTemplate, RuleError, RuleSet};
use serde::Serialize;

use crate::round::Round;

/// Outcome of delivering a round.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RoundReport {
    pub delivered: usize,
    pub failed: usize,
    pub rolled_at: DateTime<Utc>,
}

/// Turns a round into notifications. Holds only immutable data, so one runner
/// can serve many rounds concurrently.
#[derive(Debug, Clone)]
pub struct RoundRunner {
    rules: Arc<RuleSet>,
    template: MessageTemplate,
    channel_id: String,
}

impl RoundRunner {
    pub fn new(rules: Arc<RuleSet>, template: MessageTemplate, channel_id: impl Into<String>) -> Self {
        Self {
            rules,
            template,
            channel_id: channel_id.into(),
        }
    }

    /// Validate the settings' rules and build a runner for its channel.
    pub fn from_settings(settings: &Settings) -> std::result::Result<Self, RuleError> {
        let rules = RuleSet::from_settings(settings)?;
        Ok(Self::new(
            Arc::new(rules),
            MessageTemplate::from(&settings.message),
            settings.bot.channel.to_string(),
        ))
    }

    pub fn rules(&self) -> &RuleSet {
        &self.rules
    }

    pub fn template(&self) -> &MessageTemplate {
        &self.template
    }

    /// One message per user, in round order.
    pub fn compose_all(&self, round: &Round) -> Vec<OutgoingMessage> {
        round
            .entries()
            .iter()
            .map(|entry| {
                let body = self.rules.compose(&self.template, &entry.input());
                OutgoingMessage::for_user(self.channel_id.clone(), entry.user_id, &body)
            })
            .collect()
    }

    /// Deliver a round. A failed send is logged and counted; the rest of the
    /// round still goes out.
    pub async fn run(&self, round: &Round, channel: &dyn Channel) -> Result<RoundReport> {
        if !channel.is_connected() {
            return Err(NumrollError::ChannelNotConnected(channel.name().to_string()));
        }

        let rolled_at = Utc::now();
        let mut delivered = 0;
        let mut failed = 0;

        for message in self.compose_all(round) {
            let user = message.user_id;
            match channel.send(message).await {
                Ok(()) => delivered += 1,
                Err(e) => {
                    tracing::error!("Failed to deliver roll for user {user:?} via {}: {e}", channel.name());
                    failed += 1;
                }
            }
        }

        tracing::info!("Round delivered via {}: {delivered} sent, {failed} failed", channel.name());
        Ok(RoundReport { delivered, failed, rolled_at })
    }

    /// Connect, run the round and disconnect. The channel is disconnected
    /// before a delivery error is returned.
    pub async fn deliver(&self, round: &Round, channel: &mut dyn Channel) -> Result<RoundReport> {
        channel.connect().await?;
        let result = self.run(round, channel).await;
        channel.disconnect().await?;
        result
    }
}
