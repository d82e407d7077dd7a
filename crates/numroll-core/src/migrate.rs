//! Conversion of legacy `cond_messages` into `[[message.rules]]`.
//!
//! Legacy entries are `[condition, message, replace, stop]` tuples where the
//! condition is an integer, `"highest"`/`"lowest"`, or an `[A, B]` range.

use std::path::Path;

use crate::error::{NumrollError, Result};
use crate::types::{ConditionValue, MessageMode, RuleConfig};

/// Convert legacy tuples to rule records. Malformed entries are skipped.
pub fn migrate_legacy_rules(cond_messages: &[toml::Value]) -> Vec<RuleConfig> {
    cond_messages
        .iter()
        .enumerate()
        .filter_map(|(index, entry)| {
            let rule = migrate_entry(entry);
            if rule.is_none() {
                tracing::warn!("Skipping malformed legacy rule #{index}: {entry}");
            }
            rule
        })
        .collect()
}

fn migrate_entry(entry: &toml::Value) -> Option<RuleConfig> {
    let [condition, message, replace, stop] = entry.as_array()?.as_slice() else {
        return None;
    };

    let condition = match condition {
        toml::Value::Integer(n) => ConditionValue::Text(format!("={n}")),
        toml::Value::String(keyword) => ConditionValue::Text(keyword.clone()),
        toml::Value::Array(bounds) => match bounds.as_slice() {
            [toml::Value::Integer(start), toml::Value::Integer(end)] => {
                ConditionValue::Range([*start, *end])
            }
            _ => return None,
        },
        _ => return None,
    };

    let mode = if replace.as_bool()? {
        MessageMode::ReplaceAll
    } else {
        MessageMode::Add
    };

    Some(RuleConfig {
        condition,
        message: message.as_str()?.to_string(),
        mode,
        stop_on_trigger: stop.as_bool()?,
        jump_to_rule: None,
        mutually_exclusive: Vec::new(),
    })
}

/// Rewrite `[message] cond_messages` as `[[message.rules]]` inside a parsed
/// settings table. Returns `false` when there is nothing to migrate.
///
/// Existing `rules` take precedence over legacy entries when loading, so they
/// are kept as-is and the shadowed `cond_messages` are only dropped.
pub fn migrate_settings(settings: &mut toml::Table) -> Result<bool> {
    let Some(message) = settings.get_mut("message").and_then(toml::Value::as_table_mut) else {
        return Ok(false);
    };
    let Some(legacy) = message.remove("cond_messages") else {
        return Ok(false);
    };
    let legacy = legacy
        .as_array()
        .ok_or_else(|| NumrollError::migration("message.cond_messages must be an array"))?;

    if message.contains_key("rules") {
        tracing::warn!(
            "Dropping {} legacy cond_messages shadowed by existing [[message.rules]]",
            legacy.len()
        );
        return Ok(true);
    }

    let rules = migrate_legacy_rules(legacy);
    message.insert("rules".to_string(), toml::Value::try_from(&rules)?);
    Ok(true)
}

/// Migrate a settings file in place. The file is left untouched when it has
/// no legacy rules.
pub fn migrate_settings_file(path: &Path) -> Result<bool> {
    if !path.is_file() {
        return Err(NumrollError::ConfigNotFound(path.display().to_string()));
    }

    let content = std::fs::read_to_string(path)?;
    let mut settings: toml::Table = toml::from_str(&content)?;

    if !migrate_settings(&mut settings)? {
        return Ok(false);
    }

    std::fs::write(path, toml::to_string_pretty(&settings)?)?;
    tracing::info!("Migrated legacy rules in {}", path.display());
    Ok(true)
}
