//! # numroll CLI
//!
//! Rolls a number for every tracked user and posts a notification composed
//! from the configured message rules.
//!
//! Usage:
//!   numroll roll                       # Roll one round and deliver it
//!   numroll roll --seed 42             # Reproducible round
//!   numroll eval 94 --highest          # Preview the message for one number
//!   numroll check                      # Validate settings and rules
//!   numroll migrate                    # Convert legacy cond_messages
//!   numroll config show                # Show effective settings

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use numroll_core::Settings;
use numroll_rules::{RollInput, RuleSet};
use numroll_scheduler::{RollBounds, Roller, RoundRunner};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
    name = "numroll",
    version,
    about = "🎲 numroll — scheduled number rolls with rule-based messages"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Settings file path (default: ./bot_settings.toml)
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Roll one round for every tracked user and deliver it
    Roll {
        /// Seed the roller for a reproducible round
        #[arg(long)]
        seed: Option<u64>,

        /// Delivery channel
        #[arg(long, default_value = "console")]
        channel: String,

        /// Print the round and delivery report as JSON
        #[arg(long)]
        json: bool,
    },

    /// Compose the message for a single number
    Eval {
        /// Rolled number
        #[arg(allow_negative_numbers = true)]
        number: i64,

        /// Treat the number as the round's highest
        #[arg(long)]
        highest: bool,

        /// Treat the number as the round's lowest
        #[arg(long)]
        lowest: bool,

        /// Print JSON instead of plain text
        #[arg(long)]
        json: bool,
    },

    /// Validate settings and message rules
    Check,

    /// Rewrite legacy cond_messages as [[message.rules]]
    Migrate {
        /// Settings file to migrate (defaults to --config or ./bot_settings.toml)
        file: Option<PathBuf>,
    },

    /// Configuration management
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show effective settings
    Show,
}

fn settings_path(cli_path: Option<&Path>) -> PathBuf {
    cli_path.map(Path::to_path_buf).unwrap_or_else(Settings::default_path)
}

fn load_settings(path: &Path) -> Result<Settings> {
    Settings::load_from(path).with_context(|| format!("Failed to load {}", path.display()))
}

fn load_runner(settings: &Settings) -> Result<RoundRunner> {
    RoundRunner::from_settings(settings).context("Invalid message rules")
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        "numroll=debug,numroll_core=debug,numroll_rules=debug,numroll_scheduler=debug,numroll_channels=debug"
    } else {
        "numroll=info,numroll_core=info,numroll_scheduler=info"
    };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(filter)))
        .with_target(false)
        .init();

    let path = settings_path(cli.config.as_deref());

    match cli.command {
        Commands::Roll { seed, channel, json } => {
            let settings = load_settings(&path)?;
            let runner = load_runner(&settings)?;

            if settings.bot.users.is_empty() {
                println!("⚠️  No users configured in [bot] users — nothing to roll.");
                return Ok(());
            }

            let bounds = RollBounds::from(&settings.roll);
            let mut roller = match seed {
                Some(seed) => Roller::seeded(bounds, seed),
                None => Roller::new(bounds),
            };
            let round = roller.roll_round(&settings.bot.users);

            let mut channel = numroll_channels::create_channel(&channel)?;
            let report = runner.deliver(&round, channel.as_mut()).await?;

            if json {
                let out = serde_json::json!({ "round": round, "report": report });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!(
                    "🎲 Round at {}: {} delivered, {} failed",
                    report.rolled_at.format("%Y-%m-%d %H:%M:%S UTC"),
                    report.delivered,
                    report.failed
                );
            }

            if report.failed > 0 {
                anyhow::bail!("{} of {} notifications failed", report.failed, round.len());
            }
        }

        Commands::Eval { number, highest, lowest, json } => {
            let settings = load_settings(&path)?;
            let runner = load_runner(&settings)?;

            let (min, max) = settings.roll.bounds();
            if !(min..=max).contains(&number) {
                tracing::warn!("{number} is outside the roll range {min}..={max}");
            }

            let roll = RollInput::new(number).highest(highest).lowest(lowest);
            let message = runner.rules().compose(runner.template(), &roll);

            if json {
                let out = serde_json::json!({
                    "number": number,
                    "highest": highest,
                    "lowest": lowest,
                    "message": message,
                });
                println!("{}", serde_json::to_string_pretty(&out)?);
            } else {
                println!("{message}");
            }
        }

        Commands::Check => {
            let settings = load_settings(&path)?;
            let rules = RuleSet::from_settings(&settings).context("Invalid message rules")?;
            let (min, max) = settings.roll.bounds();

            println!("✅ {} is valid", path.display());
            println!("   Users: {}", settings.bot.users.len());
            println!("   Roll range: {min}..={max}");
            println!("   Rules: {}", rules.len());
            if settings.message.rules.is_none() && settings.message.cond_messages.is_some() {
                println!("   ⚠️  Legacy cond_messages in use — run `numroll migrate`");
            }
        }

        Commands::Migrate { file } => {
            let target = file.unwrap_or(path);
            let migrated = numroll_core::migrate::migrate_settings_file(&target)
                .with_context(|| format!("Failed to migrate {}", target.display()))?;
            if migrated {
                println!("✅ Migrated legacy rules in {}", target.display());
            } else {
                println!("No legacy rules found; no changes were made.");
            }
        }

        Commands::Config { action } => match action {
            ConfigAction::Show => {
                let settings = load_settings(&path)?;
                println!("{}", toml::to_string_pretty(&settings)?);
            }
        },
    }

    Ok(())
}
