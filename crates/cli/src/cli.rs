use std::path::PathBuf;

use clap::{Parser, Subcommand};

use workshop_infra::WorkshopConfig;
use workshop_observability::LogFormat;

#[derive(Debug, Parser)]
#[command(name = "workshop")]
#[command(about = "Messaging, event sourcing and value objects, one episode at a time")]
pub struct Cli {
    #[command(subcommand)]
    pub episode: Episode,

    /// How long each piece of factory work takes, in milliseconds
    /// (falls back to WORKSHOP_WORK_DELAY_MS)
    #[arg(long, global = true)]
    pub work_delay_ms: Option<u64>,

    /// Log output: json or text (falls back to WORKSHOP_LOG_FORMAT)
    #[arg(long, global = true)]
    pub log_format: Option<LogFormat>,
}

#[derive(Debug, Subcommand)]
pub enum Episode {
    /// Call a shopping basket directly, then through messages
    Basket {
        /// Where the serialized message is written and read back
        #[arg(long, default_value = "message.json")]
        message_file: PathBuf,
    },
    /// A day at the factory, recorded in a journal
    Factory,
    /// Currency amounts as value objects
    Currency,
    /// Every episode in order
    All {
        #[arg(long, default_value = "message.json")]
        message_file: PathBuf,
    },
}

impl Cli {
    /// Flags win over the environment, which wins over defaults.
    pub fn config(&self, from_env: WorkshopConfig) -> WorkshopConfig {
        let mut config = from_env;
        if let Some(ms) = self.work_delay_ms {
            config.work_delay = std::time::Duration::from_millis(ms);
        }
        if let Some(format) = self.log_format {
            config.log_format = format;
        }
        config
    }
}
