//! CLI command definitions.

use clap::{Parser, Subcommand, ValueEnum};
use uuid::Uuid;

use crate::config::Config;

/// Query and maintain employees and their audit logs.
#[derive(Debug, Parser)]
#[command(name = "empleados")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// DynamoDB table name.
    #[arg(long, env = "DYNAMODB_TABLE_NAME", default_value = "empleados")]
    pub table_name: String,

    /// Global secondary index on `cedula` (must project all attributes).
    #[arg(long, env = "DYNAMODB_CEDULA_INDEX", default_value = "cedula-index")]
    pub cedula_index: String,

    /// Custom DynamoDB endpoint (e.g. local DynamoDB).
    #[arg(long, env = "AWS_ENDPOINT_URL")]
    pub endpoint_url: Option<String>,

    /// AWS region.
    #[arg(long, env = "AWS_REGION", default_value = "us-east-1")]
    pub region: String,

    /// Resubmissions of unprocessed batch-delete keys.
    #[arg(long, env = "BATCH_DELETE_MAX_RETRIES", default_value_t = 3)]
    pub batch_delete_max_retries: u32,

    /// Initial backoff between batch-delete resubmissions, in milliseconds.
    #[arg(long, env = "BATCH_DELETE_BACKOFF_MS", default_value_t = 50)]
    pub batch_delete_backoff_ms: u64,

    /// Output format.
    #[arg(long, default_value = "pretty")]
    pub format: OutputFormat,

    /// Suppress confirmations of write commands.
    #[arg(long)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

impl Cli {
    /// Build the storage configuration from the parsed flags.
    ///
    /// Every flag falls back to the same environment variable as
    /// [`Config::from_env`].
    pub fn config(&self) -> Config {
        Config {
            table_name: self.table_name.clone(),
            cedula_index: self.cedula_index.clone(),
            endpoint_url: self.endpoint_url.clone(),
            region: self.region.clone(),
            batch_delete_max_retries: self.batch_delete_max_retries,
            batch_delete_backoff_ms: self.batch_delete_backoff_ms,
        }
    }
}

/// Output format options.
#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum OutputFormat {
    /// Raw JSON output.
    Json,
    /// Human-readable output.
    #[default]
    Pretty,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Commands {
    /// List all employees.
    List,
    /// Get an employee by ID.
    Get {
        /// Employee ID.
        codigo: Uuid,
    },
    /// Find employees by national identity number.
    Cedula {
        /// Identity number, matched exactly.
        cedula: String,
    },
    /// Search employees. Separate terms with `+`.
    Search {
        /// Query, e.g. "ana + lopez".
        query: String,
    },
    /// Create or overwrite an employee.
    Save {
        /// Employee ID. A new one is generated when omitted.
        #[arg(long)]
        codigo: Option<Uuid>,
        /// Identity number.
        #[arg(long)]
        cedula: String,
        /// Given names.
        #[arg(long)]
        nombres: String,
        /// Surnames.
        #[arg(long)]
        apellidos: String,
        /// Job title.
        #[arg(long)]
        cargo: Option<String>,
        /// Email address.
        #[arg(long)]
        correo: Option<String>,
    },
    /// Delete an employee by ID.
    Delete {
        /// Employee ID.
        codigo: Uuid,
    },
    /// List the audit logs of an employee.
    Logs {
        /// Employee ID.
        codigo: Uuid,
    },
    /// Delete every audit log of an employee.
    PurgeLogs {
        /// Employee ID.
        codigo: Uuid,
    },
}
