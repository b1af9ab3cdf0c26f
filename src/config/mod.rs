pub mod toml_config;

#[cfg(feature = "cli")]
pub use cli::{CliConfig, Command};

#[cfg(feature = "cli")]
mod cli {
    use crate::utils::error::Result;
    use crate::utils::validation::{validate_path, Validate};
    use clap::{Parser, Subcommand};

    #[derive(Debug, Clone, Parser)]
    #[command(name = "student-roster")]
    #[command(about = "Manage a student roster and compare sorting/searching algorithms")]
    pub struct CliConfig {
        /// Roster snapshot (JSON) to read and write back
        #[arg(long, global = true)]
        pub snapshot: Option<String>,

        /// Path to TOML configuration file
        #[arg(short, long, global = true)]
        pub config: Option<String>,

        /// Override the update policy (skip_blank or presence)
        #[arg(long, global = true)]
        pub update_policy: Option<String>,

        #[arg(short, long, global = true, help = "Enable verbose output")]
        pub verbose: bool,

        #[arg(long, global = true, help = "Emit logs as JSON")]
        pub json_logs: bool,

        #[command(subcommand)]
        pub command: Command,
    }

    #[derive(Debug, Clone, Subcommand)]
    pub enum Command {
        /// Print every student in the current order
        List,
        /// Add a student; the registration code must be digits only
        Add {
            #[arg(long)]
            id: Option<String>,
            #[arg(long)]
            name: String,
            #[arg(long)]
            code: String,
            #[arg(long, default_value = "")]
            category: String,
            #[arg(long, default_value = "0")]
            score: f64,
        },
        /// Change fields of an existing student
        Update {
            id: String,
            #[arg(long)]
            name: Option<String>,
            #[arg(long)]
            code: Option<String>,
            #[arg(long)]
            category: Option<String>,
            #[arg(long)]
            score: Option<f64>,
        },
        /// Remove a student (no-op when the id is unknown)
        Delete { id: String },
        /// Reorder the roster and save the new order
        Sort {
            #[arg(short, long)]
            algorithm: Option<String>,
            #[arg(short, long)]
            key: Option<String>,
            #[arg(short, long)]
            order: Option<String>,
        },
        /// Search by name or registration code
        Search {
            query: String,
            #[arg(short, long)]
            algorithm: Option<String>,
        },
        /// Write the roster as CSV to a file, or stdout when no file is given
        ExportCsv {
            #[arg(short, long)]
            output: Option<String>,
        },
        /// List the available algorithms and their complexity
        Algorithms,
    }

    impl Validate for CliConfig {
        fn validate(&self) -> Result<()> {
            if let Some(snapshot) = &self.snapshot {
                validate_path("snapshot", snapshot)?;
            }
            if let Some(config) = &self.config {
                validate_path("config", config)?;
            }
            if let Command::ExportCsv {
                output: Some(output),
            } = &self.command
            {
                validate_path("output", output)?;
            }
            Ok(())
        }
    }

}
