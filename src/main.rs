//! aliasgen - mail aliases file generator.
//!
//! Merges the distribution's base aliases template with the email addresses
//! configured on user accounts and installs the result for the MTA.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tracing_subscriber::EnvFilter;

use aliasgen::config::Config;
use aliasgen::platform::Platform;

#[derive(Parser)]
#[command(name = "aliasgen")]
#[command(about = "Mail aliases file generator")]
#[command(
    after_help = "QUICK START:\n  aliasgen show config            Check configuration\n  aliasgen render --users u.json  Print the merged file\n  aliasgen install                Write /etc/aliases and reload"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print the merged aliases file to stdout
    Render {
        #[command(flatten)]
        source: SourceArgs,
    },

    /// Write the aliases file and reload the mail system if it changed
    Install {
        #[command(flatten)]
        source: SourceArgs,

        /// Destination file (default: /etc/aliases)
        #[arg(short, long)]
        output: Option<PathBuf>,

        /// Don't run the reload command after writing
        #[arg(long)]
        no_reload: bool,
    },

    /// Show information
    Show {
        #[command(subcommand)]
        what: ShowTarget,
    },
}

#[derive(Args)]
struct SourceArgs {
    /// JSON user list (overrides ALIASGEN_USERS)
    #[arg(short, long)]
    users: Option<PathBuf>,

    /// Platform family: linux or other (overrides ALIASGEN_PLATFORM)
    #[arg(short, long)]
    platform: Option<Platform>,

    /// Root directory the template path is resolved against
    #[arg(long)]
    root: Option<PathBuf>,
}

impl SourceArgs {
    fn apply(self, config: &mut Config) {
        if let Some(users) = self.users {
            config.users = Some(users);
        }
        if let Some(platform) = self.platform {
            config.platform = platform;
        }
        if let Some(root) = self.root {
            config.root = root;
        }
    }
}

#[derive(Subcommand)]
enum ShowTarget {
    /// Show current configuration
    Config,
}

fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let base_dir = std::env::current_dir()?;
    let mut config = Config::load(&base_dir)?;

    match cli.command {
        Commands::Render { source } => {
            source.apply(&mut config);
            commands::cmd_render(&config)?;
        }

        Commands::Install {
            source,
            output,
            no_reload,
        } => {
            source.apply(&mut config);
            if let Some(output) = output {
                config.output = output;
            }
            if no_reload {
                config.reload_command = None;
            }
            commands::cmd_install(&config)?;
        }

        Commands::Show { what } => {
            let show_target = match what {
                ShowTarget::Config => commands::show::ShowTarget::Config,
            };
            commands::cmd_show(show_target, &config)?;
        }
    }

    Ok(())
}
