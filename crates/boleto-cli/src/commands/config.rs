//! Config command - manage configuration.

use std::fs;
use std::path::{Path, PathBuf};

use clap::{Args, Subcommand};
use console::style;

use boleto_core::BoletoConfig;

use super::default_config_path;

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Print the effective settings
    Show,

    /// Write a file with the default settings
    Init(InitArgs),

    /// Print where the settings file is read from
    Path,
}

#[derive(Args)]
struct InitArgs {
    /// Where to write the file (default: the active config path)
    #[arg(short, long)]
    output: Option<PathBuf>,

    /// Replace an existing file
    #[arg(long)]
    force: bool,
}

pub async fn run(args: ConfigArgs, config_path: Option<&str>) -> anyhow::Result<()> {
    let active = config_path.map(PathBuf::from).unwrap_or_else(default_config_path);

    match args.command {
        ConfigCommand::Show => show_config(&active),
        ConfigCommand::Init(init_args) => init_config(init_args.output.unwrap_or(active), init_args.force),
        ConfigCommand::Path => show_path(&active),
    }
}

/// Print the effective settings as JSON, flagging values that fail validation.
fn show_config(path: &Path) -> anyhow::Result<()> {
    let config = if path.exists() {
        BoletoConfig::from_file(path)?
    } else {
        eprintln!(
            "{} {} does not exist, using built-in defaults",
            style("ℹ").blue(),
            path.display()
        );
        BoletoConfig::default()
    };

    if let Err(e) = config.validate() {
        eprintln!("{} {}", style("⚠").yellow(), e);
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}

fn init_config(target: PathBuf, force: bool) -> anyhow::Result<()> {
    if target.exists() && !force {
        anyhow::bail!(
            "{} already exists; pass --force to replace it",
            target.display()
        );
    }

    if let Some(dir) = target.parent().filter(|d| !d.as_os_str().is_empty()) {
        fs::create_dir_all(dir)?;
    }
    BoletoConfig::default().save(&target)?;

    println!("{} Wrote default settings to {}", style("✓").green(), target.display());
    Ok(())
}

fn show_path(path: &Path) -> anyhow::Result<()> {
    let status = if path.exists() {
        style("present").green()
    } else {
        style("missing (run `boleto config init`)").yellow()
    };
    println!("{} [{}]", path.display(), status);
    Ok(())
}
