//! Configuration introspection command.
//!
//! Provides `daynote config` subcommands:
//! - show: Display resolved configuration
//! - env: List environment variables
//! - schema: Output JSON schema
//! - init: Create template config file

use std::fs;

use clap::{Args, Subcommand};

use crate::config::{
    self, Config, ConfigSource, ENV_VARS, load_config, template_config, user_config_path,
};
use crate::error::{Error, Result};

#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    command: ConfigCommand,
}

#[derive(Subcommand)]
enum ConfigCommand {
    /// Show resolved configuration
    Show(ShowArgs),

    /// List environment variables
    Env,

    /// Output JSON schema for config validation
    Schema,

    /// Create template config file
    Init(InitArgs),
}

#[derive(Args)]
struct ShowArgs {
    /// Show where each value came from
    #[arg(long)]
    effective: bool,
}

#[derive(Args)]
struct InitArgs {
    /// Overwrite existing config file
    #[arg(long)]
    force: bool,
}

pub fn run(args: ConfigArgs) -> Result<()> {
    match args.command {
        ConfigCommand::Show(show_args) => run_show(show_args.effective),
        ConfigCommand::Env => run_env(),
        ConfigCommand::Schema => run_schema(),
        ConfigCommand::Init(init_args) => run_init(init_args),
    }
}

fn run_show(effective: bool) -> Result<()> {
    let loaded = load_config();

    if effective {
        print_effective(&loaded.config, &loaded.sources);
    } else {
        let yaml = serde_yaml::to_string(&loaded.config)
            .map_err(|e| Error::Output(format!("failed to serialize config: {}", e)))?;
        println!("{}", yaml.trim());
    }

    Ok(())
}

fn print_effective(config: &Config, sources: &[ConfigSource]) {
    println!("# Resolved configuration");
    println!("# Sources (in order of precedence):");
    for source in sources {
        println!("#   - {}", source);
    }
    println!();

    // Print YAML with source annotations
    let yaml = serde_yaml::to_string(config).unwrap_or_default();
    print!("{}", yaml);
}

fn run_env() -> Result<()> {
    println!("Environment Variables:");
    println!();

    for var in ENV_VARS {
        println!("  {}", var.name);
        println!("    {}", var.description);
        if let Some(values) = var.values {
            println!("    Values: {}", values);
        }
        println!("    Default: {}", var.default);
        println!("    Config path: {}", var.config_path);
        println!();
    }

    Ok(())
}

fn run_schema() -> Result<()> {
    println!("{}", config::json_schema());
    Ok(())
}

fn run_init(args: InitArgs) -> Result<()> {
    let Some(config_path) = user_config_path() else {
        return Err(Error::Usage("cannot determine config directory".to_string()));
    };

    if config_path.exists() && !args.force {
        return Err(Error::Usage(format!(
            "config already exists: {}\nUse --force to overwrite",
            config_path.display()
        )));
    }

    if let Some(parent) = config_path.parent() {
        fs::create_dir_all(parent)
            .map_err(|e| Error::io(format!("failed to create {}", parent.display()), e))?;
    }

    fs::write(&config_path, template_config())
        .map_err(|e| Error::io(format!("failed to write {}", config_path.display()), e))?;

    println!("Created: {}", config_path.display());

    Ok(())
}
