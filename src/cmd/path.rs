use chrono::Local;
use clap::Args;
use serde::Serialize;

use crate::args::FormatArgs;
use crate::config::{self, Config};
use crate::error::{Error, Result};
use crate::output::OutputFormat;

#[derive(Args)]
pub struct PathArgs {
    /// Print the thought-log path instead of today's note
    #[arg(long)]
    log: bool,

    #[command(flatten)]
    format: FormatArgs,
}

#[derive(Serialize)]
struct PathOutput {
    path: String,
    exists: bool,
}

pub fn run(args: PathArgs, config: &Config) -> Result<()> {
    let format = args.format.resolve();

    let path = if args.log {
        config::thought_log_path(config)
    } else {
        config::daily_note_path(config, Local::now())
    };

    match format {
        OutputFormat::Pretty | OutputFormat::Plain => {
            println!("{}", path.display());
        }
        OutputFormat::Json => {
            let output = PathOutput {
                path: path.to_string_lossy().to_string(),
                exists: path.exists(),
            };
            let json = serde_json::to_string_pretty(&output)
                .map_err(|e| Error::Output(format!("JSON serialization failed: {}", e)))?;
            println!("{}", json);
        }
        OutputFormat::Yaml => {
            let output = PathOutput {
                path: path.to_string_lossy().to_string(),
                exists: path.exists(),
            };
            let yaml = serde_yaml::to_string(&output)
                .map_err(|e| Error::Output(format!("YAML serialization failed: {}", e)))?;
            print!("{}", yaml);
        }
    }

    Ok(())
}
