use std::io;
use std::process;

use clap::{CommandFactory, Parser, Subcommand, ValueEnum};
use clap_complete::{Shell, generate};

mod args;
mod clock;
mod cmd;
mod config;
mod error;
mod external;
mod input;
mod journal;
mod note;
mod output;

#[derive(Parser)]
#[command(name = "daynote")]
#[command(version = env!("DAYNOTE_VERSION"))]
#[command(about = "Daily-note tasks and thought log")]
#[command(
    long_about = "daynote - Move tasks between the now/later/done sections of a plain-text\ndaily note and keep a timestamped thought log, one short command per action.\n\nThe daily note lives at <notes dir>/<MM-DD-YY>.txt and is edited in place;\nthe current task is mirrored to a menu-bar display."
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Add a task to the now section (or re-display the current one)
    Now(cmd::now::NowArgs),

    /// File a task in the later section
    Later(cmd::later::LaterArgs),

    /// Complete the topmost now task (or log a finished one)
    Done(cmd::done::DoneArgs),

    /// Add a timestamped thought-log entry
    Thought(cmd::thought::ThoughtArgs),

    /// Open a fresh thought-log placeholder
    Start(cmd::start::StartArgs),

    /// Print today's note path
    Path(cmd::path::PathArgs),

    /// Generate shell completion script
    Completion(CompletionArgs),

    /// Configuration introspection
    Config(cmd::config_cmd::ConfigArgs),
}

#[derive(clap::Args)]
struct CompletionArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    shell: CompletionShell,
}

#[derive(Clone, ValueEnum)]
enum CompletionShell {
    Bash,
    Zsh,
    Fish,
    Powershell,
}

fn main() {
    // Use try_parse to catch errors and normalize exit code
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) => {
            // Print the error (includes usage for missing args)
            let _ = e.print();
            // Exit with 0 for help/version, 1 for actual errors
            let exit_code = if e.kind() == clap::error::ErrorKind::DisplayHelp
                || e.kind() == clap::error::ErrorKind::DisplayVersion
            {
                0
            } else {
                1
            };
            process::exit(exit_code);
        }
    };

    // Handle completion before config load (doesn't need config)
    if let Commands::Completion(args) = &cli.command {
        let shell = match args.shell {
            CompletionShell::Bash => Shell::Bash,
            CompletionShell::Zsh => Shell::Zsh,
            CompletionShell::Fish => Shell::Fish,
            CompletionShell::Powershell => Shell::PowerShell,
        };
        generate(shell, &mut Cli::command(), "daynote", &mut io::stdout());
        return;
    }

    // Load config
    let loaded_config = config::load_config();

    let result = match cli.command {
        Commands::Now(args) => cmd::now::run(args, &loaded_config.config),
        Commands::Later(args) => cmd::later::run(args, &loaded_config.config),
        Commands::Done(args) => cmd::done::run(args, &loaded_config.config),
        Commands::Thought(args) => cmd::thought::run(args, &loaded_config.config),
        Commands::Start(args) => cmd::start::run(args, &loaded_config.config),
        Commands::Path(args) => cmd::path::run(args, &loaded_config.config),
        Commands::Config(args) => cmd::config_cmd::run(args),
        Commands::Completion(_) => unreachable!(), // Handled above
    };

    if let Err(e) = result {
        eprintln!("{}", e);
        process::exit(1);
    }
}
