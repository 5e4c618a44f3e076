mod banner;
mod cli;
mod commands;
mod output;
mod repl;
mod settings;

use anyhow::{Result, bail};
use clap::Parser;
use sleuth::Session;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use cli::{Args, Command};
use repl::Shell;
use settings::Settings;

fn main() -> Result<()> {
    let args = Args::parse();

    // Initialize logging
    let directive = if args.verbose { "sleuth=debug" } else { "sleuth=info" };
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env().add_directive(directive.parse()?))
        .init();

    let mut settings = load_settings(&args);
    if args.quiet {
        settings.quiet = true;
    }
    if let Some(dir) = &args.output_dir {
        settings.output_dir = dir.clone();
    }

    let mut session = Session::new(settings.session_config());

    match args.command {
        None | Some(Command::Shell) => {
            if let Some(path) = &args.input {
                session.load_image(path)?;
            }
            if let Some(path) = &args.profile {
                session.load_profile(path)?;
            }
            Shell::new(session, settings.width).run(!settings.quiet)
        }
        Some(command) => {
            let (Some(image), Some(profile)) = (&args.input, &args.profile) else {
                bail!("Batch commands require both --profile (-p) and --input (-i)");
            };
            session.load_image(image)?;
            session.load_profile(profile)?;
            run_batch(&mut session, command, settings.width)
        }
    }
}

fn run_batch(session: &mut Session, command: Command, width: usize) -> Result<()> {
    match command {
        Command::List { json } => commands::list::run(session, json),
        Command::Resolve { output } => commands::resolve::run(session, &output),
        Command::View { name, width: w } => {
            commands::view::run(session, &name, w.unwrap_or(width).max(1))
        }
        Command::Dump { name, output } => commands::dump::run(session, &name, output.as_deref()),
        Command::Shell => Ok(()),
    }
}

/// Settings from `--config`, else the default location if present.
fn load_settings(args: &Args) -> Settings {
    let path = match &args.config {
        Some(path) => path.clone(),
        None => match Settings::default_path() {
            Some(path) if path.exists() => path,
            _ => return Settings::default(),
        },
    };

    match Settings::load(&path) {
        Ok(settings) => {
            info!("Loaded settings from {:?}", path);
            settings
        }
        Err(e) => {
            warn!("Failed to load settings: {:#}, using defaults", e);
            Settings::default()
        }
    }
}
