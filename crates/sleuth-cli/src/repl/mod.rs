//! Interactive shell over one `Session`.

mod command;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};
use owo_colors::OwoColorize;
use rustyline::DefaultEditor;
use rustyline::error::ReadlineError;
use sleuth::{Region, Session};
use tracing::debug;

use command::{Command, ViewOptions};

use crate::banner;
use crate::commands::hex_utils::format_hex_address;
use crate::commands::{list, view};
use crate::output;

/// Whether the loop keeps reading after a command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

pub struct Shell {
    session: Session,
    width: usize,
}

impl Shell {
    pub fn new(session: Session, width: usize) -> Self {
        Self { session, width }
    }

    /// Read and execute lines until `exit` or end of input.
    pub fn run(&mut self, show_banner: bool) -> Result<()> {
        if show_banner {
            banner::print_banner();
        }

        let mut rl = DefaultEditor::new().context("Failed to initialize readline")?;
        let history_path = history_path();
        if rl.load_history(&history_path).is_err() {
            debug!("No history at {}", history_path.display());
        }

        let prompt = format!("{} ", "sleuth>".cyan().bold());
        loop {
            match rl.readline(&prompt) {
                Ok(line) => {
                    let input = line.trim();
                    if input.is_empty() {
                        continue;
                    }
                    let _ = rl.add_history_entry(input);

                    match self.execute_line(input) {
                        Ok(Flow::Exit) => break,
                        Ok(Flow::Continue) => {}
                        Err(e) => output::error(&format!("{:#}", e)),
                    }
                }
                Err(ReadlineError::Interrupted) => {
                    println!("{}", "Interrupted. Use 'exit' or Ctrl+D to leave.".dimmed());
                }
                Err(ReadlineError::Eof) => break,
                Err(e) => {
                    output::error(&format!("{:?}", e));
                    break;
                }
            }
        }

        if let Some(parent) = history_path.parent() {
            let _ = fs::create_dir_all(parent);
        }
        if let Err(e) = rl.save_history(&history_path) {
            debug!("Failed to save history: {}", e);
        }
        Ok(())
    }

    /// Parse and execute one input line.
    pub fn execute_line(&mut self, line: &str) -> Result<Flow> {
        match Command::parse(line)? {
            Some(command) => self.execute(command),
            None => Ok(Flow::Continue),
        }
    }

    pub fn execute(&mut self, command: Command) -> Result<Flow> {
        match command {
            Command::Help => banner::print_help(),
            Command::Exit => return Ok(Flow::Exit),
            Command::LoadProfile(path) => {
                let count = self.session.load_profile(&path)?.len();
                output::success(&format!("Loaded {} structures from '{}'.", count, path));
            }
            Command::LoadImage(path) => {
                let len = self.session.load_image(&path)?.len();
                output::success(&format!("Loaded image '{}' ({} bytes).", path, len));
            }
            Command::ShowProfile => self.show_profile()?,
            Command::Status => self.status(),
            Command::List => {
                let report = self.session.resolve_all()?;
                list::print_table(self.session.schema()?, &report);
            }
            Command::Hex {
                offset,
                size,
                options,
            } => {
                let region = self.session.raw_region(offset, size)?;
                self.show(&region, options)?;
            }
            Command::AnalyzeAbs { name, options } => {
                let region = self.session.declared_region(&name)?;
                self.show(&region, options)?;
            }
            Command::AnalyzeRel { name, options } => {
                let analysis = self.session.analyze(&name)?;
                let reconciliation = &analysis.reconciliation;
                if let Some(path) = &analysis.updated_profile {
                    output::warning(&format!(
                        "Profile for '{}' did not match the image (offset {} -> {}, size {} -> {})",
                        name,
                        declared(reconciliation.declared_offset),
                        format_hex_address(reconciliation.offset),
                        declared(reconciliation.declared_size),
                        format_hex_address(reconciliation.size),
                    ));
                    println!("Updated profile saved to '{}'.", path.display());
                }
                self.show(&analysis.region, options)?;
            }
        }
        Ok(Flow::Continue)
    }

    fn show(&mut self, region: &Region, options: ViewOptions) -> Result<()> {
        view::show_region(&self.session, region, options.width.unwrap_or(self.width))?;
        if options.extract {
            let path = self.session.extract(region)?;
            output::success(&format!("Extracted to '{}'.", path.display()));
        }
        Ok(())
    }

    fn show_profile(&self) -> Result<()> {
        let schema = self.session.schema()?;
        println!(
            "{:<30} {:<14} {:<12} {:<12} {}",
            "name", "offset", "size", "rOffset", "parent"
        );
        println!("{}", "-".repeat(80));
        for d in schema.iter() {
            println!(
                "{:<30} {:<14} {:<12} {:<12} {}",
                d.name,
                d.offset.as_deref().unwrap_or(""),
                d.size.as_deref().unwrap_or(""),
                d.r_offset.as_deref().unwrap_or(""),
                d.parent.as_deref().unwrap_or("")
            );
        }
        Ok(())
    }

    fn status(&self) {
        match (self.session.image_path(), self.session.store()) {
            (Some(path), Ok(store)) => {
                println!("Image:   {} ({} bytes)", path.display(), store.len())
            }
            (None, Ok(store)) => println!("Image:   <memory> ({} bytes)", store.len()),
            _ => println!("Image:   {}", "not loaded".dimmed()),
        }
        match (self.session.profile_path(), self.session.schema()) {
            (Some(path), Ok(schema)) => {
                println!("Profile: {} ({} structures)", path.display(), schema.len())
            }
            (None, Ok(schema)) => println!("Profile: <memory> ({} structures)", schema.len()),
            _ => println!("Profile: {}", "not loaded".dimmed()),
        }
        println!("Cached:  {} resolved offsets", self.session.cached_count());

        let outputs = self.session.outputs();
        if outputs.is_empty() {
            return;
        }
        println!("Generated files:");
        for generated in outputs {
            println!(
                "  {}  {}",
                generated.created_at.format("%Y-%m-%d %H:%M:%S").dimmed(),
                generated.path.display()
            );
        }
    }
}

fn declared(value: Option<u64>) -> String {
    value.map_or_else(|| "N/A".to_string(), format_hex_address)
}

fn history_path() -> PathBuf {
    dirs::cache_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("sleuth")
        .join("history.txt")
}
