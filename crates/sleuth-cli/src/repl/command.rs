//! Interactive command parsing.

use std::str::FromStr;

use anyhow::{Result, anyhow, bail};
use strum::EnumString;

use crate::commands::hex_utils::parse_number;

/// Interactive commands and their accepted spellings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(ascii_case_insensitive)]
pub enum CommandKind {
    #[strum(serialize = "h", serialize = "help")]
    Help,
    #[strum(serialize = "loadcsv", serialize = "setcsv")]
    LoadProfile,
    #[strum(
        serialize = "setimg",
        serialize = "loadimg",
        serialize = "setbin",
        serialize = "loadbin"
    )]
    LoadImage,
    #[strum(serialize = "showcsv")]
    ShowProfile,
    #[strum(serialize = "status")]
    Status,
    #[strum(serialize = "list")]
    List,
    #[strum(serialize = "hex")]
    Hex,
    #[strum(serialize = "aa", serialize = "analyze_abs")]
    AnalyzeAbs,
    #[strum(serialize = "ar", serialize = "analyze_rel")]
    AnalyzeRel,
    #[strum(serialize = "exit", serialize = "quit")]
    Exit,
}

/// Trailing options shared by the region commands.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ViewOptions {
    /// `w=N`
    pub width: Option<usize>,
    /// `extract` or `-e`
    pub extract: bool,
}

/// A fully parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    LoadProfile(String),
    LoadImage(String),
    ShowProfile,
    Status,
    List,
    Hex {
        offset: u64,
        size: u64,
        options: ViewOptions,
    },
    AnalyzeAbs {
        name: String,
        options: ViewOptions,
    },
    AnalyzeRel {
        name: String,
        options: ViewOptions,
    },
    Exit,
}

impl Command {
    /// Parse one line. Blank lines yield `None`.
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let tokens = tokenize(line)?;
        let Some((head, rest)) = tokens.split_first() else {
            return Ok(None);
        };
        let kind = CommandKind::from_str(head).map_err(|_| {
            anyhow!(
                "Unknown command: '{}'. Type 'help' for a list of commands.",
                head
            )
        })?;

        let command = match kind {
            CommandKind::Help => Command::Help,
            CommandKind::ShowProfile => Command::ShowProfile,
            CommandKind::Status => Command::Status,
            CommandKind::List => Command::List,
            CommandKind::Exit => Command::Exit,
            CommandKind::LoadProfile => Command::LoadProfile(single_arg(rest, "loadcsv <path>")?),
            CommandKind::LoadImage => Command::LoadImage(single_arg(rest, "setimg <path>")?),
            CommandKind::Hex => {
                let (args, options) = split_options(rest)?;
                let [offset, size] = args.as_slice() else {
                    bail!("Usage: hex <offset> <size> [w=N] [extract|-e]");
                };
                Command::Hex {
                    offset: parse_number(offset)?,
                    size: parse_number(size)?,
                    options,
                }
            }
            CommandKind::AnalyzeAbs | CommandKind::AnalyzeRel => {
                let (args, options) = split_options(rest)?;
                let [name] = args.as_slice() else {
                    bail!(
                        "Usage: {} <name> [w=N] [extract|-e]",
                        if kind == CommandKind::AnalyzeAbs { "aa" } else { "ar" }
                    );
                };
                let name = name.to_string();
                if kind == CommandKind::AnalyzeAbs {
                    Command::AnalyzeAbs { name, options }
                } else {
                    Command::AnalyzeRel { name, options }
                }
            }
        };
        Ok(Some(command))
    }
}

fn single_arg(rest: &[String], usage: &str) -> Result<String> {
    match rest {
        [arg] => Ok(arg.clone()),
        _ => bail!("Usage: {}", usage),
    }
}

/// Separate `w=N` and `extract`/`-e` from positional arguments.
fn split_options(tokens: &[String]) -> Result<(Vec<&str>, ViewOptions)> {
    let mut options = ViewOptions::default();
    let mut args = Vec::new();
    for token in tokens {
        if let Some(width) = token.strip_prefix("w=") {
            let width: usize = width
                .parse()
                .map_err(|_| anyhow!("Invalid width: {}", width))?;
            if width == 0 {
                bail!("Width must be at least 1");
            }
            options.width = Some(width);
        } else if token == "extract" || token == "-e" {
            options.extract = true;
        } else {
            args.push(token.as_str());
        }
    }
    Ok((args, options))
}

/// Split a line into words; single or double quotes group words.
pub fn tokenize(line: &str) -> Result<Vec<String>> {
    let mut tokens = Vec::new();
    let mut current = String::new();
    let mut in_token = false;
    let mut quote: Option<char> = None;

    for c in line.chars() {
        match quote {
            Some(q) if c == q => quote = None,
            Some(_) => current.push(c),
            None if c == '"' || c == '\'' => {
                quote = Some(c);
                in_token = true;
            }
            None if c.is_whitespace() => {
                if in_token {
                    tokens.push(std::mem::take(&mut current));
                    in_token = false;
                }
            }
            None => {
                current.push(c);
                in_token = true;
            }
        }
    }

    if let Some(q) = quote {
        bail!("Unterminated {} quote", q);
    }
    if in_token {
        tokens.push(current);
    }
    Ok(tokens)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_plain() {
        assert_eq!(
            tokenize("  hex 0x10   32 ").unwrap(),
            vec!["hex", "0x10", "32"]
        );
    }

    #[test]
    fn test_tokenize_quotes() {
        assert_eq!(
            tokenize(r#"loadcsv "my profiles/a.csv""#).unwrap(),
            vec!["loadcsv", "my profiles/a.csv"]
        );
        assert_eq!(
            tokenize("setimg 'dump one.bin'").unwrap(),
            vec!["setimg", "dump one.bin"]
        );
        assert_eq!(tokenize(r#"aa "" x"#).unwrap(), vec!["aa", "", "x"]);
    }

    #[test]
    fn test_tokenize_unterminated() {
        assert!(tokenize("loadcsv \"open").is_err());
    }

    #[test]
    fn test_blank_line() {
        assert_eq!(Command::parse("   ").unwrap(), None);
    }

    #[test]
    fn test_aliases() {
        assert_eq!(Command::parse("h").unwrap(), Some(Command::Help));
        assert_eq!(Command::parse("QUIT").unwrap(), Some(Command::Exit));
        assert_eq!(
            Command::parse("loadbin image.bin").unwrap(),
            Some(Command::LoadImage("image.bin".into()))
        );
        assert_eq!(
            Command::parse("setcsv p.csv").unwrap(),
            Some(Command::LoadProfile("p.csv".into()))
        );
    }

    #[test]
    fn test_hex_with_options() {
        assert_eq!(
            Command::parse("hex 0x20 16 w=8 -e").unwrap(),
            Some(Command::Hex {
                offset: 0x20,
                size: 16,
                options: ViewOptions {
                    width: Some(8),
                    extract: true
                },
            })
        );
    }

    #[test]
    fn test_analyze_options_in_any_position() {
        assert_eq!(
            Command::parse("ar extract Child").unwrap(),
            Some(Command::AnalyzeRel {
                name: "Child".into(),
                options: ViewOptions {
                    width: None,
                    extract: true
                },
            })
        );
        assert_eq!(
            Command::parse("analyze_abs Root w=32").unwrap(),
            Some(Command::AnalyzeAbs {
                name: "Root".into(),
                options: ViewOptions {
                    width: Some(32),
                    extract: false
                },
            })
        );
    }

    #[test]
    fn test_usage_errors() {
        assert!(Command::parse("hex 0x20").is_err());
        assert!(Command::parse("hex zz 16").is_err());
        assert!(Command::parse("aa").is_err());
        assert!(Command::parse("loadcsv").is_err());
        assert!(Command::parse("hex 0 4 w=0").is_err());
        assert!(Command::parse("hex 0 4 w=x").is_err());
    }

    #[test]
    fn test_unknown_command_hint() {
        let err = Command::parse("frobnicate").unwrap_err();
        assert!(err.to_string().contains("Type 'help'"));
    }
}
