use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, ValueEnum};
use tracing::{info, warn};

use zcalc::calculator::{CalcError, copy_to_clipboard};
use zcalc::config::Settings;
use zcalc::keypad::Mode;
use zcalc::logging;
use zcalc::session::{Session, Step};

/// Pocket calculator on the command line.
///
/// Keys are pressed one at a time, exactly like the buttons of a desk
/// calculator: `zcalc 3 + 4 =` prints 7. Without keys, sequences are read
/// from stdin line by line.
#[derive(Parser, Debug)]
#[command(name = "zcalc", version, about)]
struct Cli {
    /// Config file (defaults to the user config directory)
    #[arg(long, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Operation set to start in
    #[arg(long, value_enum)]
    mode: Option<Mode>,

    /// Copy the final display to the clipboard
    #[arg(long)]
    copy: bool,

    /// Print the display after every key, not only the last
    #[arg(long)]
    trace: bool,

    /// Print JSON lines instead of plain text
    #[arg(long)]
    json: bool,

    /// Keys to press
    #[arg(trailing_var_arg = true, allow_hyphen_values = true)]
    keys: Vec<String>,
}

/// Meta-commands understood in interactive mode.
enum Command<'a> {
    Keys(&'a str),
    Mode(Mode),
    ShowKeys,
    Quit,
}

fn parse_command(line: &str) -> Result<Command<'_>, String> {
    let Some(meta) = line.trim().strip_prefix(':') else {
        return Ok(Command::Keys(line));
    };

    let mut parts = meta.split_whitespace();
    match (parts.next(), parts.next()) {
        (Some("quit" | "q"), None) => Ok(Command::Quit),
        (Some("keys"), None) => Ok(Command::ShowKeys),
        (Some("mode"), Some(mode)) => Mode::from_str(mode, true).map(Command::Mode),
        _ => Err(format!("unknown command ':{meta}'")),
    }
}

struct Output {
    trace: bool,
    json: bool,
}

impl Output {
    fn steps(&self, out: &mut impl Write, steps: &[Result<Step, CalcError>]) -> Result<()> {
        for step in steps {
            if let Err(err) = step {
                eprintln!("zcalc: {err}");
            }
        }

        let ok: Vec<&Step> = steps.iter().filter_map(|s| s.as_ref().ok()).collect();
        let shown = if self.trace {
            &ok[..]
        } else {
            &ok[ok.len().saturating_sub(1)..]
        };

        for step in shown {
            if self.json {
                writeln!(out, "{}", serde_json::to_string(step)?)?;
            } else if self.trace {
                writeln!(out, "{:>6}  {}", step.key, step.display)?;
            } else {
                writeln!(out, "{}", step.display)?;
            }
        }
        Ok(())
    }
}

fn copy_display(text: &str) {
    match copy_to_clipboard(text) {
        Ok(true) => info!(display = text, "copied to clipboard"),
        Ok(false) => {}
        Err(err) => warn!("{err:#}"),
    }
}

fn run_interactive(session: &mut Session, output: &Output, copy: bool) -> Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout().lock();

    for line in stdin.lock().lines() {
        let line = line.context("Failed to read from stdin")?;
        match parse_command(&line) {
            Ok(Command::Quit) => break,
            Ok(Command::ShowKeys) => {
                for pad in session.mode().keypads() {
                    writeln!(stdout, "{}", pad.render())?;
                }
            }
            Ok(Command::Mode(mode)) => {
                session.set_mode(mode);
                writeln!(stdout, "{}", session.display())?;
            }
            Ok(Command::Keys(keys)) => {
                let steps = session.feed(keys);
                output.steps(&mut stdout, &steps)?;
            }
            Err(msg) => eprintln!("zcalc: {msg}"),
        }
        stdout.flush()?;
    }

    if copy {
        copy_display(session.display());
    }
    Ok(())
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let settings = Settings::load(cli.config.as_deref())?;
    logging::init_with_config(&settings.logging);

    let mode = cli.mode.unwrap_or(settings.mode);
    let copy = cli.copy || settings.copy_result;
    let output = Output {
        trace: cli.trace,
        json: cli.json,
    };
    info!(?mode, "starting");

    let mut session = Session::new(mode);

    if cli.keys.is_empty() {
        return run_interactive(&mut session, &output, copy);
    }

    let steps = session.feed(&cli.keys.join(" "));
    output.steps(&mut io::stdout().lock(), &steps)?;

    if copy {
        copy_display(session.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_command() {
        assert!(matches!(parse_command("3 + 4"), Ok(Command::Keys("3 + 4"))));
        assert!(matches!(parse_command(":quit"), Ok(Command::Quit)));
        assert!(matches!(parse_command(" :keys "), Ok(Command::ShowKeys)));
        assert!(matches!(
            parse_command(":mode COMMON"),
            Ok(Command::Mode(Mode::Common))
        ));
        assert!(parse_command(":mode graphing").is_err());
        assert!(parse_command(":frobnicate").is_err());
    }

    #[test]
    fn test_output_last_only() {
        let mut session = Session::default();
        let steps = session.feed("3 + 4 =");
        let output = Output {
            trace: false,
            json: false,
        };
        let mut buf = Vec::new();
        output.steps(&mut buf, &steps).unwrap();
        assert_eq!(String::from_utf8(buf).unwrap(), "7\n");
    }

    #[test]
    fn test_output_json_trace() {
        let mut session = Session::default();
        let steps = session.feed("9 √x");
        let output = Output {
            trace: true,
            json: true,
        };
        let mut buf = Vec::new();
        output.steps(&mut buf, &steps).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "{\"key\":\"9\",\"display\":\"9\"}\n{\"key\":\"√x\",\"display\":\"3\"}\n"
        );
    }

    #[test]
    fn test_cli_accepts_operator_keys() {
        let cli = Cli::try_parse_from(["zcalc", "--trace", "5", "-", "3", "="]).unwrap();
        assert!(cli.trace);
        assert_eq!(cli.keys, vec!["5", "-", "3", "="]);
    }
}
