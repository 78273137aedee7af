//! WatchTier command-line entry point.
//!
//! Thin front end over the library: parses arguments, layers configuration
//! (file, environment, flags), sets up logging, and then either runs one command
//! or the interactive shell.
//!
//! # Shell Loop
//!
//! ```text
//!   stdin line ──▶ ShellLine ──▶ Runtime::run_command ──┐
//!   worker response ─────────▶ Runtime::apply_response ─┼──▶ redraw
//!   100 ms tick ─────────────▶ Runtime::tick ───────────┘
//! ```
//!
//! The tick releases debounced searches started with `type`.

use std::collections::BTreeMap;
use std::io::{IsTerminal, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;
use watchtier::catalog::TmdbClient;
use watchtier::cli::{Cli, Command, Parser, ShellLine};
use watchtier::infrastructure::default_config_path;
use watchtier::observability::init_tracing;
use watchtier::runtime::Runtime;
use watchtier::ui::{render, render_viewmodel};
use watchtier::{initialize, Config, Result};

const TICK_INTERVAL: Duration = Duration::from_millis(100);
const DEFAULT_COLUMNS: usize = 100;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "watchtier failed");
            eprintln!("watchtier: something went wrong: {e}");
            eprintln!("Check your network connection and API key, then try again.");
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = load_config(&cli)?;
    init_tracing(&config, &config.resolved_data_dir());
    tracing::info!(version = env!("CARGO_PKG_VERSION"), "watchtier starting");

    let state = initialize(&config)?;
    let catalog = Arc::new(TmdbClient::from_config(&config)?);
    let mut runtime = Runtime::new(state, catalog, config.resolved_export_dir());

    let screen = Screen::detect();
    match cli.command {
        None | Some(Command::Shell) => shell(&mut runtime, &screen).await,
        Some(Command::Quit) => Ok(()),
        Some(command) => {
            runtime.run_command(command).await?;
            runtime.settle().await?;
            screen.print(&runtime);
            Ok(())
        }
    }
}

/// Config file, then environment, then command-line flags.
fn load_config(cli: &Cli) -> Result<Config> {
    let path = cli.config.clone().unwrap_or_else(default_config_path);
    let env: BTreeMap<String, String> = std::env::vars().collect();
    let mut config = Config::load(&path)?.apply_env(&env);

    if let Some(key) = &cli.api_key {
        config.api_key = Some(key.clone());
    }
    if let Some(dir) = &cli.data_dir {
        config.data_dir = Some(dir.clone());
    }
    if let Some(level) = &cli.log_level {
        config.trace_level = Some(level.clone());
    }
    Ok(config)
}

async fn shell(runtime: &mut Runtime, screen: &Screen) -> Result<()> {
    if runtime.state().store.browse_results().is_empty() {
        runtime.run_command(Command::Discover).await?;
    }
    screen.redraw(runtime);

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(TICK_INTERVAL);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line? else { break };
                let line = line.trim();
                if line.is_empty() {
                    screen.prompt();
                    continue;
                }
                match ShellLine::parse_line(line) {
                    Ok(ShellLine { command: Command::Quit }) => break,
                    Ok(ShellLine { command: Command::Shell }) => screen.prompt(),
                    Ok(ShellLine { command }) => {
                        let result = runtime.run_command(command).await;
                        runtime.recover(result)?;
                        screen.redraw(runtime);
                    }
                    Err(message) => {
                        println!("{message}");
                        screen.prompt();
                    }
                }
            }
            Some(response) = runtime.next_response() => {
                let result = runtime.apply_response(response);
                if runtime.recover(result)? {
                    screen.redraw(runtime);
                }
            }
            _ = ticker.tick() => {
                let result = runtime.tick(Instant::now());
                if runtime.recover(result)? {
                    screen.redraw(runtime);
                }
            }
        }
    }

    tracing::info!("shell closed");
    Ok(())
}

struct Screen {
    cols: usize,
    interactive: bool,
}

impl Screen {
    fn detect() -> Self {
        let cols = std::env::var("COLUMNS")
            .ok()
            .and_then(|c| c.parse().ok())
            .filter(|&c: &usize| c >= 40)
            .unwrap_or(DEFAULT_COLUMNS);
        Self {
            cols,
            interactive: std::io::stdout().is_terminal(),
        }
    }

    fn print(&self, runtime: &Runtime) {
        let state = runtime.state();
        if self.interactive {
            print!("{}", render(state, self.cols));
        } else {
            print!("{}", render_viewmodel(&state.compute_viewmodel(), None, self.cols));
        }
    }

    fn redraw(&self, runtime: &Runtime) {
        if self.interactive {
            print!("\x1b[2J\x1b[H");
        }
        self.print(runtime);
        self.prompt();
    }

    fn prompt(&self) {
        print!("> ");
        let _ = std::io::stdout().flush();
    }
}
