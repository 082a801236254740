use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use clap_verbosity_flag::Verbosity;
use mines_core::HazardDisplay;
use mines_protocol::{ErrorKind, Request, Response};
use mines_service::{GameService, Settings};

mod command;
mod render;

use command::Input;

/// Play mines in the terminal, or serve line-delimited JSON requests on stdin.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Cli {
    /// TOML settings file
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Stats file, overrides the settings file
    #[arg(long, conflicts_with = "no_stats")]
    stats: Option<PathBuf>,
    /// Keep stats in memory only
    #[arg(long)]
    no_stats: bool,
    /// Show every mine once a game is over
    #[arg(long)]
    show_all_mines: bool,
    /// Player acting in text mode
    #[arg(short, long, default_value = "local")]
    player: String,
    /// Read JSON requests and write JSON responses, one per line
    #[arg(long)]
    json: bool,
    #[command(flatten)]
    verbose: Verbosity,
}

impl Cli {
    fn settings(&self) -> anyhow::Result<Settings> {
        let mut settings = match &self.config {
            Some(path) => Settings::load_from(path)?,
            None => Settings::default(),
        };
        if let Some(path) = &self.stats {
            settings.stats_path = Some(path.clone());
        }
        if self.no_stats {
            settings.stats_path = None;
        }
        if self.show_all_mines {
            settings.hazard_display = HazardDisplay::All;
        }
        Ok(settings)
    }
}

fn run_json(service: &GameService, input: impl BufRead, mut output: impl Write) -> anyhow::Result<()> {
    for line in input.lines() {
        let line = line.context("Could not read request")?;
        if line.trim().is_empty() {
            continue;
        }
        let response = match mines_protocol::decode_request(&line) {
            Ok(request) => service.handle(request),
            Err(err) => {
                log::debug!("rejected request {:?}: {}", line, err);
                Response::error(ErrorKind::BadRequest, err.to_string())
            }
        };
        writeln!(output, "{}", mines_protocol::encode_response(&response)?)?;
        output.flush()?;
    }
    Ok(())
}

fn run_text(
    service: &GameService,
    settings: &Settings,
    mut player: String,
    input: impl BufRead,
    mut output: impl Write,
) -> anyhow::Result<()> {
    writeln!(output, "Playing as {player}. Type help for commands.")?;

    for line in input.lines() {
        let line = line.context("Could not read command")?;
        match command::parse_line(&line, settings.default_game) {
            Ok(None) => {}
            Ok(Some(Input::Command(command))) => {
                let response = service.handle(Request::new(player.clone(), command));
                writeln!(output, "{}", render::response(&response))?;
            }
            Ok(Some(Input::SwitchPlayer(next))) => {
                player = next;
                writeln!(output, "Playing as {player}.")?;
            }
            Ok(Some(Input::Help)) => writeln!(output, "{}", command::HELP)?,
            Ok(Some(Input::Quit)) => break,
            Err(err) => writeln!(output, "error: {err:#}")?,
        }
    }
    Ok(())
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    env_logger::Builder::new()
        .filter_level(cli.verbose.log_level_filter())
        .init();

    let settings = cli.settings()?;
    let service = GameService::from_settings(&settings);
    log::info!("Application started");

    let stdin = io::stdin().lock();
    let stdout = io::stdout().lock();
    if cli.json {
        run_json(&service, stdin, stdout)?;
    } else {
        run_text(&service, &settings, cli.player.clone(), stdin, stdout)?;
    }

    service.flush().context("Could not save stats")?;
    Ok(())
}
