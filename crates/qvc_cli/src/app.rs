//! Run loop: start a run, print the panels, offer a restart.

use std::io::{self, IsTerminal, Write};
use std::time::Duration;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};

use qvc_core::animation::{
    AnimationDriver, Command, NullObserver, RunObserver, Session, SessionError, SessionState,
};
use qvc_core::config::ConfigManager;
use qvc_core::models::RunReport;
use qvc_core::notify::SoundPlayer;

use crate::args::Cli;
use crate::chart::TerminalChart;
use crate::panels::{metrics_panel, properties_panel, scores_panel};

/// Answer to the restart prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Choice {
    Restart,
    Quit,
}

/// Parse a prompt answer; `None` asks again.
pub fn parse_choice(input: &str) -> Option<Choice> {
    match input.trim().to_ascii_lowercase().as_str() {
        "r" | "restart" | "" => Some(Choice::Restart),
        "q" | "quit" | "exit" => Some(Choice::Quit),
        _ => None,
    }
}

fn build_driver(cli: &Cli, config_manager: &ConfigManager) -> AnimationDriver {
    let settings = config_manager.settings();
    let interval = if cli.json {
        Duration::ZERO
    } else {
        Duration::from_millis(cli.frame_interval_ms(settings))
    };
    let driver = AnimationDriver::new(interval);
    if cli.sound_enabled(settings) {
        driver.with_sound(SoundPlayer::new(&settings.playback.sound_path))
    } else {
        driver
    }
}

/// Run until the user quits (or once, for `--once` and `--json`).
pub async fn run(cli: &Cli, config_manager: &mut ConfigManager) -> Result<()> {
    let run_config = cli.run_config(config_manager.settings());
    let mut session = Session::new(build_driver(cli, config_manager), run_config);

    if cli.json {
        let report = session.handle(Command::Start, &mut NullObserver).await?;
        let json = serde_json::to_string_pretty(report).context("Failed to serialize report")?;
        println!("{}", json);
        return Ok(());
    }

    let color = io::stdout().is_terminal();
    let mut chart = TerminalChart::new(
        session.config().duration_secs,
        config_manager.output_folder(),
        color,
    );
    let mut stdin = BufReader::new(tokio::io::stdin()).lines();

    loop {
        chart.set_duration(session.config().duration_secs);
        let command = next_command(session.state());
        match attempt(&mut session, command, &mut chart).await? {
            Some(report) => print_summary(report),
            None if cli.once => anyhow::bail!("Run not started: invalid run configuration"),
            None => println!("Edit {} and restart to try again.", config_manager.path().display()),
        }

        if cli.once {
            break;
        }
        match prompt(&mut stdin).await? {
            Choice::Quit => break,
            Choice::Restart => {}
        }
        reload(cli, config_manager, &mut session);
    }

    tracing::info!(runs = session.runs_started(), "Session finished");
    Ok(())
}

/// Command that starts the next run from the session's current state.
fn next_command(state: SessionState) -> Command {
    match state {
        SessionState::NotStarted => Command::Start,
        SessionState::Running | SessionState::Completed => Command::Restart,
    }
}

/// Run one command. A rejected configuration is reported and leaves the
/// session ready for another attempt.
async fn attempt<'a>(
    session: &'a mut Session,
    command: Command,
    observer: &mut dyn RunObserver,
) -> Result<Option<&'a RunReport>, SessionError> {
    match session.handle(command, observer).await {
        Ok(report) => Ok(Some(report)),
        Err(SessionError::Config(e)) => {
            tracing::warn!(%command, "Run not started: {}", e);
            println!("⚠️ Invalid run configuration: {}", e);
            Ok(None)
        }
        Err(e) => Err(e),
    }
}

/// Pick up edits made to the settings file since the last run.
fn reload(cli: &Cli, config_manager: &mut ConfigManager, session: &mut Session) {
    if let Err(e) = config_manager.load() {
        tracing::warn!("Keeping previous settings, reload failed: {}", e);
    }
    session.set_driver(build_driver(cli, config_manager));
    session.set_config(cli.run_config(config_manager.settings()));
}

fn print_summary(report: &RunReport) {
    println!();
    println!("{}", metrics_panel(&report.metrics));
    println!("{}", properties_panel(&report.config.smiles));
    println!("{}", scores_panel());
}

async fn prompt<R>(stdin: &mut tokio::io::Lines<R>) -> Result<Choice>
where
    R: tokio::io::AsyncBufRead + Unpin,
{
    loop {
        print!("🔁 [r] Restart simulation  [q] Quit: ");
        io::stdout().flush()?;
        let Some(line) = stdin.next_line().await? else {
            return Ok(Choice::Quit);
        };
        match parse_choice(&line) {
            Some(choice) => return Ok(choice),
            None => println!("Please answer 'r' or 'q'."),
        }
    }
}
