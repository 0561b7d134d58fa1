use std::process::ExitCode;

use clap::Parser;
use click_chess::feedback::compute_feedback;
use click_chess::terminal::{ClickScript, TerminalDisplay, run_interactive_terminal};
use click_chess::{BoardView, Session};

/// Click-to-move chess referee.
#[derive(Parser, Debug)]
#[command(version, about)]
struct Cli {
    /// Starting position as FEN (defaults to the standard start)
    #[arg(long)]
    fen: Option<String>,

    /// Play these clicks (e.g. "e2e4 d7d5"), print the board and exit
    #[arg(long)]
    script: Option<String>,
}

fn main() -> ExitCode {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();

    let session = match cli.fen.as_deref().map(Session::from_fen) {
        None => Session::new(),
        Some(Ok(session)) => session,
        Some(Err(e)) => {
            log::error!("{e}");
            return ExitCode::FAILURE;
        }
    };

    let Some(script) = cli.script else {
        log::info!("Click Chess - terminal");
        run_interactive_terminal(session);
        return ExitCode::SUCCESS;
    };

    let mut clicks = ClickScript::new();
    if let Err(e) = clicks.push_script(&script) {
        log::error!("{e}");
        return ExitCode::FAILURE;
    }
    clicks.drain_into(&session);

    let state = session.snapshot();
    match TerminalDisplay::new().render(&state, &compute_feedback(&state)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
