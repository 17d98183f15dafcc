//! Line-oriented game loop on stdin/stdout.
//!
//! - Lines starting with `#` are commands (quit, status, help)
//! - Every other non-empty line is an artist guess

use crate::display;
use spotle_core::{ArtistCatalog, Game, GameError, TurnOutcome};
use std::io::{self, Write};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::warn;

/// Play one game until it is won, lost, quit, or stdin closes.
pub async fn run<C: ArtistCatalog>(mut game: Game<C>) -> Result<(), GameError> {
    display::print_welcome();

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    while !game.session().is_over() {
        prompt(&game);

        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => break,
            Err(e) => {
                warn!("failed to read input: {e}");
                break;
            }
        };

        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        if let Some(command) = line.strip_prefix('#') {
            match command.trim() {
                "quit" | "exit" => break,
                "status" => print_status(&game),
                "help" => print_commands(),
                _ => println!("Unknown command. Type #help for help."),
            }
            continue;
        }

        match game.guess(line).await {
            Ok(outcome) => print_outcome(&outcome),
            Err(e) if e.is_recoverable() => println!("Artist name does not exist"),
            Err(e) => return Err(e),
        }
    }

    if !game.session().is_over() {
        println!("Goodbye!");
    }
    Ok(())
}

fn prompt<C>(game: &Game<C>) {
    print!("Guess #{}: ", game.session().guesses_used() + 1);
    io::stdout().flush().ok();
}

fn print_outcome(outcome: &TurnOutcome) {
    match outcome {
        TurnOutcome::Duplicate => println!("{}", display::DUPLICATE_LINE),
        TurnOutcome::Won { mystery } => println!("{}", display::won_line(mystery)),
        TurnOutcome::Feedback(feedback) => {
            for line in display::feedback_lines(feedback) {
                println!("{line}");
            }
            println!();
        }
        TurnOutcome::Lost { mystery, feedback } => {
            for line in display::feedback_lines(feedback) {
                println!("{line}");
            }
            println!();
            for line in display::lost_lines(mystery) {
                println!("{line}");
            }
            println!();
        }
    }
}

fn print_status<C>(game: &Game<C>) {
    let session = game.session();
    println!(
        "Guesses used: {}/{} ({} left)",
        session.guesses_used(),
        session.max_guesses(),
        session.guesses_remaining()
    );
    for (i, record) in session.history().iter().enumerate() {
        println!("  {}. {}", i + 1, record.artist);
    }
}

fn print_commands() {
    println!("  #quit   - Give up and exit");
    println!("  #status - Show guesses so far");
    println!("  #help   - Show this help");
    println!("  (anything else is an artist guess)");
}
