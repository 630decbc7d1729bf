//! CLI higher-or-lower example.
//!
//! Set `RUST_LOG=hilo=debug` to watch the engine's log output.

#![allow(clippy::missing_docs_in_private_items)]

use std::io::{self, Write};
use std::thread;
use std::time::{Duration, SystemTime, UNIX_EPOCH};

use hilo::{
    Card, Color, Direction, EndReason, Game, GameOptions, SessionListener, SessionSummary,
    Snapshot,
};
use tracing_subscriber::EnvFilter;

struct SummaryPrinter;

impl SessionListener for SummaryPrinter {
    fn on_snapshot(&mut self, _snapshot: &Snapshot) {}

    fn on_session_end(&mut self, summary: &SessionSummary) {
        let reason = match summary.end_reason {
            EndReason::Ended => "you walked away",
            EndReason::PushYourLuck => "a miss after a hot streak",
            EndReason::DeckExhausted => "the deck ran out",
        };
        println!("\nGame over ({reason}).");
        println!(
            "Final score: {} | best streak: {} | cards seen: {}",
            summary.score, summary.best_streak, summary.cards_seen
        );
    }
}

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    println!("Higher or lower CLI example (type 'q' to quit)");

    let seed = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs();
    let options = GameOptions::default().with_reveal_delay_ms(800);
    let game = Game::new(options, seed);
    game.set_listener(SummaryPrinter);

    let mut round = 0u32;
    loop {
        round += 1;
        if let Err(err) = game.start_session(format!("cli-{seed}-{round}"), "cli-player") {
            println!("Start error: {err}");
            return;
        }

        while game.is_active() {
            let Some(snapshot) = game.snapshot() else {
                return;
            };
            print_table(&snapshot);

            let direction = match prompt_line("(h)igher, (l)ower, (e)nd: ").as_str() {
                "h" | "higher" => Direction::Higher,
                "l" | "lower" => Direction::Lower,
                "e" | "end" => {
                    game.end_session();
                    break;
                }
                "q" | "quit" => {
                    game.end_session();
                    return;
                }
                _ => {
                    println!("Unknown action.");
                    continue;
                }
            };

            let outcome = match game.submit_guess(direction) {
                Ok(outcome) => outcome,
                Err(err) => {
                    println!("Guess error: {err}");
                    continue;
                }
            };

            let result = outcome.result;
            println!("Next card: {}", format_card(&result.revealed));
            if result.correct {
                println!("{} +{} points", colorize("Correct!", "32"), result.points);
                if result.streak > 1 {
                    println!("{} in a row!", result.streak);
                }
            } else {
                println!("{}", colorize("Incorrect!", "31"));
            }

            if let Some(ticket) = outcome.ticket {
                thread::sleep(Duration::from_millis(u64::from(ticket.delay_ms)));
                if let Err(err) = game.complete_reveal(ticket) {
                    println!("Reveal error: {err}");
                }
            }
        }

        match prompt_line("Play again? (y/n): ").as_str() {
            "y" | "yes" => {}
            _ => {
                println!("Goodbye.");
                return;
            }
        }
    }
}

fn prompt_line(prompt: &str) -> String {
    print!("{prompt}");
    let _ = io::stdout().flush();

    let mut input = String::new();
    if io::stdin().read_line(&mut input).is_err() {
        return String::new();
    }
    input.trim().to_lowercase()
}

fn print_table(snapshot: &Snapshot) {
    println!(
        "\nScore: {} | Streak: {} | Cards left: {}",
        snapshot.score, snapshot.streak, snapshot.cards_remaining
    );
    println!("Current card: {}", format_card(&snapshot.current_card));
}

fn colorize(text: &str, code: &str) -> String {
    format!("\x1b[{code}m{text}\x1b[0m")
}

fn format_card(card: &Card) -> String {
    let code = match card.color() {
        Color::Red => "31",
        Color::Black => "34",
    };
    colorize(&card.to_string(), code)
}
