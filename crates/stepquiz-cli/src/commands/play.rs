//! Interactive play loop.
//!
//! One session per invocation. A 1-second interval drives the countdown
//! while stdin commands drive gestures; both are serviced on the same
//! task, so a tick and a command never interleave mid-handler.

use std::time::Duration;

use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::time::MissedTickBehavior;

use stepquiz_core::{Event, GameSession, Outcome, QuizConfig};

#[derive(Args)]
pub struct PlayArgs {
    /// Override the countdown duration in seconds
    #[arg(long)]
    pub duration_secs: Option<u64>,
}

pub fn run(args: PlayArgs) -> Result<(), Box<dyn std::error::Error>> {
    let mut config = QuizConfig::load()?;
    if let Some(secs) = args.duration_secs {
        config.duration_secs = secs;
    }
    let mut session = GameSession::new(config)?;

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(play_loop(&mut session))
}

async fn play_loop(session: &mut GameSession) -> Result<(), Box<dyn std::error::Error>> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut ticker = tokio::time::interval(Duration::from_secs(1));
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    // The first interval tick completes immediately; consume it so the
    // countdown starts a full second from now.
    ticker.tick().await;

    session.start();
    println!("Arrange the sales process steps into their slots, then 'submit'.");
    println!("Type 'help' for commands.");
    render_board(session);

    loop {
        tokio::select! {
            _ = ticker.tick() => {
                if let Some(Event::SessionEnded { outcome, .. }) = session.tick() {
                    print_outcome(&outcome);
                }
            }
            line = lines.next_line() => {
                match line? {
                    Some(input) => {
                        if !handle_command(session, input.trim()) {
                            break;
                        }
                    }
                    None => break, // stdin closed
                }
            }
        }
    }
    Ok(())
}

/// Dispatch one command line. Returns `false` to leave the loop.
fn handle_command(session: &mut GameSession, input: &str) -> bool {
    let mut parts = input.split_whitespace();
    let Some(command) = parts.next() else {
        return true;
    };

    match command {
        "help" => print_help(),
        "board" | "b" => render_board(session),
        "status" => match serde_json::to_string_pretty(&session.snapshot()) {
            Ok(json) => println!("{json}"),
            Err(e) => eprintln!("error: {e}"),
        },
        "grab" => {
            let Some(token) = parts.next() else {
                println!("usage: grab <token>");
                return true;
            };
            if !require_active(session) {
                return true;
            }
            match session.drag_start(token) {
                Ok(Some(_)) => println!("holding '{token}'"),
                Ok(None) => {}
                Err(e) => eprintln!("error: {e}"),
            }
        }
        "drop" => {
            let Some(slot) = parts.next().and_then(|s| s.parse::<usize>().ok()) else {
                println!("usage: drop <slot-number>");
                return true;
            };
            if !require_active(session) {
                return true;
            }
            drop_on_slot(session, slot);
        }
        "pool" => {
            if !require_active(session) {
                return true;
            }
            match session.drop_on_pool() {
                Some(Event::ItemReturned { token, .. }) => {
                    println!("'{token}' returned to the pool");
                }
                _ => println!("nothing to return (grab an item first)"),
            }
        }
        "cancel" => {
            if session.drag_end().is_some() {
                println!("drag cancelled");
            }
        }
        "place" => {
            let (Some(token), Some(slot)) = (
                parts.next(),
                parts.next().and_then(|s| s.parse::<usize>().ok()),
            ) else {
                println!("usage: place <token> <slot-number>");
                return true;
            };
            if !require_active(session) {
                return true;
            }
            match session.drag_start(token) {
                Ok(Some(_)) => drop_on_slot(session, slot),
                Ok(None) => {}
                Err(e) => eprintln!("error: {e}"),
            }
        }
        "return" => {
            let Some(token) = parts.next() else {
                println!("usage: return <token>");
                return true;
            };
            if !require_active(session) {
                return true;
            }
            match session.drag_start(token) {
                Ok(Some(_)) => {
                    session.drop_on_pool();
                    println!("'{token}' returned to the pool");
                }
                Ok(None) => {}
                Err(e) => eprintln!("error: {e}"),
            }
        }
        "submit" => {
            if !require_active(session) {
                return true;
            }
            match session.submit() {
                Some(Event::SubmissionRejected { prompt, .. }) => println!("{prompt}"),
                Some(Event::SessionEnded { outcome, .. }) => print_outcome(&outcome),
                _ => {}
            }
        }
        "restart" => {
            session.restart();
            println!("new session started");
            render_board(session);
        }
        "quit" | "exit" => return false,
        other => println!("unknown command '{other}' (try 'help')"),
    }
    true
}

/// User-facing slot numbers are 1-based.
fn drop_on_slot(session: &mut GameSession, slot: usize) {
    let Some(index) = slot.checked_sub(1) else {
        println!("slots are numbered from 1");
        return;
    };
    match session.drop_on_slot(index) {
        Ok(Some(Event::ItemPlaced {
            token, displaced, ..
        })) => {
            match displaced {
                Some(evicted) => {
                    println!("'{token}' placed in slot {slot} (displaced '{evicted}' back to the pool)");
                }
                None => println!("'{token}' placed in slot {slot}"),
            }
        }
        Ok(_) => println!("nothing to drop (grab an item first)"),
        Err(e) => eprintln!("error: {e}"),
    }
}

fn require_active(session: &GameSession) -> bool {
    if session.is_active() {
        return true;
    }
    println!("The session has ended. Type 'restart' to play again, or 'quit'.");
    false
}

fn render_board(session: &GameSession) {
    println!("time  {}", session.countdown().display());
    for (i, slot) in session.board().slots().iter().enumerate() {
        let contents = match slot.occupant.as_deref() {
            Some(token) => {
                let label = session
                    .board()
                    .item(token)
                    .map(|item| item.label.as_str())
                    .unwrap_or("?");
                format!("{label} [{token}]")
            }
            None => "(empty)".to_string(),
        };
        println!("slot {} ({}): {contents}", i + 1, slot.title);
    }
    let pool: Vec<String> = session
        .board()
        .pool()
        .iter()
        .map(|token| {
            let label = session
                .board()
                .item(token)
                .map(|item| item.label.as_str())
                .unwrap_or("?");
            format!("{label} [{token}]")
        })
        .collect();
    println!("pool  {}", pool.join(", "));
    if let Some(token) = session.dragging() {
        println!("holding '{token}'");
    }
}

fn print_outcome(outcome: &Outcome) {
    println!("=== {} ===", outcome.title);
    println!("{}", outcome.message);
    println!("Type 'restart' to play again, or 'quit' to leave.");
}

fn print_help() {
    println!("commands:");
    println!("  board            show the timer, slots and pool");
    println!("  status           print the state snapshot as JSON");
    println!("  grab <token>     pick an item up");
    println!("  drop <slot#>     drop the held item into a slot");
    println!("  pool             drop the held item back into the pool");
    println!("  cancel           stop holding the item (it stays where it is)");
    println!("  place <t> <s#>   grab + drop in one step");
    println!("  return <token>   grab + pool in one step");
    println!("  submit           grade the arrangement");
    println!("  restart          discard everything and start over");
    println!("  quit             leave");
}
