//! CLI interface for punter.
//!
//! Each subcommand opens the session from the local snapshot, does one
//! thing, and leaves the updated snapshot behind. `punter session` runs an
//! interactive loop over the same session for players who want to stay in.
//!
//! The storage home is `--home`, else `PUNTER_HOME`, else `~/.punter/`.

mod format;
mod interactive;

use std::io;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::config::Config;
use crate::ledger::Ledger;
use crate::model::{Band, Choice, GameKind, WagerRequest};
use crate::resolve::Odds;
use crate::session::Session;
use crate::storage::{Persistence, Storage};

use format::{format_history_entry, format_odds, format_outcome, format_summary};

/// Punter: wager virtual credits on games of chance.
#[derive(Debug, Parser)]
#[command(name = "punter", after_long_help = GAMES_HELP)]
pub struct Cli {
    /// Directory holding the snapshot and config.
    #[arg(long, global = true, env = "PUNTER_HOME")]
    home: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

const GAMES_HELP: &str = r"Games:
  dice   guess the face of a die (1-6)               pays 5x
  coin   call heads or tails                         pays 2x
  range  pick low (1-33), medium (34-66), high (67-100) pays 3x

Examples:
  punter play dice 4 --bet 100
  punter play coin heads
  punter history --limit 5";

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Show the current balance.
    Balance,

    /// Place one wager and show the outcome.
    Play {
        #[arg(value_enum)]
        game: GameArg,

        /// Your pick: 1-6, heads/tails, or low/medium/high.
        choice: String,

        /// Credits to stake. Defaults to the configured default wager.
        #[arg(long)]
        bet: Option<u64>,

        /// Print the outcome as JSON.
        #[arg(long)]
        json: bool,
    },

    /// List resolved wagers, newest first.
    History {
        /// Show at most this many entries.
        #[arg(long)]
        limit: Option<usize>,

        /// Print the history as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Per-game results and the odds each game offers.
    Stats,

    /// Check the balance against a replay of the history.
    Audit,

    /// Restore the initial stake and clear the history.
    Reset,

    /// Play interactively until `quit` or end of input.
    Session,
}

/// CLI-facing game name, mapped to the domain `GameKind`.
#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum GameArg {
    /// Dice roll.
    Dice,
    /// Coin toss.
    Coin,
    /// Number range.
    Range,
}

impl GameArg {
    fn to_domain(self) -> GameKind {
        match self {
            Self::Dice => GameKind::DiceGuess,
            Self::Coin => GameKind::CoinGuess,
            Self::Range => GameKind::RangeGuess,
        }
    }
}

/// Run the CLI, returning an error message on failure.
pub fn run() -> Result<(), String> {
    let cli = Cli::parse();

    let home = match cli.home {
        Some(home) => home,
        None => Storage::default_root().ok_or("could not determine home directory")?,
    };
    let config = Config::load(&home)?;
    let ledger = Ledger::open(
        Persistence::new(Storage::new(&home)),
        config.initial_stake,
    );
    let mut session = Session::with_entropy(ledger, &config);

    let result = match cli.command {
        Command::Balance => {
            println!("{} credits", session.balance());
            Ok(())
        }
        Command::Play {
            game,
            ref choice,
            bet,
            json,
        } => cmd_play(&mut session, &config, game.to_domain(), choice, bet, json),
        Command::History { limit, json } => cmd_history(&session, limit, json),
        Command::Stats => {
            cmd_stats(&session);
            Ok(())
        }
        Command::Audit => cmd_audit(&session),
        Command::Reset => {
            session.reset();
            eprintln!("Balance reset to {} credits", session.balance());
            Ok(())
        }
        Command::Session => {
            let stdin = io::stdin();
            let mut stdout = io::stdout();
            interactive::run(&mut session, stdin.lock(), &mut stdout)
                .map_err(|e| format!("session aborted: {e}"))
        }
    };

    session.close();
    result
}

fn cmd_play(
    session: &mut Session,
    config: &Config,
    game: GameKind,
    choice: &str,
    bet: Option<u64>,
    json: bool,
) -> Result<(), String> {
    let choice = game.parse_choice(choice).map_err(|e| e.to_string())?;
    let request = WagerRequest {
        game,
        amount: bet.unwrap_or(config.default_wager),
        choice,
    };

    let outcome = session.wager(request).map_err(|e| e.to_string())?;

    if json {
        let json = serde_json::to_string_pretty(&outcome)
            .map_err(|e| format!("failed to serialize outcome: {e}"))?;
        println!("{json}");
    } else {
        println!("{}", format_outcome(&outcome));
    }
    eprintln!("Balance: {} credits", session.balance());
    Ok(())
}

fn cmd_history(session: &Session, limit: Option<usize>, json: bool) -> Result<(), String> {
    let history = session.history();
    let shown = &history[..limit.unwrap_or(history.len()).min(history.len())];

    if json {
        let json = serde_json::to_string_pretty(shown)
            .map_err(|e| format!("failed to serialize history: {e}"))?;
        println!("{json}");
        return Ok(());
    }

    if shown.is_empty() {
        println!("No game history yet");
        return Ok(());
    }

    for entry in shown {
        println!("{}", format_history_entry(entry));
    }
    Ok(())
}

fn cmd_stats(session: &Session) {
    println!("Balance: {} credits", session.balance());
    for summary in session.summary() {
        println!("{}", format_summary(&summary));
    }
    println!();
    for game in [GameKind::DiceGuess, GameKind::CoinGuess] {
        println!("{}", format_odds(game.title(), Odds::for_game(game)));
    }
    for band in Band::ALL {
        let label = format!("{} ({band})", GameKind::RangeGuess.title());
        println!("{}", format_odds(&label, Odds::for_choice(Choice::Range(band))));
    }
}

fn cmd_audit(session: &Session) -> Result<(), String> {
    let replayed = session.replayed_balance();
    let balance = i128::from(session.balance());
    if replayed == balance {
        println!(
            "OK: {} entries replay from {} to {} credits",
            session.history().len(),
            session.initial_stake(),
            balance
        );
        Ok(())
    } else {
        Err(format!(
            "balance is {balance} but the history replays to {replayed}"
        ))
    }
}
