//! Interactive session: one command per line until `quit` or end of input.
//!
//! The loop only translates lines into session calls. Everything it prints
//! about state changes comes from the session's published events.

use std::cell::RefCell;
use std::io::{self, BufRead, Write};
use std::rc::Rc;

use crate::model::GameKind;
use crate::resolve::DrawSource;
use crate::session::{Session, SessionEvent};

use super::format::{format_history_entry, format_outcome};

const HELP: &str = "\
Commands:
  dice | coin | range   select a game
  bet <n>               set the wager amount
  more | less           raise or lower the wager by one step
  preset <n>            pick a preset wager (capped at your balance)
  pick <choice>         place the wager: 1-6, heads/tails, low/medium/high
  ok                    dismiss the last result
  balance | history     show credits or past wagers
  reset                 restore the initial stake and clear history
  quit";

/// A parsed input line.
#[derive(Debug, PartialEq, Eq)]
enum Input {
    Select(GameKind),
    Bet(u64),
    More,
    Less,
    Preset(u64),
    Pick(String),
    Dismiss,
    Balance,
    History,
    Reset,
    Help,
    Quit,
}

fn parse_line(line: &str) -> Result<Option<Input>, String> {
    let mut words = line.split_whitespace();
    let Some(command) = words.next() else {
        return Ok(None);
    };
    let arg = words.next();

    let amount = |arg: Option<&str>| -> Result<u64, String> {
        let arg = arg.ok_or_else(|| format!("`{command}` needs an amount"))?;
        arg.parse()
            .map_err(|_| format!("'{arg}' is not a whole number of credits"))
    };

    let input = match command.to_ascii_lowercase().as_str() {
        "dice" => Input::Select(GameKind::DiceGuess),
        "coin" => Input::Select(GameKind::CoinGuess),
        "range" => Input::Select(GameKind::RangeGuess),
        "bet" => Input::Bet(amount(arg)?),
        "more" | "+" => Input::More,
        "less" | "-" => Input::Less,
        "preset" => Input::Preset(amount(arg)?),
        "pick" => Input::Pick(
            arg.ok_or("`pick` needs a choice")?.to_string(),
        ),
        "ok" | "continue" => Input::Dismiss,
        "balance" => Input::Balance,
        "history" => Input::History,
        "reset" => Input::Reset,
        "help" | "?" => Input::Help,
        "quit" | "exit" | "q" => Input::Quit,
        other => return Err(format!("unknown command '{other}', try `help`")),
    };
    Ok(Some(input))
}

pub(super) fn run<D: DrawSource>(
    session: &mut Session<D>,
    input: impl BufRead,
    out: &mut impl Write,
) -> io::Result<()> {
    let events = Rc::new(RefCell::new(Vec::new()));
    {
        let events = Rc::clone(&events);
        session.subscribe(move |event| events.borrow_mut().push(event.clone()));
    }

    writeln!(
        out,
        "{} credits. Pick a game: dice, coin, or range. `help` lists commands.",
        session.balance()
    )?;

    for line in input.lines() {
        let line = line?;
        let command = match parse_line(&line) {
            Ok(Some(command)) => command,
            Ok(None) => continue,
            Err(e) => {
                writeln!(out, "! {e}")?;
                continue;
            }
        };

        if command == Input::Quit {
            break;
        }
        if let Err(e) = apply(session, command, out) {
            writeln!(out, "! {e}")?;
        }

        for event in events.borrow_mut().drain(..) {
            render_event(&event, out)?;
        }
    }
    Ok(())
}

/// Applies one command. Errors are messages for the player, not failures.
fn apply<D: DrawSource>(
    session: &mut Session<D>,
    command: Input,
    out: &mut impl Write,
) -> Result<(), String> {
    match command {
        Input::Select(game) => session.select_game(game),
        Input::Bet(amount) => session.set_wager_amount(amount),
        Input::More => {
            session.raise_wager();
        }
        Input::Less => {
            session.lower_wager();
        }
        Input::Preset(amount) => {
            if !session.presets().contains(&amount) {
                return Err(format!("presets are {:?}", session.presets()));
            }
            session.choose_preset(amount);
        }
        Input::Pick(choice) => {
            let game = session
                .selected_game()
                .ok_or("select a game first: dice, coin, or range")?;
            let choice = game.parse_choice(&choice).map_err(|e| e.to_string())?;
            session.place_wager(choice).map_err(|e| e.to_string())?;
            session.resolve_pending().map_err(|e| e.to_string())?;
        }
        Input::Dismiss => {
            session.dismiss();
        }
        Input::Balance => writeln!(out, "{} credits", session.balance()).map_err(io_message)?,
        Input::History => {
            if session.history().is_empty() {
                writeln!(out, "No game history yet").map_err(io_message)?;
            }
            for entry in session.history() {
                writeln!(out, "{}", format_history_entry(entry)).map_err(io_message)?;
            }
        }
        Input::Reset => session.reset(),
        Input::Help => writeln!(out, "{HELP}").map_err(io_message)?,
        Input::Quit => {}
    }
    Ok(())
}

fn render_event(event: &SessionEvent, out: &mut impl Write) -> io::Result<()> {
    match event {
        SessionEvent::GameSelected(game) => writeln!(out, "Playing {game}"),
        SessionEvent::WagerAmountChanged(amount) => writeln!(out, "Bet: {amount}"),
        SessionEvent::WagerPlaced(pending) => writeln!(
            out,
            "Staked {} on {}...",
            pending.amount(),
            pending.request.choice
        ),
        SessionEvent::WagerResolved {
            outcome, balance, ..
        } => {
            writeln!(out, "{}", format_outcome(outcome))?;
            writeln!(out, "Balance: {balance}")
        }
        SessionEvent::Dismissed => Ok(()),
        SessionEvent::Reset { balance } => writeln!(out, "Balance reset to {balance}"),
    }
}

fn io_message(e: io::Error) -> String {
    e.to_string()
}
