//! The session controller: game selection, wager placement, and resolution.
//!
//! A session moves through four phases:
//!
//! ```text
//! NoGameSelected --select_game--> GameSelected --place_wager--> WagerInFlight
//!                                      ^                              |
//!                                      |                       resolve_pending
//!                                      +------dismiss------ OutcomePresented
//! ```
//!
//! `select_game` is accepted from any phase and `reset` returns to
//! `NoGameSelected` from any phase. Debiting happens when a wager is placed;
//! the draw, credit, and history entry happen together when it resolves, so
//! a presentation layer can animate in between.

use jiff::Timestamp;
use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info};

use crate::config::Config;
use crate::ledger::{GameSummary, Ledger, LedgerError};
use crate::model::{
    Choice, GameKind, HistoryEntry, InvalidChoice, Outcome, PendingWager, Verdict, WagerRequest,
};
use crate::resolve::{self, DrawSource};

#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    InsufficientFunds(#[from] LedgerError),

    #[error(transparent)]
    InvalidChoice(#[from] InvalidChoice),

    #[error("no game selected")]
    NoGameSelected,

    #[error("a wager is already being resolved")]
    WagerInFlight,

    #[error("no wager is waiting to be resolved")]
    NoPendingWager,
}

/// Where the session stands.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Phase {
    NoGameSelected,
    GameSelected(GameKind),
    WagerInFlight(PendingWager),
    OutcomePresented { game: GameKind, outcome: Outcome },
}

/// State changes published to subscribers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionEvent {
    GameSelected(GameKind),
    WagerAmountChanged(u64),
    WagerPlaced(PendingWager),
    WagerResolved {
        wager: PendingWager,
        outcome: Outcome,
        balance: u64,
    },
    Dismissed,
    Reset { balance: u64 },
}

type Listener = Box<dyn FnMut(&SessionEvent)>;

pub struct Session<D = StdRng> {
    ledger: Ledger,
    source: D,
    phase: Phase,
    wager_amount: u64,
    default_wager: u64,
    wager_step: u64,
    presets: Vec<u64>,
    listeners: Vec<Listener>,
}

impl Session<StdRng> {
    /// A session drawing from an OS-seeded generator.
    pub fn with_entropy(ledger: Ledger, config: &Config) -> Self {
        Self::new(ledger, config, StdRng::from_entropy())
    }
}

impl<D: DrawSource> Session<D> {
    pub fn new(ledger: Ledger, config: &Config, source: D) -> Self {
        Self {
            ledger,
            source,
            phase: Phase::NoGameSelected,
            wager_amount: config.default_wager,
            default_wager: config.default_wager,
            wager_step: config.wager_step,
            presets: config.presets.clone(),
            listeners: Vec::new(),
        }
    }

    /// Registers a listener for every subsequent state change.
    pub fn subscribe(&mut self, listener: impl FnMut(&SessionEvent) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    // ── State exposed to presentation ──

    pub fn balance(&self) -> u64 {
        self.ledger.balance()
    }

    /// Resolved wagers, newest first.
    pub fn history(&self) -> &[HistoryEntry] {
        self.ledger.history()
    }

    pub fn phase(&self) -> &Phase {
        &self.phase
    }

    pub fn selected_game(&self) -> Option<GameKind> {
        match &self.phase {
            Phase::NoGameSelected => None,
            Phase::GameSelected(game) | Phase::OutcomePresented { game, .. } => Some(*game),
            Phase::WagerInFlight(pending) => Some(pending.game()),
        }
    }

    /// The outcome currently on display, if any.
    pub fn last_outcome(&self) -> Option<&Outcome> {
        match &self.phase {
            Phase::OutcomePresented { outcome, .. } => Some(outcome),
            _ => None,
        }
    }

    pub fn pending(&self) -> Option<&PendingWager> {
        match &self.phase {
            Phase::WagerInFlight(pending) => Some(pending),
            _ => None,
        }
    }

    /// Whether wager controls should be disabled.
    pub fn is_in_flight(&self) -> bool {
        matches!(self.phase, Phase::WagerInFlight(_))
    }

    pub fn wager_amount(&self) -> u64 {
        self.wager_amount
    }

    pub fn presets(&self) -> &[u64] {
        &self.presets
    }

    pub fn initial_stake(&self) -> u64 {
        self.ledger.initial_stake()
    }

    pub fn summary(&self) -> Vec<GameSummary> {
        self.ledger.summary()
    }

    pub fn replayed_balance(&self) -> i128 {
        self.ledger.replayed_balance()
    }

    // ── Transitions ──

    /// Switches to `game`. A wager still in flight is resolved first,
    /// against the game it was placed on.
    pub fn select_game(&mut self, game: GameKind) {
        if let Some(pending) = self.pending().copied() {
            debug!(%game, "settling in-flight wager before switching games");
            self.settle(pending);
        }
        self.phase = Phase::GameSelected(game);
        self.emit(&SessionEvent::GameSelected(game));
    }

    pub fn set_wager_amount(&mut self, amount: u64) {
        self.wager_amount = amount;
        self.emit(&SessionEvent::WagerAmountChanged(amount));
    }

    /// Raises the wager by one step, never past the balance.
    pub fn raise_wager(&mut self) -> u64 {
        let balance = self.balance();
        if self.wager_amount < balance {
            let raised = self
                .wager_amount
                .saturating_add(self.wager_step)
                .min(balance);
            self.set_wager_amount(raised);
        }
        self.wager_amount
    }

    /// Lowers the wager by one step, never below a single step.
    pub fn lower_wager(&mut self) -> u64 {
        if self.wager_amount > self.wager_step {
            self.set_wager_amount(self.wager_amount - self.wager_step);
        }
        self.wager_amount
    }

    /// Selects a preset amount, capped at the balance.
    pub fn choose_preset(&mut self, preset: u64) -> u64 {
        self.set_wager_amount(preset.min(self.balance()));
        self.wager_amount
    }

    /// Stakes the current wager amount on `choice` for the selected game.
    ///
    /// The stake is debited immediately. Nothing changes when the wager is
    /// rejected.
    pub fn place_wager(&mut self, choice: Choice) -> Result<PendingWager, SessionError> {
        let game = match &self.phase {
            Phase::NoGameSelected => return Err(SessionError::NoGameSelected),
            Phase::WagerInFlight(_) => return Err(SessionError::WagerInFlight),
            Phase::GameSelected(game) | Phase::OutcomePresented { game, .. } => *game,
        };

        if choice.game() != game {
            return Err(InvalidChoice {
                game,
                input: choice.to_string(),
            }
            .into());
        }

        let amount = self.wager_amount;
        self.ledger.debit(amount)?;

        let pending = PendingWager {
            request: WagerRequest {
                game,
                amount,
                choice,
            },
            placed_at: Timestamp::now(),
        };
        info!(%game, amount, %choice, balance = self.balance(), "wager placed");

        self.phase = Phase::WagerInFlight(pending);
        self.emit(&SessionEvent::WagerPlaced(pending));
        Ok(pending)
    }

    /// Draws the outcome of the in-flight wager, credits its payout, and
    /// records it in the history.
    pub fn resolve_pending(&mut self) -> Result<Outcome, SessionError> {
        let pending = self.pending().copied().ok_or(SessionError::NoPendingWager)?;
        Ok(self.settle(pending))
    }

    /// Places and resolves a wager in one step, selecting its game and
    /// amount first.
    pub fn wager(&mut self, request: WagerRequest) -> Result<Outcome, SessionError> {
        if self.selected_game() != Some(request.game) || self.is_in_flight() {
            self.select_game(request.game);
        }
        self.set_wager_amount(request.amount);
        self.place_wager(request.choice)?;
        self.resolve_pending()
    }

    /// Clears the outcome on display. Returns whether there was one.
    pub fn dismiss(&mut self) -> bool {
        let Phase::OutcomePresented { game, .. } = self.phase else {
            return false;
        };
        self.phase = Phase::GameSelected(game);
        self.emit(&SessionEvent::Dismissed);
        true
    }

    /// Restores the initial stake, clears the history, and deselects the game.
    /// A wager still in flight resolves before the reset wipes it.
    pub fn reset(&mut self) {
        if let Some(pending) = self.pending().copied() {
            debug!(game = %pending.game(), "settling in-flight wager before reset");
            self.settle(pending);
        }
        self.ledger.reset();
        self.phase = Phase::NoGameSelected;
        self.wager_amount = self.default_wager;
        self.emit(&SessionEvent::Reset {
            balance: self.balance(),
        });
    }

    /// Ends the session with a final best-effort write.
    pub fn close(self) {
        self.ledger.flush();
    }

    fn settle(&mut self, pending: PendingWager) -> Outcome {
        let outcome = resolve::resolve(pending.amount(), pending.request.choice, &mut self.source);
        debug_assert_eq!(outcome.drawn_value.game(), pending.game());
        let entry = HistoryEntry {
            game: pending.game(),
            wager: pending.amount(),
            verdict: Verdict::from_win(outcome.is_win),
            payout: outcome.payout,
            recorded_at: Timestamp::now(),
        };
        self.ledger.settle(outcome.payout, entry);

        info!(
            game = %pending.game(),
            wager = pending.amount(),
            payout = outcome.payout,
            drawn = %outcome.drawn_value,
            placed_at = %pending.placed_at,
            balance = self.balance(),
            "wager resolved"
        );

        self.phase = Phase::OutcomePresented {
            game: pending.game(),
            outcome: outcome.clone(),
        };
        self.emit(&SessionEvent::WagerResolved {
            wager: pending,
            outcome: outcome.clone(),
            balance: self.balance(),
        });
        outcome
    }

    fn emit(&mut self, event: &SessionEvent) {
        for listener in &mut self.listeners {
            listener(event);
        }
    }
}
