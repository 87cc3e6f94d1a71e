//! Career simulator: pick a city, land a job, pay the bills, and survive
//! whatever the month throws at you.
//!
//! [`Engine`] is the public face of the simulation. It owns the game state,
//! the random source and the listener registry, forwards each call to the
//! rules in [`logic`], and delivers the resulting notifications before
//! returning.

pub mod catalog;
pub mod config;
pub mod error;
pub mod logic;
pub mod notify;
pub mod save;
pub mod state;

use rand::{RngCore, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::info;

use config::EngineConfig;
use error::{SaveError, SnapshotError};
use logic::{MonthResult, Outbox};
use notify::{EventOutcome, JobOffer, Notification, NotificationKind, Notifier};
use save::SaveStore;
use state::{Difficulty, GameState};

pub struct Engine<R: RngCore = ChaCha8Rng> {
    state: GameState,
    config: EngineConfig,
    rng: R,
    notifier: Notifier,
}

impl Engine<ChaCha8Rng> {
    pub fn new() -> Self {
        Self::with_config(EngineConfig::default())
    }

    /// Seeds from `config.seed`, or from OS entropy when it is unset.
    pub fn with_config(config: EngineConfig) -> Self {
        let rng = match config.seed {
            Some(seed) => ChaCha8Rng::seed_from_u64(seed),
            None => ChaCha8Rng::from_entropy(),
        };
        Self::with_rng(config, rng)
    }

    pub fn seeded(seed: u64) -> Self {
        Self::with_config(EngineConfig::seeded(seed))
    }
}

impl Default for Engine<ChaCha8Rng> {
    fn default() -> Self {
        Self::new()
    }
}

impl<R: RngCore> Engine<R> {
    /// Build an engine around any random source, e.g. a mock for tests.
    pub fn with_rng(config: EngineConfig, rng: R) -> Self {
        info!(target: "career.engine", difficulty = ?config.difficulty, "new game");
        Self {
            state: GameState::new(config.difficulty),
            config,
            rng,
            notifier: Notifier::new(),
        }
    }

    fn dispatch(&mut self, out: Outbox) {
        for notification in &out {
            self.notifier.emit(notification);
        }
    }

    // ── Notifications ────────────────────────────────────────────────

    pub fn subscribe<F>(&mut self, kind: NotificationKind, listener: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.notifier.subscribe(kind, listener);
    }

    // ── Queries ──────────────────────────────────────────────────────

    pub fn state(&self) -> &GameState {
        &self.state
    }

    pub fn difficulty(&self) -> Difficulty {
        self.state.difficulty
    }

    pub fn total_monthly_expenses(&self) -> i64 {
        logic::total_monthly_expenses(&self.state)
    }

    pub fn net_worth(&self) -> i64 {
        logic::net_worth(&self.state)
    }

    pub fn monthly_cashflow(&self) -> i64 {
        logic::monthly_cashflow(&self.state)
    }

    pub fn status_line(&self) -> String {
        logic::status_line(&self.state)
    }

    // ── Configuration ────────────────────────────────────────────────

    pub fn set_location(&mut self, name: &str) -> bool {
        let mut out = Outbox::new();
        let ok = logic::set_location(&mut self.state, name, &mut out);
        self.dispatch(out);
        ok
    }

    pub fn update_expense(&mut self, category: &str, amount: i64) -> bool {
        let mut out = Outbox::new();
        let ok = logic::update_expense(&mut self.state, category, amount, &mut out);
        self.dispatch(out);
        ok
    }

    // ── Career ───────────────────────────────────────────────────────

    pub fn available_jobs(&mut self) -> Vec<JobOffer> {
        let mut out = Outbox::new();
        let offers = logic::available_jobs(&self.state, &mut self.rng, &mut out);
        self.dispatch(out);
        offers
    }

    pub fn calculate_salary(&mut self, base_salary: i64) -> Option<i64> {
        logic::calculate_salary(&self.state, base_salary, &mut self.rng)
    }

    pub fn accept_job(&mut self, title: &str) -> bool {
        let mut out = Outbox::new();
        let ok = logic::accept_job(&mut self.state, title, &mut self.rng, &mut out);
        self.dispatch(out);
        ok
    }

    pub fn try_for_raise(&mut self) -> i64 {
        let mut out = Outbox::new();
        let raise = logic::try_for_raise(&mut self.state, &mut self.rng, &mut out);
        self.dispatch(out);
        raise
    }

    // ── Time & Money ─────────────────────────────────────────────────

    pub fn process_month(&mut self) -> MonthResult {
        let mut out = Outbox::new();
        let result = logic::process_month(&mut self.state, &mut self.rng, &mut out);
        self.dispatch(out);
        result
    }

    pub fn process_random_event(&mut self) -> Option<EventOutcome> {
        let mut out = Outbox::new();
        let outcome = logic::process_random_event(&mut self.state, &mut self.rng, &mut out);
        self.dispatch(out);
        outcome
    }

    pub fn invest(&mut self, name: &str, amount: i64) -> bool {
        let mut out = Outbox::new();
        let ok = logic::invest(&mut self.state, name, amount, &mut out);
        self.dispatch(out);
        ok
    }

    // ── Skills ───────────────────────────────────────────────────────

    pub fn improve_skill(&mut self, skill: &str, amount: u32) -> bool {
        let mut out = Outbox::new();
        let ok = logic::improve_skill(&mut self.state, skill, amount, &mut out);
        self.dispatch(out);
        ok
    }

    // ── Lifecycle ────────────────────────────────────────────────────

    pub fn game_state(&self) -> GameState {
        self.state.clone()
    }

    /// Replace the whole game with `state`. Invalid snapshots are rejected
    /// and the current game is kept.
    pub fn load_game_state(&mut self, state: GameState) -> Result<(), SnapshotError> {
        save::validate(&state)?;
        self.state = state;
        info!(
            target: "career.engine",
            month = self.state.month,
            year = self.state.year,
            "game loaded"
        );
        let loaded = Notification::GameLoaded(Box::new(self.state.clone()));
        self.notifier.emit(&loaded);
        Ok(())
    }

    /// Start over with the options this engine was built with.
    pub fn reset_game(&mut self) {
        self.state = GameState::new(self.config.difficulty);
        info!(target: "career.engine", "game reset");
        self.notifier.emit(&Notification::GameReset);
    }

    pub fn save_to(&self, store: &mut dyn SaveStore) -> Result<(), SaveError> {
        save::save_game(&self.state, store)
    }

    /// Load the save in `store`, if any. Returns whether a game was loaded.
    pub fn load_from(&mut self, store: &mut dyn SaveStore) -> Result<bool, SaveError> {
        match save::read_game(store)? {
            Some(state) => {
                self.load_game_state(state)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl<R: RngCore> std::fmt::Debug for Engine<R> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Engine")
            .field("state", &self.state)
            .field("config", &self.config)
            .field("notifier", &self.notifier)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn low_engine() -> Engine<StepRng> {
        Engine::with_rng(EngineConfig::default(), StepRng::new(0, 0))
    }

    fn recorder<R: RngCore>(
        engine: &mut Engine<R>,
        kinds: &[NotificationKind],
    ) -> Rc<RefCell<Vec<Notification>>> {
        let log = Rc::new(RefCell::new(Vec::new()));
        for &kind in kinds {
            let log = log.clone();
            engine.subscribe(kind, move |n| log.borrow_mut().push(n.clone()));
        }
        log
    }

    #[test]
    fn new_engine_defaults() {
        let engine = Engine::seeded(1);
        assert_eq!(engine.difficulty(), Difficulty::Normal);
        assert_eq!(engine.state().player.finance.savings, 5_000);
        assert_eq!(engine.total_monthly_expenses(), 1_200);
    }

    #[test]
    fn calculate_salary_big_city_zero_draw() {
        let mut engine = low_engine();
        assert!(engine.set_location("Big City"));
        assert_eq!(engine.calculate_salary(30_000), Some(36_855));
    }

    #[test]
    fn notifications_reach_listeners_before_return() {
        let mut engine = low_engine();
        let log = recorder(&mut engine, &[NotificationKind::LocationChanged]);
        engine.set_location("Suburb");
        assert_eq!(*log.borrow(), vec![Notification::LocationChanged("Suburb".into())]);
    }

    #[test]
    fn failed_action_emits_nothing() {
        let mut engine = low_engine();
        let log = recorder(
            &mut engine,
            &[NotificationKind::LocationChanged, NotificationKind::JobAccepted],
        );
        assert!(!engine.set_location("Nowhere"));
        assert!(!engine.accept_job("Retail Associate")); // no location yet
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn same_seed_same_game() {
        let play = |seed| {
            let mut engine = Engine::seeded(seed);
            engine.set_location("Mid-size City");
            engine.accept_job("Junior Developer");
            for _ in 0..24 {
                engine.process_month();
            }
            engine.game_state()
        };
        assert_eq!(play(99), play(99));
    }

    #[test]
    fn snapshot_roundtrip_is_identical() {
        let mut engine = Engine::seeded(5);
        engine.set_location("Big City");
        engine.accept_job("Sales Representative");
        engine.improve_skill("networking", 1);
        engine.invest("Index Fund", 500);
        for _ in 0..15 {
            engine.process_month();
        }
        let snapshot = engine.game_state();

        let mut other = Engine::seeded(6);
        other.load_game_state(snapshot.clone()).unwrap();
        assert_eq!(other.game_state(), snapshot);
        assert_eq!(other.total_monthly_expenses(), engine.total_monthly_expenses());
        assert_eq!(other.net_worth(), engine.net_worth());
    }

    #[test]
    fn rejected_snapshot_keeps_current_game() {
        let mut engine = low_engine();
        engine.set_location("Suburb");
        let before = engine.game_state();
        let log = recorder(&mut engine, &[NotificationKind::GameLoaded]);

        let mut bad = before.clone();
        bad.month = 0;
        assert_eq!(engine.load_game_state(bad), Err(SnapshotError::InvalidMonth(0)));
        assert_eq!(engine.game_state(), before);
        assert!(log.borrow().is_empty());
    }

    #[test]
    fn load_emits_game_loaded() {
        let mut engine = low_engine();
        let log = recorder(&mut engine, &[NotificationKind::GameLoaded]);
        let snapshot = engine.game_state();
        engine.load_game_state(snapshot.clone()).unwrap();
        assert_eq!(*log.borrow(), vec![Notification::GameLoaded(Box::new(snapshot))]);
    }

    #[test]
    fn reset_restores_construction_defaults() {
        let config = EngineConfig::default().with_difficulty(Difficulty::Easy);
        let mut engine = Engine::with_rng(config, StepRng::new(0, 0));
        let fresh = engine.game_state();
        engine.set_location("Big City");
        engine.accept_job("Retail Associate");
        engine.process_month();

        // A loaded game with another difficulty does not change what reset builds.
        let mut hard = GameState::new(Difficulty::Hard);
        hard.month = 4;
        engine.load_game_state(hard).unwrap();

        let log = recorder(&mut engine, &[NotificationKind::GameReset]);
        engine.reset_game();
        assert_eq!(engine.game_state(), fresh);
        assert_eq!(*log.borrow(), vec![Notification::GameReset]);
    }

    #[test]
    fn listeners_survive_reset() {
        let mut engine = low_engine();
        let log = recorder(&mut engine, &[NotificationKind::MonthProcessed]);
        engine.reset_game();
        engine.process_month();
        assert_eq!(log.borrow().len(), 1);
    }

    #[test]
    fn save_and_load_through_store() {
        let mut engine = Engine::seeded(11);
        engine.set_location("Small Town");
        engine.accept_job("Retail Associate");
        engine.process_month();
        let mut store = save::MemoryStore::new();
        engine.save_to(&mut store).unwrap();

        let mut other = Engine::seeded(12);
        assert!(other.load_from(&mut store).unwrap());
        assert_eq!(other.game_state(), engine.game_state());

        let mut empty = save::MemoryStore::new();
        assert!(!other.load_from(&mut empty).unwrap());
    }

    #[test]
    fn random_event_through_engine() {
        let mut engine = low_engine();
        let log = recorder(&mut engine, &[NotificationKind::RandomEvent]);
        let outcome = engine.process_random_event().unwrap();
        assert_eq!(outcome.name, "Medical Emergency");
        assert_eq!(log.borrow().len(), 1);
    }
}
