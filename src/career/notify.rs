//! Outbound notifications and the subscription registry.
//!
//! Every engine operation that changes something announces it with a typed
//! [`Notification`]. Front ends subscribe per [`NotificationKind`]; listeners
//! run synchronously, in subscription order, before the operation returns.
//! A panicking listener is not caught.

use std::collections::HashMap;
use std::fmt;

use serde::Serialize;

use super::state::{ExpenseCategory, GameState, Investment, Job, Skill};

/// A job the player could apply for right now.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct JobOffer {
    pub title: String,
    pub description: String,
    /// Proposed annual salary for this player at this location.
    pub salary: i64,
    /// Whether the player meets the education and experience requirements.
    pub qualified: bool,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RaiseInfo {
    pub old_salary: i64,
    pub new_salary: i64,
    /// Fraction, e.g. 0.05 for 5%.
    pub raise_percent: f64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MonthSummary {
    pub month: u8,
    pub year: u32,
    pub income: i64,
    pub expenses: i64,
    pub savings: i64,
    pub is_broke: bool,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct EventOutcome {
    pub name: String,
    pub description: String,
    /// Positive = money lost, negative = money gained.
    pub cost: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ExpenseChange {
    #[serde(serialize_with = "serialize_name")]
    pub category: ExpenseCategory,
    pub amount: i64,
    pub total_expenses: i64,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct SkillChange {
    #[serde(serialize_with = "serialize_name")]
    pub skill: Skill,
    pub new_level: u32,
    pub cost: i64,
}

fn serialize_name<T: fmt::Display, S: serde::Serializer>(
    value: &T,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    serializer.collect_str(value)
}

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum Notification {
    LocationChanged(String),
    JobsAvailable(Vec<JobOffer>),
    JobAccepted(Job),
    GotRaise(RaiseInfo),
    MonthProcessed(MonthSummary),
    RandomEvent(EventOutcome),
    ExpenseUpdated(ExpenseChange),
    SkillImproved(SkillChange),
    Invested(Investment),
    GameLoaded(Box<GameState>),
    GameReset,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum NotificationKind {
    LocationChanged,
    JobsAvailable,
    JobAccepted,
    GotRaise,
    MonthProcessed,
    RandomEvent,
    ExpenseUpdated,
    SkillImproved,
    Invested,
    GameLoaded,
    GameReset,
}

impl NotificationKind {
    pub fn name(self) -> &'static str {
        match self {
            NotificationKind::LocationChanged => "locationChanged",
            NotificationKind::JobsAvailable => "jobsAvailable",
            NotificationKind::JobAccepted => "jobAccepted",
            NotificationKind::GotRaise => "gotRaise",
            NotificationKind::MonthProcessed => "monthProcessed",
            NotificationKind::RandomEvent => "randomEvent",
            NotificationKind::ExpenseUpdated => "expenseUpdated",
            NotificationKind::SkillImproved => "skillImproved",
            NotificationKind::Invested => "invested",
            NotificationKind::GameLoaded => "gameLoaded",
            NotificationKind::GameReset => "gameReset",
        }
    }
}

impl Notification {
    pub fn kind(&self) -> NotificationKind {
        match self {
            Notification::LocationChanged(_) => NotificationKind::LocationChanged,
            Notification::JobsAvailable(_) => NotificationKind::JobsAvailable,
            Notification::JobAccepted(_) => NotificationKind::JobAccepted,
            Notification::GotRaise(_) => NotificationKind::GotRaise,
            Notification::MonthProcessed(_) => NotificationKind::MonthProcessed,
            Notification::RandomEvent(_) => NotificationKind::RandomEvent,
            Notification::ExpenseUpdated(_) => NotificationKind::ExpenseUpdated,
            Notification::SkillImproved(_) => NotificationKind::SkillImproved,
            Notification::Invested(_) => NotificationKind::Invested,
            Notification::GameLoaded(_) => NotificationKind::GameLoaded,
            Notification::GameReset => NotificationKind::GameReset,
        }
    }
}

type Listener = Box<dyn FnMut(&Notification)>;

/// Listener registry. There is no unsubscribe.
#[derive(Default)]
pub struct Notifier {
    listeners: HashMap<NotificationKind, Vec<Listener>>,
}

impl Notifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn subscribe<F>(&mut self, kind: NotificationKind, listener: F)
    where
        F: FnMut(&Notification) + 'static,
    {
        self.listeners.entry(kind).or_default().push(Box::new(listener));
    }

    pub fn emit(&mut self, notification: &Notification) {
        let kind = notification.kind();
        tracing::trace!(target: "career.notify", event = kind.name(), "emit");
        if let Some(listeners) = self.listeners.get_mut(&kind) {
            for listener in listeners.iter_mut() {
                listener(notification);
            }
        }
    }

    #[cfg(test)]
    fn listener_count(&self, kind: NotificationKind) -> usize {
        self.listeners.get(&kind).map_or(0, Vec::len)
    }
}

impl fmt::Debug for Notifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let counts: HashMap<&str, usize> = self
            .listeners
            .iter()
            .map(|(k, v)| (k.name(), v.len()))
            .collect();
        f.debug_struct("Notifier").field("listeners", &counts).finish()
    }
}
