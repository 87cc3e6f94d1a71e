//! Career simulator game state.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::time::Calendar;

/// Price of one level at level 0. Scales with amount and current level.
pub const SKILL_COST_UNIT: i64 = 500;

/// Base monthly amounts for the location-scaled expense categories.
pub const BASE_FOOD: i64 = 400;
pub const BASE_UTILITIES: i64 = 200;
pub const BASE_TRANSPORTATION: i64 = 300;
pub const BASE_ENTERTAINMENT: i64 = 200;
pub const BASE_OTHER: i64 = 100;

/// Game difficulty. Only affects starting savings.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    #[default]
    Normal,
    Hard,
}

impl Difficulty {
    pub fn starting_savings(self) -> i64 {
        match self {
            Difficulty::Easy => 10_000,
            Difficulty::Normal => 5_000,
            Difficulty::Hard => 2_000,
        }
    }
}

/// Skills the player can train.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Skill {
    Education,
    Experience,
    Networking,
}

pub const ALL_SKILLS: [Skill; 3] = [Skill::Education, Skill::Experience, Skill::Networking];

impl Skill {
    pub fn name(self) -> &'static str {
        match self {
            Skill::Education => "education",
            Skill::Experience => "experience",
            Skill::Networking => "networking",
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Skill {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_SKILLS
            .iter()
            .copied()
            .find(|k| k.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// Returned when a skill or expense category name is not recognized.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct UnknownName(pub String);

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skills {
    pub education: u32,
    pub experience: u32,
    pub networking: u32,
}

impl Skills {
    pub fn level(&self, skill: Skill) -> u32 {
        match skill {
            Skill::Education => self.education,
            Skill::Experience => self.experience,
            Skill::Networking => self.networking,
        }
    }

    pub fn level_mut(&mut self, skill: Skill) -> &mut u32 {
        match skill {
            Skill::Education => &mut self.education,
            Skill::Experience => &mut self.experience,
            Skill::Networking => &mut self.networking,
        }
    }
}

/// Monthly expense categories, in display order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum ExpenseCategory {
    Housing,
    Food,
    Utilities,
    Transportation,
    Entertainment,
    Other,
}

pub const ALL_EXPENSES: [ExpenseCategory; 6] = [
    ExpenseCategory::Housing,
    ExpenseCategory::Food,
    ExpenseCategory::Utilities,
    ExpenseCategory::Transportation,
    ExpenseCategory::Entertainment,
    ExpenseCategory::Other,
];

impl ExpenseCategory {
    pub fn name(self) -> &'static str {
        match self {
            ExpenseCategory::Housing => "housing",
            ExpenseCategory::Food => "food",
            ExpenseCategory::Utilities => "utilities",
            ExpenseCategory::Transportation => "transportation",
            ExpenseCategory::Entertainment => "entertainment",
            ExpenseCategory::Other => "other",
        }
    }

    /// Base amount scaled by a location's cost multiplier. Housing is not
    /// derived; it comes from the location's own base housing cost.
    pub fn base_amount(self) -> Option<i64> {
        match self {
            ExpenseCategory::Housing => None,
            ExpenseCategory::Food => Some(BASE_FOOD),
            ExpenseCategory::Utilities => Some(BASE_UTILITIES),
            ExpenseCategory::Transportation => Some(BASE_TRANSPORTATION),
            ExpenseCategory::Entertainment => Some(BASE_ENTERTAINMENT),
            ExpenseCategory::Other => Some(BASE_OTHER),
        }
    }
}

impl fmt::Display for ExpenseCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for ExpenseCategory {
    type Err = UnknownName;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        ALL_EXPENSES
            .iter()
            .copied()
            .find(|c| c.name() == s)
            .ok_or_else(|| UnknownName(s.to_string()))
    }
}

/// One field per category, so the category set can never drift.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Expenses {
    pub housing: i64,
    pub food: i64,
    pub utilities: i64,
    pub transportation: i64,
    pub entertainment: i64,
    pub other: i64,
}

impl Default for Expenses {
    fn default() -> Self {
        Self {
            housing: 0,
            food: BASE_FOOD,
            utilities: BASE_UTILITIES,
            transportation: BASE_TRANSPORTATION,
            entertainment: BASE_ENTERTAINMENT,
            other: BASE_OTHER,
        }
    }
}

impl Expenses {
    pub fn get(&self, category: ExpenseCategory) -> i64 {
        match category {
            ExpenseCategory::Housing => self.housing,
            ExpenseCategory::Food => self.food,
            ExpenseCategory::Utilities => self.utilities,
            ExpenseCategory::Transportation => self.transportation,
            ExpenseCategory::Entertainment => self.entertainment,
            ExpenseCategory::Other => self.other,
        }
    }

    pub fn set(&mut self, category: ExpenseCategory, amount: i64) {
        let slot = match category {
            ExpenseCategory::Housing => &mut self.housing,
            ExpenseCategory::Food => &mut self.food,
            ExpenseCategory::Utilities => &mut self.utilities,
            ExpenseCategory::Transportation => &mut self.transportation,
            ExpenseCategory::Entertainment => &mut self.entertainment,
            ExpenseCategory::Other => &mut self.other,
        };
        *slot = amount;
    }

    pub fn iter(&self) -> impl Iterator<Item = (ExpenseCategory, i64)> + '_ {
        ALL_EXPENSES.into_iter().map(move |c| (c, self.get(c)))
    }

    /// `None` when the categories do not sum to a representable amount.
    pub fn checked_total(&self) -> Option<i64> {
        self.iter()
            .try_fold(0i64, |acc, (_, amount)| acc.checked_add(amount))
    }

    /// Saturates at the `i64` bounds.
    pub fn total(&self) -> i64 {
        self.iter()
            .fold(0i64, |acc, (_, amount)| acc.saturating_add(amount))
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Investment {
    pub name: String,
    pub amount: i64,
    pub month: u8,
    pub year: u32,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Finance {
    /// Annual salary; 0 while unemployed.
    pub salary: i64,
    /// May go negative. Never clamped.
    pub savings: i64,
    pub debt: i64,
    #[serde(default)]
    pub investments: Vec<Investment>,
}

impl Finance {
    pub fn invested_total(&self) -> i64 {
        self.investments
            .iter()
            .fold(0i64, |acc, i| acc.saturating_add(i.amount))
    }
}

/// The job the player currently holds.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub title: String,
    pub salary: i64,
    pub months_worked: u32,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub month: u8,
    pub year: u32,
    pub description: String,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Player {
    pub location: Option<String>,
    pub job: Option<Job>,
    pub skills: Skills,
    pub finance: Finance,
    pub expenses: Expenses,
    #[serde(default)]
    pub history: Vec<HistoryEntry>,
}

impl Player {
    pub fn new(difficulty: Difficulty) -> Self {
        Self {
            location: None,
            job: None,
            skills: Skills {
                education: 1,
                experience: 0,
                networking: 0,
            },
            finance: Finance {
                savings: difficulty.starting_savings(),
                ..Finance::default()
            },
            expenses: Expenses::default(),
            history: Vec::new(),
        }
    }

    pub fn is_broke(&self) -> bool {
        self.finance.savings < 0
    }
}

/// Everything that makes up a game in progress. This is also the snapshot
/// handed out by `Engine::game_state` and accepted by `load_game_state`.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct GameState {
    pub player: Player,
    pub month: u8,
    pub year: u32,
    #[serde(default)]
    pub difficulty: Difficulty,
}

impl GameState {
    pub fn new(difficulty: Difficulty) -> Self {
        let calendar = Calendar::default();
        let mut state = Self {
            player: Player::new(difficulty),
            month: calendar.month,
            year: calendar.year,
            difficulty,
        };
        state.add_history("Welcome! Pick a place to live and start your career.");
        state
    }

    pub fn calendar(&self) -> Calendar {
        Calendar::new(self.month, self.year)
    }

    pub fn set_calendar(&mut self, calendar: Calendar) {
        self.month = calendar.month;
        self.year = calendar.year;
    }

    /// Append a history entry dated with the current calendar.
    pub fn add_history(&mut self, text: &str) {
        self.player.history.push(HistoryEntry {
            month: self.month,
            year: self.year,
            description: text.to_string(),
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_state() {
        let s = GameState::new(Difficulty::Normal);
        assert_eq!(s.player.finance.savings, 5_000);
        assert_eq!(s.player.finance.salary, 0);
        assert_eq!(s.player.skills.education, 1);
        assert_eq!(s.player.skills.experience, 0);
        assert_eq!(s.player.skills.networking, 0);
        assert!(s.player.location.is_none());
        assert!(s.player.job.is_none());
        assert_eq!((s.month, s.year), (1, 1));
        assert_eq!(s.player.history.len(), 1);
    }

    #[test]
    fn difficulty_sets_starting_savings() {
        assert_eq!(GameState::new(Difficulty::Easy).player.finance.savings, 10_000);
        assert_eq!(GameState::new(Difficulty::Hard).player.finance.savings, 2_000);
    }

    #[test]
    fn default_expenses_total() {
        let e = Expenses::default();
        assert_eq!(e.total(), 400 + 200 + 300 + 200 + 100);
    }

    #[test]
    fn expense_total_at_i64_bounds() {
        let mut e = Expenses::default();
        let others = e.total() - e.food;
        e.food = i64::MAX;
        assert_eq!(e.checked_total(), None);
        assert_eq!(e.total(), i64::MAX);

        e.food = i64::MAX - others;
        assert_eq!(e.checked_total(), Some(i64::MAX));
    }

    #[test]
    fn invested_total_saturates() {
        let investment = |amount| Investment {
            name: "Index Fund".into(),
            amount,
            month: 1,
            year: 1,
        };
        let finance = Finance {
            investments: vec![investment(i64::MAX), investment(1)],
            ..Finance::default()
        };
        assert_eq!(finance.invested_total(), i64::MAX);
    }

    #[test]
    fn expenses_get_set_every_category() {
        let mut e = Expenses::default();
        for (i, &c) in ALL_EXPENSES.iter().enumerate() {
            e.set(c, (i as i64 + 1) * 10);
        }
        for (i, &c) in ALL_EXPENSES.iter().enumerate() {
            assert_eq!(e.get(c), (i as i64 + 1) * 10);
        }
        assert_eq!(e.total(), 10 + 20 + 30 + 40 + 50 + 60);
    }

    #[test]
    fn parse_names() {
        assert_eq!("education".parse::<Skill>(), Ok(Skill::Education));
        assert_eq!("networking".parse::<Skill>(), Ok(Skill::Networking));
        assert!("charisma".parse::<Skill>().is_err());
        assert_eq!("housing".parse::<ExpenseCategory>(), Ok(ExpenseCategory::Housing));
        assert!("Housing".parse::<ExpenseCategory>().is_err());
        assert!("gym".parse::<ExpenseCategory>().is_err());
    }

    #[test]
    fn history_is_dated_with_calendar() {
        let mut s = GameState::new(Difficulty::Normal);
        s.set_calendar(Calendar::new(7, 3));
        s.add_history("moved");
        let last = s.player.history.last().unwrap();
        assert_eq!((last.month, last.year), (7, 3));
        assert_eq!(last.description, "moved");
    }

    #[test]
    fn expenses_serialize_with_category_keys() {
        let json = serde_json::to_value(Expenses::default()).unwrap();
        let obj = json.as_object().unwrap();
        assert_eq!(obj.len(), ALL_EXPENSES.len());
        for c in ALL_EXPENSES {
            assert!(obj.contains_key(c.name()), "missing {}", c);
        }
    }
}
