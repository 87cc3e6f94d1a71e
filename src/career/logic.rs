//! Career simulator rules. Pure game logic (no IO, no listeners).
//!
//! Every rule takes the game state, the random source, and an outbox. Rules
//! push the notifications they produce into the outbox in the order they
//! happen; the engine delivers them before its public call returns.
//!
//! A rejected action (unknown name, not enough savings) returns `false`, `0`
//! or `None` and never touches the state or the outbox.
//!
//! Balances saturate at the `i64` bounds. An expense change whose total would
//! not fit is rejected instead.

use rand::Rng;
use tracing::{debug, info};

use super::catalog::{find_job_type, find_location, JOB_TYPES, RANDOM_EVENTS};
use super::notify::{
    EventOutcome, ExpenseChange, JobOffer, MonthSummary, Notification, RaiseInfo, SkillChange,
};
use super::state::{
    ExpenseCategory, GameState, Investment, Job, Skill, ALL_EXPENSES, SKILL_COST_UNIT,
};
use crate::format::{format_money, format_money_signed};

// ── Tuning ────────────────────────────────────────────────────────────

/// Visibility score a job must exceed to show up as an offer.
const OFFER_THRESHOLD: f64 = 0.5;
const QUALIFIED_BONUS: f64 = 0.3;
const NETWORKING_OFFER_BONUS: f64 = 0.05;

const EDUCATION_SALARY_BONUS: f64 = 0.05;
const EXPERIENCE_SALARY_BONUS: f64 = 0.03;
const SALARY_SPREAD_LOW: f64 = 0.9;
const SALARY_SPREAD_HIGH: f64 = 1.1;

const RAISE_BASE_CHANCE: f64 = 0.05;
const RAISE_TENURE_CHANCE: f64 = 0.002;
const RAISE_EXPERIENCE_CHANCE: f64 = 0.01;
const RAISE_NETWORKING_CHANCE: f64 = 0.01;
const RAISE_PERCENT_LOW: f64 = 0.03;
const RAISE_PERCENT_HIGH: f64 = 0.08;

/// Notifications produced by a rule, in emission order.
pub type Outbox = Vec<Notification>;

/// Result of one simulated month.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct MonthResult {
    pub is_broke: bool,
    pub month: u8,
    pub year: u32,
}

fn roll<R: Rng + ?Sized>(rng: &mut R) -> f64 {
    rng.gen::<f64>()
}

// ── Location & Expenses ──────────────────────────────────────────────

pub fn set_location(state: &mut GameState, name: &str, out: &mut Outbox) -> bool {
    let Some(location) = find_location(name) else {
        debug!(target: "career.location", name, "unknown location");
        return false;
    };

    let expenses = &mut state.player.expenses;
    expenses.housing = location.base_housing;
    for category in ALL_EXPENSES {
        if let Some(base) = category.base_amount() {
            expenses.set(category, (base as f64 * location.cost_multiplier).round() as i64);
        }
    }
    state.player.location = Some(location.name.to_string());

    state.add_history(&format!(
        "Moved to {} (monthly expenses {})",
        location.name,
        format_money(state.player.expenses.total()),
    ));
    info!(target: "career.location", location = location.name, "location changed");
    out.push(Notification::LocationChanged(location.name.to_string()));
    true
}

pub fn update_expense(state: &mut GameState, category: &str, amount: i64, out: &mut Outbox) -> bool {
    let Ok(category) = category.parse::<ExpenseCategory>() else {
        return false;
    };
    if amount < 0 {
        return false;
    }

    let mut expenses = state.player.expenses.clone();
    expenses.set(category, amount);
    let Some(total_expenses) = expenses.checked_total() else {
        debug!(target: "career.expenses", %category, amount, "expense total out of range");
        return false;
    };

    state.player.expenses = expenses;
    debug!(target: "career.expenses", %category, amount, total_expenses, "expense updated");
    out.push(Notification::ExpenseUpdated(ExpenseChange {
        category,
        amount,
        total_expenses,
    }));
    true
}

pub fn total_monthly_expenses(state: &GameState) -> i64 {
    state.player.expenses.total()
}

// ── Career ───────────────────────────────────────────────────────────

/// Salary this player would be offered for a job with `base_salary`.
/// `None` until a location is chosen.
pub fn calculate_salary<R: Rng + ?Sized>(
    state: &GameState,
    base_salary: i64,
    rng: &mut R,
) -> Option<i64> {
    let location = find_location(state.player.location.as_deref()?)?;
    let skills = &state.player.skills;
    let skill_factor = 1.0
        + skills.education as f64 * EDUCATION_SALARY_BONUS
        + skills.experience as f64 * EXPERIENCE_SALARY_BONUS;
    let spread = rng.gen_range(SALARY_SPREAD_LOW..SALARY_SPREAD_HIGH);
    Some((base_salary as f64 * location.salary_multiplier * skill_factor * spread).round() as i64)
}

/// Re-rolls the job market. Every call draws fresh randomness.
pub fn available_jobs<R: Rng + ?Sized>(
    state: &GameState,
    rng: &mut R,
    out: &mut Outbox,
) -> Vec<JobOffer> {
    let mut offers = Vec::new();

    if let Some(location) = state.player.location.as_deref().and_then(find_location) {
        let skills = &state.player.skills;
        for job in JOB_TYPES.iter() {
            let qualified =
                skills.education >= job.education && skills.experience >= job.experience;
            let mut score = roll(rng) * location.job_opportunity;
            if qualified {
                score += QUALIFIED_BONUS;
            }
            score += skills.networking as f64 * NETWORKING_OFFER_BONUS;

            if score > OFFER_THRESHOLD {
                if let Some(salary) = calculate_salary(state, job.base_salary, rng) {
                    offers.push(JobOffer {
                        title: job.title.to_string(),
                        description: job.description.to_string(),
                        salary,
                        qualified,
                    });
                }
            }
        }
    }

    debug!(target: "career.jobs", offers = offers.len(), "job market rolled");
    out.push(Notification::JobsAvailable(offers.clone()));
    offers
}

pub fn accept_job<R: Rng + ?Sized>(
    state: &mut GameState,
    title: &str,
    rng: &mut R,
    out: &mut Outbox,
) -> bool {
    let Some(job_type) = find_job_type(title) else {
        return false;
    };
    let Some(salary) = calculate_salary(state, job_type.base_salary, rng) else {
        debug!(target: "career.jobs", title, "cannot accept a job without a location");
        return false;
    };

    let job = Job {
        title: job_type.title.to_string(),
        salary,
        months_worked: 0,
    };
    state.player.job = Some(job.clone());
    state.player.finance.salary = salary;
    state.add_history(&format!(
        "Started working as {} ({} / year)",
        job.title,
        format_money(salary),
    ));
    info!(target: "career.jobs", title = %job.title, salary, "job accepted");
    out.push(Notification::JobAccepted(job));
    true
}

/// Success chance for a raise. Not clamped: past a certain tenure and skill
/// level it exceeds 1 and every attempt succeeds.
pub fn raise_chance(state: &GameState) -> f64 {
    let months_worked = state.player.job.as_ref().map_or(0, |j| j.months_worked);
    let skills = &state.player.skills;
    RAISE_BASE_CHANCE
        + months_worked as f64 * RAISE_TENURE_CHANCE
        + skills.experience as f64 * RAISE_EXPERIENCE_CHANCE
        + skills.networking as f64 * RAISE_NETWORKING_CHANCE
}

/// Returns the raise amount, or 0 when there is no job or the attempt fails.
pub fn try_for_raise<R: Rng + ?Sized>(state: &mut GameState, rng: &mut R, out: &mut Outbox) -> i64 {
    if state.player.job.is_none() {
        return 0;
    }
    if roll(rng) >= raise_chance(state) {
        return 0;
    }

    let raise_percent = rng.gen_range(RAISE_PERCENT_LOW..RAISE_PERCENT_HIGH);
    let old_salary = state.player.finance.salary;
    let new_salary = (old_salary as f64 * (1.0 + raise_percent)).round() as i64;

    state.player.finance.salary = new_salary;
    if let Some(job) = state.player.job.as_mut() {
        job.salary = new_salary;
    }
    state.add_history(&format!(
        "Got a {:.1}% raise! Salary is now {}",
        raise_percent * 100.0,
        format_money(new_salary),
    ));
    info!(target: "career.jobs", old_salary, new_salary, raise_percent, "raise granted");
    out.push(Notification::GotRaise(RaiseInfo {
        old_salary,
        new_salary,
        raise_percent,
    }));
    new_salary.saturating_sub(old_salary)
}

// ── Time & Money ─────────────────────────────────────────────────────

/// Advance the game by one month. This is the core turn action.
pub fn process_month<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    out: &mut Outbox,
) -> MonthResult {
    // 1. Payday, tenure, raise attempt
    let mut income = 0;
    if let Some(job) = state.player.job.as_mut() {
        job.months_worked += 1;
        income = (state.player.finance.salary as f64 / 12.0).round() as i64;
        state.player.finance.savings = state.player.finance.savings.saturating_add(income);
        try_for_raise(state, rng, out);
    }

    // 2. Bills
    let expenses = total_monthly_expenses(state);
    state.player.finance.savings = state.player.finance.savings.saturating_sub(expenses);

    // 3. Random event (at most one)
    process_random_event(state, rng, out);

    // 4. Calendar
    let mut calendar = state.calendar();
    calendar.advance();
    state.set_calendar(calendar);

    // 5. Summary
    let savings = state.player.finance.savings;
    state.add_history(&format!(
        "Month summary: income {}, expenses {}, savings {}",
        format_money(income),
        format_money(expenses),
        format_money(savings),
    ));

    // 6. Report
    let is_broke = state.player.is_broke();
    debug!(
        target: "career.month",
        month = state.month,
        year = state.year,
        income,
        expenses,
        savings,
        is_broke,
        "month processed"
    );
    out.push(Notification::MonthProcessed(MonthSummary {
        month: state.month,
        year: state.year,
        income,
        expenses,
        savings,
        is_broke,
    }));

    MonthResult {
        is_broke,
        month: state.month,
        year: state.year,
    }
}

/// Scan the event table in order; the first entry whose roll lands under its
/// probability fires and ends the scan.
pub fn process_random_event<R: Rng + ?Sized>(
    state: &mut GameState,
    rng: &mut R,
    out: &mut Outbox,
) -> Option<EventOutcome> {
    for def in RANDOM_EVENTS.iter() {
        if roll(rng) >= def.probability {
            continue;
        }

        let cost = def.cost.resolve(state.player.finance.salary);
        state.player.finance.savings = state.player.finance.savings.saturating_sub(cost);

        let effect = if cost < 0 {
            format!("gained {}", format_money(cost.saturating_neg()))
        } else {
            format!("cost {}", format_money(cost))
        };
        state.add_history(&format!("{}: {} ({})", def.name, def.description, effect));
        info!(target: "career.events", event = def.name, cost, "random event");

        let outcome = EventOutcome {
            name: def.name.to_string(),
            description: def.description.to_string(),
            cost,
        };
        out.push(Notification::RandomEvent(outcome.clone()));
        return Some(outcome);
    }
    None
}

// ── Skills ───────────────────────────────────────────────────────────

/// Price of raising a skill by `amount` levels starting at `level`.
pub fn skill_cost(level: u32, amount: u32) -> Option<i64> {
    SKILL_COST_UNIT
        .checked_mul(amount as i64)?
        .checked_mul(level as i64 + 1)
}

pub fn improve_skill(state: &mut GameState, name: &str, amount: u32, out: &mut Outbox) -> bool {
    let Ok(skill) = name.parse::<Skill>() else {
        return false;
    };
    if amount == 0 {
        return false;
    }

    let level = state.player.skills.level(skill);
    let Some(cost) = skill_cost(level, amount) else {
        return false;
    };
    if state.player.finance.savings < cost {
        debug!(target: "career.skills", %skill, cost, "not enough savings");
        return false;
    }
    let Some(new_level) = level.checked_add(amount) else {
        return false;
    };

    state.player.finance.savings -= cost;
    *state.player.skills.level_mut(skill) = new_level;
    state.add_history(&format!(
        "Improved {} to level {} for {}",
        skill,
        new_level,
        format_money(cost),
    ));
    info!(target: "career.skills", %skill, new_level, cost, "skill improved");
    out.push(Notification::SkillImproved(SkillChange {
        skill,
        new_level,
        cost,
    }));
    true
}

// ── Investments ──────────────────────────────────────────────────────

pub fn invest(state: &mut GameState, name: &str, amount: i64, out: &mut Outbox) -> bool {
    if amount <= 0 || amount > state.player.finance.savings {
        return false;
    }

    let investment = Investment {
        name: name.to_string(),
        amount,
        month: state.month,
        year: state.year,
    };
    state.player.finance.savings -= amount;
    state.player.finance.investments.push(investment.clone());
    state.add_history(&format!("Invested {} in {}", format_money(amount), name));
    info!(target: "career.invest", name, amount, "investment made");
    out.push(Notification::Invested(investment));
    true
}

/// Savings plus investments minus debt, saturating at the `i64` bounds.
pub fn net_worth(state: &GameState) -> i64 {
    let finance = &state.player.finance;
    finance
        .savings
        .saturating_add(finance.invested_total())
        .saturating_sub(finance.debt)
}

/// Cash flow for a normal month with no event: income minus expenses.
pub fn monthly_cashflow(state: &GameState) -> i64 {
    let income = if state.player.job.is_some() {
        (state.player.finance.salary as f64 / 12.0).round() as i64
    } else {
        0
    };
    income.saturating_sub(total_monthly_expenses(state))
}

/// Short status line for front ends, e.g. `"Year 2, Month 5: +$1,200 / month"`.
pub fn status_line(state: &GameState) -> String {
    format!(
        "Year {}, Month {}: {} / month",
        state.year,
        state.month,
        format_money_signed(monthly_cashflow(state)),
    )
}
