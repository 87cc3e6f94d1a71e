//! Static reference data: locations, job types, and random events.
//!
//! These tables are process-wide constants. Lookups are by exact name; order
//! matters for `JOB_TYPES` (offer order) and `RANDOM_EVENTS` (earlier entries
//! win when several would trigger in the same month).

use serde::{Deserialize, Serialize};

/// A place the player can live.
#[derive(Debug, PartialEq)]
pub struct Location {
    pub name: &'static str,
    /// Scales the derived basic expenses.
    pub cost_multiplier: f64,
    /// Scales the random part of the job visibility roll.
    pub job_opportunity: f64,
    pub salary_multiplier: f64,
    /// Monthly housing cost set when moving here.
    pub base_housing: i64,
    pub description: &'static str,
}

pub static LOCATIONS: [Location; 4] = [
    Location {
        name: "Small Town",
        cost_multiplier: 0.7,
        job_opportunity: 0.6,
        salary_multiplier: 0.8,
        base_housing: 700,
        description: "Cheap living, few employers, modest pay.",
    },
    Location {
        name: "Suburb",
        cost_multiplier: 1.0,
        job_opportunity: 0.8,
        salary_multiplier: 1.0,
        base_housing: 1_200,
        description: "Balanced costs with a reasonable commute.",
    },
    Location {
        name: "Mid-size City",
        cost_multiplier: 1.1,
        job_opportunity: 1.0,
        salary_multiplier: 1.1,
        base_housing: 1_500,
        description: "Growing job market with moderate rent.",
    },
    Location {
        name: "Big City",
        cost_multiplier: 1.4,
        job_opportunity: 1.2,
        salary_multiplier: 1.3,
        base_housing: 2_200,
        description: "Highest salaries and the most openings, at a price.",
    },
];

pub fn find_location(name: &str) -> Option<&'static Location> {
    LOCATIONS.iter().find(|l| l.name == name)
}

/// A job title in the market with its requirements.
#[derive(Debug, PartialEq)]
pub struct JobType {
    pub title: &'static str,
    pub education: u32,
    pub experience: u32,
    pub base_salary: i64,
    pub description: &'static str,
}

pub static JOB_TYPES: [JobType; 8] = [
    JobType {
        title: "Retail Associate",
        education: 0,
        experience: 0,
        base_salary: 25_000,
        description: "Stocking shelves and helping customers.",
    },
    JobType {
        title: "Administrative Assistant",
        education: 1,
        experience: 0,
        base_salary: 32_000,
        description: "Keeping an office running smoothly.",
    },
    JobType {
        title: "Sales Representative",
        education: 1,
        experience: 1,
        base_salary: 40_000,
        description: "Commission-driven client work.",
    },
    JobType {
        title: "Junior Developer",
        education: 2,
        experience: 0,
        base_salary: 52_000,
        description: "Entry-level software work.",
    },
    JobType {
        title: "Accountant",
        education: 3,
        experience: 1,
        base_salary: 58_000,
        description: "Books, audits, and tax season.",
    },
    JobType {
        title: "Software Engineer",
        education: 3,
        experience: 2,
        base_salary: 85_000,
        description: "Designing and shipping production systems.",
    },
    JobType {
        title: "Marketing Manager",
        education: 3,
        experience: 3,
        base_salary: 78_000,
        description: "Leading campaigns and a small team.",
    },
    JobType {
        title: "Senior Manager",
        education: 4,
        experience: 5,
        base_salary: 110_000,
        description: "Running a department.",
    },
];

pub fn find_job_type(title: &str) -> Option<&'static JobType> {
    JOB_TYPES.iter().find(|j| j.title == title)
}

/// How much a random event costs. Positive amounts are expenses, negative
/// amounts are income.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub enum EventCost {
    Fixed(i64),
    /// Fraction of the current annual salary.
    PercentOfSalary(f64),
}

impl EventCost {
    pub fn resolve(&self, salary: i64) -> i64 {
        match *self {
            EventCost::Fixed(amount) => amount,
            EventCost::PercentOfSalary(rate) => (salary as f64 * rate).round() as i64,
        }
    }
}

#[derive(Debug, PartialEq)]
pub struct RandomEventDef {
    pub name: &'static str,
    pub description: &'static str,
    pub cost: EventCost,
    /// Monthly trigger chance in [0, 1].
    pub probability: f64,
}

pub static RANDOM_EVENTS: [RandomEventDef; 7] = [
    RandomEventDef {
        name: "Medical Emergency",
        description: "An unexpected trip to the hospital.",
        cost: EventCost::Fixed(1_500),
        probability: 0.02,
    },
    RandomEventDef {
        name: "Car Repair",
        description: "Your car needs urgent repairs.",
        cost: EventCost::Fixed(800),
        probability: 0.05,
    },
    RandomEventDef {
        name: "Performance Bonus",
        description: "Your manager rewards your hard work.",
        cost: EventCost::PercentOfSalary(-0.05),
        probability: 0.03,
    },
    RandomEventDef {
        name: "Tax Refund",
        description: "You overpaid last year and got some back.",
        cost: EventCost::Fixed(-600),
        probability: 0.04,
    },
    RandomEventDef {
        name: "Phone Replacement",
        description: "Your phone broke and needs replacing.",
        cost: EventCost::Fixed(400),
        probability: 0.04,
    },
    RandomEventDef {
        name: "Pay Cut",
        description: "Company-wide cuts reduce this month's take-home.",
        cost: EventCost::PercentOfSalary(0.02),
        probability: 0.01,
    },
    RandomEventDef {
        name: "Found Money",
        description: "You found cash in an old jacket.",
        cost: EventCost::Fixed(-50),
        probability: 0.02,
    },
];
