//! Validation of free-form user answers against fixed option sets.
//!
//! The session controller calls [`validate`] for every answer and re-prompts
//! on error; the core itself never reads input.

use chrono::{Month, Weekday};

use crate::error::{BikeshareError, Result};
use crate::models::City;

/// A value chosen from a closed set of lowercase options.
pub trait Choice: Sized {
    /// Noun used in error messages and prompts, e.g. `"city"`.
    const KIND: &'static str;

    /// Every accepted (normalised) answer.
    const OPTIONS: &'static [&'static str];

    /// Convert an answer already known to be in [`Choice::OPTIONS`].
    fn from_option(option: &str) -> Option<Self>;
}

/// Trim and lowercase `input`, check it against `T::OPTIONS`, and convert it.
pub fn validate<T: Choice>(input: &str) -> Result<T> {
    let normalised = validate_in(input, T::KIND, T::OPTIONS)?;
    T::from_option(&normalised)
        .ok_or_else(|| BikeshareError::invalid_input(T::KIND, input.trim(), T::OPTIONS))
}

/// Untyped form of [`validate`]: returns the normalised answer.
pub fn validate_in(input: &str, kind: &str, allowed: &[&str]) -> Result<String> {
    let normalised = input.trim().to_lowercase();
    if allowed.contains(&normalised.as_str()) {
        Ok(normalised)
    } else {
        Err(BikeshareError::invalid_input(kind, input.trim(), allowed))
    }
}

// ── Choice implementations ────────────────────────────────────────────────────

impl Choice for City {
    const KIND: &'static str = "city";
    const OPTIONS: &'static [&'static str] = &["chicago", "new york city", "washington"];

    fn from_option(option: &str) -> Option<Self> {
        City::parse(option).ok()
    }
}

/// Month answer: `None` for `"all"`. Only january–june are offered.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthChoice(pub Option<Month>);

impl Choice for MonthChoice {
    const KIND: &'static str = "month";
    const OPTIONS: &'static [&'static str] = &[
        "all", "january", "february", "march", "april", "may", "june",
    ];

    fn from_option(option: &str) -> Option<Self> {
        if option == "all" {
            return Some(Self(None));
        }
        option.parse::<Month>().ok().map(|m| Self(Some(m)))
    }
}

/// Weekday answer: `None` for `"all"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DayChoice(pub Option<Weekday>);

impl Choice for DayChoice {
    const KIND: &'static str = "day";
    const OPTIONS: &'static [&'static str] = &[
        "all",
        "monday",
        "tuesday",
        "wednesday",
        "thursday",
        "friday",
        "saturday",
        "sunday",
    ];

    fn from_option(option: &str) -> Option<Self> {
        if option == "all" {
            return Some(Self(None));
        }
        option.parse::<Weekday>().ok().map(|d| Self(Some(d)))
    }
}

/// A yes/no answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Answer {
    Yes,
    No,
}

impl Choice for Answer {
    const KIND: &'static str = "answer";
    const OPTIONS: &'static [&'static str] = &["y", "yes", "n", "no"];

    fn from_option(option: &str) -> Option<Self> {
        match option {
            "y" | "yes" => Some(Answer::Yes),
            "n" | "no" => Some(Answer::No),
            _ => None,
        }
    }
}
