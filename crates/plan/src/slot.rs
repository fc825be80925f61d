use std::str::FromStr;

use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

use crate::{PlanError, Result};

/// 7 days x 2 meals. Positions 0-13 are total: every index always holds
/// exactly one entry, real meal or placeholder.
pub const SLOT_COUNT: u8 = 14;

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; 7] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Monday-first ordinal, 0-6.
    pub fn ordinal(self) -> u8 {
        self as u8
    }

    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token).map_err(|_| PlanError::InvalidDay(token.to_owned()))
    }
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, Serialize, Deserialize,
)]
pub enum MealType {
    Lunch,
    Dinner,
}

impl MealType {
    pub fn parse(token: &str) -> Result<Self> {
        Self::from_str(token).map_err(|_| PlanError::InvalidMealType(token.to_owned()))
    }
}

/// Slot index for a (day, meal) pair: Monday Lunch is 0, Sunday Dinner is 13.
pub fn position_of(day: Day, meal: MealType) -> u8 {
    day.ordinal() * 2
        + match meal {
            MealType::Lunch => 0,
            MealType::Dinner => 1,
        }
}

/// Inverse of [`position_of`]; `position_of(slot_of(i)) == i` for i in 0..14.
pub fn slot_of(position: u8) -> Result<(Day, MealType)> {
    if position >= SLOT_COUNT {
        return Err(PlanError::OutOfRange(position as i64));
    }

    let day = Day::ALL[(position / 2) as usize];
    let meal = if position % 2 == 0 {
        MealType::Lunch
    } else {
        MealType::Dinner
    };

    Ok((day, meal))
}
