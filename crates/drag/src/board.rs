use mealweek_plan::{Day, MealType, SLOT_COUNT, slot_of};

/// A draggable meal in the view. Placeholders live server-side only; an
/// empty slot simply renders as a container with no card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MealCard {
    pub id: String,
    pub recipe: String,
}

impl MealCard {
    pub fn new(id: impl Into<String>, recipe: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            recipe: recipe.into(),
        }
    }
}

/// One rendered meal section: a (day, meal) container and its cards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Container {
    pub day: Day,
    pub meal: MealType,
    pub cards: Vec<MealCard>,
}

/// Single source of truth for the client view: 14 slots, each empty or
/// holding one card. Rendering is a pure projection of this array; the drag
/// controller layers a pending exchange on top and only merges it after
/// server confirmation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeekBoard {
    slots: Vec<Option<MealCard>>,
}

impl Default for WeekBoard {
    fn default() -> Self {
        Self::empty()
    }
}

impl WeekBoard {
    pub fn empty() -> Self {
        Self {
            slots: vec![None; SLOT_COUNT as usize],
        }
    }

    /// Builder used by transports and tests when assembling a board from
    /// server data.
    pub fn with_card(mut self, position: u8, card: MealCard) -> Self {
        self.set(position, Some(card));
        self
    }

    /// A position outside the grid leaves the board untouched; a transport
    /// fed malformed server data must not take the view down.
    pub fn set(&mut self, position: u8, card: Option<MealCard>) {
        match self.slots.get_mut(position as usize) {
            Some(slot) => *slot = card,
            None => tracing::warn!(position, "ignoring card outside the weekly grid"),
        }
    }

    pub fn card_at(&self, position: u8) -> Option<&MealCard> {
        self.slots.get(position as usize).and_then(Option::as_ref)
    }

    pub fn position_of_card(&self, id: &str) -> Option<u8> {
        self.slots
            .iter()
            .position(|slot| slot.as_ref().is_some_and(|card| card.id == id))
            .map(|index| index as u8)
    }

    pub(crate) fn exchange(&mut self, a: u8, b: u8) {
        self.slots.swap(a as usize, b as usize);
    }

    /// Project the slot array into the 14 rendered containers, optionally
    /// with a pending exchange applied.
    pub(crate) fn project(&self, pending: Option<(u8, u8)>) -> Vec<Container> {
        let mut slots = self.slots.clone();
        if let Some((a, b)) = pending {
            slots.swap(a as usize, b as usize);
        }

        slots
            .into_iter()
            .enumerate()
            .map(|(position, card)| {
                let (day, meal) = slot_of(position as u8)
                    .expect("board always holds exactly 14 slots");
                Container {
                    day,
                    meal,
                    cards: card.into_iter().collect(),
                }
            })
            .collect()
    }
}
