use serde::{Deserialize, Serialize};

/// One occupant of the weekly grid. A placeholder (no recipe reference) is a
/// first-class entry with its own id, not the absence of one; swap and move
/// only ever change `position`, never identity or recipe.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MealEntry {
    pub id: String,
    pub recipe: Option<String>,
    pub position: u8,
}

impl MealEntry {
    pub fn new(id: impl Into<String>, recipe: impl Into<String>, position: u8) -> Self {
        Self {
            id: id.into(),
            recipe: Some(recipe.into()),
            position,
        }
    }

    pub fn placeholder(id: impl Into<String>, position: u8) -> Self {
        Self {
            id: id.into(),
            recipe: None,
            position,
        }
    }

    pub fn is_placeholder(&self) -> bool {
        self.recipe.is_none()
    }
}
