//! The four life-energy pillars used as the unit of assessment

use serde::{Deserialize, Serialize};
use std::fmt;

/// One of the four fixed assessment categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pillar {
    Sleep,
    Food,
    Movement,
    Brain,
}

impl Pillar {
    /// All pillars in canonical order
    pub const ALL: [Pillar; 4] = [Pillar::Sleep, Pillar::Food, Pillar::Movement, Pillar::Brain];

    /// Lowercase wire/storage name
    pub fn as_str(&self) -> &'static str {
        match self {
            Pillar::Sleep => "sleep",
            Pillar::Food => "food",
            Pillar::Movement => "movement",
            Pillar::Brain => "brain",
        }
    }

    /// Display label for user-facing output
    pub fn label(&self) -> &'static str {
        match self {
            Pillar::Sleep => "Sleep",
            Pillar::Food => "Food",
            Pillar::Movement => "Movement",
            Pillar::Brain => "Brain Use",
        }
    }
}

impl fmt::Display for Pillar {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
