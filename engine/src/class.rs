use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroClass {
    Warrior,
    Mage,
    Rogue,
}

/// Per-class combat capabilities.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ClassTraits {
    /// Base damage multiplier on a strong-attack hit. The Mage's 2.5 follows the
    /// graphical game; the text variants use a flat 2 for every class.
    pub strong_attack_multiplier: f64,
    /// Chance for a normal attack to deal double damage.
    pub critical_chance: f64,
}

/// Starting stats for a freshly chosen hero.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StartingStats {
    pub hp: i32,
    pub attack: i32,
    pub defense: i32,
    pub gold: i32,
}

impl HeroClass {
    pub const ALL: [HeroClass; 3] = [HeroClass::Warrior, HeroClass::Mage, HeroClass::Rogue];

    pub fn traits(self) -> ClassTraits {
        match self {
            HeroClass::Warrior => ClassTraits {
                strong_attack_multiplier: 2.0,
                critical_chance: 0.0,
            },
            HeroClass::Mage => ClassTraits {
                strong_attack_multiplier: 2.5,
                critical_chance: 0.0,
            },
            HeroClass::Rogue => ClassTraits {
                strong_attack_multiplier: 2.0,
                critical_chance: 0.3,
            },
        }
    }

    pub fn starting_stats(self) -> StartingStats {
        match self {
            HeroClass::Warrior => StartingStats { hp: 120, attack: 25, defense: 8, gold: 20 },
            HeroClass::Mage => StartingStats { hp: 80, attack: 18, defense: 3, gold: 20 },
            HeroClass::Rogue => StartingStats { hp: 90, attack: 20, defense: 4, gold: 20 },
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            HeroClass::Warrior => "Warrior",
            HeroClass::Mage => "Mage",
            HeroClass::Rogue => "Rogue",
        }
    }
}

impl fmt::Display for HeroClass {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown hero class '{0}' (expected warrior, mage or rogue)")]
pub struct UnknownClass(pub String);

impl FromStr for HeroClass {
    type Err = UnknownClass;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "warrior" | "w" => Ok(HeroClass::Warrior),
            "mage" | "m" => Ok(HeroClass::Mage),
            "rogue" | "r" => Ok(HeroClass::Rogue),
            other => Err(UnknownClass(other.to_string())),
        }
    }
}
