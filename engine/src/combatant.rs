use serde::{Deserialize, Serialize};

use crate::class::HeroClass;

/// Hit points before and after a single damage or healing application.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct HpChange {
    pub before: i32,
    pub after: i32,
}

impl HpChange {
    /// Signed change in hit points (negative for damage).
    pub fn delta(&self) -> i32 {
        self.after - self.before
    }

    /// True when this change took the combatant from alive to 0 HP.
    pub fn dropped(&self) -> bool {
        self.before > 0 && self.after == 0
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Combatant {
    pub name: String,
    max_hp: i32,
    hp: i32,
    pub attack: i32,
    pub defense: i32,
}

/// Read-only view handed to renderers and consoles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CombatantSnapshot {
    pub name: String,
    pub hp: i32,
    pub max_hp: i32,
    pub alive: bool,
}

impl Combatant {
    /// Starts at full health. `max_hp` is at least 1; attack and defense are at least 0.
    pub fn new(name: impl Into<String>, max_hp: i32, attack: i32, defense: i32) -> Self {
        let max_hp = max_hp.max(1);
        Self {
            name: name.into(),
            max_hp,
            hp: max_hp,
            attack: attack.max(0),
            defense: defense.max(0),
        }
    }

    pub fn hp(&self) -> i32 {
        self.hp
    }

    pub fn max_hp(&self) -> i32 {
        self.max_hp
    }

    pub fn is_alive(&self) -> bool {
        self.hp > 0
    }

    pub fn take_damage(&mut self, amount: i32) -> HpChange {
        let before = self.hp;
        self.hp = (self.hp - amount.max(0)).max(0);
        HpChange { before, after: self.hp }
    }

    pub fn heal(&mut self, amount: i32) -> HpChange {
        let before = self.hp;
        self.hp = self.hp.saturating_add(amount.max(0)).min(self.max_hp);
        HpChange { before, after: self.hp }
    }

    /// Raise max HP and current HP by the same amount.
    pub fn raise_max_hp(&mut self, amount: i32) {
        let amount = amount.max(0);
        self.max_hp = self.max_hp.saturating_add(amount);
        self.hp = self.hp.saturating_add(amount);
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        CombatantSnapshot {
            name: self.name.clone(),
            hp: self.hp,
            max_hp: self.max_hp,
            alive: self.is_alive(),
        }
    }
}

/// The player character. Persists across encounters, carrying gold and stat bonuses.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Hero {
    pub combatant: Combatant,
    pub gold: i32,
    pub class: HeroClass,
}

impl Hero {
    pub fn new(class: HeroClass) -> Self {
        let stats = class.starting_stats();
        Self::with_stats(class, class.name(), stats.hp, stats.attack, stats.defense, stats.gold)
    }

    pub fn with_stats(
        class: HeroClass,
        name: impl Into<String>,
        hp: i32,
        attack: i32,
        defense: i32,
        gold: i32,
    ) -> Self {
        Self {
            combatant: Combatant::new(name, hp, attack, defense),
            gold: gold.max(0),
            class,
        }
    }

    pub fn name(&self) -> &str {
        &self.combatant.name
    }

    pub fn is_alive(&self) -> bool {
        self.combatant.is_alive()
    }

    pub fn snapshot(&self) -> CombatantSnapshot {
        self.combatant.snapshot()
    }
}
