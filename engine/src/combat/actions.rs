use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::combat::log::LogEntry;
use crate::combatant::{Combatant, Hero};
use crate::Dice;

pub const STRONG_ATTACK_HIT_CHANCE: f64 = 0.7;
pub const HEAL_FRACTION: f64 = 0.3;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HeroAction {
    Attack,
    StrongAttack,
    Heal,
}

impl HeroAction {
    pub const ALL: [HeroAction; 3] =
        [HeroAction::Attack, HeroAction::StrongAttack, HeroAction::Heal];

    /// Boundary policy for raw input: anything unrecognized becomes a normal attack.
    pub fn parse_or_attack(raw: &str) -> HeroAction {
        raw.parse().unwrap_or_else(|_| {
            tracing::warn!(input = raw, "unrecognized action; defaulting to attack");
            HeroAction::Attack
        })
    }

    pub fn label(self) -> &'static str {
        match self {
            HeroAction::Attack => "Attack",
            HeroAction::StrongAttack => "Strong attack",
            HeroAction::Heal => "Heal",
        }
    }
}

impl fmt::Display for HeroAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown action '{0}'")]
pub struct UnknownAction(pub String);

impl FromStr for HeroAction {
    type Err = UnknownAction;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "1" | "a" | "attack" => Ok(HeroAction::Attack),
            "2" | "s" | "strong" | "strong_attack" | "strong-attack" => {
                Ok(HeroAction::StrongAttack)
            }
            "3" | "h" | "heal" => Ok(HeroAction::Heal),
            other => Err(UnknownAction(other.to_string())),
        }
    }
}

/// Result of resolving one action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActionOutcome {
    /// Damage dealt, or HP requested for heals.
    pub damage: i32,
    pub hit: bool,
    pub critical: bool,
    pub entry: LogEntry,
}

/// `attack - defense`, floored at 1 so every hit makes progress.
pub fn base_damage(attack: i32, defense: i32) -> i32 {
    (attack - defense).max(1)
}

pub fn normal_attack(hero: &Hero, target: &mut Combatant, dice: &mut Dice) -> ActionOutcome {
    let mut damage = base_damage(hero.combatant.attack, target.defense);
    let crit_chance = hero.class.traits().critical_chance;
    // Only classes with a crit chance consume a draw.
    let critical = crit_chance > 0.0 && dice.chance(crit_chance);
    if critical {
        damage = damage.saturating_mul(2);
    }
    tracing::debug!(actor = hero.name(), target = %target.name, damage, critical, "normal attack");
    hit(hero.name(), target, damage, critical)
}

pub fn strong_attack(hero: &Hero, target: &mut Combatant, dice: &mut Dice) -> ActionOutcome {
    if !dice.chance(STRONG_ATTACK_HIT_CHANCE) {
        tracing::debug!(actor = hero.name(), target = %target.name, "strong attack missed");
        return ActionOutcome {
            damage: 0,
            hit: false,
            critical: false,
            entry: LogEntry::Miss { actor: hero.name().to_string(), target: target.name.clone() },
        };
    }
    let multiplier = hero.class.traits().strong_attack_multiplier;
    let base = (hero.combatant.attack as f64 * multiplier) as i32;
    let damage = base_damage(base, target.defense);
    tracing::debug!(actor = hero.name(), target = %target.name, damage, "strong attack");
    hit(hero.name(), target, damage, false)
}

pub fn heal_self(hero: &mut Hero) -> ActionOutcome {
    let amount = (hero.combatant.max_hp() as f64 * HEAL_FRACTION) as i32;
    let hp = hero.combatant.heal(amount);
    tracing::debug!(actor = hero.name(), amount, after = hp.after, "heal");
    ActionOutcome {
        damage: amount,
        hit: true,
        critical: false,
        entry: LogEntry::Heal { actor: hero.name().to_string(), amount, hp },
    }
}

pub fn enemy_attack(enemy: &Combatant, hero: &mut Combatant) -> ActionOutcome {
    let damage = base_damage(enemy.attack, hero.defense);
    tracing::debug!(actor = %enemy.name, target = %hero.name, damage, "enemy attack");
    hit(&enemy.name, hero, damage, false)
}

fn hit(actor: &str, target: &mut Combatant, damage: i32, critical: bool) -> ActionOutcome {
    let hp = target.take_damage(damage);
    ActionOutcome {
        damage,
        hit: true,
        critical,
        entry: LogEntry::Hit {
            actor: actor.to_string(),
            target: target.name.clone(),
            damage,
            critical,
            hp,
        },
    }
}
