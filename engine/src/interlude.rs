//! Between-encounter interludes: loot, random events, camp, shop and upgrades.
//!
//! Each interlude takes the hero by value plus the player's choice and hands
//! back the updated hero with a short message for display. None of them touch
//! encounter state.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::combatant::Hero;
use crate::Dice;

pub const WANDERER_HP_COST: i32 = 5;
pub const WANDERER_GOLD: i32 = 10;
pub const CHEST_TRAP_DAMAGE: i32 = 3;
pub const CAMP_REST_HEAL: i32 = 30;

/// The hero after an interlude, with the line to show the player.
#[derive(Debug, Clone)]
pub struct Interlude {
    pub hero: Hero,
    pub message: String,
}

impl Interlude {
    fn new(hero: Hero, message: impl Into<String>) -> Self {
        Self { hero, message: message.into() }
    }
}

/// Generic two-option answer for narrative prompts.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Choice {
    First,
    Second,
}

impl Choice {
    pub fn from_index(idx: usize) -> Option<Choice> {
        match idx {
            0 => Some(Choice::First),
            1 => Some(Choice::Second),
            _ => None,
        }
    }
}

/// Post-battle loot: an even split between +2 attack and +2 defense.
pub fn loot(mut hero: Hero, dice: &mut Dice) -> Interlude {
    if dice.chance(0.5) {
        hero.combatant.attack += 2;
        Interlude::new(hero, "You found an item: +2 attack")
    } else {
        hero.combatant.defense += 2;
        Interlude::new(hero, "You found an item: +2 defense")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RandomEvent {
    Wanderer,
    Chest,
    Dawn,
}

impl RandomEvent {
    pub const ALL: [RandomEvent; 3] =
        [RandomEvent::Wanderer, RandomEvent::Chest, RandomEvent::Dawn];

    pub fn draw(dice: &mut Dice) -> RandomEvent {
        Self::ALL[dice.pick(Self::ALL.len())]
    }

    pub fn prompt(self) -> &'static str {
        match self {
            RandomEvent::Wanderer => "A mysterious wanderer",
            RandomEvent::Chest => "You find a chest",
            RandomEvent::Dawn => "Dawn is breaking",
        }
    }

    pub fn options(self) -> [&'static str; 2] {
        match self {
            RandomEvent::Wanderer => ["Trade 5 HP for 10 gold", "Decline"],
            RandomEvent::Chest => ["Open it", "Walk past"],
            RandomEvent::Dawn => ["+1 attack", "+5 HP"],
        }
    }

    pub fn resolve(self, mut hero: Hero, choice: Choice, dice: &mut Dice) -> Interlude {
        match (self, choice) {
            (RandomEvent::Wanderer, Choice::First) if hero.combatant.hp() > WANDERER_HP_COST => {
                hero.combatant.take_damage(WANDERER_HP_COST);
                hero.gold += WANDERER_GOLD;
                Interlude::new(hero, "You received 10 gold")
            }
            (RandomEvent::Wanderer, Choice::First) => {
                Interlude::new(hero, "The wanderer eyes your wounds and walks away")
            }
            (RandomEvent::Chest, Choice::First) => {
                if dice.chance(0.5) {
                    if dice.pick(2) == 0 {
                        hero.combatant.attack += 2;
                        Interlude::new(hero, "+2 attack")
                    } else {
                        hero.combatant.defense += 2;
                        Interlude::new(hero, "+2 defense")
                    }
                } else {
                    hero.combatant.take_damage(CHEST_TRAP_DAMAGE);
                    Interlude::new(hero, "Empty! -3 HP")
                }
            }
            (RandomEvent::Dawn, Choice::First) => {
                hero.combatant.attack += 1;
                Interlude::new(hero, "Attack increased")
            }
            (RandomEvent::Dawn, Choice::Second) => {
                hero.combatant.heal(5);
                Interlude::new(hero, "Restored 5 HP")
            }
            (_, Choice::Second) => Interlude::new(hero, "You move on"),
        }
    }
}

impl fmt::Display for RandomEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.prompt())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CampChoice {
    Rest,
    Fortify,
}

pub fn camp(mut hero: Hero, choice: CampChoice) -> Interlude {
    match choice {
        CampChoice::Rest => {
            hero.combatant.heal(CAMP_REST_HEAL);
            Interlude::new(hero, "You rest")
        }
        CampChoice::Fortify => {
            hero.combatant.defense += 3;
            Interlude::new(hero, "Defense increased")
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Bonus {
    Attack(i32),
    Defense(i32),
    MaxHp(i32),
}

impl fmt::Display for Bonus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Bonus::Attack(n) => write!(f, "+{} attack", n),
            Bonus::Defense(n) => write!(f, "+{} defense", n),
            Bonus::MaxHp(n) => write!(f, "+{} HP", n),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShopItem {
    pub name: String,
    pub bonus: Bonus,
    pub cost: i32,
}

impl fmt::Display for ShopItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}) - {} gold", self.name, self.bonus, self.cost)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ShopChoice {
    Buy(usize),
    Leave,
}

/// Two distinct items from the inventory, in random order.
pub fn shop_offer(items: &[ShopItem], dice: &mut Dice) -> Vec<ShopItem> {
    if items.len() <= 2 {
        return items.to_vec();
    }
    let first = dice.pick(items.len());
    let mut second = dice.pick(items.len() - 1);
    if second >= first {
        second += 1;
    }
    vec![items[first].clone(), items[second].clone()]
}

pub fn purchase(mut hero: Hero, offer: &[ShopItem], choice: ShopChoice) -> Interlude {
    let item = match choice {
        ShopChoice::Buy(idx) => match offer.get(idx) {
            Some(item) => item,
            None => return Interlude::new(hero, "You leave the shop"),
        },
        ShopChoice::Leave => return Interlude::new(hero, "You leave the shop"),
    };
    if hero.gold < item.cost {
        return Interlude::new(hero, "Not enough gold");
    }
    hero.gold -= item.cost;
    match item.bonus {
        Bonus::Attack(n) => hero.combatant.attack += n,
        Bonus::Defense(n) => hero.combatant.defense += n,
        Bonus::MaxHp(n) => hero.combatant.raise_max_hp(n),
    }
    tracing::debug!(item = %item.name, gold_left = hero.gold, "purchase");
    Interlude::new(hero, format!("Bought {}", item.name))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeChoice {
    /// +5 max HP.
    Vitality,
    /// +2 attack.
    Might,
}

pub fn upgrade(mut hero: Hero, choice: UpgradeChoice) -> Interlude {
    match choice {
        UpgradeChoice::Vitality => {
            hero.combatant.raise_max_hp(5);
            Interlude::new(hero, "+5 max HP")
        }
        UpgradeChoice::Might => {
            hero.combatant.attack += 2;
            Interlude::new(hero, "+2 attack")
        }
    }
}
