use skirmish::combat::actions::{enemy_attack, heal_self, normal_attack, strong_attack};
use skirmish::{Combatant, Dice, Hero, HeroClass, LogEntry};

fn hero(class: HeroClass, hp: i32, attack: i32, defense: i32) -> Hero {
    Hero::with_stats(class, class.name(), hp, attack, defense, 0)
}

#[test]
fn damage_floor_is_one_when_defense_outclasses_attack() {
    let warrior = hero(HeroClass::Warrior, 50, 5, 0);
    for defense in [5, 6, 40] {
        let mut wall = Combatant::new("Wall", 100, 0, defense);
        let out = normal_attack(&warrior, &mut wall, &mut Dice::from_seed(1));
        assert_eq!(out.damage, 1);
        assert_eq!(wall.hp(), 99);
    }
}

#[test]
fn mage_strong_attack_on_forced_hit() {
    let mage = hero(HeroClass::Mage, 80, 18, 3);
    let mut target = Combatant::new("Orc", 100, 0, 3);
    let out = strong_attack(&mage, &mut target, &mut Dice::from_scripted(vec![0.0]));
    assert!(out.hit);
    assert_eq!(out.damage, 42);
    assert_eq!(target.hp(), 58);
}

#[test]
fn strong_attack_miss_deals_nothing() {
    let mage = hero(HeroClass::Mage, 80, 18, 3);
    let mut target = Combatant::new("Orc", 100, 0, 3);
    let out = strong_attack(&mage, &mut target, &mut Dice::from_scripted(vec![0.7]));
    assert!(!out.hit);
    assert_eq!(out.damage, 0);
    assert_eq!(target.hp(), 100);
    assert!(matches!(out.entry, LogEntry::Miss { .. }));
}

#[test]
fn critical_on_huge_attack_saturates() {
    let rogue = hero(HeroClass::Rogue, 90, i32::MAX, 4);
    let mut target = Combatant::new("Titan", i32::MAX, 0, 0);
    let out = normal_attack(&rogue, &mut target, &mut Dice::from_scripted(vec![0.0]));
    assert!(out.critical);
    assert_eq!(out.damage, i32::MAX);
    assert_eq!(target.hp(), 0);
}

#[test]
fn rogue_critical_doubles_damage() {
    let rogue = hero(HeroClass::Rogue, 90, 20, 4);
    let mut target = Combatant::new("Goblin", 100, 0, 4);
    let out = normal_attack(&rogue, &mut target, &mut Dice::from_scripted(vec![0.0]));
    assert!(out.critical);
    assert_eq!(out.damage, 32);

    let out = normal_attack(&rogue, &mut target, &mut Dice::from_scripted(vec![0.3]));
    assert!(!out.critical);
    assert_eq!(out.damage, 16);
    assert_eq!(target.hp(), 100 - 32 - 16);
}

#[test]
fn heal_restores_thirty_percent_clamped() {
    let mut mage = hero(HeroClass::Mage, 80, 18, 3);
    mage.combatant.take_damage(50);
    let out = heal_self(&mut mage);
    assert_eq!(out.damage, 24);
    assert_eq!(mage.combatant.hp(), 54);

    let out = heal_self(&mut mage);
    assert_eq!(out.damage, 24);
    assert_eq!(mage.combatant.hp(), 78);
    heal_self(&mut mage);
    assert_eq!(mage.combatant.hp(), 80);
}

#[test]
fn enemy_attack_never_crits() {
    let mut target = hero(HeroClass::Rogue, 90, 20, 4);
    let orc = Combatant::new("Orc", 50, 15, 3);
    let out = enemy_attack(&orc, &mut target.combatant);
    assert_eq!(out.damage, 11);
    assert!(!out.critical);
    assert_eq!(target.combatant.hp(), 79);
}
