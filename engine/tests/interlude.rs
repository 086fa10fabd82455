use skirmish::content::builtin_shop;
use skirmish::interlude::{
    camp, loot, purchase, shop_offer, upgrade, Bonus, CampChoice, Choice, RandomEvent,
    ShopChoice, ShopItem, UpgradeChoice,
};
use skirmish::{Dice, Hero, HeroClass};

#[test]
fn loot_splits_between_attack_and_defense() {
    let hero = Hero::new(HeroClass::Warrior);
    let out = loot(hero.clone(), &mut Dice::from_scripted(vec![0.2]));
    assert_eq!(out.hero.combatant.attack, 27);
    let out = loot(hero, &mut Dice::from_scripted(vec![0.8]));
    assert_eq!(out.hero.combatant.defense, 10);
}

#[test]
fn wanderer_trades_health_for_gold() {
    let hero = Hero::new(HeroClass::Rogue);
    let mut dice = Dice::from_seed(1);
    let out = RandomEvent::Wanderer.resolve(hero.clone(), Choice::First, &mut dice);
    assert_eq!(out.hero.combatant.hp(), 85);
    assert_eq!(out.hero.gold, 30);

    let declined = RandomEvent::Wanderer.resolve(hero, Choice::Second, &mut dice);
    assert_eq!(declined.hero.gold, 20);
}

#[test]
fn wanderer_ignores_nearly_dead_heroes() {
    let mut hero = Hero::new(HeroClass::Rogue);
    hero.combatant.take_damage(85);
    let out = RandomEvent::Wanderer.resolve(hero, Choice::First, &mut Dice::from_seed(1));
    assert_eq!(out.hero.combatant.hp(), 5);
    assert_eq!(out.hero.gold, 20);
}

#[test]
fn chest_can_reward_or_hurt() {
    let hero = Hero::new(HeroClass::Mage);
    let mut dice = Dice::from_scripted(vec![0.1, 0.9]);
    let reward = RandomEvent::Chest.resolve(hero.clone(), Choice::First, &mut dice);
    assert_eq!(reward.hero.combatant.defense, 5);

    let mut dice = Dice::from_scripted(vec![0.6]);
    let trap = RandomEvent::Chest.resolve(hero.clone(), Choice::First, &mut dice);
    assert_eq!(trap.hero.combatant.hp(), 77);

    let skipped = RandomEvent::Chest.resolve(hero.clone(), Choice::Second, &mut Dice::from_seed(5));
    assert_eq!(skipped.hero, hero);
}

#[test]
fn dawn_offers_attack_or_healing() {
    let mut hero = Hero::new(HeroClass::Mage);
    hero.combatant.take_damage(10);
    let mut dice = Dice::from_seed(5);
    let bold = RandomEvent::Dawn.resolve(hero.clone(), Choice::First, &mut dice);
    assert_eq!(bold.hero.combatant.attack, 19);
    let rested = RandomEvent::Dawn.resolve(hero, Choice::Second, &mut dice);
    assert_eq!(rested.hero.combatant.hp(), 75);
}

#[test]
fn event_draw_covers_every_event() {
    let mut dice = Dice::from_scripted(vec![0.0, 0.4, 0.9]);
    let drawn: Vec<_> = (0..3).map(|_| RandomEvent::draw(&mut dice)).collect();
    assert_eq!(drawn, RandomEvent::ALL);
}

#[test]
fn camp_rest_is_clamped_and_fortify_adds_defense() {
    let mut hero = Hero::new(HeroClass::Warrior);
    hero.combatant.take_damage(10);
    assert_eq!(camp(hero.clone(), CampChoice::Rest).hero.combatant.hp(), 120);
    assert_eq!(camp(hero, CampChoice::Fortify).hero.combatant.defense, 11);
}

#[test]
fn shop_offer_is_two_distinct_items() {
    let items = builtin_shop("basic").unwrap();
    for seed in 0..32 {
        let offer = shop_offer(&items, &mut Dice::from_seed(seed));
        assert_eq!(offer.len(), 2);
        assert_ne!(offer[0], offer[1]);
    }
}

#[test]
fn purchase_requires_gold() {
    let offer = vec![
        ShopItem { name: "Amulet".into(), bonus: Bonus::MaxHp(10), cost: 15 },
        ShopItem { name: "Crown".into(), bonus: Bonus::Attack(9), cost: 99 },
    ];
    let hero = Hero::new(HeroClass::Mage);

    let bought = purchase(hero.clone(), &offer, ShopChoice::Buy(0));
    assert_eq!(bought.hero.gold, 5);
    assert_eq!(bought.hero.combatant.max_hp(), 90);
    assert_eq!(bought.hero.combatant.hp(), 90);

    let refused = purchase(hero.clone(), &offer, ShopChoice::Buy(1));
    assert_eq!(refused.hero, hero);
    assert_eq!(refused.message, "Not enough gold");

    assert_eq!(purchase(hero.clone(), &offer, ShopChoice::Leave).hero, hero);
}

#[test]
fn upgrades() {
    let hero = Hero::new(HeroClass::Rogue);
    let tougher = upgrade(hero.clone(), UpgradeChoice::Vitality).hero;
    assert_eq!((tougher.combatant.hp(), tougher.combatant.max_hp()), (95, 95));
    assert_eq!(upgrade(hero, UpgradeChoice::Might).hero.combatant.attack, 22);
}
