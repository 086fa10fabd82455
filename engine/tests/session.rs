use skirmish::api::{
    parse_config, run_session, simulate_many, simulate_session, Campaign, Decider, Policy,
    SessionConfig, SessionStatus, Stage,
};
use skirmish::content::ContentFormat;
use skirmish::interlude::{CampChoice, Choice, RandomEvent, ShopChoice, ShopItem, UpgradeChoice};
use skirmish::{Dice, Encounter, Hero, HeroAction, HeroClass, TurnInput};

/// Always attacks; answers every interlude with its first option.
#[derive(Default)]
struct Eager {
    notices: Vec<(Stage, String)>,
    quit_at_camp: bool,
}

impl TurnInput for Eager {
    fn choose(&mut self, _encounter: &Encounter<'_>) -> Option<HeroAction> {
        Some(HeroAction::Attack)
    }
}

impl Decider for Eager {
    fn event_choice(&mut self, _event: RandomEvent, _hero: &Hero) -> Option<Choice> {
        Some(Choice::First)
    }

    fn camp_choice(&mut self, _hero: &Hero) -> Option<CampChoice> {
        if self.quit_at_camp { None } else { Some(CampChoice::Rest) }
    }

    fn shop_choice(&mut self, _offer: &[ShopItem], _hero: &Hero) -> Option<ShopChoice> {
        Some(ShopChoice::Buy(0))
    }

    fn upgrade_choice(&mut self, _hero: &Hero) -> Option<UpgradeChoice> {
        Some(UpgradeChoice::Might)
    }

    fn notify(&mut self, stage: Stage, message: &str) {
        self.notices.push((stage, message.to_string()));
    }
}

#[test]
fn warrior_always_clears_the_first_wave() {
    let campaign = Campaign::builtin().unwrap();
    let mut decider = Eager::default();
    let hero = Hero::new(HeroClass::Warrior);
    let outcome =
        run_session(hero, &campaign, &mut Dice::from_seed(11), &mut decider).unwrap();

    let first = &outcome.encounters[0];
    assert!(first.result.hero_survived());
    assert_eq!(first.rounds, 5);
    assert_eq!(outcome.encounters.len(), 2);
    assert!(matches!(outcome.status, SessionStatus::Cleared | SessionStatus::Defeated));

    let stages: Vec<Stage> = decider.notices.iter().map(|(s, _)| *s).collect();
    assert_eq!(stages, [Stage::Loot, Stage::Event, Stage::Camp, Stage::Shop, Stage::Upgrade]);
}

#[test]
fn quitting_mid_session_stops_before_the_boss() {
    let campaign = Campaign::builtin().unwrap();
    let mut decider = Eager { quit_at_camp: true, ..Eager::default() };
    let hero = Hero::new(HeroClass::Warrior);
    let outcome =
        run_session(hero, &campaign, &mut Dice::from_seed(3), &mut decider).unwrap();
    assert_eq!(outcome.status, SessionStatus::Quit);
    assert_eq!(outcome.reached, Stage::Camp);
    assert_eq!(outcome.encounters.len(), 1);
}

#[test]
fn simulated_sessions_are_reproducible() {
    let cfg = SessionConfig {
        policy: Policy::Balanced,
        ..SessionConfig::new(HeroClass::Mage, 2025)
    };
    let a = simulate_session(cfg.clone()).unwrap();
    let b = simulate_session(cfg).unwrap();
    assert_eq!(a.log, b.log);
    assert_eq!(a.status, b.status);
    assert!(a.rounds > 0);
}

#[test]
fn simulate_many_counts_every_sample() {
    let stats = simulate_many(SessionConfig::new(HeroClass::Rogue, 1), 40).unwrap();
    assert_eq!(stats.samples, 40);
    assert_eq!(stats.cleared + stats.defeated + stats.quit, 40);
    assert_eq!(stats.quit, 0);
    assert!((0.0..=1.0).contains(&stats.clear_rate));
}

#[test]
fn config_parses_from_yaml_with_defaults() {
    let yaml = "class: rogue\nseed: 9\npolicy: balanced\n";
    let cfg = parse_config(yaml, ContentFormat::Yaml).unwrap();
    assert_eq!(cfg.class, HeroClass::Rogue);
    assert_eq!(cfg.policy, Policy::Balanced);
    assert_eq!(cfg.first_wave, "first_wave");
    assert_eq!(cfg.boss_wave, "dragon");
    assert_eq!(cfg.shop, "basic");
}

#[test]
fn unknown_wave_reference_is_an_error() {
    let cfg = SessionConfig {
        boss_wave: "no/such/wave.json".into(),
        ..SessionConfig::new(HeroClass::Mage, 0)
    };
    let err = simulate_session(cfg).unwrap_err();
    assert!(format!("{err:#}").contains("no/such/wave.json"));
}
