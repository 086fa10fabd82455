use std::{fmt, fs, path::Path};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::combat::encounter::{
    run_encounter, Encounter, EncounterReport, EncounterSnapshot, TurnInput,
};
use crate::content::{self, ContentFormat, WaveData};
use crate::interlude::{
    self, camp, purchase, shop_offer, upgrade, CampChoice, Choice, RandomEvent, ShopChoice,
    ShopItem, UpgradeChoice,
};
use crate::{CombatantSnapshot, Dice, Hero, HeroAction, HeroClass, LogEntry};

/// Steps of a full run, in play order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Stage {
    FirstEncounter,
    Loot,
    Event,
    Camp,
    Shop,
    Upgrade,
    BossEncounter,
    End,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Stage::FirstEncounter => "first encounter",
            Stage::Loot => "loot",
            Stage::Event => "event",
            Stage::Camp => "camp",
            Stage::Shop => "shop",
            Stage::Upgrade => "upgrade",
            Stage::BossEncounter => "boss encounter",
            Stage::End => "end",
        })
    }
}

/// Source of every player decision in a session. Returning `None` quits.
pub trait Decider: TurnInput {
    fn event_choice(&mut self, event: RandomEvent, hero: &Hero) -> Option<Choice>;
    fn camp_choice(&mut self, hero: &Hero) -> Option<CampChoice>;
    fn shop_choice(&mut self, offer: &[ShopItem], hero: &Hero) -> Option<ShopChoice>;
    fn upgrade_choice(&mut self, hero: &Hero) -> Option<UpgradeChoice>;

    fn notify(&mut self, _stage: Stage, _message: &str) {}
}

/// Content for one run: two waves and a shop inventory.
#[derive(Debug, Clone)]
pub struct Campaign {
    pub first_wave: WaveData,
    pub boss_wave: WaveData,
    pub shop: Vec<ShopItem>,
}

impl Campaign {
    pub fn builtin() -> Result<Self> {
        Ok(Self {
            first_wave: content::builtin_wave("first_wave")?,
            boss_wave: content::builtin_wave("dragon")?,
            shop: content::builtin_shop("basic")?,
        })
    }

    pub fn load(cfg: &SessionConfig) -> Result<Self> {
        Ok(Self {
            first_wave: load_wave(&cfg.first_wave)?,
            boss_wave: load_wave(&cfg.boss_wave)?,
            shop: load_shop(&cfg.shop)?,
        })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SessionStatus {
    /// Both encounters won.
    Cleared,
    Defeated,
    Quit,
}

#[derive(Debug, Clone)]
pub struct SessionOutcome {
    pub hero: Hero,
    pub status: SessionStatus,
    /// Last stage entered.
    pub reached: Stage,
    pub encounters: Vec<EncounterReport>,
    /// Rendered combat log lines and interlude messages, in order.
    pub transcript: Vec<String>,
}

struct Run<'a, D: Decider> {
    hero: Hero,
    dice: &'a mut Dice,
    decider: &'a mut D,
    encounters: Vec<EncounterReport>,
    transcript: Vec<String>,
}

impl<D: Decider> Run<'_, D> {
    fn enter(&self, stage: Stage) {
        info!(%stage, hero_hp = self.hero.combatant.hp(), gold = self.hero.gold, "stage");
    }

    fn fight(&mut self, wave: &WaveData) -> Result<bool> {
        let report = run_encounter(
            &mut self.hero,
            wave.spawn(),
            &mut *self.dice,
            &mut *self.decider,
        )
        .with_context(|| format!("failed to run encounter '{}'", wave.name))?;
        self.transcript.extend(report.log.iter().map(LogEntry::to_string));
        let won = report.result.hero_survived();
        self.encounters.push(report);
        Ok(won)
    }

    fn apply(&mut self, stage: Stage, step: impl FnOnce(Hero, &mut Dice) -> interlude::Interlude) {
        let hero = self.hero.clone();
        let out = step(hero, &mut *self.dice);
        self.hero = out.hero;
        self.decider.notify(stage, &out.message);
        self.transcript.push(out.message);
    }

    fn finish(self, status: SessionStatus, reached: Stage) -> SessionOutcome {
        info!(?status, %reached, "session over");
        SessionOutcome {
            hero: self.hero,
            status,
            reached,
            encounters: self.encounters,
            transcript: self.transcript,
        }
    }
}

/// Play a full run: first wave, loot, event, camp, shop, upgrade, boss.
pub fn run_session<D: Decider>(
    hero: Hero,
    campaign: &Campaign,
    dice: &mut Dice,
    decider: &mut D,
) -> Result<SessionOutcome> {
    let mut run = Run { hero, dice, decider, encounters: Vec::new(), transcript: Vec::new() };

    run.enter(Stage::FirstEncounter);
    if !run.fight(&campaign.first_wave)? {
        let status = lost_or_quit(&run.hero);
        return Ok(run.finish(status, Stage::FirstEncounter));
    }

    run.enter(Stage::Loot);
    run.apply(Stage::Loot, interlude::loot);

    run.enter(Stage::Event);
    let event = RandomEvent::draw(&mut *run.dice);
    let Some(choice) = run.decider.event_choice(event, &run.hero) else {
        return Ok(run.finish(SessionStatus::Quit, Stage::Event));
    };
    run.apply(Stage::Event, |hero, dice| event.resolve(hero, choice, dice));

    run.enter(Stage::Camp);
    let Some(choice) = run.decider.camp_choice(&run.hero) else {
        return Ok(run.finish(SessionStatus::Quit, Stage::Camp));
    };
    run.apply(Stage::Camp, |hero, _| camp(hero, choice));

    run.enter(Stage::Shop);
    let offer = shop_offer(&campaign.shop, &mut *run.dice);
    let Some(choice) = run.decider.shop_choice(&offer, &run.hero) else {
        return Ok(run.finish(SessionStatus::Quit, Stage::Shop));
    };
    run.apply(Stage::Shop, |hero, _| purchase(hero, &offer, choice));

    run.enter(Stage::Upgrade);
    let Some(choice) = run.decider.upgrade_choice(&run.hero) else {
        return Ok(run.finish(SessionStatus::Quit, Stage::Upgrade));
    };
    run.apply(Stage::Upgrade, |hero, _| upgrade(hero, choice));

    run.enter(Stage::BossEncounter);
    if !run.fight(&campaign.boss_wave)? {
        let status = lost_or_quit(&run.hero);
        return Ok(run.finish(status, Stage::BossEncounter));
    }

    run.enter(Stage::End);
    Ok(run.finish(SessionStatus::Cleared, Stage::End))
}

fn lost_or_quit(hero: &Hero) -> SessionStatus {
    if hero.is_alive() {
        SessionStatus::Quit
    } else {
        SessionStatus::Defeated
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Policy {
    /// Always attacks and always takes stat boosts.
    #[default]
    Aggressive,
    /// Heals when low, rests when hurt, buys what it can afford.
    Balanced,
}

/// Seeded decision maker for unattended runs.
pub struct AutoPlayer {
    policy: Policy,
    dice: Dice,
}

impl AutoPlayer {
    pub fn new(policy: Policy, seed: u64) -> Self {
        Self { policy, dice: Dice::from_seed(seed) }
    }
}

impl TurnInput for AutoPlayer {
    fn choose(&mut self, encounter: &Encounter<'_>) -> Option<HeroAction> {
        let hero = encounter.hero();
        Some(match self.policy {
            Policy::Aggressive => HeroAction::Attack,
            Policy::Balanced => {
                let hp = hero.combatant.hp();
                let max = hero.combatant.max_hp();
                if hp * 100 < max * 35 {
                    HeroAction::Heal
                } else if hero.class == HeroClass::Mage {
                    HeroAction::StrongAttack
                } else {
                    HeroAction::Attack
                }
            }
        })
    }
}

impl Decider for AutoPlayer {
    fn event_choice(&mut self, _event: RandomEvent, _hero: &Hero) -> Option<Choice> {
        match self.policy {
            Policy::Aggressive => Some(Choice::First),
            Policy::Balanced => Choice::from_index(self.dice.pick(2)),
        }
    }

    fn camp_choice(&mut self, hero: &Hero) -> Option<CampChoice> {
        let missing = hero.combatant.max_hp() - hero.combatant.hp();
        Some(match self.policy {
            Policy::Balanced if missing >= interlude::CAMP_REST_HEAL => CampChoice::Rest,
            _ => CampChoice::Fortify,
        })
    }

    fn shop_choice(&mut self, offer: &[ShopItem], hero: &Hero) -> Option<ShopChoice> {
        let affordable = offer.iter().enumerate().filter(|(_, item)| item.cost <= hero.gold);
        let pick = match self.policy {
            Policy::Aggressive => affordable.map(|(i, _)| i).next(),
            Policy::Balanced => affordable.min_by_key(|(_, item)| item.cost).map(|(i, _)| i),
        };
        Some(pick.map_or(ShopChoice::Leave, ShopChoice::Buy))
    }

    fn upgrade_choice(&mut self, hero: &Hero) -> Option<UpgradeChoice> {
        Some(match self.policy {
            Policy::Balanced if hero.combatant.hp() * 2 < hero.combatant.max_hp() => {
                UpgradeChoice::Vitality
            }
            _ => UpgradeChoice::Might,
        })
    }
}

fn default_first_wave() -> String {
    "first_wave".to_string()
}

fn default_boss_wave() -> String {
    "dragon".to_string()
}

fn default_shop() -> String {
    "basic".to_string()
}

/// Unattended run settings. Wave and shop fields take a built-in id or a file path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionConfig {
    pub class: HeroClass,
    #[serde(default)]
    pub seed: u64,
    #[serde(default)]
    pub policy: Policy,
    #[serde(default = "default_first_wave")]
    pub first_wave: String,
    #[serde(default = "default_boss_wave")]
    pub boss_wave: String,
    #[serde(default = "default_shop")]
    pub shop: String,
}

impl SessionConfig {
    pub fn new(class: HeroClass, seed: u64) -> Self {
        Self {
            class,
            seed,
            policy: Policy::default(),
            first_wave: default_first_wave(),
            boss_wave: default_boss_wave(),
            shop: default_shop(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionResult {
    pub class: HeroClass,
    pub status: SessionStatus,
    pub reached: Stage,
    pub hero_end: CombatantSnapshot,
    pub gold_end: i32,
    pub rounds: u32,
    pub log: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub struct SessionStats {
    pub samples: u32,
    pub cleared: u32,
    pub defeated: u32,
    pub quit: u32,
    pub clear_rate: f64,
    /// Mean hero HP left over cleared runs.
    pub avg_hp_cleared: f64,
}

pub fn load_config(path: &Path) -> Result<SessionConfig> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("failed to read session config: {}", path.display()))?;
    parse_config(&text, ContentFormat::from_path(path))
        .with_context(|| format!("failed to parse session config: {}", path.display()))
}

pub fn parse_config(text: &str, format: ContentFormat) -> Result<SessionConfig> {
    Ok(format.parse(text)?)
}

/// Resolve a built-in wave id, falling back to a JSON/YAML file path.
pub fn load_wave(reference: &str) -> Result<WaveData> {
    if content::builtin_waves().contains_key(reference) {
        return Ok(content::builtin_wave(reference)?);
    }
    let path = Path::new(reference);
    let text = fs::read_to_string(path).with_context(|| {
        format!("'{}' is neither a built-in wave nor a readable file", reference)
    })?;
    content::parse_wave(&text, ContentFormat::from_path(path))
        .with_context(|| format!("failed to parse wave file: {}", reference))
}

pub fn load_shop(reference: &str) -> Result<Vec<ShopItem>> {
    if content::builtin_shops().contains_key(reference) {
        return Ok(content::builtin_shop(reference)?);
    }
    let path = Path::new(reference);
    let text = fs::read_to_string(path).with_context(|| {
        format!("'{}' is neither a built-in shop nor a readable file", reference)
    })?;
    content::parse_shop(&text, ContentFormat::from_path(path))
        .with_context(|| format!("failed to parse shop file: {}", reference))
}

pub fn simulate_session(cfg: SessionConfig) -> Result<SessionResult> {
    let campaign = Campaign::load(&cfg)?;
    simulate_with(&cfg, &campaign, cfg.seed)
}

fn simulate_with(cfg: &SessionConfig, campaign: &Campaign, seed: u64) -> Result<SessionResult> {
    let mut dice = Dice::from_seed(seed);
    let mut player = AutoPlayer::new(cfg.policy, player_seed(seed));
    let outcome = run_session(Hero::new(cfg.class), campaign, &mut dice, &mut player)?;
    Ok(SessionResult {
        class: cfg.class,
        status: outcome.status,
        reached: outcome.reached,
        hero_end: outcome.hero.snapshot(),
        gold_end: outcome.hero.gold,
        rounds: outcome.encounters.iter().map(|r| r.rounds).sum(),
        log: outcome.transcript,
    })
}

/// Decision stream seed for a run, kept apart from neighbouring game seeds.
fn player_seed(game_seed: u64) -> u64 {
    game_seed ^ 0x9E37_79B9_7F4A_7C15
}

/// Run `samples` sessions with seeds `cfg.seed + i`.
pub fn simulate_many(cfg: SessionConfig, samples: u32) -> Result<SessionStats> {
    let campaign = Campaign::load(&cfg)?;
    let mut stats = SessionStats {
        samples,
        cleared: 0,
        defeated: 0,
        quit: 0,
        clear_rate: 0.0,
        avg_hp_cleared: 0.0,
    };
    let mut hp_total = 0i64;
    for i in 0..samples {
        let result = simulate_with(&cfg, &campaign, cfg.seed.wrapping_add(i as u64))?;
        match result.status {
            SessionStatus::Cleared => {
                stats.cleared += 1;
                hp_total += result.hero_end.hp as i64;
            }
            SessionStatus::Defeated => stats.defeated += 1,
            SessionStatus::Quit => stats.quit += 1,
        }
    }
    if samples > 0 {
        stats.clear_rate = stats.cleared as f64 / samples as f64;
    }
    if stats.cleared > 0 {
        stats.avg_hp_cleared = hp_total as f64 / stats.cleared as f64;
    }
    Ok(stats)
}

/// Snapshot shape used by consoles that redraw after every entry.
pub fn describe(snapshot: &EncounterSnapshot) -> String {
    let mut line = bar(&snapshot.hero);
    for enemy in snapshot.enemies.iter().filter(|e| e.alive) {
        line.push_str("  |  ");
        line.push_str(&bar(enemy));
    }
    line
}

fn bar(c: &CombatantSnapshot) -> String {
    format!("{} {}/{}", c.name, c.hp, c.max_hp)
}
