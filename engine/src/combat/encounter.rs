use std::{collections::VecDeque, fmt};

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::combat::actions::{self, HeroAction};
use crate::combat::log::{LogEntry, OutcomeLog};
use crate::combatant::{Combatant, CombatantSnapshot, Hero};
use crate::Dice;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterState {
    AwaitingHeroAction,
    ResolvingHeroAction,
    ResolvingEnemyTurns,
    Victory,
    Defeat,
    /// Abandoned by the caller between cycles.
    Aborted,
}

impl EncounterState {
    pub fn is_terminal(self) -> bool {
        matches!(self, EncounterState::Victory | EncounterState::Defeat | EncounterState::Aborted)
    }

    pub fn result(self) -> Option<EncounterResult> {
        match self {
            EncounterState::Victory => Some(EncounterResult::Victory),
            EncounterState::Defeat => Some(EncounterResult::Defeat),
            EncounterState::Aborted => Some(EncounterResult::Aborted),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EncounterResult {
    Victory,
    Defeat,
    Aborted,
}

impl EncounterResult {
    pub fn hero_survived(self) -> bool {
        matches!(self, EncounterResult::Victory)
    }
}

impl fmt::Display for EncounterResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            EncounterResult::Victory => "Victory",
            EncounterResult::Defeat => "Defeat",
            EncounterResult::Aborted => "Aborted",
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EncounterError {
    #[error("hero '{0}' has no hit points left")]
    HeroDown(String),
    #[error("wave has no living enemies")]
    EmptyWave,
    #[error("encounter already resolved ({0:?})")]
    Resolved(EncounterState),
    /// Orchestrator bug: an attack was requested with every enemy down.
    #[error("no living target while awaiting a hero action")]
    NoLivingTarget,
}

/// Hero and enemy views after a sub-step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EncounterSnapshot {
    pub hero: CombatantSnapshot,
    pub enemies: Vec<CombatantSnapshot>,
}

/// Everything an encounter produced once it has ended.
#[derive(Debug, Clone, Serialize)]
pub struct EncounterReport {
    pub result: EncounterResult,
    pub rounds: u32,
    pub log: Vec<LogEntry>,
}

/// One wave fought to resolution. Holds the hero exclusively for its lifetime.
pub struct Encounter<'h> {
    hero: &'h mut Hero,
    enemies: Vec<Combatant>,
    state: EncounterState,
    round: u32,
    log: OutcomeLog,
}

impl<'h> Encounter<'h> {
    pub fn new(hero: &'h mut Hero, enemies: Vec<Combatant>) -> Result<Self, EncounterError> {
        if !hero.is_alive() {
            return Err(EncounterError::HeroDown(hero.name().to_string()));
        }
        if !enemies.iter().any(Combatant::is_alive) {
            return Err(EncounterError::EmptyWave);
        }
        debug!(hero = hero.name(), enemies = enemies.len(), "encounter starts");
        Ok(Self {
            hero,
            enemies,
            state: EncounterState::AwaitingHeroAction,
            round: 0,
            log: OutcomeLog::new(),
        })
    }

    pub fn state(&self) -> EncounterState {
        self.state
    }

    pub fn result(&self) -> Option<EncounterResult> {
        self.state.result()
    }

    pub fn is_resolved(&self) -> bool {
        self.state.is_terminal()
    }

    /// Number of completed hero-then-enemies cycles.
    pub fn round(&self) -> u32 {
        self.round
    }

    pub fn hero(&self) -> &Hero {
        &*self.hero
    }

    pub fn enemies(&self) -> &[Combatant] {
        &self.enemies
    }

    pub fn snapshot(&self) -> EncounterSnapshot {
        EncounterSnapshot {
            hero: self.hero.snapshot(),
            enemies: self.enemies.iter().map(Combatant::snapshot).collect(),
        }
    }

    pub fn log(&self) -> &OutcomeLog {
        &self.log
    }

    /// Log entries produced since the previous call.
    pub fn since_last(&mut self) -> &[LogEntry] {
        self.log.since_last()
    }

    /// New log entries, each with the state right after it resolved.
    pub fn since_last_with_state(
        &mut self,
    ) -> impl Iterator<Item = (&LogEntry, &EncounterSnapshot)> {
        self.log.since_last_with_state()
    }

    /// Resolve one hero action followed by one enemy pass.
    pub fn take_turn(
        &mut self,
        action: HeroAction,
        dice: &mut Dice,
    ) -> Result<EncounterState, EncounterError> {
        if self.state.is_terminal() {
            return Err(EncounterError::Resolved(self.state));
        }
        self.round += 1;
        debug!(round = self.round, ?action, "hero acts");

        self.state = EncounterState::ResolvingHeroAction;
        self.resolve_hero_action(action, dice)?;

        self.state = EncounterState::ResolvingEnemyTurns;
        self.resolve_enemy_turns();

        self.state = self.settle();
        if let Some(result) = self.state.result() {
            info!(
                %result,
                rounds = self.round,
                hero_hp = self.hero.combatant.hp(),
                "encounter resolved"
            );
            self.record(LogEntry::Outcome { result });
        }
        Ok(self.state)
    }

    /// Abandon the encounter. No-op once a terminal state has been reached.
    pub fn abort(&mut self) {
        if self.state.is_terminal() {
            return;
        }
        info!(rounds = self.round, "encounter aborted");
        self.state = EncounterState::Aborted;
        self.record(LogEntry::Outcome { result: EncounterResult::Aborted });
    }

    pub fn into_report(self) -> EncounterReport {
        EncounterReport {
            result: self.state.result().unwrap_or(EncounterResult::Aborted),
            rounds: self.round,
            log: self.log.into_entries(),
        }
    }

    fn record(&mut self, entry: LogEntry) {
        let snapshot = self.snapshot();
        self.log.push(entry, snapshot);
    }

    fn first_living_enemy(&self) -> Option<usize> {
        self.enemies.iter().position(Combatant::is_alive)
    }

    fn resolve_hero_action(
        &mut self,
        action: HeroAction,
        dice: &mut Dice,
    ) -> Result<(), EncounterError> {
        if action == HeroAction::Heal {
            let outcome = actions::heal_self(&mut *self.hero);
            self.record(outcome.entry);
            return Ok(());
        }

        let idx = self.first_living_enemy().ok_or(EncounterError::NoLivingTarget)?;
        let target = &mut self.enemies[idx];
        let outcome = match action {
            HeroAction::StrongAttack => actions::strong_attack(&*self.hero, target, dice),
            _ => actions::normal_attack(&*self.hero, target, dice),
        };
        self.record(outcome.entry);
        let target = &self.enemies[idx];
        if !target.is_alive() {
            let name = target.name.clone();
            self.record(LogEntry::Defeated { name });
        }
        Ok(())
    }

    fn resolve_enemy_turns(&mut self) {
        for idx in 0..self.enemies.len() {
            if !self.enemies[idx].is_alive() {
                continue;
            }
            let outcome = actions::enemy_attack(&self.enemies[idx], &mut self.hero.combatant);
            self.record(outcome.entry);
            if !self.hero.is_alive() {
                debug!(enemy = %self.enemies[idx].name, "hero dropped; enemy pass ends");
                break;
            }
        }
    }

    fn settle(&self) -> EncounterState {
        if !self.hero.is_alive() {
            EncounterState::Defeat
        } else if self.first_living_enemy().is_none() {
            EncounterState::Victory
        } else {
            EncounterState::AwaitingHeroAction
        }
    }
}

/// Supplies hero actions and observes resolved effects. Sits where UI input
/// collection plugs into the engine.
pub trait TurnInput {
    /// `None` abandons the encounter.
    fn choose(&mut self, encounter: &Encounter<'_>) -> Option<HeroAction>;

    /// Called once per log entry, with the state right after that entry resolved.
    fn observe(&mut self, _entry: &LogEntry, _snapshot: &EncounterSnapshot) {}
}

/// Replays a fixed list of actions, then either repeats the last one or gives up.
#[derive(Debug, Clone)]
pub struct ScriptedActions {
    actions: VecDeque<HeroAction>,
    repeat_last: bool,
    last: Option<HeroAction>,
}

impl ScriptedActions {
    /// Aborts the encounter once the list runs out.
    pub fn new(actions: impl IntoIterator<Item = HeroAction>) -> Self {
        Self { actions: actions.into_iter().collect(), repeat_last: false, last: None }
    }

    pub fn repeat(action: HeroAction) -> Self {
        Self { actions: VecDeque::new(), repeat_last: true, last: Some(action) }
    }

    /// Keeps using the final action once the list runs out.
    pub fn then_repeat(mut self) -> Self {
        self.repeat_last = true;
        self
    }
}

impl TurnInput for ScriptedActions {
    fn choose(&mut self, _encounter: &Encounter<'_>) -> Option<HeroAction> {
        match self.actions.pop_front() {
            Some(action) => {
                self.last = Some(action);
                Some(action)
            }
            None if self.repeat_last => self.last,
            None => None,
        }
    }
}

/// Drive an encounter to resolution, asking `input` for each hero action and
/// streaming new log entries to it after every cycle.
pub fn run_encounter(
    hero: &mut Hero,
    wave: Vec<Combatant>,
    dice: &mut Dice,
    input: &mut impl TurnInput,
) -> Result<EncounterReport, EncounterError> {
    let mut encounter = Encounter::new(hero, wave)?;
    while !encounter.is_resolved() {
        match input.choose(&encounter) {
            Some(action) => {
                encounter.take_turn(action, dice)?;
            }
            None => encounter.abort(),
        }
        for (entry, snapshot) in encounter.since_last_with_state() {
            input.observe(entry, snapshot);
        }
    }
    Ok(encounter.into_report())
}
