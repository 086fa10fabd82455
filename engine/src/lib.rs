use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

pub mod api;
pub mod class;
pub mod combat;
pub mod combatant;
pub mod content;
pub mod interlude;
pub mod logging;

pub use class::{ClassTraits, HeroClass};
pub use combat::actions::{ActionOutcome, HeroAction};
pub use combat::encounter::{
    run_encounter, Encounter, EncounterError, EncounterReport, EncounterResult, EncounterSnapshot,
    EncounterState, ScriptedActions, TurnInput,
};
pub use combat::log::{LogEntry, OutcomeLog};
pub use combatant::{Combatant, CombatantSnapshot, Hero, HpChange};

enum Source {
    Seeded(ChaCha8Rng),
    Scripted { rolls: Vec<f64>, next: usize },
}

/// Injectable source of uniform draws in `[0, 1)`.
pub struct Dice {
    source: Source,
}

impl Dice {
    pub fn from_seed(seed: u64) -> Self {
        Self { source: Source::Seeded(ChaCha8Rng::seed_from_u64(seed)) }
    }

    /// Replays `rolls` in order, cycling when exhausted. An empty script always yields 0.0.
    pub fn from_scripted(rolls: Vec<f64>) -> Self {
        Self { source: Source::Scripted { rolls, next: 0 } }
    }

    pub fn roll(&mut self) -> f64 {
        match &mut self.source {
            Source::Seeded(rng) => rng.gen_range(0.0..1.0),
            Source::Scripted { rolls, next } => {
                if rolls.is_empty() {
                    return 0.0;
                }
                let value = rolls[*next % rolls.len()];
                *next += 1;
                value.clamp(0.0, 1.0 - f64::EPSILON)
            }
        }
    }

    /// True with probability `p`.
    pub fn chance(&mut self, p: f64) -> bool {
        self.roll() < p
    }

    /// Uniform index in `0..len`; `len == 0` yields 0.
    pub fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        let idx = (self.roll() * len as f64) as usize;
        idx.min(len - 1)
    }
}
