use std::fmt;

use serde::Serialize;

use crate::combat::encounter::{EncounterResult, EncounterSnapshot};
use crate::combatant::HpChange;

/// One resolved sub-effect of a combat turn.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum LogEntry {
    Hit {
        actor: String,
        target: String,
        damage: i32,
        critical: bool,
        hp: HpChange,
    },
    Miss {
        actor: String,
        target: String,
    },
    Heal {
        actor: String,
        amount: i32,
        hp: HpChange,
    },
    Defeated {
        name: String,
    },
    Outcome {
        result: EncounterResult,
    },
}

impl fmt::Display for LogEntry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogEntry::Hit { actor, target, damage, critical, hp } => write!(
                f,
                "[{}][{}] → {} -{} ({} → {})",
                if *critical { "CRIT" } else { "HIT" },
                actor,
                target,
                damage,
                hp.before,
                hp.after
            ),
            LogEntry::Miss { actor, target } => {
                write!(f, "[MISS][{}] → {} misses", actor, target)
            }
            LogEntry::Heal { actor, amount, hp } => {
                write!(f, "[HEAL][{}] +{} ({} → {})", actor, amount, hp.before, hp.after)
            }
            LogEntry::Defeated { name } => write!(f, "[DOWN][{}] is defeated", name),
            LogEntry::Outcome { result } => write!(f, "[END] {}", result),
        }
    }
}

/// Append-only record of narrated effects. The engine only ever writes to it.
///
/// Each entry is paired with the hero and enemy state right after that entry's
/// effect was applied.
#[derive(Debug, Clone, Default)]
pub struct OutcomeLog {
    entries: Vec<LogEntry>,
    snapshots: Vec<EncounterSnapshot>,
    cursor: usize,
}

impl OutcomeLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push(&mut self, entry: LogEntry, snapshot: EncounterSnapshot) {
        self.entries.push(entry);
        self.snapshots.push(snapshot);
    }

    /// Every entry recorded so far, in chronological order.
    pub fn entries(&self) -> &[LogEntry] {
        &self.entries
    }

    /// State after each entry, index-aligned with `entries`.
    pub fn snapshots(&self) -> &[EncounterSnapshot] {
        &self.snapshots
    }

    /// Entries appended since the previous call.
    pub fn since_last(&mut self) -> &[LogEntry] {
        let start = self.cursor;
        self.cursor = self.entries.len();
        &self.entries[start..]
    }

    /// Like `since_last`, with each entry's snapshot alongside. Shares the cursor.
    pub fn since_last_with_state(
        &mut self,
    ) -> impl Iterator<Item = (&LogEntry, &EncounterSnapshot)> {
        let start = self.cursor;
        self.cursor = self.entries.len();
        self.entries[start..].iter().zip(&self.snapshots[start..])
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn into_entries(self) -> Vec<LogEntry> {
        self.entries
    }
}
