use crate::creature::CreatureInstance;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;

pub const MAX_ROSTER: usize = 6;

/// The four things a participant can do with its turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ActionKind {
    Fight,
    Switch,
    Item,
    Run,
}

impl fmt::Display for ActionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ActionKind::Fight => write!(f, "fight"),
            ActionKind::Switch => write!(f, "switch"),
            ActionKind::Item => write!(f, "use an item"),
            ActionKind::Run => write!(f, "run"),
        }
    }
}

/// One submitted action for one side of a battle turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TrainerAction {
    /// Use the move in the given slot (0-3) of the active creature.
    Fight { move_index: usize },
    /// Bring out the roster member at the given index (0-5).
    Switch { roster_index: usize },
    /// Use a cataloged item: a capture ball or medicine.
    UseItem { item: String },
    /// Attempt to flee a wild encounter.
    Run,
}

impl TrainerAction {
    pub fn kind(&self) -> ActionKind {
        match self {
            TrainerAction::Fight { .. } => ActionKind::Fight,
            TrainerAction::Switch { .. } => ActionKind::Switch,
            TrainerAction::UseItem { .. } => ActionKind::Item,
            TrainerAction::Run => ActionKind::Run,
        }
    }
}

/// Whether a side is a trainer with a full action set or a lone wild
/// creature, which can only attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParticipantKind {
    Trainer,
    Wild,
}

/// Which species a participant has encountered and which it has captured.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompendiumRecord {
    seen: BTreeSet<String>,
    caught: BTreeSet<String>,
}

impl CompendiumRecord {
    pub fn mark_seen(&mut self, species_key: &str) {
        self.seen.insert(species_key.to_uppercase());
    }

    /// Capturing implies having seen.
    pub fn mark_caught(&mut self, species_key: &str) {
        let key = species_key.to_uppercase();
        self.seen.insert(key.clone());
        self.caught.insert(key);
    }

    pub fn has_seen(&self, species_key: &str) -> bool {
        self.seen.contains(&species_key.to_uppercase())
    }

    pub fn has_caught(&self, species_key: &str) -> bool {
        self.caught.contains(&species_key.to_uppercase())
    }

    pub fn seen_count(&self) -> usize {
        self.seen.len()
    }

    pub fn caught_count(&self) -> usize {
        self.caught.len()
    }
}

/// Where a captured creature ended up.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CaptureDestination {
    Roster,
    Storage,
}

/// One side of a battle: a trainer with a roster, or a wild creature
/// wrapped in the same shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Participant {
    pub id: String,
    pub name: String,
    pub kind: ParticipantKind,
    pub roster: Vec<CreatureInstance>,
    pub active_index: usize,
    /// Overflow destination for captures made with a full roster.
    pub storage: Vec<CreatureInstance>,
    pub record: CompendiumRecord,
}

impl Participant {
    pub fn new(id: &str, name: &str, kind: ParticipantKind, roster: Vec<CreatureInstance>) -> Self {
        Participant {
            id: id.to_string(),
            name: name.to_string(),
            kind,
            roster,
            active_index: 0,
            storage: Vec::new(),
            record: CompendiumRecord::default(),
        }
    }

    /// Wrap a single wild creature as a battle side.
    pub fn wild(creature: CreatureInstance) -> Self {
        let name = format!("wild {}", creature.display_name());
        Participant::new("wild", &name, ParticipantKind::Wild, vec![creature])
    }

    pub fn active(&self) -> Option<&CreatureInstance> {
        self.roster.get(self.active_index)
    }

    pub fn active_mut(&mut self) -> Option<&mut CreatureInstance> {
        self.roster.get_mut(self.active_index)
    }

    pub fn has_able_creature(&self) -> bool {
        self.roster.iter().any(|c| !c.is_fainted())
    }

    /// The action kinds this side may submit right now. A side that lost its
    /// active creature last turn must switch; a wild creature only fights.
    pub fn permitted_actions(&self, must_replace: bool) -> Vec<ActionKind> {
        if must_replace {
            return vec![ActionKind::Switch];
        }
        match self.kind {
            ParticipantKind::Wild => vec![ActionKind::Fight],
            ParticipantKind::Trainer => vec![
                ActionKind::Fight,
                ActionKind::Switch,
                ActionKind::Item,
                ActionKind::Run,
            ],
        }
    }

    pub fn switch_to(&mut self, roster_index: usize) {
        if roster_index < self.roster.len() {
            self.active_index = roster_index;
        }
    }

    /// Place a captured creature, preferring the roster while it has room.
    pub fn add_capture(&mut self, creature: CreatureInstance) -> CaptureDestination {
        self.record.mark_caught(&creature.species);
        if self.roster.len() < MAX_ROSTER {
            self.roster.push(creature);
            CaptureDestination::Roster
        } else {
            self.storage.push(creature);
            CaptureDestination::Storage
        }
    }
}
