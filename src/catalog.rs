use crate::errors::{PreconditionError, PreconditionResult};
use schema::{ItemData, MoveData, SpeciesDefinition};
use std::collections::HashMap;
use std::fs;
use std::path::Path;
use tracing::{debug, warn};

/// Read-only species lookup, keyed by uppercase species name.
///
/// Catalogs are constructed once and passed by reference into every
/// component that needs lookups; nothing in the engine holds global state.
#[derive(Debug, Clone, Default)]
pub struct SpeciesCatalog {
    map: HashMap<String, SpeciesDefinition>,
}

impl SpeciesCatalog {
    pub fn from_definitions(definitions: impl IntoIterator<Item = SpeciesDefinition>) -> Self {
        let map = definitions
            .into_iter()
            .map(|def| (def.name.to_uppercase(), def))
            .collect();
        Self { map }
    }

    /// Load every `.ron` species file in a directory. Files that fail to
    /// parse are incomplete reference data, not a caller error: they are
    /// skipped with a warning rather than failing the load.
    pub fn load_dir(dir: &Path) -> PreconditionResult<Self> {
        let entries = fs::read_dir(dir).map_err(|e| {
            PreconditionError::MalformedData(format!("cannot read {}: {}", dir.display(), e))
        })?;

        let mut definitions = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| PreconditionError::MalformedData(e.to_string()))?;
            let path = entry.path();
            if path.extension().and_then(|s| s.to_str()) != Some("ron") {
                continue;
            }
            let content = fs::read_to_string(&path)
                .map_err(|e| PreconditionError::MalformedData(e.to_string()))?;
            match ron::from_str::<SpeciesDefinition>(&content) {
                Ok(def) => definitions.push(def),
                Err(e) => {
                    warn!(file = %path.display(), error = %e, "skipping unparsable species file");
                }
            }
        }
        debug!(count = definitions.len(), "loaded species catalog");
        Ok(Self::from_definitions(definitions))
    }

    pub fn get(&self, key: &str) -> PreconditionResult<&SpeciesDefinition> {
        self.map
            .get(&key.to_uppercase())
            .ok_or_else(|| PreconditionError::SpeciesNotFound(key.to_string()))
    }

    pub fn contains(&self, key: &str) -> bool {
        self.map.contains_key(&key.to_uppercase())
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Read-only move lookup, keyed by exact move name.
#[derive(Debug, Clone, Default)]
pub struct MoveCatalog {
    map: HashMap<String, MoveData>,
}

impl MoveCatalog {
    pub fn from_moves(moves: impl IntoIterator<Item = MoveData>) -> Self {
        let map = moves
            .into_iter()
            .map(|data| (data.name.clone(), data))
            .collect();
        Self { map }
    }

    pub fn from_ron_str(content: &str) -> PreconditionResult<Self> {
        let moves: Vec<MoveData> = ron::from_str(content)
            .map_err(|e| PreconditionError::MalformedData(format!("move catalog: {}", e)))?;
        debug!(count = moves.len(), "loaded move catalog");
        Ok(Self::from_moves(moves))
    }

    pub fn load(path: &Path) -> PreconditionResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PreconditionError::MalformedData(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    pub fn get(&self, name: &str) -> PreconditionResult<&MoveData> {
        self.map
            .get(name)
            .ok_or_else(|| PreconditionError::MoveNotFound(name.to_string()))
    }

    /// Max uses for a move, with a conservative fallback when the catalog
    /// has no record. Used when reconstructing instances from snapshots.
    pub fn max_uses_or_default(&self, name: &str) -> u8 {
        match self.map.get(name) {
            Some(data) => data.max_uses,
            None => {
                warn!(move_name = name, "no catalog entry for move, defaulting max uses");
                30
            }
        }
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

/// Read-only item lookup, keyed by exact item name.
#[derive(Debug, Clone, Default)]
pub struct ItemCatalog {
    map: HashMap<String, ItemData>,
}

impl ItemCatalog {
    pub fn from_items(items: impl IntoIterator<Item = ItemData>) -> Self {
        let map = items
            .into_iter()
            .map(|data| (data.name.clone(), data))
            .collect();
        Self { map }
    }

    pub fn from_ron_str(content: &str) -> PreconditionResult<Self> {
        let items: Vec<ItemData> = ron::from_str(content)
            .map_err(|e| PreconditionError::MalformedData(format!("item catalog: {}", e)))?;
        Ok(Self::from_items(items))
    }

    pub fn load(path: &Path) -> PreconditionResult<Self> {
        let content = fs::read_to_string(path)
            .map_err(|e| PreconditionError::MalformedData(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    pub fn get(&self, name: &str) -> PreconditionResult<&ItemData> {
        self.map
            .get(name)
            .ok_or_else(|| PreconditionError::ItemNotFound(name.to_string()))
    }
}

/// The full bundle of reference data the engine reads. Owned by the caller,
/// passed by shared reference into stat derivation, battle resolution, and
/// encounter generation.
#[derive(Debug, Clone, Default)]
pub struct GameData {
    pub species: SpeciesCatalog,
    pub moves: MoveCatalog,
    pub items: ItemCatalog,
}

impl GameData {
    pub fn new(species: SpeciesCatalog, moves: MoveCatalog, items: ItemCatalog) -> Self {
        Self {
            species,
            moves,
            items,
        }
    }

    /// Load the standard layout: `<root>/species/*.ron`, `<root>/moves.ron`,
    /// `<root>/items.ron`.
    pub fn load_from_dir(root: &Path) -> PreconditionResult<Self> {
        Ok(Self {
            species: SpeciesCatalog::load_dir(&root.join("species"))?,
            moves: MoveCatalog::load(&root.join("moves.ron"))?,
            items: ItemCatalog::load(&root.join("items.ron"))?,
        })
    }
}
