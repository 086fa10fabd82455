use std::path::Path;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::combatant::Combatant;
use crate::interlude::ShopItem;

#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("unknown wave '{0}'")]
    UnknownWave(String),
    #[error("unknown shop '{0}'")]
    UnknownShop(String),
    #[error("invalid content: {0}")]
    Invalid(String),
    #[error("malformed JSON: {0}")]
    Json(#[from] serde_json::Error),
    #[error("malformed YAML: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ContentFormat {
    Json,
    Yaml,
}

impl ContentFormat {
    /// `.yaml`/`.yml` files are YAML; everything else is read as JSON.
    pub fn from_path(path: &Path) -> Self {
        match path.extension().and_then(|e| e.to_str()) {
            Some(ext) if ext.eq_ignore_ascii_case("yaml") || ext.eq_ignore_ascii_case("yml") => {
                ContentFormat::Yaml
            }
            _ => ContentFormat::Json,
        }
    }

    pub fn parse<T: serde::de::DeserializeOwned>(self, text: &str) -> Result<T, ContentError> {
        Ok(match self {
            ContentFormat::Json => serde_json::from_str(text)?,
            ContentFormat::Yaml => serde_yaml::from_str(text)?,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EnemyData {
    pub name: String,
    pub hp: i32,
    pub attack: i32,
    #[serde(default)]
    pub defense: i32,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WaveData {
    pub name: String,
    pub enemies: Vec<EnemyData>,
}

impl WaveData {
    /// Fresh enemies for one encounter, in wave order.
    pub fn spawn(&self) -> Vec<Combatant> {
        self.enemies
            .iter()
            .map(|e| Combatant::new(e.name.clone(), e.hp, e.attack, e.defense))
            .collect()
    }

    fn validate(self) -> Result<Self, ContentError> {
        if self.enemies.is_empty() {
            return Err(ContentError::Invalid(format!("wave '{}' has no enemies", self.name)));
        }
        if let Some(bad) = self.enemies.iter().find(|e| e.hp <= 0) {
            return Err(ContentError::Invalid(format!("enemy '{}' must have hp > 0", bad.name)));
        }
        Ok(self)
    }
}

pub fn builtin_waves() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([
        ("first_wave", include_str!("../content/waves/first_wave.json")),
        ("dragon", include_str!("../content/waves/dragon.json")),
    ])
}

pub fn builtin_shops() -> IndexMap<&'static str, &'static str> {
    IndexMap::from([("basic", include_str!("../content/shops/basic.json"))])
}

pub fn parse_wave(text: &str, format: ContentFormat) -> Result<WaveData, ContentError> {
    format.parse::<WaveData>(text)?.validate()
}

pub fn parse_shop(text: &str, format: ContentFormat) -> Result<Vec<ShopItem>, ContentError> {
    let items: Vec<ShopItem> = format.parse(text)?;
    if items.len() < 2 {
        return Err(ContentError::Invalid("a shop needs at least two items".into()));
    }
    if let Some(bad) = items.iter().find(|i| i.cost < 0) {
        return Err(ContentError::Invalid(format!("item '{}' has a negative cost", bad.name)));
    }
    Ok(items)
}

pub fn builtin_wave(id: &str) -> Result<WaveData, ContentError> {
    let text = builtin_waves()
        .get(id)
        .copied()
        .ok_or_else(|| ContentError::UnknownWave(id.to_string()))?;
    parse_wave(text, ContentFormat::Json)
}

pub fn builtin_shop(id: &str) -> Result<Vec<ShopItem>, ContentError> {
    let text = builtin_shops()
        .get(id)
        .copied()
        .ok_or_else(|| ContentError::UnknownShop(id.to_string()))?;
    parse_shop(text, ContentFormat::Json)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::interlude::Bonus;

    #[test]
    fn builtin_waves_parse_in_order() {
        let ids: Vec<_> = builtin_waves().keys().copied().collect();
        assert_eq!(ids, ["first_wave", "dragon"]);
        let first = builtin_wave("first_wave").unwrap();
        assert_eq!(first.enemies.len(), 2);
        assert_eq!(first.enemies[0].name, "Weak Goblin");
    }

    #[test]
    fn builtin_shop_has_three_items() {
        let items = builtin_shop("basic").unwrap();
        assert_eq!(items.len(), 3);
        assert_eq!(items[2].bonus, Bonus::MaxHp(10));
    }

    #[test]
    fn yaml_wave_parses() {
        let text = "name: pair\nenemies:\n  - { name: Rat, hp: 5, attack: 2 }\n";
        let wave = parse_wave(text, ContentFormat::Yaml).unwrap();
        assert_eq!(wave.enemies[0].defense, 0);
    }

    #[test]
    fn empty_wave_is_rejected() {
        let err = parse_wave(r#"{"name":"none","enemies":[]}"#, ContentFormat::Json).unwrap_err();
        assert!(matches!(err, ContentError::Invalid(_)));
        assert!(matches!(builtin_wave("kraken"), Err(ContentError::UnknownWave(_))));
    }
}
