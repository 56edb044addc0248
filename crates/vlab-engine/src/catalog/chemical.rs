//! Chemical reference data and registry.
//!
//! Loads the reagent set from embedded JSON. Reference data is immutable
//! after load; the reaction controller only ever stores canonical ids from
//! this catalog.

use serde::Deserialize;
use std::collections::HashMap;

use crate::color::Rgb;

/// Embed the chemical data at compile time.
const CHEMICALS_JSON: &str = include_str!("data/chemicals.json");

fn default_pour_ms() -> f64 {
    1500.0
}

/// Physical state of a reagent as stocked on the bench.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PhysicalState {
    Liquid,
    Solid,
}

/// One reagent: immutable reference data, created at catalog load.
#[derive(Debug, Clone, Deserialize)]
pub struct Chemical {
    /// Canonical id, e.g. "kmno4". Unique within the catalog.
    pub id: String,
    pub name: String,
    pub formula: String,
    pub state: PhysicalState,
    /// Base liquid/solid color.
    pub color: Rgb,
    /// Fraction of vessel capacity one addition contributes.
    #[serde(default)]
    pub volume: f32,
    /// Pour animation duration in milliseconds.
    #[serde(default = "default_pour_ms")]
    pub pour_ms: f64,
    /// Legacy ids from older experiment data that map to this chemical.
    #[serde(default)]
    pub aliases: Vec<String>,
}

#[derive(Debug, Deserialize)]
struct CatalogJson {
    chemicals: Vec<Chemical>,
}

/// Chemical registry with O(1) lookup by canonical id or alias.
pub struct ChemicalCatalog {
    chemicals: HashMap<String, Chemical>,
    /// alias id -> canonical id
    aliases: HashMap<String, String>,
}

impl ChemicalCatalog {
    /// Load the registry from embedded JSON.
    pub fn load() -> Result<Self, serde_json::Error> {
        Self::from_json(CHEMICALS_JSON)
    }

    /// Parse a registry from a JSON string.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        let raw: CatalogJson = serde_json::from_str(json)?;
        let mut chemicals = HashMap::new();
        let mut aliases = HashMap::new();

        for chem in raw.chemicals {
            for alias in &chem.aliases {
                aliases.insert(alias.clone(), chem.id.clone());
            }
            chemicals.insert(chem.id.clone(), chem);
        }

        Ok(Self { chemicals, aliases })
    }

    /// Resolve an id (canonical or alias) to its canonical form.
    pub fn canonical_id<'a>(&'a self, id: &'a str) -> Option<&'a str> {
        if self.chemicals.contains_key(id) {
            Some(id)
        } else {
            self.aliases.get(id).map(String::as_str)
        }
    }

    /// Get a chemical by canonical id or alias.
    pub fn get(&self, id: &str) -> Option<&Chemical> {
        self.canonical_id(id).and_then(|c| self.chemicals.get(c))
    }

    /// Iterate over all chemicals.
    pub fn iter(&self) -> impl Iterator<Item = &Chemical> {
        self.chemicals.values()
    }

    pub fn len(&self) -> usize {
        self.chemicals.len()
    }

    pub fn is_empty(&self) -> bool {
        self.chemicals.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_catalog() {
        let catalog = ChemicalCatalog::load().expect("failed to load chemical catalog");
        assert!(catalog.len() >= 11);
    }

    #[test]
    fn permanganate_properties() {
        let catalog = ChemicalCatalog::load().unwrap();
        let kmno4 = catalog.get("kmno4").expect("kmno4 should exist");
        assert_eq!(kmno4.name, "Potassium Permanganate");
        assert_eq!(kmno4.state, PhysicalState::Liquid);
        // Deep purple #800080
        assert!((kmno4.color.r - 128.0 / 255.0).abs() < 0.01);
        assert_eq!(kmno4.color.g, 0.0);
    }

    #[test]
    fn alias_resolves_to_canonical_id() {
        let catalog = ChemicalCatalog::load().unwrap();
        assert_eq!(catalog.canonical_id("silver-nitrate"), Some("agno3"));
        assert_eq!(catalog.canonical_id("sodium-chloride"), Some("nacl"));
        let via_alias = catalog.get("silver-nitrate").unwrap();
        assert_eq!(via_alias.id, "agno3");
    }

    #[test]
    fn unknown_id_is_none() {
        let catalog = ChemicalCatalog::load().unwrap();
        assert!(catalog.canonical_id("unobtanium").is_none());
        assert!(catalog.get("unobtanium").is_none());
    }

    #[test]
    fn zinc_is_solid() {
        let catalog = ChemicalCatalog::load().unwrap();
        let zn = catalog.get("zn").unwrap();
        assert_eq!(zn.state, PhysicalState::Solid);
    }
}
