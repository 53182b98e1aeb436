//! Element catalog: immutable per-element chemistry data.
//!
//! Loaded once from JSON (an embedded default ships with the crate) and shared
//! by reference with every atom of that element.

use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::Arc;

use crate::api::error::{Error, Result};

/// Embed the default element catalog at compile time.
const ELEMENTS_JSON: &str = include_str!("../../data/elements.json");

/// Immutable chemistry data for a single element.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ElementSpec {
    pub atomic_number: u32,
    pub symbol: String,
    pub name: String,
    /// Pauling electronegativity. Zero for elements without a defined value.
    pub electronegativity: f32,
    pub is_metal: bool,
    /// Atomic radius in picometers; one picometer maps to one world unit.
    pub atomic_radius: f32,
    pub atomic_weight: f32,
    /// Ascending, deduplicated. Empty means the element never bonds.
    #[serde(default)]
    pub valences: Vec<u8>,
}

impl ElementSpec {
    /// Bond capacity: the largest valence, or 0 for non-bonding elements.
    pub fn max_bonds(&self) -> usize {
        self.valences.last().map_or(0, |&v| v as usize)
    }

    /// Whether atoms of this element can take part in bonds at all.
    pub fn can_bond(&self) -> bool {
        self.max_bonds() > 0
    }

    /// Inertial mass used by the integrator.
    pub fn mass(&self) -> f32 {
        self.atomic_radius / 100.0
    }

    /// On-screen radius; also the wall offset for boundary reflection.
    pub fn visual_radius(&self) -> f32 {
        self.atomic_radius / 10.0
    }

    fn normalize(&mut self) {
        self.valences.sort_unstable();
        self.valences.dedup();
    }

    fn validate(&self) -> Result<()> {
        if self.symbol.is_empty() {
            return Err(Error::invalid_element(&self.symbol, "empty symbol"));
        }
        if !self.electronegativity.is_finite() || self.electronegativity < 0.0 {
            return Err(Error::invalid_element(
                &self.symbol,
                format!("electronegativity {} must be >= 0", self.electronegativity),
            ));
        }
        if !self.atomic_radius.is_finite() || self.atomic_radius <= 0.0 {
            return Err(Error::invalid_element(
                &self.symbol,
                format!("atomic radius {} must be > 0", self.atomic_radius),
            ));
        }
        Ok(())
    }
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct ElementsJson {
    elements: Vec<ElementSpec>,
}

/// Element catalog with O(1) lookup by symbol.
#[derive(Debug, Clone)]
pub struct ElementCatalog {
    /// Sorted by atomic number.
    elements: Vec<Arc<ElementSpec>>,
    by_symbol: HashMap<String, usize>,
}

impl ElementCatalog {
    /// Load the embedded default catalog.
    pub fn load() -> Result<Self> {
        Self::from_json(ELEMENTS_JSON)
    }

    /// Parse a catalog from a JSON string of the form `{"elements": [...]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let raw: ElementsJson = serde_json::from_str(json)?;
        Self::from_specs(raw.elements)
    }

    /// Build a catalog from already-constructed records.
    pub fn from_specs(specs: Vec<ElementSpec>) -> Result<Self> {
        let mut specs = specs;
        for spec in specs.iter_mut() {
            spec.normalize();
            spec.validate()?;
        }
        specs.sort_by_key(|s| s.atomic_number);

        let mut by_symbol = HashMap::with_capacity(specs.len());
        for (idx, spec) in specs.iter().enumerate() {
            if by_symbol.insert(spec.symbol.clone(), idx).is_some() {
                return Err(Error::DuplicateElement(spec.symbol.clone()));
            }
        }

        Ok(Self {
            elements: specs.into_iter().map(Arc::new).collect(),
            by_symbol,
        })
    }

    /// Get element by symbol.
    pub fn get(&self, symbol: &str) -> Option<&Arc<ElementSpec>> {
        self.by_symbol.get(symbol).map(|&idx| &self.elements[idx])
    }

    /// Get element by atomic number.
    pub fn get_by_number(&self, atomic_number: u32) -> Option<&Arc<ElementSpec>> {
        self.elements
            .binary_search_by_key(&atomic_number, |s| s.atomic_number)
            .ok()
            .map(|idx| &self.elements[idx])
    }

    /// Iterate in atomic-number order.
    pub fn iter(&self) -> impl Iterator<Item = &Arc<ElementSpec>> {
        self.elements.iter()
    }

    pub fn contains(&self, symbol: &str) -> bool {
        self.by_symbol.contains_key(symbol)
    }

    pub fn len(&self) -> usize {
        self.elements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.elements.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn load_default_catalog() {
        let catalog = ElementCatalog::load().expect("embedded catalog should parse");
        assert!(catalog.len() >= 20);
        let numbers: Vec<u32> = catalog.iter().map(|e| e.atomic_number).collect();
        let mut sorted = numbers.clone();
        sorted.sort_unstable();
        assert_eq!(numbers, sorted);
    }

    #[test]
    fn hydrogen_properties() {
        let catalog = ElementCatalog::load().unwrap();
        let h = catalog.get("H").expect("Hydrogen should exist");
        assert_eq!(h.atomic_number, 1);
        assert_eq!(h.name, "Hydrogen");
        assert_eq!(h.valences, vec![1]);
        assert_eq!(h.max_bonds(), 1);
        assert!((h.mass() - 0.53).abs() < 1e-6);
        assert!((h.visual_radius() - 5.3).abs() < 1e-6);
    }

    #[test]
    fn noble_gases_cannot_bond() {
        let catalog = ElementCatalog::load().unwrap();
        for symbol in ["He", "Ne", "Ar"] {
            let e = catalog.get(symbol).unwrap();
            assert!(e.valences.is_empty());
            assert_eq!(e.max_bonds(), 0);
            assert!(!e.can_bond());
        }
    }

    #[test]
    fn capacity_is_largest_valence() {
        let catalog = ElementCatalog::load().unwrap();
        assert_eq!(catalog.get("C").unwrap().max_bonds(), 4);
        assert_eq!(catalog.get("O").unwrap().max_bonds(), 2);
        assert_eq!(catalog.get("Cl").unwrap().max_bonds(), 7);
    }

    #[test]
    fn lookup_by_number() {
        let catalog = ElementCatalog::load().unwrap();
        let fe = catalog.get_by_number(26).expect("Iron should exist");
        assert_eq!(fe.symbol, "Fe");
        assert!(fe.is_metal);
        assert!(catalog.get_by_number(200).is_none());
    }

    #[test]
    fn valences_are_normalized() {
        let json = r#"{"elements": [
            {"atomicNumber": 6, "symbol": "C", "name": "Carbon", "electronegativity": 2.55,
             "isMetal": false, "atomicRadius": 67, "atomicWeight": 12.011, "valences": [4, 2, 4]}
        ]}"#;
        let catalog = ElementCatalog::from_json(json).unwrap();
        assert_eq!(catalog.get("C").unwrap().valences, vec![2, 4]);
    }

    #[test]
    fn missing_valences_means_inert() {
        let json = r#"{"elements": [
            {"atomicNumber": 2, "symbol": "He", "name": "Helium", "electronegativity": 0,
             "isMetal": false, "atomicRadius": 31, "atomicWeight": 4.0}
        ]}"#;
        let catalog = ElementCatalog::from_json(json).unwrap();
        assert!(!catalog.get("He").unwrap().can_bond());
    }

    #[test]
    fn rejects_negative_electronegativity() {
        let json = r#"{"elements": [
            {"atomicNumber": 1, "symbol": "H", "name": "Hydrogen", "electronegativity": -1,
             "isMetal": false, "atomicRadius": 53, "atomicWeight": 1.0, "valences": [1]}
        ]}"#;
        let err = ElementCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, Error::InvalidElement { .. }));
    }

    #[test]
    fn rejects_duplicate_symbols() {
        let json = r#"{"elements": [
            {"atomicNumber": 1, "symbol": "H", "name": "Hydrogen", "electronegativity": 2.2,
             "isMetal": false, "atomicRadius": 53, "atomicWeight": 1.0, "valences": [1]},
            {"atomicNumber": 2, "symbol": "H", "name": "Fake", "electronegativity": 2.2,
             "isMetal": false, "atomicRadius": 53, "atomicWeight": 1.0, "valences": [1]}
        ]}"#;
        let err = ElementCatalog::from_json(json).unwrap_err();
        assert!(matches!(err, Error::DuplicateElement(ref s) if s == "H"));
    }
}
