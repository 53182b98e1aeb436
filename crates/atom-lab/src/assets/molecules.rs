//! Target-molecule catalog and chemical formula helpers.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::api::error::{Error, Result};
use crate::assets::elements::ElementCatalog;
use crate::core::rng::RandomSource;

/// Embed the default molecule catalog at compile time.
const MOLECULES_JSON: &str = include_str!("../../data/molecules.json");

/// Element symbol → atom count.
pub type Composition = BTreeMap<String, usize>;

/// A molecule the guided mode can ask the user to assemble.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TargetMolecule {
    pub name: String,
    pub formula: String,
    /// Derived from `formula` when absent from the source record.
    #[serde(default)]
    pub composition: Composition,
}

impl TargetMolecule {
    /// Build a target whose composition is parsed from its formula.
    pub fn from_formula(name: impl Into<String>, formula: &str) -> Result<Self> {
        Ok(Self {
            name: name.into(),
            formula: formula.to_string(),
            composition: parse_formula(formula)?,
        })
    }

    /// Required count for `symbol`. Symbols outside the composition require zero.
    pub fn required(&self, symbol: &str) -> usize {
        self.composition.get(symbol).copied().unwrap_or(0)
    }

    /// Total number of atoms in one molecule.
    pub fn atom_count(&self) -> usize {
        self.composition.values().sum()
    }
}

/// Root structure for the JSON file.
#[derive(Debug, Deserialize)]
struct MoleculesJson {
    molecules: Vec<TargetMolecule>,
}

/// Read-only list of target molecules.
#[derive(Debug, Clone, Default)]
pub struct MoleculeCatalog {
    molecules: Vec<TargetMolecule>,
}

impl MoleculeCatalog {
    /// Load the embedded default catalog, checking symbols against `elements`.
    pub fn load(elements: &ElementCatalog) -> Result<Self> {
        Self::from_json(MOLECULES_JSON, elements)
    }

    /// Parse a catalog from a JSON string of the form `{"molecules": [...]}`.
    pub fn from_json(json: &str, elements: &ElementCatalog) -> Result<Self> {
        let raw: MoleculesJson = serde_json::from_str(json)?;
        Self::from_molecules(raw.molecules, elements)
    }

    /// Build a catalog from records, filling missing compositions from formulas.
    pub fn from_molecules(molecules: Vec<TargetMolecule>, elements: &ElementCatalog) -> Result<Self> {
        let mut molecules = molecules;
        for molecule in molecules.iter_mut() {
            if molecule.composition.is_empty() {
                molecule.composition = parse_formula(&molecule.formula)?;
            }
            molecule.composition.retain(|_, count| *count > 0);
            if let Some(symbol) = molecule.composition.keys().find(|s| !elements.contains(s)) {
                return Err(Error::UnknownElement {
                    molecule: molecule.name.clone(),
                    symbol: symbol.clone(),
                });
            }
        }
        Ok(Self { molecules })
    }

    /// Get a target by exact name.
    pub fn get(&self, name: &str) -> Option<&TargetMolecule> {
        self.molecules.iter().find(|m| m.name == name)
    }

    /// First target whose composition equals `composition` exactly.
    pub fn find_by_composition(&self, composition: &Composition) -> Option<&TargetMolecule> {
        self.molecules.iter().find(|m| &m.composition == composition)
    }

    /// Draw a uniformly random target.
    pub fn pick(&self, rng: &mut dyn RandomSource) -> Option<&TargetMolecule> {
        if self.molecules.is_empty() {
            return None;
        }
        let idx = rng.next_int(self.molecules.len() as u32) as usize;
        self.molecules.get(idx)
    }

    pub fn iter(&self) -> impl Iterator<Item = &TargetMolecule> {
        self.molecules.iter()
    }

    pub fn len(&self) -> usize {
        self.molecules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.molecules.is_empty()
    }
}

/// Parse a flat formula such as `H2O` or `CH3OH` into a composition.
///
/// Repeated symbols accumulate. Groups in parentheses are not supported.
pub fn parse_formula(formula: &str) -> Result<Composition> {
    let mut composition = Composition::new();
    let mut chars = formula.chars().peekable();

    while let Some(c) = chars.next() {
        if !c.is_ascii_uppercase() {
            return Err(Error::invalid_formula(formula, format!("unexpected '{}'", c)));
        }
        let mut symbol = c.to_string();
        while let Some(&next) = chars.peek() {
            if !next.is_ascii_lowercase() {
                break;
            }
            symbol.push(next);
            chars.next();
        }

        let mut digits = String::new();
        while let Some(&next) = chars.peek() {
            if !next.is_ascii_digit() {
                break;
            }
            digits.push(next);
            chars.next();
        }
        let count = if digits.is_empty() {
            1
        } else {
            digits
                .parse::<usize>()
                .map_err(|e| Error::invalid_formula(formula, e.to_string()))?
        };
        if count == 0 {
            return Err(Error::invalid_formula(formula, format!("zero count for {}", symbol)));
        }

        *composition.entry(symbol).or_insert(0) += count;
    }

    if composition.is_empty() {
        return Err(Error::invalid_formula(formula, "empty formula"));
    }
    Ok(composition)
}

/// Render a composition in Hill order: C, then H, then the rest alphabetically.
/// Without carbon every symbol is alphabetical.
pub fn hill_formula(composition: &Composition) -> String {
    fn push(out: &mut String, symbol: &str, count: usize) {
        out.push_str(symbol);
        if count > 1 {
            out.push_str(&count.to_string());
        }
    }

    let mut out = String::new();
    let has_carbon = composition.get("C").is_some_and(|&n| n > 0);
    if has_carbon {
        push(&mut out, "C", composition["C"]);
        if let Some(&h) = composition.get("H") {
            push(&mut out, "H", h);
        }
    }
    // BTreeMap iteration is already alphabetical.
    for (symbol, &count) in composition {
        if count == 0 || (has_carbon && (symbol == "C" || symbol == "H")) {
            continue;
        }
        push(&mut out, symbol, count);
    }
    out
}
