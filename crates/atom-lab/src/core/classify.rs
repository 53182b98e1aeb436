//! Pure chemistry classification: bond kind and element category.
//!
//! No simulation or rendering dependencies.

use serde::Serialize;

use crate::assets::elements::ElementSpec;

/// Electronegativity difference above which a bond is ionic.
pub const IONIC_THRESHOLD: f32 = 1.7;
/// Electronegativity difference above which a covalent bond is polar.
pub const POLAR_THRESHOLD: f32 = 0.4;

/// Symbols treated as semimetals regardless of their `is_metal` flag.
pub const METALLOIDS: &[&str] = &["B", "Si", "Ge", "As", "Sb", "Te", "Po"];

/// Predicted bond character between two elements.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum BondKind {
    Metallic,
    Ionic,
    PolarCovalent,
    NonpolarCovalent,
}

/// Coarse element family, used by renderers for coloring.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum ElementCategory {
    Metal,
    Semimetal,
    Nonmetal,
}

/// Absolute electronegativity difference between two elements.
pub fn electronegativity_delta(a: &ElementSpec, b: &ElementSpec) -> f32 {
    (a.electronegativity - b.electronegativity).abs()
}

/// Classify the bond two elements would form.
///
/// Rules apply in order: both metallic, then ionic, then polar, else nonpolar.
pub fn classify(a: &ElementSpec, b: &ElementSpec) -> BondKind {
    if a.is_metal && b.is_metal {
        return BondKind::Metallic;
    }
    let delta = electronegativity_delta(a, b);
    if delta > IONIC_THRESHOLD {
        BondKind::Ionic
    } else if delta > POLAR_THRESHOLD {
        BondKind::PolarCovalent
    } else {
        BondKind::NonpolarCovalent
    }
}

/// Metalloid symbols win over the metal flag.
pub fn category(element: &ElementSpec) -> ElementCategory {
    if METALLOIDS.contains(&element.symbol.as_str()) {
        ElementCategory::Semimetal
    } else if element.is_metal {
        ElementCategory::Metal
    } else {
        ElementCategory::Nonmetal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::elements::ElementCatalog;

    fn pair(a: &str, b: &str) -> BondKind {
        let catalog = ElementCatalog::load().unwrap();
        classify(catalog.get(a).unwrap(), catalog.get(b).unwrap())
    }

    #[test]
    fn hydrogen_oxygen_is_polar() {
        assert_eq!(pair("H", "O"), BondKind::PolarCovalent);
    }

    #[test]
    fn sodium_chlorine_is_ionic() {
        assert_eq!(pair("Na", "Cl"), BondKind::Ionic);
    }

    #[test]
    fn iron_copper_is_metallic() {
        assert_eq!(pair("Fe", "Cu"), BondKind::Metallic);
    }

    #[test]
    fn carbon_carbon_is_nonpolar() {
        assert_eq!(pair("C", "C"), BondKind::NonpolarCovalent);
    }

    #[test]
    fn classification_is_symmetric() {
        let catalog = ElementCatalog::load().unwrap();
        for a in catalog.iter() {
            for b in catalog.iter() {
                assert_eq!(classify(a, b), classify(b, a), "{}-{}", a.symbol, b.symbol);
            }
        }
    }

    #[test]
    fn metal_with_nonmetal_uses_electronegativity() {
        // Δ = 3.44 - 1.31 = 2.13
        assert_eq!(pair("Mg", "O"), BondKind::Ionic);
    }

    #[test]
    fn categories() {
        let catalog = ElementCatalog::load().unwrap();
        assert_eq!(category(catalog.get("Fe").unwrap()), ElementCategory::Metal);
        assert_eq!(category(catalog.get("Si").unwrap()), ElementCategory::Semimetal);
        assert_eq!(category(catalog.get("B").unwrap()), ElementCategory::Semimetal);
        assert_eq!(category(catalog.get("O").unwrap()), ElementCategory::Nonmetal);
        assert_eq!(category(catalog.get("He").unwrap()), ElementCategory::Nonmetal);
    }
}
