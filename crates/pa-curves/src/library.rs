//! Curve library: every reference table the kernel may consult.

use crate::class::CurveClass;
use crate::derating::DeratingTable;
use crate::error::{CurveError, CurveResult};
use crate::iec;
use crate::table::CurveTable;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::sync::OnceLock;

/// Immutable set of efficiency curves plus the imbalance derating table.
///
/// The library has no interior mutability. The [`standard`](Self::standard)
/// instance is built once and then only read, so concurrent audits share it
/// without locking.
#[derive(Clone, Debug, PartialEq)]
pub struct CurveLibrary {
    tables: BTreeMap<CurveClass, CurveTable>,
    derating: DeratingTable,
}

/// On-disk shape of a curve library.
#[derive(Debug, Serialize, Deserialize)]
struct LibraryDef {
    curves: Vec<CurveDef>,
    #[serde(default)]
    derating: DeratingTable,
}

#[derive(Debug, Serialize, Deserialize)]
struct CurveDef {
    class: CurveClass,
    points: CurveTable,
}

static STANDARD: OnceLock<CurveLibrary> = OnceLock::new();

impl CurveLibrary {
    /// Process-wide bundled library.
    pub fn standard() -> &'static CurveLibrary {
        STANDARD.get_or_init(Self::bundled)
    }

    /// A fresh copy of the bundled IEC / NEMA data.
    pub fn bundled() -> Self {
        Self {
            tables: iec::standard_tables().collect(),
            derating: DeratingTable::nema_mg1(),
        }
    }

    /// Build a library from explicit tables.
    pub fn new(
        tables: impl IntoIterator<Item = (CurveClass, CurveTable)>,
        derating: DeratingTable,
    ) -> CurveResult<Self> {
        let mut map = BTreeMap::new();
        for (class, table) in tables {
            if map.insert(class, table).is_some() {
                return Err(CurveError::DuplicateClass { class });
            }
        }
        Ok(Self {
            tables: map,
            derating,
        })
    }

    /// Parse a reference library from YAML.
    ///
    /// ```yaml
    /// curves:
    ///   - class: { efficiency: IE3, poles: 8, band: medium }
    ///     points:
    ///       - { load: 0.5, efficiency: 0.90 }
    ///       - { load: 1.0, efficiency: 0.92 }
    /// derating:            # optional, defaults to NEMA MG-1
    ///   - { imbalance_pct: 0.0, factor: 1.0 }
    /// ```
    pub fn from_yaml(text: &str) -> CurveResult<Self> {
        let def: LibraryDef = serde_yaml::from_str(text)?;
        Self::new(
            def.curves.into_iter().map(|c| (c.class, c.points)),
            def.derating,
        )
    }

    pub fn to_yaml(&self) -> CurveResult<String> {
        let def = LibraryDef {
            curves: self
                .tables
                .iter()
                .map(|(class, points)| CurveDef {
                    class: *class,
                    points: points.clone(),
                })
                .collect(),
            derating: self.derating.clone(),
        };
        Ok(serde_yaml::to_string(&def)?)
    }

    pub fn table(&self, class: CurveClass) -> CurveResult<&CurveTable> {
        self.tables
            .get(&class)
            .ok_or(CurveError::UnknownCurveClass { class })
    }

    /// Motor efficiency for `class` at `load_fraction`.
    ///
    /// The load fraction is clamped to [0, 1] before lookup.
    pub fn efficiency_at(&self, class: CurveClass, load_fraction: f64) -> CurveResult<f64> {
        let table = self.table(class)?;
        Ok(table.efficiency_at(load_fraction.clamp(0.0, 1.0)))
    }

    pub fn derating(&self) -> &DeratingTable {
        &self.derating
    }

    pub fn derating_factor(&self, imbalance_pct: f64) -> f64 {
        self.derating.factor_at(imbalance_pct)
    }

    pub fn classes(&self) -> impl Iterator<Item = CurveClass> + '_ {
        self.tables.keys().copied()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }
}
