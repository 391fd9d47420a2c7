//! Per-engine weight table.

use std::collections::BTreeMap;

use super::factor::FactorKind;
use super::TrustConfigError;

/// Signed weight for every [`FactorKind`], starting from the defaults.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WeightTable(BTreeMap<FactorKind, i32>);

impl Default for WeightTable {
    fn default() -> Self {
        Self(FactorKind::ALL.into_iter().map(|k| (k, k.default_weight())).collect())
    }
}

impl WeightTable {
    /// Replaces weights by factor name. Unknown names are rejected and leave the table unchanged.
    pub fn apply_overrides(&mut self, overrides: &BTreeMap<String, i32>) -> Result<(), TrustConfigError> {
        let parsed = overrides
            .iter()
            .map(|(name, w)| Ok((name.parse::<FactorKind>()?, *w)))
            .collect::<Result<Vec<_>, TrustConfigError>>()?;
        self.0.extend(parsed);
        Ok(())
    }

    pub fn get(&self, kind: FactorKind) -> i32 {
        self.0.get(&kind).copied().unwrap_or_else(|| kind.default_weight())
    }

    /// Name -> weight, for display and export.
    pub fn to_map(&self) -> BTreeMap<String, i32> {
        self.0.iter().map(|(k, w)| (k.name().to_string(), *w)).collect()
    }
}
