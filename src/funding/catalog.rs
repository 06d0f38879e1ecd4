use std::collections::BTreeMap;
use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::funding::{FundingMatch, FundingProgram};

/// Funding programs keyed by code. Read-only after load.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(transparent)]
pub struct FundingCatalog {
    programs: BTreeMap<String, FundingProgram>,
}

impl FundingCatalog {
    pub fn new(programs: BTreeMap<String, FundingProgram>) -> Self {
        Self { programs }
    }

    pub fn load(path: &Path) -> Result<Self> {
        let data = std::fs::read_to_string(path)
            .with_context(|| format!("failed reading funding catalog: {}", path.display()))?;
        let catalog = Self::from_json(&data)
            .with_context(|| format!("failed parsing funding catalog: {}", path.display()))?;
        info!(
            "loaded {} funding programs from {}",
            catalog.len(),
            path.display()
        );
        Ok(catalog)
    }

    pub fn from_json(data: &str) -> Result<Self> {
        Ok(serde_json::from_str(data)?)
    }

    pub fn get(&self, code: &str) -> Option<&FundingProgram> {
        self.programs.get(code)
    }

    pub fn len(&self) -> usize {
        self.programs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.programs.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &FundingProgram)> {
        self.programs.iter()
    }

    /// Looks codes up in order; codes missing from the catalog are dropped.
    pub fn resolve<'a, I>(&self, codes: I) -> Vec<FundingMatch>
    where
        I: IntoIterator<Item = &'a str>,
    {
        codes
            .into_iter()
            .filter_map(|code| match self.get(code) {
                Some(program) => Some(FundingMatch {
                    code: Some(code.to_string()),
                    program: program.clone(),
                }),
                None => {
                    debug!("funding code {code} not in catalog, skipped");
                    None
                }
            })
            .collect()
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::sample_catalog;

    #[test]
    fn parses_catalog_keyed_by_code() {
        let catalog = sample_catalog();
        assert_eq!(catalog.len(), 9);
        let program = catalog.get("F.1.1").expect("program");
        assert_eq!(program.support_text(), "Up to 75%");
        assert_eq!(program.criteria, vec!["Registered farmer"]);
        assert_eq!(catalog.get("F.1.2").expect("program").support_text(), "N/A");
    }

    #[test]
    fn resolve_drops_unknown_codes_and_keeps_order() {
        let catalog = sample_catalog();
        let matches = catalog.resolve(["F.5.1", "F.9.9", "F.1.1"]);
        let codes: Vec<_> = matches.iter().map(|m| m.code_label()).collect();
        assert_eq!(codes, vec!["F.5.1", "F.1.1"]);
    }
}
