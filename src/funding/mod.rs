pub mod catalog;
pub mod category;
pub mod profile;

use serde::{Deserialize, Serialize};

pub use catalog::FundingCatalog;

/// Catalog entry for one public funding line. The code is the catalog key.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingProgram {
    pub name: String,
    pub objective: String,
    #[serde(default)]
    pub support: Option<String>,
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl FundingProgram {
    pub fn support_text(&self) -> &str {
        self.support.as_deref().unwrap_or("N/A")
    }
}

/// A matched funding line. `code` is `None` only for the not-applicable entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct FundingMatch {
    pub code: Option<String>,
    pub program: FundingProgram,
}

impl FundingMatch {
    pub fn not_applicable() -> Self {
        Self {
            code: None,
            program: FundingProgram {
                name: "Not applicable".to_string(),
                objective: "No clear line".to_string(),
                support: None,
                criteria: Vec::new(),
            },
        }
    }

    pub fn is_not_applicable(&self) -> bool {
        self.code.is_none()
    }

    pub fn code_label(&self) -> &str {
        self.code.as_deref().unwrap_or("N/A")
    }
}
