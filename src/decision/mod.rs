use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};

use crate::agronomy::AgronomicVerdict;
use crate::economics::EconomicVerdict;

/// Outcome of one axis once reduced to its success level.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Signal {
    Success,
    Warning,
    Failure,
}

impl From<AgronomicVerdict> for Signal {
    fn from(verdict: AgronomicVerdict) -> Self {
        match verdict {
            AgronomicVerdict::GoodMatch => Signal::Success,
            AgronomicVerdict::PartialMatch => Signal::Warning,
            AgronomicVerdict::PoorMatch | AgronomicVerdict::NotViable | AgronomicVerdict::NoData => {
                Signal::Failure
            }
        }
    }
}

impl From<EconomicVerdict> for Signal {
    fn from(verdict: EconomicVerdict) -> Self {
        match verdict {
            EconomicVerdict::HighViability => Signal::Success,
            EconomicVerdict::MediumViability => Signal::Warning,
            EconomicVerdict::LowViability | EconomicVerdict::NoData => Signal::Failure,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum FinalClassification {
    FullyViable,
    AgronomicOnly,
    EconomicOnly,
    MediumRisk,
    NotViable,
}

impl FinalClassification {
    pub fn display_text(&self) -> &'static str {
        match self {
            Self::FullyViable => "Both agronomically and economically viable",
            Self::AgronomicOnly => "Agronomically viable but not economically viable",
            Self::EconomicOnly => "Economically viable but not suitable agronomically",
            Self::MediumRisk => "Medium viability: risks exist either in climate or economics",
            Self::NotViable => "Not viable",
        }
    }

    pub fn signal(&self) -> Signal {
        match self {
            Self::FullyViable => Signal::Success,
            Self::AgronomicOnly | Self::EconomicOnly | Self::MediumRisk => Signal::Warning,
            Self::NotViable => Signal::Failure,
        }
    }
}

impl Display for FinalClassification {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.display_text())
    }
}

/// Mixed success/failure is decided before any warning; warnings before
/// the all-failure case.
pub fn combine(agronomic: Signal, economic: Signal) -> FinalClassification {
    use Signal::*;
    match (agronomic, economic) {
        (Success, Success) => FinalClassification::FullyViable,
        (Success, Failure) => FinalClassification::AgronomicOnly,
        (Failure, Success) => FinalClassification::EconomicOnly,
        (Warning, _) | (_, Warning) => FinalClassification::MediumRisk,
        (Failure, Failure) => FinalClassification::NotViable,
    }
}

pub fn synthesize(agronomic: AgronomicVerdict, economic: EconomicVerdict) -> FinalClassification {
    combine(agronomic.into(), economic.into())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn full_combination_table() {
        use Signal::*;
        let cases = [
            (Success, Success, FinalClassification::FullyViable),
            (Success, Warning, FinalClassification::MediumRisk),
            (Success, Failure, FinalClassification::AgronomicOnly),
            (Warning, Success, FinalClassification::MediumRisk),
            (Warning, Warning, FinalClassification::MediumRisk),
            (Warning, Failure, FinalClassification::MediumRisk),
            (Failure, Success, FinalClassification::EconomicOnly),
            (Failure, Warning, FinalClassification::MediumRisk),
            (Failure, Failure, FinalClassification::NotViable),
        ];
        for (agronomic, economic, expected) in cases {
            assert_eq!(combine(agronomic, economic), expected, "{agronomic:?}/{economic:?}");
        }
    }

    #[test]
    fn good_match_with_unprofitable_economics() {
        let result = synthesize(AgronomicVerdict::GoodMatch, EconomicVerdict::LowViability);
        assert_eq!(result, FinalClassification::AgronomicOnly);
        assert_eq!(
            result.display_text(),
            "Agronomically viable but not economically viable"
        );
    }

    #[test]
    fn missing_data_counts_as_failure() {
        assert_eq!(
            synthesize(AgronomicVerdict::NoData, EconomicVerdict::NoData),
            FinalClassification::NotViable
        );
        assert_eq!(
            synthesize(AgronomicVerdict::NotViable, EconomicVerdict::HighViability),
            FinalClassification::EconomicOnly
        );
    }
}
