use serde::{Deserialize, Serialize};

use crate::funding::{FundingCatalog, FundingMatch};

pub const YOUNG_FARMER_AGE_LIMIT: u32 = 40;

#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
pub struct FarmerProfile {
    pub age: u32,
    #[serde(default)]
    pub starting_new_farm: bool,
    #[serde(default)]
    pub modernizing: bool,
    #[serde(default)]
    pub transforming: bool,
    #[serde(default)]
    pub collective_irrigation: bool,
    #[serde(default)]
    pub needs_access: bool,
    #[serde(default)]
    pub calamity_affected: bool,
    #[serde(default)]
    pub non_productive_investment: bool,
    #[serde(default)]
    pub has_insurance: bool,
}

impl FarmerProfile {
    pub fn is_young_farmer(&self) -> bool {
        self.age < YOUNG_FARMER_AGE_LIMIT
    }
}

pub struct ProfileRule {
    pub code: &'static str,
    pub description: &'static str,
    pub applies: fn(&FarmerProfile) -> bool,
}

/// Checked in order; every rule is independent of the others.
pub const PROFILE_RULES: &[ProfileRule] = &[
    ProfileRule {
        code: "F.4.1",
        description: "Young farmer starting a new holding",
        applies: young_and_starting,
    },
    ProfileRule {
        code: "F.1.2",
        description: "Young farmer investing in an existing holding",
        applies: young_and_established,
    },
    ProfileRule {
        code: "F.1.1",
        description: "Modernisation of the holding",
        applies: modernizing,
    },
    ProfileRule {
        code: "F.1.3",
        description: "Processing or marketing of products",
        applies: transforming,
    },
    ProfileRule {
        code: "F.1.4",
        description: "Collective irrigation project",
        applies: collective_irrigation,
    },
    ProfileRule {
        code: "F.1.5",
        description: "Agricultural access infrastructure",
        applies: needs_access,
    },
    ProfileRule {
        code: "F.1.6",
        description: "Recovery after a natural calamity",
        applies: calamity_affected,
    },
    ProfileRule {
        code: "F.1.7",
        description: "Non-productive landscape investment",
        applies: non_productive_investment,
    },
    ProfileRule {
        code: "F.5.1",
        description: "Crop insurance",
        applies: has_insurance,
    },
];

fn young_and_starting(p: &FarmerProfile) -> bool {
    p.is_young_farmer() && p.starting_new_farm
}

fn young_and_established(p: &FarmerProfile) -> bool {
    p.is_young_farmer() && !p.starting_new_farm
}

fn modernizing(p: &FarmerProfile) -> bool {
    p.modernizing
}

fn transforming(p: &FarmerProfile) -> bool {
    p.transforming
}

fn collective_irrigation(p: &FarmerProfile) -> bool {
    p.collective_irrigation
}

fn needs_access(p: &FarmerProfile) -> bool {
    p.needs_access
}

fn calamity_affected(p: &FarmerProfile) -> bool {
    p.calamity_affected
}

fn non_productive_investment(p: &FarmerProfile) -> bool {
    p.non_productive_investment
}

fn has_insurance(p: &FarmerProfile) -> bool {
    p.has_insurance
}

pub fn matching_codes(profile: &FarmerProfile) -> Vec<&'static str> {
    PROFILE_RULES
        .iter()
        .filter(|rule| (rule.applies)(profile))
        .map(|rule| rule.code)
        .collect()
}

/// Matched lines for the profile, or the single not-applicable entry.
pub fn recommend_for_profile(catalog: &FundingCatalog, profile: &FarmerProfile) -> Vec<FundingMatch> {
    let matches = catalog.resolve(matching_codes(profile));
    if matches.is_empty() {
        return vec![FundingMatch::not_applicable()];
    }
    matches
}
