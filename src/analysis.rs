//! Keyword-driven structural risk classification of image captions.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity label attached to an analysis.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RiskLevel {
    #[default]
    Low,
    Medium,
    High,
}

impl RiskLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskLevel::Low => "Low",
            RiskLevel::Medium => "Medium",
            RiskLevel::High => "High",
        }
    }
}

impl fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single keyword rule.
///
/// The rule fires when the lower-cased caption contains any of `triggers`.
#[derive(Debug)]
pub struct Rule {
    pub name: &'static str,
    pub triggers: &'static [&'static str],
    pub observations: &'static [&'static str],
    pub recommendations: &'static [&'static str],
    pub risk: RiskLevel,
}

impl Rule {
    fn matches(&self, text: &str) -> bool {
        self.triggers.iter().any(|trigger| text.contains(trigger))
    }
}

/// Rules in evaluation order.
///
/// Every rule is evaluated and each match overwrites the risk level, so the
/// last matching rule decides the final label. A caption that mentions both
/// a collapse and a crack therefore ends at `Medium`. Reordering this table
/// changes results.
pub const RULES: &[Rule] = &[
    Rule {
        name: "collapse",
        triggers: &["collapsed", "destroyed", "demolished"],
        observations: &[
            "Severe structural collapse observed indicating failure of primary load-bearing elements.",
        ],
        recommendations: &[
            "Immediate evacuation and barricading of the affected structure is required.",
            "Detailed structural audit must be conducted before any repair or demolition decision.",
        ],
        risk: RiskLevel::High,
    },
    Rule {
        name: "crack",
        triggers: &["crack", "broken", "fracture"],
        observations: &["Visible cracking and fracture of reinforced concrete members detected."],
        recommendations: &[
            "Non-destructive testing such as Ultrasonic Pulse Velocity and Rebound Hammer tests are recommended.",
        ],
        risk: RiskLevel::Medium,
    },
    Rule {
        name: "exposed_reinforcement",
        triggers: &["exposed", "steel", "reinforcement"],
        observations: &["Exposed reinforcement suggests advanced concrete spalling and durability loss."],
        recommendations: &["Corrosion assessment and durability evaluation should be performed."],
        risk: RiskLevel::High,
    },
];

/// Observation used when no rule fires.
pub const NO_DISTRESS_OBSERVATION: &str =
    "No major visible structural distress detected from the provided image.";

/// Recommendation used when no rule fires.
pub const ROUTINE_RECOMMENDATION: &str = "Routine inspection and periodic monitoring are advised.";

/// Result of classifying one caption.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct EngineeringAnalysis {
    pub observations: Vec<String>,
    pub recommendations: Vec<String>,
    pub risk: RiskLevel,
    /// Names of the rules that fired, in evaluation order.
    pub matched_rules: Vec<&'static str>,
}

impl EngineeringAnalysis {
    pub fn into_parts(self) -> (Vec<String>, Vec<String>, RiskLevel) {
        (self.observations, self.recommendations, self.risk)
    }
}

/// Classify a caption into observations, recommendations and a risk level.
///
/// Matching is a case-insensitive substring search. Never fails: captions
/// that match no rule get the routine-inspection result at `Low`.
pub fn engineering_analysis(caption: &str) -> EngineeringAnalysis {
    let text = caption.to_lowercase();

    let mut analysis = EngineeringAnalysis {
        observations: Vec::new(),
        recommendations: Vec::new(),
        risk: RiskLevel::default(),
        matched_rules: Vec::new(),
    };

    for rule in RULES.iter().filter(|rule| rule.matches(&text)) {
        analysis
            .observations
            .extend(rule.observations.iter().map(|s| s.to_string()));
        analysis
            .recommendations
            .extend(rule.recommendations.iter().map(|s| s.to_string()));
        analysis.risk = rule.risk;
        analysis.matched_rules.push(rule.name);
    }

    if analysis.observations.is_empty() {
        analysis.observations.push(NO_DISTRESS_OBSERVATION.to_string());
        analysis.recommendations.push(ROUTINE_RECOMMENDATION.to_string());
    }

    analysis
}
