use serde::{Deserialize, Serialize};

/// Identifier wrapper for submitted self-assessments.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct AssessmentId(pub String);

/// The five due-diligence categories of the questionnaire, plus the fallback
/// bucket answers land in when their question id matches no catalog entry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    HumanRightsLabor,
    HealthSafety,
    Environment,
    EthicsCompliance,
    SupplyChainOversight,
    Unknown,
}

impl Category {
    pub const fn ordered() -> [Self; 5] {
        [
            Self::HumanRightsLabor,
            Self::HealthSafety,
            Self::Environment,
            Self::EthicsCompliance,
            Self::SupplyChainOversight,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::HumanRightsLabor => "Human Rights & Labor",
            Self::HealthSafety => "Health & Safety",
            Self::Environment => "Environment",
            Self::EthicsCompliance => "Ethics & Compliance",
            Self::SupplyChainOversight => "Supply Chain Oversight",
            Self::Unknown => "UNKNOWN",
        }
    }

    /// Maps the numeric prefix of a question id (the text before the first
    /// `.`) back to its category.
    pub fn from_prefix(prefix: &str) -> Self {
        match prefix {
            "1" => Self::HumanRightsLabor,
            "2" => Self::HealthSafety,
            "3" => Self::Environment,
            "4" => Self::EthicsCompliance,
            "5" => Self::SupplyChainOversight,
            _ => Self::Unknown,
        }
    }

    pub fn for_question_id(question_id: &str) -> Self {
        let prefix = question_id.split('.').next().unwrap_or_default();
        Self::from_prefix(prefix)
    }
}

/// Canonical three-state answer every raw submission is reduced to before any
/// scoring logic runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CanonicalAnswer {
    Yes,
    No,
    Partial,
}

impl CanonicalAnswer {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Yes => "yes",
            Self::No => "no",
            Self::Partial => "partial",
        }
    }

    /// Conversion for the legacy boolean representation some intake surfaces
    /// still submit.
    pub const fn from_flag(satisfied: bool) -> Self {
        if satisfied {
            Self::Yes
        } else {
            Self::No
        }
    }
}

/// Compliance grade, best to worst. The derived ordering follows declaration
/// order, so `max` picks the most severe grade.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Grade {
    A,
    B,
    C,
    D,
}

impl Grade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::A => "A",
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
        }
    }

    pub const fn points(self) -> u8 {
        match self {
            Self::A => 100,
            Self::B => 80,
            Self::C => 60,
            Self::D => 40,
        }
    }
}

/// Grade ceiling a critical violation imposes. The questionnaire marks a few
/// items `B/C`; those resolve to the worse ceiling of the pair when applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CriticalGrade {
    B,
    C,
    D,
    #[serde(rename = "B/C")]
    BOrC,
}

impl CriticalGrade {
    pub const fn label(self) -> &'static str {
        match self {
            Self::B => "B",
            Self::C => "C",
            Self::D => "D",
            Self::BOrC => "B/C",
        }
    }

    pub const fn ceiling(self) -> Grade {
        match self {
            Self::B => Grade::B,
            Self::C => Grade::C,
            Self::D => Grade::D,
            Self::BOrC => Grade::C,
        }
    }
}

/// A validated answer, stamped with the catalog metadata scoring relies on so
/// downstream code never re-validates.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Answer {
    pub question_id: String,
    pub answer: CanonicalAnswer,
    pub category: Category,
    pub weight: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub critical: Option<CriticalGrade>,
}

impl Answer {
    pub fn is_violation(&self) -> bool {
        self.answer == CanonicalAnswer::No
    }

    pub fn is_critical_violation(&self) -> bool {
        self.is_violation() && self.critical.is_some()
    }
}

/// Lifecycle of a stored assessment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AssessmentStatus {
    Submitted,
    Scored,
    ActionRequired,
}

impl AssessmentStatus {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Submitted => "submitted",
            Self::Scored => "scored",
            Self::ActionRequired => "action_required",
        }
    }
}
