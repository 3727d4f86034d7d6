use super::domain::{Category, CriticalGrade};

/// A question whose negative answer can cap the overall grade, with the
/// auditor-facing justification.
#[derive(Debug, Clone, Copy)]
pub struct CriticalViolation {
    pub grade: CriticalGrade,
    pub reason: &'static str,
}

#[derive(Debug, Clone)]
pub struct Question {
    pub id: &'static str,
    pub category: Category,
    pub text: &'static str,
    pub weight: f64,
    pub critical: Option<CriticalViolation>,
}

/// Immutable registry of questionnaire items, built once at startup.
#[derive(Debug, Clone)]
pub struct QuestionCatalog {
    questions: Vec<Question>,
}

impl QuestionCatalog {
    pub fn standard() -> Self {
        Self {
            questions: standard_questions(),
        }
    }

    pub fn lookup(&self, question_id: &str) -> Option<&Question> {
        self.questions
            .iter()
            .find(|question| question.id == question_id)
    }

    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    pub fn questions_for(&self, category: Category) -> Vec<&Question> {
        self.questions
            .iter()
            .filter(|question| question.category == category)
            .collect()
    }
}

fn standard_questions() -> Vec<Question> {
    vec![
        Question {
            id: "1.1",
            category: Category::HumanRightsLabor,
            text: "A written human rights policy is endorsed by executive management and published to employees.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "1.2",
            category: Category::HumanRightsLabor,
            text: "Working hours and minimum-wage requirements are monitored against applicable labor law.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "1.3",
            category: Category::HumanRightsLabor,
            text: "The workforce is verifiably free of child labor, with age verification at hiring.",
            weight: 10.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::D,
                reason: "Employment of workers below the legal minimum working age",
            }),
        },
        Question {
            id: "1.4",
            category: Category::HumanRightsLabor,
            text: "The workforce is verifiably free of forced, bonded, or involuntary labor.",
            weight: 10.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::D,
                reason: "Use of forced, bonded, or involuntary labor",
            }),
        },
        Question {
            id: "2.1",
            category: Category::HealthSafety,
            text: "An occupational health and safety management system (e.g. ISO 45001) is in operation.",
            weight: 5.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::C,
                reason: "Operating without a functioning safety management system",
            }),
        },
        Question {
            id: "2.2",
            category: Category::HealthSafety,
            text: "Workplace incidents are recorded and reported to the competent authority.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "2.3",
            category: Category::HealthSafety,
            text: "Workers are provided protective equipment appropriate to their tasks at no cost.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "2.4",
            category: Category::HealthSafety,
            text: "Emergency response drills are conducted at least annually at every site.",
            weight: 3.0,
            critical: None,
        },
        Question {
            id: "3.1",
            category: Category::Environment,
            text: "Scope 1 and Scope 2 greenhouse-gas emissions are tracked on an annual inventory.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "3.2",
            category: Category::Environment,
            text: "Hazardous waste is stored and disposed of exclusively through licensed handlers.",
            weight: 8.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::C,
                reason: "Unlicensed discharge or disposal of hazardous waste",
            }),
        },
        Question {
            id: "3.3",
            category: Category::Environment,
            text: "Reduction targets are set for energy and water consumption.",
            weight: 3.0,
            critical: None,
        },
        Question {
            id: "3.4",
            category: Category::Environment,
            text: "An environmental management system (e.g. ISO 14001) is certified by a third party.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "4.1",
            category: Category::EthicsCompliance,
            text: "An anti-bribery and anti-corruption program covers all employees and agents.",
            weight: 8.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::BOrC,
                reason: "Bribery or corruption involving public officials or business partners",
            }),
        },
        Question {
            id: "4.2",
            category: Category::EthicsCompliance,
            text: "A whistle-blowing channel exists and reporters are protected against retaliation.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "4.3",
            category: Category::EthicsCompliance,
            text: "Conflicts of interest are disclosed and actively managed.",
            weight: 3.0,
            critical: None,
        },
        Question {
            id: "4.4",
            category: Category::EthicsCompliance,
            text: "Personal data of employees and customers is processed under a published privacy policy.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "5.1",
            category: Category::SupplyChainOversight,
            text: "ESG requirements are cascaded to direct suppliers through contractual clauses.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "5.2",
            category: Category::SupplyChainOversight,
            text: "Supplier ESG performance is reviewed on a recurring assessment cycle.",
            weight: 5.0,
            critical: None,
        },
        Question {
            id: "5.3",
            category: Category::SupplyChainOversight,
            text: "High-risk sub-suppliers are subject to due-diligence screening before onboarding.",
            weight: 8.0,
            critical: Some(CriticalViolation {
                grade: CriticalGrade::B,
                reason: "No due-diligence screening of high-risk sub-suppliers",
            }),
        },
        Question {
            id: "5.4",
            category: Category::SupplyChainOversight,
            text: "Conflict-minerals sourcing is documented for all relevant materials.",
            weight: 3.0,
            critical: None,
        },
    ]
}
