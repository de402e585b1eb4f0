//! Interview phases — the fixed, ordered stages of the conversational interview.
//!
//! Every per-phase behaviour is an exhaustive `match`, so adding a phase forces
//! a decision about its label, its template, and whether it auto-advances.

use serde::{Deserialize, Serialize};

use crate::interview::prompts::{
    PromptTemplate, CLARIFICATIONS_TEMPLATE, INTRODUCTION_TEMPLATE, REQUIREMENTS_TEMPLATE,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum InterviewPhase {
    Introduction,
    Clarifications,
    Requirements,
    HighLevelDesign,
    DeepDive,
    WrapUp,
}

impl InterviewPhase {
    /// Total order of the interview, first to last.
    pub const ALL: [InterviewPhase; 6] = [
        InterviewPhase::Introduction,
        InterviewPhase::Clarifications,
        InterviewPhase::Requirements,
        InterviewPhase::HighLevelDesign,
        InterviewPhase::DeepDive,
        InterviewPhase::WrapUp,
    ];

    pub fn label(self) -> &'static str {
        match self {
            InterviewPhase::Introduction => "Introduction",
            InterviewPhase::Clarifications => "Clarifications & Assumptions",
            InterviewPhase::Requirements => "Requirements Definition",
            InterviewPhase::HighLevelDesign => "High-Level Design",
            InterviewPhase::DeepDive => "Deep Dive",
            InterviewPhase::WrapUp => "Wrap Up",
        }
    }

    /// Short description used in transition messages.
    pub fn description(self) -> &'static str {
        match self {
            InterviewPhase::Introduction => "introduction and problem understanding",
            InterviewPhase::Clarifications => "clarifying questions and assumptions",
            InterviewPhase::Requirements => {
                "functional and non-functional requirements definition"
            }
            InterviewPhase::HighLevelDesign => "high-level system architecture design",
            InterviewPhase::DeepDive => {
                "deep dive into specific components and implementation details"
            }
            InterviewPhase::WrapUp => "wrap-up and final questions",
        }
    }

    /// Zero-based position in `ALL`.
    pub fn index(self) -> usize {
        match self {
            InterviewPhase::Introduction => 0,
            InterviewPhase::Clarifications => 1,
            InterviewPhase::Requirements => 2,
            InterviewPhase::HighLevelDesign => 3,
            InterviewPhase::DeepDive => 4,
            InterviewPhase::WrapUp => 5,
        }
    }

    /// The following phase, or `None` at `WrapUp`.
    pub fn next(self) -> Option<InterviewPhase> {
        Self::ALL.get(self.index() + 1).copied()
    }

    pub fn is_terminal(self) -> bool {
        self.next().is_none()
    }

    /// The LLM template driving freeform exchanges in this phase.
    /// Phases after Requirements are not LLM-driven.
    pub fn template(self) -> Option<&'static PromptTemplate> {
        match self {
            InterviewPhase::Introduction => Some(&INTRODUCTION_TEMPLATE),
            InterviewPhase::Clarifications => Some(&CLARIFICATIONS_TEMPLATE),
            InterviewPhase::Requirements => Some(&REQUIREMENTS_TEMPLATE),
            InterviewPhase::HighLevelDesign
            | InterviewPhase::DeepDive
            | InterviewPhase::WrapUp => None,
        }
    }

    /// Whether a successful freeform exchange in this phase moves the interview forward.
    /// Introduction waits for an explicit advance.
    pub fn auto_advances(self) -> bool {
        match self {
            InterviewPhase::Clarifications | InterviewPhase::Requirements => true,
            InterviewPhase::Introduction
            | InterviewPhase::HighLevelDesign
            | InterviewPhase::DeepDive
            | InterviewPhase::WrapUp => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_is_in_index_order() {
        for (i, phase) in InterviewPhase::ALL.iter().enumerate() {
            assert_eq!(phase.index(), i, "{phase:?} out of order");
        }
    }

    #[test]
    fn test_next_walks_the_full_order() {
        let mut phase = InterviewPhase::Introduction;
        let mut visited = vec![phase];
        while let Some(next) = phase.next() {
            assert!(next > phase, "next must move forward");
            phase = next;
            visited.push(phase);
        }
        assert_eq!(visited, InterviewPhase::ALL.to_vec());
        assert_eq!(phase, InterviewPhase::WrapUp);
    }

    #[test]
    fn test_wrap_up_is_the_only_terminal_phase() {
        let terminal: Vec<_> = InterviewPhase::ALL
            .iter()
            .filter(|p| p.is_terminal())
            .collect();
        assert_eq!(terminal, vec![&InterviewPhase::WrapUp]);
    }

    #[test]
    fn test_labels() {
        assert_eq!(
            InterviewPhase::Clarifications.label(),
            "Clarifications & Assumptions"
        );
        assert_eq!(
            InterviewPhase::Requirements.label(),
            "Requirements Definition"
        );
        assert_eq!(InterviewPhase::WrapUp.label(), "Wrap Up");
    }

    #[test]
    fn test_only_early_phases_have_templates() {
        assert!(InterviewPhase::Introduction.template().is_some());
        assert!(InterviewPhase::Clarifications.template().is_some());
        assert!(InterviewPhase::Requirements.template().is_some());
        assert!(InterviewPhase::HighLevelDesign.template().is_none());
        assert!(InterviewPhase::DeepDive.template().is_none());
        assert!(InterviewPhase::WrapUp.template().is_none());
    }

    #[test]
    fn test_only_clarifications_and_requirements_auto_advance() {
        let advancing: Vec<_> = InterviewPhase::ALL
            .into_iter()
            .filter(|p| p.auto_advances())
            .collect();
        assert_eq!(
            advancing,
            vec![InterviewPhase::Clarifications, InterviewPhase::Requirements]
        );
        // every auto-advancing phase is LLM-driven
        assert!(advancing.iter().all(|p| p.template().is_some()));
    }

    #[test]
    fn test_serializes_snake_case() {
        let json = serde_json::to_string(&InterviewPhase::HighLevelDesign).unwrap();
        assert_eq!(json, "\"high_level_design\"");
    }
}
