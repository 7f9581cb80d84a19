//! The fixed set of reflection questions.

use std::fmt;

/// Identifies one of the seven reflection questions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QuestionKey {
    Intent,
    ProblemSolved,
    Learned,
    WouldDoDifferently,
    Confidence,
    Testing,
    TechnicalDebt,
}

impl QuestionKey {
    /// The key used in `log.json`.
    pub fn as_str(&self) -> &'static str {
        match self {
            QuestionKey::Intent => "intent",
            QuestionKey::ProblemSolved => "problemSolved",
            QuestionKey::Learned => "learned",
            QuestionKey::WouldDoDifferently => "wouldDoDifferently",
            QuestionKey::Confidence => "confidence",
            QuestionKey::Testing => "testing",
            QuestionKey::TechnicalDebt => "technicalDebt",
        }
    }

    /// All keys, in the order the questions are asked.
    pub fn all() -> &'static [QuestionKey] {
        &[
            QuestionKey::Intent,
            QuestionKey::ProblemSolved,
            QuestionKey::Learned,
            QuestionKey::WouldDoDifferently,
            QuestionKey::Confidence,
            QuestionKey::Testing,
            QuestionKey::TechnicalDebt,
        ]
    }
}

impl fmt::Display for QuestionKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A reflection question as shown to the user.
#[derive(Debug, Clone, Copy)]
pub struct Question {
    pub key: QuestionKey,
    pub prompt: &'static str,
    pub hint: &'static str,
}

/// Questions asked before every commit, in order.
pub const QUESTIONS: [Question; 7] = [
    Question {
        key: QuestionKey::Intent,
        prompt: "🎯 What was the intent of these changes?",
        hint: "What goal or problem were you trying to address?",
    },
    Question {
        key: QuestionKey::ProblemSolved,
        prompt: "🔧 What problem did you solve?",
        hint: "Describe the issue or bug you fixed, or feature you added.",
    },
    Question {
        key: QuestionKey::Learned,
        prompt: "📚 What did you learn while making these changes?",
        hint: "Any new insights, patterns, or techniques you discovered?",
    },
    Question {
        key: QuestionKey::WouldDoDifferently,
        prompt: "🤔 What would you do differently if you rewrote this?",
        hint: "Critical reflection on your implementation approach.",
    },
    Question {
        key: QuestionKey::Confidence,
        prompt: "💪 How confident are you in this code? Why?",
        hint: "Rate your confidence and explain your reasoning.",
    },
    Question {
        key: QuestionKey::Testing,
        prompt: "✅ What testing did you do?",
        hint: "Unit tests, manual testing, integration tests?",
    },
    Question {
        key: QuestionKey::TechnicalDebt,
        prompt: "⚠️  Any technical debt or TODOs introduced?",
        hint: "Shortcuts, edge cases, or future improvements?",
    },
];
