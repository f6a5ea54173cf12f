use serde::{Deserialize, Serialize};

use crate::foundation::error::{FormplateError, FormplateResult};
use crate::positions::registry::SAF_CHECKBOX_SLOTS;

/// A categorical question with an ordered list of choices.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    /// Prompt shown by the questionnaire (never drawn by the compositor).
    pub prompt: String,
    /// Ordered choices; an answer is compared against these by equality.
    pub choices: Vec<String>,
}

/// Ordered accountability questions whose answers become SAF checkboxes.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Questionnaire {
    questions: Vec<Question>,
}

const GENERAL_FUND: &str = "Redirect my support to the Every Nation World Missions General Fund";

impl Default for Questionnaire {
    fn default() -> Self {
        let q = |prompt: &str, choices: &[&str]| Question {
            prompt: prompt.to_string(),
            choices: choices.iter().map(|c| c.to_string()).collect(),
        };
        Self {
            questions: vec![
                q(
                    "If the missioner is UNABLE TO GO due to unforeseen reasons, please*",
                    &["Redirect my support to the team fund", GENERAL_FUND],
                ),
                q(
                    "If the missioner or team is REROUTED, please*",
                    &["Retain my support", GENERAL_FUND],
                ),
                q("If the trip is CANCELED, please*", &[GENERAL_FUND]),
            ],
        }
    }
}

impl Questionnaire {
    /// Build from explicit questions.
    pub fn new(questions: Vec<Question>) -> Self {
        Self { questions }
    }

    /// Questions in order.
    pub fn questions(&self) -> &[Question] {
        &self.questions
    }

    /// Question at `index`.
    pub fn get(&self, index: usize) -> Option<&Question> {
        self.questions.get(index)
    }

    /// Check that every SAF checkbox slot maps onto a question choice.
    pub fn validate(&self) -> FormplateResult<()> {
        for (qi, slots) in SAF_CHECKBOX_SLOTS.iter().enumerate() {
            let question = self.questions.get(qi).ok_or_else(|| {
                FormplateError::configuration(format!(
                    "questionnaire has no question {qi} for its SAF checkboxes"
                ))
            })?;
            if question.choices.len() < slots.len() {
                return Err(FormplateError::configuration(format!(
                    "question {qi} has {} choices but {} checkboxes",
                    question.choices.len(),
                    slots.len()
                )));
            }
        }
        Ok(())
    }
}

/// Per-choice equality predicates for one question.
///
/// At most one flag is true; all are false when the answer is unset or matches no choice.
pub fn choice_flags(answer: Option<&str>, choices: &[String]) -> Vec<bool> {
    match answer.filter(|a| !a.is_empty()) {
        Some(a) => choices.iter().map(|c| c == a).collect(),
        None => vec![false; choices.len()],
    }
}

#[cfg(test)]
#[path = "../../tests/unit/form/questions.rs"]
mod tests;
