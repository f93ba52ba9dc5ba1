//! Prompt composition.
//!
//! One composer serves all three providers: the chat UIs differ, the
//! instruction text does not.

use tabpilot_protocols::{QuestionKind, QuestionOptions, QuestionPayload};

#[cfg(test)]
#[path = "prompt_tests.rs"]
mod tests;

/// Build the natural-language instruction sent to the assistant.
///
/// Embeds the question type and text verbatim, formats options by
/// kind, prepends the correction context when one is carried, and
/// closes with the strict JSON output contract.
pub fn compose(question: &QuestionPayload) -> String {
    let mut parts: Vec<String> = Vec::new();

    if let Some(correction) = &question.previous_correction {
        parts.push(format!(
            "Note: my previous answer to the question \"{}\" was wrong; \
             the correct answer was \"{}\". Use this to inform your reasoning.",
            correction.question, correction.correct_answer
        ));
    }

    parts.push(format!(
        "Answer this {} question: {}",
        question.kind.label(),
        question.question
    ));

    match (&question.kind, &question.options) {
        (QuestionKind::Matching, Some(QuestionOptions::Matching { prompts, choices })) => {
            parts.push(format!(
                "Match each prompt to one choice.\nPrompts:\n{}\nChoices:\n{}\n\
                 Give the answer as an array of strings, one per prompt in order, \
                 each formatted as \"<prompt number> -> <choice text>\".",
                numbered(prompts),
                numbered(choices)
            ));
        }
        (QuestionKind::FillInTheBlank, _) => {
            parts.push(
                "The question may contain several blanks marked _____. \
                 Give the answer as an array of strings, one per blank in order. \
                 Use a single-element array when there is only one blank."
                    .to_string(),
            );
        }
        (_, Some(QuestionOptions::Choices(choices))) => {
            let list = choices
                .iter()
                .map(|c| format!("- {c}"))
                .collect::<Vec<_>>()
                .join("\n");
            let plural = if question.kind == QuestionKind::MultipleSelect {
                "Pick every option that applies and give the answer as an array of strings."
            } else {
                "Pick exactly one option."
            };
            parts.push(format!(
                "The options are:\n{list}\n{plural} \
                 The answer must match the option text exactly as written."
            ));
        }
        _ => {}
    }

    parts.push(
        "Respond with a JSON object with exactly two keys: \"answer\" and \
         \"explanation\". The explanation must be at most one sentence. \
         Do not acknowledge any note about a previous answer. \
         Respond with only the JSON object and nothing else."
            .to_string(),
    );

    parts.join("\n\n")
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(i, item)| format!("{}. {}", i + 1, item))
        .collect::<Vec<_>>()
        .join("\n")
}
