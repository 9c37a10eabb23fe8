//! System prompt assembly for the translation provider.

use crate::context::KeysContext;

/// Build the system instruction for one translation request.
///
/// The instruction names the target language by its uppercased ISO 639-1
/// code, constrains the reply to a bare JSON object (no code fences, no
/// commentary), frames the domain as a subscription payment flow, and
/// requires `{{...}}` placeholder tokens to survive verbatim. For every
/// context key that occurs textually in the payload, a `- key: hint` line
/// is appended, in context-file order.
///
/// Pure: identical inputs always produce the identical string.
pub fn build_system_prompt(
    payload: &str,
    target_language: &str,
    keys_context: &KeysContext,
) -> String {
    let mut prompt = format!(
        "Translate the following JSON into the language with the ISO 639-1 code {}. ",
        target_language.to_uppercase()
    );
    prompt.push_str(
        "Return a valid JSON object using double quotes (`\"`) for keys and string values. ",
    );
    prompt.push_str("Do *not* wrap the JSON in any formatting markers like ```json or ```. ");
    prompt.push_str("Maintain the context of a subscription app payment flow. ");
    prompt.push_str("Keep the JSON keys and variables between braces {{ and }} unchanged. ");
    prompt.push_str("Do *not* prepend or append any explanatory text to the JSON output. ");
    prompt.push_str("The response should be **valid JSON** that can be parsed programmatically. ");

    let matching: Vec<(&String, &String)> = keys_context
        .iter()
        .filter(|(key, _)| payload.contains(key.as_str()))
        .collect();

    if !matching.is_empty() {
        prompt.push_str(
            "\n\nHere is additional context for some of the keys to help with translation:\n",
        );
        for (key, hint) in matching {
            prompt.push_str(&format!("- {}: {}\n", key, hint));
        }
    }

    prompt
}
