//! Builds the natural-language instruction sent to the model.
//!
//! The instruction is a pure function of the prompt: same prompt, same text.
//! It names the language and quotes the topic verbatim, then pins down the
//! JSON shape the extractor expects.

use std::fmt::Write;

use super::DialoguePrompt;

/// Fewest lines the model is asked to produce.
pub const MIN_LINES: usize = 5;

/// Most lines the model is asked to produce.
pub const MAX_LINES: usize = 10;

/// Speaker labels, assigned in order.
const SPEAKERS: [&str; 6] = ["A", "B", "C", "D", "E", "F"];

/// Builds the instruction text for a dialogue prompt.
pub fn build_instruction(prompt: &DialoguePrompt) -> String {
    let speakers = speaker_labels(prompt.participant_count());
    let people = if speakers.len() == 2 {
        "two people".to_string()
    } else {
        format!("{} people", speakers.len())
    };

    let mut text = String::new();
    text.push_str("You are a language learning assistant that creates realistic dialogues.\n");
    let _ = writeln!(
        text,
        "Generate a dialogue between {} in {} about \"{}\".",
        people,
        prompt.language(),
        prompt.topic()
    );
    let _ = writeln!(
        text,
        "The dialogue should be at {} level and use a {} tone.",
        prompt.difficulty(),
        prompt.tone()
    );
    if speakers.len() > 2 {
        let _ = writeln!(
            text,
            "Label the speakers {} and let each of them speak at least once.",
            join_labels(&speakers)
        );
    }
    text.push_str("Format as JSON with the following structure:\n");
    text.push_str(&schema_example(&speakers));
    let _ = write!(
        text,
        "\nCreate {}-{} lines of dialogue that sound natural and realistic.",
        MIN_LINES, MAX_LINES
    );
    text
}

fn speaker_labels(count: u8) -> Vec<&'static str> {
    SPEAKERS.iter().copied().take(count as usize).collect()
}

fn join_labels(labels: &[&str]) -> String {
    match labels.split_last() {
        Some((last, rest)) if !rest.is_empty() => format!("{} and {}", rest.join(", "), last),
        Some((last, _)) => last.to_string(),
        None => String::new(),
    }
}

fn schema_example(speakers: &[&str]) -> String {
    let entries: Vec<String> = speakers
        .iter()
        .map(|speaker| {
            format!(
                "    {{\n      \"speaker\": \"{}\",\n      \"text\": \"[text in target language]\",\n      \"translation\": \"[English translation]\"\n    }}",
                speaker
            )
        })
        .collect();
    format!("{{\n  \"lines\": [\n{}\n  ]\n}}", entries.join(",\n"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::dialogue::{Difficulty, Language, Tone};
    use proptest::prelude::*;

    fn prompt(topic: &str, participants: u8) -> DialoguePrompt {
        DialoguePrompt::with_participants(
            topic,
            Language::Spanish,
            Difficulty::Intermediate,
            Tone::Formal,
            participants,
        )
        .unwrap()
    }

    #[test]
    fn instruction_names_language_topic_level_and_tone() {
        let text = build_instruction(&prompt("booking a hotel room", 2));

        assert!(text.contains("between two people in Spanish"));
        assert!(text.contains("about \"booking a hotel room\""));
        assert!(text.contains("at Intermediate level"));
        assert!(text.contains("use a Formal tone"));
        assert!(text.contains("Create 5-10 lines"));
    }

    #[test]
    fn instruction_describes_json_shape() {
        let text = build_instruction(&prompt("weather", 2));

        assert!(text.contains("\"lines\": ["));
        assert!(text.contains("\"speaker\": \"A\""));
        assert!(text.contains("\"speaker\": \"B\""));
        assert!(!text.contains("\"speaker\": \"C\""));
        assert!(text.contains("\"translation\": \"[English translation]\""));
    }

    #[test]
    fn schema_example_is_valid_json() {
        let example = schema_example(&speaker_labels(3));
        let value: serde_json::Value = serde_json::from_str(&example).unwrap();
        assert_eq!(value["lines"].as_array().map(Vec::len), Some(3));
    }

    #[test]
    fn larger_groups_list_every_speaker() {
        let text = build_instruction(&prompt("a team meeting", 4));

        assert!(text.contains("between 4 people"));
        assert!(text.contains("Label the speakers A, B, C and D"));
        assert!(text.contains("\"speaker\": \"D\""));
        assert!(!text.contains("\"speaker\": \"E\""));
    }

    #[test]
    fn topic_is_quoted_literally() {
        let text = build_instruction(&prompt("café \"au lait\" & croissants", 2));
        assert!(text.contains("café \"au lait\" & croissants"));
    }

    fn any_language() -> impl Strategy<Value = Language> {
        prop::sample::select(Language::ALL.to_vec())
    }

    fn any_difficulty() -> impl Strategy<Value = Difficulty> {
        prop::sample::select(Difficulty::ALL.to_vec())
    }

    fn any_tone() -> impl Strategy<Value = Tone> {
        prop::sample::select(Tone::ALL.to_vec())
    }

    proptest! {
        #[test]
        fn instruction_is_deterministic_and_contains_inputs(
            topic in "[a-zA-Z0-9][a-zA-Z0-9 ,.'?-]{0,60}",
            language in any_language(),
            difficulty in any_difficulty(),
            tone in any_tone(),
            participants in 2u8..=6,
        ) {
            let prompt = DialoguePrompt::with_participants(
                topic.clone(), language, difficulty, tone, participants,
            ).unwrap();

            let first = build_instruction(&prompt);
            let second = build_instruction(&prompt);

            prop_assert_eq!(&first, &second);
            prop_assert!(first.contains(prompt.topic()));
            prop_assert!(first.contains(language.name()));
            prop_assert!(first.contains(difficulty.name()));
            prop_assert!(first.contains(tone.name()));
        }
    }
}
