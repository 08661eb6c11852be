//! DialogueGenerator - turns a prompt into a dialogue with one model call.

use std::sync::Arc;
use std::time::Instant;

use crate::domain::dialogue::{
    build_instruction, Dialogue, DialogueError, DialoguePrompt, GenerationError, PromptInput,
    ResponseExtractor,
};
use crate::ports::{AIProvider, CompletionRequest, MessageRole};

/// Generates practice dialogues through an injected model provider.
///
/// Stateless apart from the provider handle: no caching, no retries. Each
/// call either returns a complete dialogue or an error carrying the cause.
pub struct DialogueGenerator {
    provider: Arc<dyn AIProvider>,
    extractor: ResponseExtractor,
}

impl DialogueGenerator {
    pub fn new(provider: Arc<dyn AIProvider>) -> Self {
        Self {
            provider,
            extractor: ResponseExtractor::new(),
        }
    }

    /// Validates raw input, then generates. Invalid input never reaches the model.
    pub async fn generate(&self, input: &PromptInput) -> Result<Dialogue, DialogueError> {
        let prompt = DialoguePrompt::from_input(input).map_err(|e| {
            tracing::info!(field = e.field(), error = %e, "Rejected dialogue prompt");
            e
        })?;

        Ok(self.generate_from_prompt(prompt).await?)
    }

    /// Generates a dialogue for an already validated prompt.
    pub async fn generate_from_prompt(
        &self,
        prompt: DialoguePrompt,
    ) -> Result<Dialogue, GenerationError> {
        // 1. Build instruction
        let instruction = build_instruction(&prompt);
        let request = CompletionRequest::new()
            .with_message(MessageRole::User, instruction)
            .with_json_output();

        // 2. Call the model once
        let started = Instant::now();
        let response = self.provider.complete(request).await.map_err(|e| {
            if e.is_transient() {
                tracing::warn!(
                    language = %prompt.language(),
                    error = %e,
                    "Model request failed"
                );
            } else {
                tracing::error!(
                    language = %prompt.language(),
                    error = %e,
                    "Model request failed"
                );
            }
            GenerationError::Model(e)
        })?;

        // 3. Extract lines from the reply
        let lines = self.extractor.extract(&response.content).map_err(|e| {
            tracing::error!(
                language = %prompt.language(),
                model = %response.model,
                error = %e,
                response_len = response.content.len(),
                "Failed to extract dialogue from model response"
            );
            GenerationError::Extraction(e)
        })?;

        tracing::info!(
            language = %prompt.language(),
            difficulty = %prompt.difficulty(),
            tone = %prompt.tone(),
            lines = lines.len(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "Generated dialogue"
        );

        Ok(Dialogue::generated(prompt, lines))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::ai::{MockAIProvider, MockError};
    use crate::domain::dialogue::{
        Difficulty, ExtractionError, Language, Tone,
    };
    use crate::domain::foundation::ValidationError;
    use crate::ports::AIError;

    const SIX_LINES: &str = r#"Here is your dialogue:
```json
{
  "lines": [
    {"speaker": "A", "text": "Bonjour !", "translation": "Hello!"},
    {"speaker": "B", "text": "Bonjour, un café s'il vous plaît.", "translation": "Hello, a coffee please."},
    {"speaker": "A", "text": "Sur place ou à emporter ?", "translation": "For here or to go?"},
    {"speaker": "B", "text": "À emporter.", "translation": "To go."},
    {"speaker": "A", "text": "Ça fait deux euros.", "translation": "That's two euros."},
    {"speaker": "B", "text": "Voilà, merci !", "translation": "Here you go, thanks!"}
  ]
}
```"#;

    fn generator(provider: &MockAIProvider) -> DialogueGenerator {
        DialogueGenerator::new(Arc::new(provider.clone()))
    }

    fn coffee_input() -> PromptInput {
        PromptInput::new("ordering coffee", "French", "Beginner", "Casual")
    }

    #[tokio::test]
    async fn generates_six_line_dialogue_and_echoes_prompt() {
        let provider = MockAIProvider::new().with_response(SIX_LINES);

        let dialogue = generator(&provider).generate(&coffee_input()).await.unwrap();

        assert_eq!(dialogue.lines().len(), 6);
        assert_eq!(dialogue.lines()[0].speaker, "A");
        assert_eq!(dialogue.lines()[5].translation, "Here you go, thanks!");
        assert_eq!(
            dialogue.prompt(),
            &DialoguePrompt::from_input(&coffee_input()).unwrap()
        );
        assert_eq!(dialogue.prompt().language(), Language::French);
        assert!(!dialogue.is_persisted());
    }

    #[tokio::test]
    async fn sends_instruction_once_in_json_mode() {
        let provider = MockAIProvider::new().with_response(SIX_LINES);

        generator(&provider).generate(&coffee_input()).await.unwrap();

        let calls = provider.get_calls();
        assert_eq!(calls.len(), 1);
        assert!(calls[0].json_output);
        let sent = calls[0].last_user_message().unwrap();
        assert!(sent.contains("\"ordering coffee\""));
        assert!(sent.contains("in French"));
    }

    #[tokio::test]
    async fn invalid_input_makes_no_model_call() {
        let provider = MockAIProvider::new().with_response(SIX_LINES);
        let input = PromptInput {
            topic: None,
            ..coffee_input()
        };

        let result = generator(&provider).generate(&input).await;

        assert!(matches!(
            result,
            Err(DialogueError::InvalidPrompt(ValidationError::EmptyField { .. }))
        ));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn unknown_language_makes_no_model_call() {
        let provider = MockAIProvider::new();
        let input = PromptInput::new("travel", "Klingon", "Beginner", "Casual");

        let result = generator(&provider).generate(&input).await;

        assert!(matches!(result, Err(DialogueError::InvalidPrompt(_))));
        assert_eq!(provider.call_count(), 0);
    }

    #[tokio::test]
    async fn prose_only_reply_is_generation_error() {
        let provider =
            MockAIProvider::new().with_response("Sorry, I cannot create that dialogue right now.");

        let result = generator(&provider).generate(&coffee_input()).await;

        assert!(matches!(
            result,
            Err(DialogueError::GenerationFailed(GenerationError::Extraction(
                ExtractionError::NoJsonFound
            )))
        ));
    }

    #[tokio::test]
    async fn model_failure_is_generation_error_with_cause() {
        let provider = MockAIProvider::new().with_error(MockError::Timeout { timeout_secs: 30 });
        let prompt =
            DialoguePrompt::new("weather", Language::German, Difficulty::Advanced, Tone::Academic)
                .unwrap();

        let result = generator(&provider).generate_from_prompt(prompt).await;

        assert!(matches!(
            result,
            Err(GenerationError::Model(AIError::Timeout { timeout_secs: 30 }))
        ));
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn model_failure_is_not_retried() {
        let provider = MockAIProvider::new()
            .with_error(MockError::Unavailable {
                message: "overloaded".into(),
            })
            .with_response(SIX_LINES);

        let result = generator(&provider).generate(&coffee_input()).await;

        assert!(result.is_err());
        assert_eq!(provider.call_count(), 1);
    }

    #[tokio::test]
    async fn fixed_reply_gives_identical_dialogues() {
        let provider = MockAIProvider::new().with_fixed_response(SIX_LINES);
        let generator = generator(&provider);

        let first = generator.generate(&coffee_input()).await.unwrap();
        let second = generator.generate(&coffee_input()).await.unwrap();

        assert_eq!(first, second);
        assert_eq!(provider.call_count(), 2);
    }

    #[tokio::test]
    async fn bare_json_reply_is_accepted() {
        let provider = MockAIProvider::new().with_response(
            r#"{"lines":[{"speaker":"A","text":"Hola","translation":"Hi"},{"speaker":"B","text":"¿Qué tal?","translation":"How are you?"}]}"#,
        );
        let input = PromptInput::new("greetings", "Spanish", "Beginner", "Casual");

        let dialogue = generator(&provider).generate(&input).await.unwrap();
        assert_eq!(dialogue.lines().len(), 2);
    }
}
