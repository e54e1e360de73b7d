use std::env;

use quiz_core::model::{Question, QuizResult};
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::error::FeedbackError;

/// Shown when the provider answers but with empty text.
pub const EMPTY_FEEDBACK_FALLBACK: &str =
    "Keep trying! Review the questions you missed and learn from them for next time.";

/// Shown when the provider cannot be reached at all.
pub const FEEDBACK_UNAVAILABLE_FALLBACK: &str = "The AI reviewer is busy right now, \
     but your score has been recorded. Look over the answers to keep improving!";

#[derive(Clone, Debug)]
pub struct FeedbackConfig {
    pub base_url: String,
    pub api_key: String,
    pub model: String,
}

impl FeedbackConfig {
    #[must_use]
    pub fn from_env() -> Option<Self> {
        let api_key = env::var("QUIZ_AI_API_KEY").ok()?;
        if api_key.trim().is_empty() {
            return None;
        }
        let base_url =
            env::var("QUIZ_AI_BASE_URL").unwrap_or_else(|_| "https://api.openai.com/v1".into());
        let model = env::var("QUIZ_AI_MODEL").unwrap_or_else(|_| "gpt-4o-mini".into());
        Some(Self {
            base_url,
            api_key,
            model,
        })
    }
}

/// Turns a finished session into a short encouraging paragraph.
///
/// Feedback is decoration: any provider failure resolves to a fixed
/// fallback string, and persistence of the score never waits on success
/// here.
#[derive(Clone)]
pub struct FeedbackService {
    client: Client,
    config: Option<FeedbackConfig>,
}

impl FeedbackService {
    #[must_use]
    pub fn from_env() -> Self {
        Self::new(FeedbackConfig::from_env())
    }

    #[must_use]
    pub fn new(config: Option<FeedbackConfig>) -> Self {
        Self {
            client: Client::new(),
            config,
        }
    }

    #[must_use]
    pub fn enabled(&self) -> bool {
        self.config.is_some()
    }

    /// Produce feedback text for a finished session. Infallible by design:
    /// provider errors map to the fixed fallback strings.
    pub async fn annotate(&self, result: &QuizResult, questions: &[Question]) -> String {
        let prompt = build_prompt(result, questions);
        match self.generate(&prompt).await {
            Ok(text) => text,
            Err(FeedbackError::EmptyResponse) => EMPTY_FEEDBACK_FALLBACK.to_owned(),
            Err(err) => {
                warn!(error = %err, "feedback generation failed, using fallback text");
                FEEDBACK_UNAVAILABLE_FALLBACK.to_owned()
            }
        }
    }

    /// Generate text from a prompt.
    ///
    /// # Errors
    ///
    /// Returns `FeedbackError` when the service is disabled, the request fails,
    /// or the response is empty.
    pub async fn generate(&self, prompt: &str) -> Result<String, FeedbackError> {
        let config = self.config.as_ref().ok_or(FeedbackError::Disabled)?;

        let url = format!("{}/chat/completions", config.base_url.trim_end_matches('/'));
        let payload = ChatRequest {
            model: config.model.clone(),
            messages: vec![ChatMessage {
                role: "user",
                content: prompt.to_string(),
            }],
            temperature: 0.2,
        };

        let response = self
            .client
            .post(url)
            .bearer_auth(&config.api_key)
            .json(&payload)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(FeedbackError::HttpStatus(response.status()));
        }

        let body: ChatResponse = response.json().await?;
        let content = body
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .filter(|text| !text.trim().is_empty())
            .ok_or(FeedbackError::EmptyResponse)?;

        Ok(content.trim().to_string())
    }
}

fn build_prompt(result: &QuizResult, questions: &[Question]) -> String {
    let mut lines = String::new();
    for (number, question) in questions.iter().enumerate() {
        let chosen = result.answers.get(question.id()).copied();
        let chosen_text = chosen
            .and_then(|index| question.options().get(index))
            .map_or("no answer", String::as_str);
        let verdict = if chosen.is_some_and(|index| question.is_correct(index)) {
            "CORRECT"
        } else {
            "WRONG"
        };
        lines.push_str(&format!(
            "Question {}: \"{}\" - chose \"{}\", correct answer \"{}\" ({})\n",
            number + 1,
            question.prompt(),
            chosen_text,
            question.correct_answer(),
            verdict,
        ));
    }

    format!(
        "You are a friendly teacher. A student named {name} just finished a biology quiz.\n\
         Score: {score} ({correct}/{total} correct answers).\n\
         Details:\n\
         {lines}\n\
         Write 2-3 encouraging sentences: point out a strength, name the topics worth \
         reviewing, and end with motivation. Address the student directly.",
        name = result.student_name,
        score = result.score,
        correct = result.correct_count,
        total = result.total_questions,
        lines = lines,
    )
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    model: String,
    messages: Vec<ChatMessage>,
    temperature: f32,
}

#[derive(Debug, Serialize)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageResponse,
}

#[derive(Debug, Deserialize)]
struct ChatMessageResponse {
    content: Option<String>,
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//
