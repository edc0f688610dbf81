// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result, anyhow, bail};
use reqwest::StatusCode;
use reqwest::blocking::Client as HttpClient;
use serde::{Deserialize, Serialize};
use skilldeck_app::{GapLevel, GapReport, LearningWallet, Skill, UserProfile};
use std::time::Duration;
use time::OffsetDateTime;
use url::Url;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Role {
    System,
    User,
    Assistant,
}

impl Role {
    const fn as_str(&self) -> &'static str {
        match self {
            Self::System => "system",
            Self::User => "user",
            Self::Assistant => "assistant",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
}

/// Blocking client for an OpenAI-compatible chat endpoint. The coach is
/// best-effort: callers swallow failures and keep whatever text was already
/// on screen.
#[derive(Debug, Clone)]
pub struct Client {
    base_url: String,
    model: String,
    timeout: Duration,
    http: HttpClient,
}

impl Client {
    pub fn new(base_url: &str, model: &str, timeout: Duration) -> Result<Self> {
        let base_url = base_url.trim_end_matches('/').to_owned();
        if base_url.is_empty() {
            bail!("llm.base_url must not be empty");
        }
        let parsed = Url::parse(&base_url)
            .with_context(|| format!("llm.base_url {base_url:?} is not a valid URL"))?;
        if !matches!(parsed.scheme(), "http" | "https") {
            bail!(
                "llm.base_url {base_url:?} must use http or https, got {}",
                parsed.scheme()
            );
        }
        if model.trim().is_empty() {
            bail!("llm.model must not be empty");
        }

        let http = HttpClient::builder()
            .timeout(timeout)
            .build()
            .context("build HTTP client")?;

        Ok(Self {
            base_url,
            model: model.to_owned(),
            timeout,
            http,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    pub fn list_models(&self) -> Result<Vec<String>> {
        let response = self
            .http
            .get(format!("{}/models", self.base_url))
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: ModelsResponse = response.json().context("decode model list")?;
        Ok(parsed.data.into_iter().map(|model| model.id).collect())
    }

    pub fn ping(&self) -> Result<()> {
        let models = self.list_models()?;
        let exists = models
            .iter()
            .any(|name| name == &self.model || name.starts_with(&format!("{}:", self.model)));
        if !exists {
            bail!(
                "model {:?} not found -- pull it with `ollama pull {}`",
                self.model,
                self.model
            );
        }
        Ok(())
    }

    pub fn chat_complete(&self, messages: &[Message]) -> Result<String> {
        let request = ChatRequest::new(&self.model, messages);
        let response = self
            .http
            .post(format!("{}/chat/completions", self.base_url))
            .json(&request)
            .send()
            .map_err(|error| connection_error(&self.base_url, error))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().unwrap_or_default();
            return Err(clean_error_response(status, &body));
        }

        let parsed: ChatCompletionResponse = response.json().context("decode chat response")?;
        let content = parsed
            .choices
            .first()
            .map(|choice| choice.message.content.clone())
            .ok_or_else(|| anyhow!("no choices in chat response"))?;
        Ok(content)
    }
}

/// System prompt for the coach chat: persona plus the member's profile,
/// skill snapshot, and wallet, so replies stay grounded in the data the
/// dashboard shows.
pub fn build_coach_prompt(
    profile: &UserProfile,
    skills: &[Skill],
    wallet: &LearningWallet,
    now: OffsetDateTime,
    extra_context: Option<&str>,
) -> String {
    let mut out = String::new();
    out.push_str(
        "You are an AI career and skills coach for a talent development platform. Answer only from the member profile below.\n",
    );
    out.push_str(&format!("Current date: {}\n", format_human_date(now)));
    out.push_str("\n## Member\n\n");
    out.push_str(&format!(
        "{}, {} at {} ({})\n",
        profile.name, profile.role, profile.organization, profile.location
    ));
    out.push_str("\n## Skill snapshot\n\n");
    for skill in skills {
        out.push_str(&format!(
            "- {}: {}/100 ({}, {})\n",
            skill.name,
            skill.score,
            skill.level.label(),
            skill.trend.label()
        ));
    }
    out.push_str("\n## Learning wallet\n\n");
    out.push_str(&format!(
        "{} credits available ({} level)\n",
        wallet.credits,
        wallet.level.label()
    ));
    out.push_str(COACH_GUIDELINES);
    if let Some(context) = extra_context
        && !context.is_empty()
    {
        out.push_str("\n## Additional context\n\n");
        out.push_str(context);
        out.push('\n');
    }
    out
}

/// Chat request: system prompt, prior turns, then the new question.
pub fn coach_messages(system_prompt: &str, history: &[Message], question: &str) -> Vec<Message> {
    let mut messages = Vec::with_capacity(history.len() + 2);
    messages.push(Message {
        role: Role::System,
        content: system_prompt.to_owned(),
    });
    messages.extend(history.iter().cloned());
    messages.push(Message {
        role: Role::User,
        content: question.to_owned(),
    });
    messages
}

/// Prompt behind the "Ask AI to Explain" affordance on the gap screen.
pub fn build_fit_prompt(report: &GapReport, profile: &UserProfile, now: OffsetDateTime) -> String {
    let mut out = String::new();
    out.push_str("Act as a career coach for a talent development platform.\n");
    out.push_str(&format!("Current date: {}\n\n", format_human_date(now)));
    out.push_str(&format!("User: {}, {}.\n", profile.name, profile.role));
    out.push_str(&format!("Target: {}.\n", report.target_role));
    out.push_str(&format!("Match score: {}%.\n", report.match_percent));
    out.push_str(&format!("Gaps: {}.\n", notable_gaps(report)));
    out.push_str(
        "\nWrite a 2-3 sentence professional, encouraging explanation of why they are a good fit while pointing out the specific gaps they need to address to reach the target level.\n",
    );
    out
}

/// Prompt behind the "Regenerate Plan" affordance on the gap screen.
pub fn build_plan_prompt(
    report: &GapReport,
    wallet: &LearningWallet,
    now: OffsetDateTime,
) -> String {
    let mut out = String::new();
    out.push_str("Act as a career coach for a talent development platform.\n");
    out.push_str(&format!("Current date: {}\n\n", format_human_date(now)));
    out.push_str(&format!(
        "Create a 4-step action plan to move from {} to {} within {}.\n",
        report.current_role, report.target_role, report.readiness_window
    ));
    out.push_str(&format!(
        "Context: {} learning credits available.\n",
        wallet.credits
    ));
    out.push_str("Gaps:\n");
    let mut index = 0;
    for group in &report.domains {
        for item in &group.items {
            if item.level == GapLevel::Small {
                continue;
            }
            index += 1;
            out.push_str(&format!(
                "{}. {} (need +{} pts)\n",
                index,
                item.skill,
                (item.required - item.current).max(0)
            ));
        }
    }
    out.push_str("\nOutput strictly 4 distinct, actionable steps. Do not include intro text.\n");
    out
}

/// Pull at most four plan steps out of free-form model output: fences off,
/// bullets and numbering stripped, blank lines dropped.
pub fn extract_plan_steps(raw: &str) -> Vec<String> {
    let mut text = raw.trim().to_owned();
    if text.starts_with("```") {
        let mut lines: Vec<&str> = text.lines().collect();
        if !lines.is_empty() {
            lines.remove(0);
        }
        if let Some(idx) = lines.iter().rposition(|line| line.trim() == "```") {
            lines.truncate(idx);
        }
        text = lines.join("\n");
    }

    text.lines()
        .map(strip_list_marker)
        .filter(|line| !line.is_empty())
        .take(4)
        .map(str::to_owned)
        .collect()
}

fn strip_list_marker(line: &str) -> &str {
    line.trim()
        .trim_start_matches(|ch: char| {
            ch.is_ascii_digit() || matches!(ch, '-' | '*' | '.' | ')' | '#')
        })
        .trim()
}

fn notable_gaps(report: &GapReport) -> String {
    let items: Vec<String> = report
        .domains
        .iter()
        .flat_map(|group| &group.items)
        .filter(|item| item.level != GapLevel::Small)
        .map(|item| format!("{} ({})", item.skill, label_for_level(item.level)))
        .collect();
    if items.is_empty() {
        "none of note".to_owned()
    } else {
        items.join(", ")
    }
}

const fn label_for_level(level: GapLevel) -> &'static str {
    match level {
        GapLevel::Small => "Small",
        GapLevel::Moderate => "Moderate",
        GapLevel::High => "High",
    }
}

fn format_human_date(now: OffsetDateTime) -> String {
    now.date()
        .format(&time::macros::format_description!(
            "[weekday repr:long], [month repr:long] [day], [year]"
        ))
        .unwrap_or_else(|_| now.date().to_string())
}

const COACH_GUIDELINES: &str = r#"
## How to answer

- Be concise and encouraging. One short paragraph or a numbered list.
- Recommend courses or activities only when they follow from the gaps above.
- Do not invent scores that are not in the snapshot.
"#;

fn connection_error(base_url: &str, error: reqwest::Error) -> anyhow::Error {
    anyhow!(
        "cannot reach {} -- start it with `ollama serve` ({} )",
        base_url,
        error
    )
}

fn clean_error_response(status: StatusCode, body: &str) -> anyhow::Error {
    if let Ok(parsed) = serde_json::from_str::<OpenAIErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.message.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error.message);
    }

    if let Ok(parsed) = serde_json::from_str::<OllamaErrorEnvelope>(body)
        && let Some(error) = parsed.error
        && !error.is_empty()
    {
        return anyhow!("server error ({}): {}", status.as_u16(), error);
    }

    if body.len() < 100 && !body.contains('{') {
        return anyhow!("server error ({}): {}", status.as_u16(), body);
    }

    anyhow!("server returned {}", status.as_u16())
}

#[derive(Debug, Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    stream: bool,
    temperature: f32,
}

impl<'a> ChatRequest<'a> {
    fn new(model: &'a str, messages: &'a [Message]) -> Self {
        Self {
            model,
            messages: messages
                .iter()
                .map(|message| ChatMessage {
                    role: message.role.as_str(),
                    content: &message.content,
                })
                .collect(),
            stream: false,
            temperature: 0.0,
        }
    }
}

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatChoiceMessage,
}

#[derive(Debug, Deserialize)]
struct ChatChoiceMessage {
    content: String,
}

#[derive(Debug, Deserialize)]
struct ModelsResponse {
    data: Vec<ModelRow>,
}

#[derive(Debug, Deserialize)]
struct ModelRow {
    id: String,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorEnvelope {
    error: Option<OpenAIErrorBody>,
}

#[derive(Debug, Deserialize)]
struct OpenAIErrorBody {
    message: String,
}

#[derive(Debug, Deserialize)]
struct OllamaErrorEnvelope {
    error: Option<String>,
}
