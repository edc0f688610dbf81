// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use skilldeck_app::{
    ChatSpeaker, CoachContent, CourseCatalog, GapReport, LearningWallet, MobilityReport, Skill,
    SkillId, SubSkill, UserProfile,
};
use skilldeck_content::ContentPack;
use skilldeck_llm::{Client, Message, Role};
use skilldeck_tui::{AppRuntime, ChatTurn, CoachEvent, CoachRequest, InternalEvent};
use std::sync::mpsc::Sender;
use std::thread;
use time::OffsetDateTime;

/// Adapter between the event loop and the outside world: serves the
/// read-only content pack and forwards coach requests to the LLM client.
/// With no client configured it answers from the pack's canned script,
/// mirroring the demo behavior.
pub struct ContentRuntime {
    pack: ContentPack,
    client: Option<Client>,
    extra_context: String,
}

impl ContentRuntime {
    pub fn new(pack: ContentPack) -> Self {
        Self {
            pack,
            client: None,
            extra_context: String::new(),
        }
    }

    pub fn with_llm_client_and_context(
        pack: ContentPack,
        client: Option<Client>,
        extra_context: &str,
    ) -> Self {
        Self {
            pack,
            client,
            extra_context: extra_context.to_owned(),
        }
    }
}

impl AppRuntime for ContentRuntime {
    fn load_profile(&mut self) -> Result<UserProfile> {
        Ok(self.pack.profile.clone())
    }

    fn load_wallet(&mut self) -> Result<LearningWallet> {
        Ok(self.pack.wallet.clone())
    }

    fn load_skills(&mut self) -> Result<Vec<Skill>> {
        Ok(self.pack.skills.clone())
    }

    fn load_sub_skills(&mut self, skill: SkillId) -> Result<Vec<SubSkill>> {
        Ok(self.pack.sub_skills_for(skill))
    }

    fn load_courses(&mut self) -> Result<CourseCatalog> {
        Ok(self.pack.course_catalog())
    }

    fn load_mobility_report(&mut self) -> Result<MobilityReport> {
        Ok(self.pack.mobility.clone())
    }

    fn load_gap_report(&mut self) -> Result<GapReport> {
        Ok(self.pack.gap_report.clone())
    }

    fn load_coach_content(&mut self) -> Result<CoachContent> {
        Ok(self.pack.coach.clone())
    }

    fn coach_reply(&mut self, request: &CoachRequest) -> Result<String> {
        reply_for(&self.pack, self.client.as_ref(), &self.extra_context, request)
    }

    fn spawn_coach_request(
        &mut self,
        request_id: u64,
        request: &CoachRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let pack = self.pack.clone();
        let client = self.client.clone();
        let extra_context = self.extra_context.clone();
        let request = request.clone();
        thread::spawn(move || {
            let event = match reply_for(&pack, client.as_ref(), &extra_context, &request) {
                Ok(reply) => CoachEvent::Completed { request_id, reply },
                Err(error) => CoachEvent::Failed {
                    request_id,
                    error: error.to_string(),
                },
            };
            let _ = tx.send(InternalEvent::Coach(event));
        });
        Ok(())
    }
}

fn reply_for(
    pack: &ContentPack,
    client: Option<&Client>,
    extra_context: &str,
    request: &CoachRequest,
) -> Result<String> {
    let Some(client) = client else {
        return Ok(offline_reply(pack, request));
    };
    let now = OffsetDateTime::now_utc();
    let extra = (!extra_context.is_empty()).then_some(extra_context);

    match request {
        CoachRequest::Chat { question, history } => {
            let system = skilldeck_llm::build_coach_prompt(
                &pack.profile,
                &pack.skills,
                &pack.wallet,
                now,
                extra,
            );
            let history: Vec<Message> = history.iter().map(message_for_turn).collect();
            client.chat_complete(&skilldeck_llm::coach_messages(&system, &history, question))
        }
        CoachRequest::ExplainFit => {
            let prompt = skilldeck_llm::build_fit_prompt(&pack.gap_report, &pack.profile, now);
            client.chat_complete(&[Message {
                role: Role::User,
                content: prompt,
            }])
        }
        CoachRequest::RegeneratePlan => {
            let prompt = skilldeck_llm::build_plan_prompt(&pack.gap_report, &pack.wallet, now);
            let raw = client.chat_complete(&[Message {
                role: Role::User,
                content: prompt,
            }])?;
            let steps = skilldeck_llm::extract_plan_steps(&raw);
            if steps.is_empty() {
                bail!("coach returned no plan steps");
            }
            Ok(steps.join("\n"))
        }
    }
}

fn offline_reply(pack: &ContentPack, request: &CoachRequest) -> String {
    match request {
        CoachRequest::Chat { .. } => pack.coach.canned_reply.clone(),
        CoachRequest::ExplainFit => pack.gap_report.explanation.clone(),
        CoachRequest::RegeneratePlan => pack.gap_report.action_plan.join("\n"),
    }
}

fn message_for_turn(turn: &ChatTurn) -> Message {
    Message {
        role: match turn.speaker {
            ChatSpeaker::User => Role::User,
            ChatSpeaker::Coach => Role::Assistant,
        },
        content: turn.text.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::ContentRuntime;
    use anyhow::{Result, anyhow};
    use skilldeck_app::SkillId;
    use skilldeck_content::ContentPack;
    use skilldeck_llm::Client;
    use skilldeck_tui::{AppRuntime, ChatTurn, CoachEvent, CoachRequest, InternalEvent};
    use std::sync::mpsc;
    use std::thread;
    use std::time::Duration;
    use tiny_http::{Header, Response, Server};

    fn chat_request() -> CoachRequest {
        CoachRequest::Chat {
            question: "Where are my biggest gaps?".to_owned(),
            history: Vec::new(),
        }
    }

    #[test]
    fn runtime_serves_the_pack() -> Result<()> {
        let mut runtime = ContentRuntime::new(ContentPack::builtin());
        assert_eq!(runtime.load_profile()?.name, "Ahmed Khan");
        assert_eq!(runtime.load_skills()?.len(), 4);
        assert_eq!(runtime.load_sub_skills(SkillId::new(1))?.len(), 5);
        assert_eq!(runtime.load_courses()?.recommended.len(), 4);
        assert_eq!(runtime.load_mobility_report()?.role_fits.len(), 3);
        assert_eq!(runtime.load_gap_report()?.target_role, "Senior Accountant");
        assert_eq!(runtime.load_coach_content()?.quick_prompts.len(), 3);
        Ok(())
    }

    #[test]
    fn offline_coach_answers_from_the_canned_script() -> Result<()> {
        let pack = ContentPack::builtin();
        let mut runtime = ContentRuntime::new(pack.clone());

        let chat = runtime.coach_reply(&chat_request())?;
        assert_eq!(chat, pack.coach.canned_reply);

        let fit = runtime.coach_reply(&CoachRequest::ExplainFit)?;
        assert_eq!(fit, pack.gap_report.explanation);

        let plan = runtime.coach_reply(&CoachRequest::RegeneratePlan)?;
        assert_eq!(plan.lines().count(), pack.gap_report.action_plan.len());
        Ok(())
    }

    #[test]
    fn chat_round_trips_through_the_llm_client() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}/v1", server.server_addr());

        let handle = thread::spawn(move || {
            let request = server.recv().expect("request expected");
            assert_eq!(request.url(), "/v1/chat/completions");
            let body = r#"{"choices":[{"message":{"role":"assistant","content":"Close the audit gap first."}}]}"#;
            let response = Response::from_string(body).with_status_code(200).with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
            request.respond(response).expect("response should succeed");
        });

        let client = Client::new(&addr, "qwen3", Duration::from_secs(1))?;
        let mut runtime = ContentRuntime::with_llm_client_and_context(
            ContentPack::builtin(),
            Some(client),
            "",
        );

        let reply = runtime.coach_reply(&CoachRequest::Chat {
            question: "What should I learn next?".to_owned(),
            history: vec![ChatTurn {
                speaker: skilldeck_app::ChatSpeaker::Coach,
                text: "Welcome back.".to_owned(),
            }],
        })?;
        assert_eq!(reply, "Close the audit gap first.");

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn regenerated_plan_is_normalized_to_one_step_per_line() -> Result<()> {
        let server =
            Server::http("127.0.0.1:0").map_err(|error| anyhow!("start mock server: {error}"))?;
        let addr = format!("http://{}/v1", server.server_addr());

        let handle = thread::spawn(move || {
            let request = server.recv().expect("request expected");
            let body = r#"{"choices":[{"message":{"role":"assistant","content":"1. Enroll in the risk course\n2. Shadow a senior reviewer\n3. Present monthly financials\n4. Take a feedback micro-course"}}]}"#;
            let response = Response::from_string(body).with_status_code(200).with_header(
                Header::from_bytes("Content-Type", "application/json")
                    .expect("valid content type header"),
            );
            request.respond(response).expect("response should succeed");
        });

        let client = Client::new(&addr, "qwen3", Duration::from_secs(1))?;
        let mut runtime = ContentRuntime::with_llm_client_and_context(
            ContentPack::builtin(),
            Some(client),
            "",
        );

        let plan = runtime.coach_reply(&CoachRequest::RegeneratePlan)?;
        let steps: Vec<&str> = plan.lines().collect();
        assert_eq!(steps, vec![
            "Enroll in the risk course",
            "Shadow a senior reviewer",
            "Present monthly financials",
            "Take a feedback micro-course",
        ]);

        handle.join().expect("server thread should join");
        Ok(())
    }

    #[test]
    fn spawned_request_posts_a_coach_event() -> Result<()> {
        let mut runtime = ContentRuntime::new(ContentPack::builtin());
        let (tx, rx) = mpsc::channel();

        runtime.spawn_coach_request(7, &chat_request(), tx)?;
        match rx.recv_timeout(Duration::from_secs(2))? {
            InternalEvent::Coach(CoachEvent::Completed { request_id, reply }) => {
                assert_eq!(request_id, 7);
                assert!(!reply.is_empty());
            }
            other => panic!("unexpected event {other:?}"),
        }
        Ok(())
    }

    #[test]
    fn unreachable_collaborator_fails_the_request() -> Result<()> {
        let client = Client::new("http://127.0.0.1:1/v1", "qwen3", Duration::from_millis(50))?;
        let mut runtime = ContentRuntime::with_llm_client_and_context(
            ContentPack::builtin(),
            Some(client),
            "",
        );

        let (tx, rx) = mpsc::channel();
        runtime.spawn_coach_request(3, &CoachRequest::ExplainFit, tx)?;
        match rx.recv_timeout(Duration::from_secs(2))? {
            InternalEvent::Coach(CoachEvent::Failed { request_id, error }) => {
                assert_eq!(request_id, 3);
                assert!(error.contains("cannot reach"));
            }
            other => panic!("unexpected event {other:?}"),
        }
        Ok(())
    }
}
