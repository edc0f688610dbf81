// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyCode, KeyEvent, KeyModifiers};
use crossterm::terminal::{disable_raw_mode, enable_raw_mode};
use crossterm::{execute, terminal};
use ratatui::Terminal;
use ratatui::backend::CrosstermBackend;
use ratatui::layout::{Constraint, Direction, Layout, Rect};
use ratatui::style::{Color, Modifier, Style};
use ratatui::widgets::{Block, Borders, Paragraph};
use skilldeck_app::{
    AppCommand, AppEvent, AppState, ChatSpeaker, CoachContent, Course, CourseCatalog, CourseStatus,
    GapReport, LearningWallet, MobilityReport, Screen, Skill, SkillId, SubSkill, UserProfile,
};
use std::io;
use std::sync::mpsc::{self, Receiver, Sender};
use std::thread;
use std::time::Duration;
use time::OffsetDateTime;

const APP_TITLE: &str = "skilldeck";
const SCORE_BAR_WIDTH: usize = 10;

/// Knobs the binary wires in from config. `exit_clear_delay` is the window
/// between `GoBack` flipping the screen and the selection being dropped;
/// zero makes the clear effectively immediate for deterministic tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UiOptions {
    pub exit_clear_delay: Duration,
    pub status_clear_delay: Duration,
}

impl Default for UiOptions {
    fn default() -> Self {
        Self {
            exit_clear_delay: Duration::from_millis(300),
            status_clear_delay: Duration::from_secs(4),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CoachRequestKind {
    Chat,
    ExplainFit,
    RegeneratePlan,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChatTurn {
    pub speaker: ChatSpeaker,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachRequest {
    Chat {
        question: String,
        history: Vec<ChatTurn>,
    },
    ExplainFit,
    RegeneratePlan,
}

impl CoachRequest {
    pub const fn kind(&self) -> CoachRequestKind {
        match self {
            Self::Chat { .. } => CoachRequestKind::Chat,
            Self::ExplainFit => CoachRequestKind::ExplainFit,
            Self::RegeneratePlan => CoachRequestKind::RegeneratePlan,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CoachEvent {
    Completed { request_id: u64, reply: String },
    Failed { request_id: u64, error: String },
}

impl CoachEvent {
    const fn request_id(&self) -> u64 {
        match self {
            Self::Completed { request_id, .. } | Self::Failed { request_id, .. } => *request_id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InternalEvent {
    /// Deferred second phase of `GoBack`.
    CommitExit,
    ClearStatus { token: u64 },
    Coach(CoachEvent),
}

/// Everything the event loop needs from the outside world: the read-only
/// content snapshot and the generative-text collaborator. The collaborator
/// is best-effort; a `coach_reply` error is swallowed by the caller and the
/// prior text stays on screen.
pub trait AppRuntime {
    fn load_profile(&mut self) -> Result<UserProfile>;
    fn load_wallet(&mut self) -> Result<LearningWallet>;
    fn load_skills(&mut self) -> Result<Vec<Skill>>;
    fn load_sub_skills(&mut self, skill: SkillId) -> Result<Vec<SubSkill>>;
    fn load_courses(&mut self) -> Result<CourseCatalog>;
    fn load_mobility_report(&mut self) -> Result<MobilityReport>;
    fn load_gap_report(&mut self) -> Result<GapReport>;
    fn load_coach_content(&mut self) -> Result<CoachContent>;
    /// For `RegeneratePlan` the reply is one plan step per line.
    fn coach_reply(&mut self, request: &CoachRequest) -> Result<String>;

    fn spawn_coach_request(
        &mut self,
        request_id: u64,
        request: &CoachRequest,
        tx: Sender<InternalEvent>,
    ) -> Result<()> {
        let event = match self.coach_reply(request) {
            Ok(reply) => InternalEvent::Coach(CoachEvent::Completed { request_id, reply }),
            Err(error) => InternalEvent::Coach(CoachEvent::Failed {
                request_id,
                error: error.to_string(),
            }),
        };
        tx.send(event)
            .map_err(|_| anyhow::anyhow!("coach event channel closed"))?;
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
struct ChatMessage {
    speaker: ChatSpeaker,
    text: String,
    clock: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct CoachInFlight {
    request_id: u64,
    kind: CoachRequestKind,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct CoachUiState {
    transcript: Vec<ChatMessage>,
    input: String,
    quick_prompt_cursor: usize,
    next_request_id: u64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
enum HubTab {
    #[default]
    Ongoing,
    Completed,
}

impl HubTab {
    const fn toggle(self) -> Self {
        match self {
            Self::Ongoing => Self::Completed,
            Self::Completed => Self::Ongoing,
        }
    }

    const fn matches(self, status: CourseStatus) -> bool {
        matches!(
            (self, status),
            (Self::Ongoing, CourseStatus::Ongoing) | (Self::Completed, CourseStatus::Completed)
        )
    }

    const fn label(self) -> &'static str {
        match self {
            Self::Ongoing => "Ongoing",
            Self::Completed => "Completed",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct HubUiState {
    tab: HubTab,
    cursor: usize,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
struct ViewData {
    profile: UserProfile,
    wallet: LearningWallet,
    skills: Vec<Skill>,
    sub_skills: Vec<SubSkill>,
    catalog: CourseCatalog,
    mobility: MobilityReport,
    gap: GapReport,
    coach_content: CoachContent,
    coach: CoachUiState,
    hub: HubUiState,
    dashboard_cursor: usize,
    in_flight: Option<CoachInFlight>,
    status_token: u64,
}

pub fn run_app<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    options: UiOptions,
) -> Result<()> {
    enable_raw_mode().context("enable raw mode")?;
    let mut stdout = io::stdout();
    execute!(stdout, terminal::EnterAlternateScreen).context("enter alternate screen")?;

    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend).context("create terminal")?;

    let mut view_data = ViewData::default();
    let (internal_tx, internal_rx) = mpsc::channel();

    if let Err(error) = refresh_view_data(runtime, &mut view_data) {
        state.dispatch(AppCommand::SetStatus(format!("load failed: {error}")));
    }

    let mut result = Ok(());
    loop {
        process_internal_events(state, &mut view_data, &internal_rx);

        if let Err(error) = terminal.draw(|frame| render(frame, state, &view_data)) {
            result = Err(error).context("draw frame");
            break;
        }

        let has_event = event::poll(Duration::from_millis(120)).context("poll event")?;
        if has_event {
            match event::read().context("read event")? {
                Event::Key(key) => {
                    if handle_key_event(state, runtime, &mut view_data, &internal_tx, &options, key)
                    {
                        break;
                    }
                }
                Event::Resize(_, _) => {}
                _ => {}
            }
        }
    }

    disable_raw_mode().context("disable raw mode")?;
    execute!(io::stdout(), terminal::LeaveAlternateScreen).context("leave alternate screen")?;
    result
}

fn refresh_view_data<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData) -> Result<()> {
    view_data.profile = runtime.load_profile()?;
    view_data.wallet = runtime.load_wallet()?;
    view_data.skills = runtime.load_skills()?;
    view_data.catalog = runtime.load_courses()?;
    view_data.mobility = runtime.load_mobility_report()?;
    view_data.gap = runtime.load_gap_report()?;
    view_data.coach_content = runtime.load_coach_content()?;
    reset_coach_transcript(view_data);
    Ok(())
}

fn reset_coach_transcript(view_data: &mut ViewData) {
    view_data.coach.transcript = view_data
        .coach_content
        .seed_transcript
        .iter()
        .map(|seed| ChatMessage {
            speaker: seed.speaker,
            text: seed.text.clone(),
            clock: seed.clock.clone(),
        })
        .collect();
    view_data.coach.input.clear();
    view_data.coach.quick_prompt_cursor = 0;
}

fn process_internal_events(
    state: &mut AppState,
    view_data: &mut ViewData,
    rx: &Receiver<InternalEvent>,
) {
    while let Ok(event) = rx.try_recv() {
        match event {
            InternalEvent::CommitExit => {
                state.dispatch(AppCommand::CommitExit);
            }
            InternalEvent::ClearStatus { token } if token == view_data.status_token => {
                state.dispatch(AppCommand::ClearStatus);
            }
            InternalEvent::ClearStatus { .. } => {}
            InternalEvent::Coach(event) => handle_coach_event(view_data, event),
        }
    }
}

/// Route a finished coach request. A failure is swallowed: the in-flight
/// marker is dropped and whatever text was on screen stays; stale replies
/// from an abandoned screen are ignored the same way.
fn handle_coach_event(view_data: &mut ViewData, event: CoachEvent) {
    let Some(in_flight) = view_data.in_flight else {
        return;
    };
    if event.request_id() != in_flight.request_id {
        return;
    }

    match event {
        CoachEvent::Completed { reply, .. } => {
            match in_flight.kind {
                CoachRequestKind::Chat => {
                    view_data.coach.transcript.push(ChatMessage {
                        speaker: ChatSpeaker::Coach,
                        text: reply.trim().to_owned(),
                        clock: format_clock(OffsetDateTime::now_utc()),
                    });
                }
                CoachRequestKind::ExplainFit => {
                    let trimmed = reply.trim();
                    if !trimmed.is_empty() {
                        view_data.gap.explanation = trimmed.to_owned();
                    }
                }
                CoachRequestKind::RegeneratePlan => {
                    let steps: Vec<String> = reply
                        .lines()
                        .map(str::trim)
                        .filter(|line| !line.is_empty())
                        .map(str::to_owned)
                        .collect();
                    if !steps.is_empty() {
                        view_data.gap.action_plan = steps;
                    }
                }
            }
            view_data.in_flight = None;
        }
        CoachEvent::Failed { .. } => {
            view_data.in_flight = None;
        }
    }
}

/// Fire-and-forget timer thread. No cancellation token on purpose;
/// `CommitExit` is idempotent, so overlapping timers from rapid `GoBack`s
/// are harmless.
fn schedule_commit_exit(internal_tx: &Sender<InternalEvent>, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::CommitExit);
    });
}

fn schedule_status_clear(internal_tx: &Sender<InternalEvent>, token: u64, delay: Duration) {
    let sender = internal_tx.clone();
    thread::spawn(move || {
        thread::sleep(delay);
        let _ = sender.send(InternalEvent::ClearStatus { token });
    });
}

fn emit_status(
    state: &mut AppState,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    message: impl Into<String>,
) {
    state.dispatch(AppCommand::SetStatus(message.into()));
    view_data.status_token = view_data.status_token.saturating_add(1);
    schedule_status_clear(internal_tx, view_data.status_token, options.status_clear_delay);
}

/// Dispatch a navigation command and apply its events to the view layer:
/// load the breakdown on selection, reset per-screen transient state on
/// entry (the terminal analog of the source's scroll-to-top), and schedule
/// the deferred clear.
fn dispatch_nav<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    command: AppCommand,
) {
    let events = state.dispatch(command);
    for event in events {
        match event {
            AppEvent::SkillSelected(id) => {
                view_data.sub_skills = runtime.load_sub_skills(id).unwrap_or_default();
            }
            AppEvent::ScreenChanged(screen) => {
                enter_screen(runtime, view_data, screen);
            }
            AppEvent::SelectionClearScheduled => {
                schedule_commit_exit(internal_tx, options.exit_clear_delay);
            }
            AppEvent::SelectionCleared
            | AppEvent::StatusUpdated(_)
            | AppEvent::StatusCleared => {}
        }
    }
}

fn enter_screen<R: AppRuntime>(runtime: &mut R, view_data: &mut ViewData, screen: Screen) {
    // Navigating away abandons any pending coach request; a late reply for
    // it will be dropped by the request-id check.
    view_data.in_flight = None;
    match screen {
        Screen::Dashboard => {
            view_data.dashboard_cursor = 0;
        }
        Screen::LearningHub => {
            view_data.hub = HubUiState::default();
        }
        Screen::AiCoach => {
            reset_coach_transcript(view_data);
        }
        Screen::TargetRoleGap => {
            if let Ok(report) = runtime.load_gap_report() {
                view_data.gap = report;
            }
        }
        Screen::SkillDetail | Screen::CareerMobility => {}
    }
}

fn handle_key_event<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) -> bool {
    if key.code == KeyCode::Char('q') && key.modifiers.contains(KeyModifiers::CONTROL) {
        return true;
    }

    match state.screen {
        Screen::Dashboard => {
            handle_dashboard_key(state, runtime, view_data, internal_tx, options, key)
        }
        Screen::SkillDetail | Screen::CareerMobility => {
            handle_back_only_key(state, runtime, view_data, internal_tx, options, key)
        }
        Screen::LearningHub => handle_hub_key(state, runtime, view_data, internal_tx, options, key),
        Screen::AiCoach => handle_coach_key(state, runtime, view_data, internal_tx, options, key),
        Screen::TargetRoleGap => {
            handle_gap_key(state, runtime, view_data, internal_tx, options, key)
        }
    }
    false
}

fn handle_dashboard_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Down | KeyCode::Char('j') => {
            if view_data.dashboard_cursor + 1 < view_data.skills.len() {
                view_data.dashboard_cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.dashboard_cursor = view_data.dashboard_cursor.saturating_sub(1);
        }
        KeyCode::Enter => {
            if let Some(skill) = view_data.skills.get(view_data.dashboard_cursor).cloned() {
                dispatch_nav(
                    state,
                    runtime,
                    view_data,
                    internal_tx,
                    options,
                    AppCommand::SelectSkill(skill),
                );
            }
        }
        KeyCode::Char('r') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::ViewReport);
        }
        KeyCode::Char('u') => {
            dispatch_nav(
                state,
                runtime,
                view_data,
                internal_tx,
                options,
                AppCommand::StartUpskilling,
            );
        }
        KeyCode::Char('c') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::AskCoach);
        }
        _ => {}
    }
}

fn handle_back_only_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    if matches!(key.code, KeyCode::Esc | KeyCode::Char('b')) {
        dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::GoBack);
    }
}

fn handle_hub_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::GoBack);
        }
        KeyCode::Tab => {
            view_data.hub.tab = view_data.hub.tab.toggle();
        }
        KeyCode::Down | KeyCode::Char('j') => {
            if view_data.hub.cursor + 1 < view_data.catalog.recommended.len() {
                view_data.hub.cursor += 1;
            }
        }
        KeyCode::Up | KeyCode::Char('k') => {
            view_data.hub.cursor = view_data.hub.cursor.saturating_sub(1);
        }
        KeyCode::Char('g') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::ViewSkillGap);
        }
        KeyCode::Char('c') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::AskCoach);
        }
        _ => {}
    }
}

fn handle_coach_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    if key.code == KeyCode::Char('g') && key.modifiers.contains(KeyModifiers::CONTROL) {
        dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::ViewSkillGap);
        return;
    }

    match key.code {
        KeyCode::Esc => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::GoBack);
        }
        KeyCode::Enter => {
            submit_coach_input(state, runtime, view_data, internal_tx, options);
        }
        KeyCode::Tab => {
            cycle_quick_prompt(view_data);
        }
        KeyCode::Backspace => {
            view_data.coach.input.pop();
        }
        KeyCode::Char(ch)
            if key.modifiers.is_empty() || key.modifiers == KeyModifiers::SHIFT =>
        {
            view_data.coach.input.push(ch);
        }
        _ => {}
    }
}

fn cycle_quick_prompt(view_data: &mut ViewData) {
    let prompts = &view_data.coach_content.quick_prompts;
    if prompts.is_empty() {
        return;
    }
    let index = view_data.coach.quick_prompt_cursor % prompts.len();
    view_data.coach.input = prompts[index].clone();
    view_data.coach.quick_prompt_cursor = index + 1;
}

fn submit_coach_input<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
) {
    let question = view_data.coach.input.trim().to_owned();
    if question.is_empty() || view_data.in_flight.is_some() {
        return;
    }

    let history: Vec<ChatTurn> = view_data
        .coach
        .transcript
        .iter()
        .map(|message| ChatTurn {
            speaker: message.speaker,
            text: message.text.clone(),
        })
        .collect();

    view_data.coach.transcript.push(ChatMessage {
        speaker: ChatSpeaker::User,
        text: question.clone(),
        clock: format_clock(OffsetDateTime::now_utc()),
    });
    view_data.coach.input.clear();

    start_coach_request(
        state,
        runtime,
        view_data,
        internal_tx,
        options,
        CoachRequest::Chat { question, history },
    );
}

fn handle_gap_key<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    key: KeyEvent,
) {
    match key.code {
        KeyCode::Esc | KeyCode::Char('b') => {
            dispatch_nav(state, runtime, view_data, internal_tx, options, AppCommand::GoBack);
        }
        KeyCode::Char('e') => {
            start_coach_request(
                state,
                runtime,
                view_data,
                internal_tx,
                options,
                CoachRequest::ExplainFit,
            );
        }
        KeyCode::Char('p') => {
            start_coach_request(
                state,
                runtime,
                view_data,
                internal_tx,
                options,
                CoachRequest::RegeneratePlan,
            );
        }
        _ => {}
    }
}

fn start_coach_request<R: AppRuntime>(
    state: &mut AppState,
    runtime: &mut R,
    view_data: &mut ViewData,
    internal_tx: &Sender<InternalEvent>,
    options: &UiOptions,
    request: CoachRequest,
) {
    if view_data.in_flight.is_some() {
        emit_status(state, view_data, internal_tx, options, "coach is busy");
        return;
    }

    view_data.coach.next_request_id = view_data.coach.next_request_id.saturating_add(1);
    let request_id = view_data.coach.next_request_id;
    view_data.in_flight = Some(CoachInFlight {
        request_id,
        kind: request.kind(),
    });

    if runtime
        .spawn_coach_request(request_id, &request, internal_tx.clone())
        .is_err()
    {
        // Same contract as a Failed event: keep whatever is on screen.
        view_data.in_flight = None;
    }
}

fn render(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) {
    // The single dispatch site: every Screen variant picks its presenter
    // here, and only CareerMobility escapes the shared page shell.
    match state.screen {
        Screen::CareerMobility => render_career_mobility(frame, frame.area(), view_data),
        Screen::Dashboard => {
            let body = render_shell(frame, state, view_data);
            render_body(frame, body, "talent dashboard", render_dashboard_text(view_data));
        }
        Screen::SkillDetail => {
            let body = render_shell(frame, state, view_data);
            render_body(
                frame,
                body,
                "skill detail",
                render_skill_detail_text(state, view_data),
            );
        }
        Screen::LearningHub => {
            let body = render_shell(frame, state, view_data);
            render_body(frame, body, "learning hub", render_learning_hub_text(view_data));
        }
        Screen::AiCoach => {
            let body = render_shell(frame, state, view_data);
            render_body(frame, body, "ai coach", render_ai_coach_text(view_data));
        }
        Screen::TargetRoleGap => {
            let body = render_shell(frame, state, view_data);
            render_body(
                frame,
                body,
                "target role gap",
                render_target_role_gap_text(view_data),
            );
        }
    }
}

/// Draw the shared chrome (header + status line) and return the body area.
fn render_shell(frame: &mut ratatui::Frame<'_>, state: &AppState, view_data: &ViewData) -> Rect {
    let layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(4),
            Constraint::Min(1),
            Constraint::Length(2),
        ])
        .split(frame.area());

    let header = Paragraph::new(render_header_text(view_data))
        .style(Style::default().fg(Color::White))
        .block(
            Block::default()
                .title(APP_TITLE)
                .borders(Borders::ALL)
                .title_style(Style::default().add_modifier(Modifier::BOLD)),
        );
    frame.render_widget(header, layout[0]);

    let status = Paragraph::new(status_text(state))
        .style(Style::default().fg(Color::Yellow))
        .block(Block::default().borders(Borders::TOP));
    frame.render_widget(status, layout[2]);

    layout[1]
}

fn render_body(frame: &mut ratatui::Frame<'_>, area: Rect, title: &str, text: String) {
    let body = Paragraph::new(text)
        .block(Block::default().borders(Borders::ALL).title(title.to_owned()));
    frame.render_widget(body, area);
}

fn render_career_mobility(frame: &mut ratatui::Frame<'_>, area: Rect, view_data: &ViewData) {
    let report = Paragraph::new(render_career_mobility_text(view_data)).block(
        Block::default()
            .title("career mobility profile")
            .borders(Borders::ALL)
            .style(Style::default().fg(Color::Cyan)),
    );
    frame.render_widget(report, area);
}

fn render_header_text(view_data: &ViewData) -> String {
    let profile = &view_data.profile;
    let wallet = &view_data.wallet;
    [
        format!(
            "{} | {} | {}",
            profile.name, profile.role, profile.organization
        ),
        format!(
            "{} | wallet: {} credits ({}) | profile updated: {}",
            profile.location,
            wallet.credits,
            wallet.level.label(),
            profile.last_updated
        ),
    ]
    .join("\n")
}

fn status_text(state: &AppState) -> String {
    match &state.status_line {
        Some(message) => message.clone(),
        None => screen_hint(state.screen).to_owned(),
    }
}

const fn screen_hint(screen: Screen) -> &'static str {
    match screen {
        Screen::Dashboard => {
            "[enter] skill detail  [r] report  [u] learning hub  [c] coach  [ctrl+q] quit"
        }
        Screen::SkillDetail => "[esc] back to dashboard",
        Screen::CareerMobility => "[esc] back to dashboard",
        Screen::LearningHub => "[tab] ongoing/completed  [g] skill gap  [c] coach  [esc] back",
        Screen::AiCoach => "[enter] send  [tab] quick prompt  [ctrl+g] skill gap  [esc] back",
        Screen::TargetRoleGap => "[e] explain fit  [p] regenerate plan  [esc] back",
    }
}

fn render_dashboard_text(view_data: &ViewData) -> String {
    let mut lines = vec![
        "Real-time skills analysis and learning opportunities.".to_owned(),
        String::new(),
        format!(
            "Learning Wallet: {} credits ({})",
            view_data.wallet.credits,
            view_data.wallet.level.label()
        ),
        String::new(),
        "Core Skill Domains".to_owned(),
    ];

    for (index, skill) in view_data.skills.iter().enumerate() {
        let marker = if index == view_data.dashboard_cursor {
            ">"
        } else {
            " "
        };
        lines.push(format!(
            "{marker} {:<24} {}  {:>3}/100  {:<10} {}",
            skill.name,
            score_bar(skill.score),
            skill.score,
            skill.level.label(),
            skill.trend.label()
        ));
    }

    if view_data.skills.is_empty() {
        lines.push("(no skill data loaded)".to_owned());
    }

    lines.join("\n")
}

fn render_skill_detail_text(state: &AppState, view_data: &ViewData) -> String {
    let Some(skill) = &state.selected_skill else {
        return "(no skill selected)".to_owned();
    };

    let mut lines = vec![
        format!("{} - Detailed View", skill.name),
        String::new(),
        format!(
            "Score {:>3}/100  {}  Last updated: {}",
            skill.score,
            skill.level.label(),
            view_data.profile.last_updated
        ),
    ];

    if let Some(top) = view_data.sub_skills.iter().max_by_key(|sub| sub.score) {
        lines.push(format!(
            "Top competency: {} ({}). Consider mentoring junior staff to earn extra Learning Credits.",
            top.name, top.score
        ));
    }

    lines.push(String::new());
    lines.push(format!(
        "Skill Breakdown ({} competencies)",
        view_data.sub_skills.len()
    ));
    for sub in &view_data.sub_skills {
        lines.push(format!(
            "  {:<28} {}  {:>3}  {}",
            sub.name,
            score_bar(sub.score),
            sub.score,
            sub.status.label()
        ));
    }
    if view_data.sub_skills.is_empty() {
        lines.push("  (no breakdown available)".to_owned());
    }

    lines.join("\n")
}

fn render_learning_hub_text(view_data: &ViewData) -> String {
    let wallet = &view_data.wallet;
    let mut lines = vec![
        format!(
            "Learning Wallet: {} credits available ({})",
            wallet.credits,
            wallet.level.label()
        ),
    ];

    if let (Some(needed), Some(next)) = (wallet.credits_to_next_level(), wallet.level.next()) {
        lines.push(format!(
            "Level progress {}  {}%  ({} credits to {})",
            score_bar(wallet.level_progress_percent()),
            wallet.level_progress_percent(),
            needed,
            next.label()
        ));
    }

    if let Some(best) = view_data.mobility.role_fits.first() {
        lines.push(String::new());
        lines.push(format!(
            "Target Role: {} ({}% match)  [g] view skill gap analysis",
            best.title, best.score
        ));
    }

    lines.push(String::new());
    lines.push("Recommended Learning Paths".to_owned());
    for (index, course) in view_data.catalog.recommended.iter().enumerate() {
        let marker = if index == view_data.hub.cursor { ">" } else { " " };
        lines.push(format!(
            "{marker} {:<36} {:<11} {:>2} credits  {}",
            course.title,
            course.domain.label(),
            course.credits,
            course.duration
        ));
    }

    lines.push(String::new());
    lines.push(format!("My Learning [{}]", view_data.hub.tab.label()));
    let mine: Vec<&Course> = view_data
        .catalog
        .enrolled
        .iter()
        .filter(|course| view_data.hub.tab.matches(course.status))
        .collect();
    for course in &mine {
        let progress = course.progress_percent.unwrap_or(0);
        lines.push(format!(
            "  {:<28} {:<11} {}  {:>3}%",
            course.title,
            course.domain.label(),
            score_bar(progress),
            progress
        ));
    }
    if mine.is_empty() {
        lines.push("  No courses found.".to_owned());
    }

    lines.join("\n")
}

fn render_ai_coach_text(view_data: &ViewData) -> String {
    let mut lines = vec![
        "AI Career & Skills Coach".to_owned(),
        "Personalised guidance based on your talent profile".to_owned(),
        String::new(),
        "Skill Snapshot".to_owned(),
    ];
    for skill in &view_data.skills {
        lines.push(format!(
            "  {:<24} {}  {:>3}",
            skill.name,
            score_bar(skill.score),
            skill.score
        ));
    }

    lines.push(String::new());
    for message in &view_data.coach.transcript {
        let speaker = match message.speaker {
            ChatSpeaker::User => "you",
            ChatSpeaker::Coach => "coach",
        };
        lines.push(format!("[{}] {}", speaker, message.clock));
        for text_line in message.text.lines() {
            lines.push(format!("  {text_line}"));
        }
    }
    if view_data
        .in_flight
        .is_some_and(|in_flight| in_flight.kind == CoachRequestKind::Chat)
    {
        lines.push("[coach] thinking...".to_owned());
    }

    lines.push(String::new());
    if !view_data.coach_content.quick_prompts.is_empty() {
        lines.push(format!(
            "Quick prompts: {}",
            view_data.coach_content.quick_prompts.join(" | ")
        ));
    }
    lines.push(format!("> {}_", view_data.coach.input));

    if !view_data.coach_content.actions.is_empty() {
        lines.push(String::new());
        lines.push("Recommended Actions".to_owned());
        for action in &view_data.coach_content.actions {
            lines.push(format!(
                "  [{}] {} - {}",
                action.kind.label(),
                action.title,
                action.detail
            ));
        }
    }

    lines.join("\n")
}

fn render_target_role_gap_text(view_data: &ViewData) -> String {
    let report = &view_data.gap;
    let explaining = view_data
        .in_flight
        .is_some_and(|in_flight| in_flight.kind == CoachRequestKind::ExplainFit);
    let regenerating = view_data
        .in_flight
        .is_some_and(|in_flight| in_flight.kind == CoachRequestKind::RegeneratePlan);

    let mut lines = vec![
        format!("Target Role: {}", report.target_role),
        format!(
            "{}% match  {}  {}",
            report.match_percent, report.fit_caption, report.fit_headline
        ),
        String::new(),
        format!("\"{}\"", report.explanation),
    ];
    if explaining {
        lines.push("Analyzing...".to_owned());
    }

    lines.push(String::new());
    lines.push("Skill Gap Analysis (target vs current)".to_owned());
    for group in &report.domains {
        lines.push(format!("{}:", group.domain));
        for item in &group.items {
            lines.push(format!(
                "  {:<28} req {:>3}  you {:>3}  {}  {}",
                item.skill,
                item.required,
                item.current,
                score_bar(item.completion_percent()),
                item.level.label()
            ));
        }
    }

    lines.push(String::new());
    lines.push(format!("Time to Readiness: {}", report.readiness_window));
    lines.push(format!("\"{}\"", report.readiness_note));

    lines.push(String::new());
    lines.push("AI Action Plan".to_owned());
    for (index, step) in report.action_plan.iter().enumerate() {
        lines.push(format!("  {}. {}", index + 1, step));
    }
    if regenerating {
        lines.push("Regenerating...".to_owned());
    }

    lines.join("\n")
}

fn render_career_mobility_text(view_data: &ViewData) -> String {
    let mut lines = vec![
        format!("{} | Personalised Role Fit Map", view_data.profile.name),
        String::new(),
        "Suggested Role Fit".to_owned(),
    ];
    for fit in &view_data.mobility.role_fits {
        lines.push(format!(
            "  {:<24} {:<18} {:>3}%  [{}]",
            fit.title,
            fit.caption,
            fit.score,
            fit.band.label()
        ));
    }

    lines.push(String::new());
    lines.push("Emerging Opportunities".to_owned());
    for role in &view_data.mobility.emerging_roles {
        lines.push(format!("  * {role}"));
    }

    lines.push(String::new());
    lines.push("[esc] back to dashboard".to_owned());
    lines.join("\n")
}

fn score_bar(percent: i64) -> String {
    let clamped = percent.clamp(0, 100) as usize;
    let filled = (clamped * SCORE_BAR_WIDTH).div_ceil(100).min(SCORE_BAR_WIDTH);
    format!(
        "[{}{}]",
        "#".repeat(filled),
        "-".repeat(SCORE_BAR_WIDTH - filled)
    )
}

fn format_clock(now: OffsetDateTime) -> String {
    now.time()
        .format(&time::macros::format_description!(
            "[hour repr:12 padding:none]:[minute] [period]"
        ))
        .unwrap_or_else(|_| now.time().to_string())
}
