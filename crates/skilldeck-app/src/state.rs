// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use crate::{Screen, Skill, SkillId};

/// Single source of truth for what is on screen. Owned by the root of the
/// application and passed down by handle; mutated only through [`dispatch`].
///
/// `selected_skill` is `Some` exactly while `screen` is
/// [`Screen::SkillDetail`], except during the transition-out window after
/// [`AppCommand::GoBack`]: the screen flips back to the dashboard
/// immediately while the selection stays populated until the driver
/// dispatches [`AppCommand::CommitExit`], so the outgoing detail view can
/// still read it during its exit frame.
///
/// [`dispatch`]: AppState::dispatch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    pub screen: Screen,
    pub selected_skill: Option<Skill>,
    pub status_line: Option<String>,
}

impl Default for AppState {
    fn default() -> Self {
        Self {
            screen: Screen::Dashboard,
            selected_skill: None,
            status_line: None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppCommand {
    /// Open the drill-down for one skill domain.
    SelectSkill(Skill),
    /// Begin-exit: return to the dashboard now, clear the selection later.
    GoBack,
    /// Commit-exit: drop the selection. Idempotent; safe to dispatch more
    /// than once and with no selection present.
    CommitExit,
    ViewReport,
    StartUpskilling,
    AskCoach,
    ViewSkillGap,
    SetStatus(String),
    ClearStatus,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    ScreenChanged(Screen),
    SkillSelected(SkillId),
    /// Emitted by `GoBack`. The driver owning the clock reacts by
    /// scheduling a `CommitExit` dispatch after its configured delay.
    SelectionClearScheduled,
    SelectionCleared,
    StatusUpdated(String),
    StatusCleared,
}

impl AppState {
    pub fn dispatch(&mut self, command: AppCommand) -> Vec<AppEvent> {
        match command {
            AppCommand::SelectSkill(skill) => {
                let id = skill.id;
                self.selected_skill = Some(skill);
                self.set_screen(Screen::SkillDetail);
                vec![
                    AppEvent::SkillSelected(id),
                    AppEvent::ScreenChanged(self.screen),
                ]
            }
            AppCommand::GoBack => {
                self.set_screen(Screen::Dashboard);
                vec![
                    AppEvent::ScreenChanged(self.screen),
                    AppEvent::SelectionClearScheduled,
                ]
            }
            AppCommand::CommitExit => match self.selected_skill.take() {
                Some(_) => vec![AppEvent::SelectionCleared],
                None => Vec::new(),
            },
            AppCommand::ViewReport => {
                self.set_screen(Screen::CareerMobility);
                vec![AppEvent::ScreenChanged(self.screen)]
            }
            AppCommand::StartUpskilling => {
                self.set_screen(Screen::LearningHub);
                vec![AppEvent::ScreenChanged(self.screen)]
            }
            AppCommand::AskCoach => {
                self.set_screen(Screen::AiCoach);
                vec![AppEvent::ScreenChanged(self.screen)]
            }
            AppCommand::ViewSkillGap => {
                self.set_screen(Screen::TargetRoleGap);
                vec![AppEvent::ScreenChanged(self.screen)]
            }
            AppCommand::SetStatus(message) => {
                self.status_line = Some(message.clone());
                vec![AppEvent::StatusUpdated(message)]
            }
            AppCommand::ClearStatus => {
                self.status_line = None;
                vec![AppEvent::StatusCleared]
            }
        }
    }

    fn set_screen(&mut self, screen: Screen) {
        self.screen = screen;
    }
}
