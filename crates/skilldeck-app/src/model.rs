// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use serde::{Deserialize, Serialize};

use crate::ids::*;

/// Top-level view identifiers. Exactly one screen is active at a time;
/// the controller in [`crate::state`] is the only component that changes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Screen {
    Dashboard,
    SkillDetail,
    CareerMobility,
    LearningHub,
    AiCoach,
    TargetRoleGap,
}

impl Screen {
    pub const ALL: [Self; 6] = [
        Self::Dashboard,
        Self::SkillDetail,
        Self::CareerMobility,
        Self::LearningHub,
        Self::AiCoach,
        Self::TargetRoleGap,
    ];

    pub const fn label(self) -> &'static str {
        match self {
            Self::Dashboard => "dashboard",
            Self::SkillDetail => "skill detail",
            Self::CareerMobility => "career mobility",
            Self::LearningHub => "learning hub",
            Self::AiCoach => "ai coach",
            Self::TargetRoleGap => "target role gap",
        }
    }

    /// Career Mobility is a full-screen replacement view: it owns the whole
    /// viewport and the shared page shell is not drawn while it is active.
    pub const fn uses_page_shell(self) -> bool {
        !matches!(self, Self::CareerMobility)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SkillLevel {
    Developing,
    Proficient,
    Advanced,
    Expert,
}

impl SkillLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Developing => "developing",
            Self::Proficient => "proficient",
            Self::Advanced => "advanced",
            Self::Expert => "expert",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "developing" => Some(Self::Developing),
            "proficient" => Some(Self::Proficient),
            "advanced" => Some(Self::Advanced),
            "expert" => Some(Self::Expert),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Developing => "Developing",
            Self::Proficient => "Proficient",
            Self::Advanced => "Advanced",
            Self::Expert => "Expert",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Trend {
    Up,
    Down,
    Stable,
}

impl Trend {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Up => "up",
            Self::Down => "down",
            Self::Stable => "stable",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "up" => Some(Self::Up),
            "down" => Some(Self::Down),
            "stable" => Some(Self::Stable),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Up => "Improving",
            Self::Down => "Needs Focus",
            Self::Stable => "Stable",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SubSkillStatus {
    Strong,
    Good,
    Improving,
    NeedsFocus,
}

impl SubSkillStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strong => "strong",
            Self::Good => "good",
            Self::Improving => "improving",
            Self::NeedsFocus => "needs_focus",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "strong" => Some(Self::Strong),
            "good" => Some(Self::Good),
            "improving" => Some(Self::Improving),
            "needs_focus" => Some(Self::NeedsFocus),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Strong => "Strong",
            Self::Good => "Good",
            Self::Improving => "Improving",
            Self::NeedsFocus => "Needs Focus",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub enum WalletLevel {
    #[default]
    Bronze,
    Silver,
    Gold,
    Platinum,
}

impl WalletLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Bronze => "bronze",
            Self::Silver => "silver",
            Self::Gold => "gold",
            Self::Platinum => "platinum",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "bronze" => Some(Self::Bronze),
            "silver" => Some(Self::Silver),
            "gold" => Some(Self::Gold),
            "platinum" => Some(Self::Platinum),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Bronze => "Bronze",
            Self::Silver => "Silver",
            Self::Gold => "Gold",
            Self::Platinum => "Platinum",
        }
    }

    pub const fn next(self) -> Option<Self> {
        match self {
            Self::Bronze => Some(Self::Silver),
            Self::Silver => Some(Self::Gold),
            Self::Gold => Some(Self::Platinum),
            Self::Platinum => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseDomain {
    Technical,
    Behavioural,
    Digital,
    Leadership,
}

impl CourseDomain {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Technical => "technical",
            Self::Behavioural => "behavioural",
            Self::Digital => "digital",
            Self::Leadership => "leadership",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "technical" => Some(Self::Technical),
            "behavioural" => Some(Self::Behavioural),
            "digital" => Some(Self::Digital),
            "leadership" => Some(Self::Leadership),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Technical => "Technical",
            Self::Behavioural => "Behavioural",
            Self::Digital => "Digital",
            Self::Leadership => "Leadership",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CourseStatus {
    NotStarted,
    Ongoing,
    Completed,
}

impl CourseStatus {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::NotStarted => "not_started",
            Self::Ongoing => "ongoing",
            Self::Completed => "completed",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "not_started" => Some(Self::NotStarted),
            "ongoing" => Some(Self::Ongoing),
            "completed" => Some(Self::Completed),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FitBand {
    BestFit,
    Good,
    ViewGaps,
}

impl FitBand {
    pub const fn label(self) -> &'static str {
        match self {
            Self::BestFit => "Best Fit",
            Self::Good => "Good",
            Self::ViewGaps => "View Gaps",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum GapLevel {
    Small,
    Moderate,
    High,
}

impl GapLevel {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Small => "small",
            Self::Moderate => "moderate",
            Self::High => "high",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "small" => Some(Self::Small),
            "moderate" => Some(Self::Moderate),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::Small => "Small Gap",
            Self::Moderate => "Moderate Gap",
            Self::High => "High Gap",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ChatSpeaker {
    User,
    Coach,
}

/// A skill domain as shown on the dashboard: a named competency area with a
/// 0..=100 score, a qualitative level, and a trend tag.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Skill {
    pub id: SkillId,
    pub name: String,
    pub score: i64,
    pub level: SkillLevel,
    pub trend: Trend,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubSkill {
    pub id: SubSkillId,
    pub skill_id: SkillId,
    pub name: String,
    pub score: i64,
    pub status: SubSkillStatus,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct UserProfile {
    pub name: String,
    pub role: String,
    pub organization: String,
    pub location: String,
    pub last_updated: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct LearningWallet {
    pub level: WalletLevel,
    pub credits: i64,
    /// Credit total at which the next level is reached; `None` at the cap.
    pub next_level_threshold: Option<i64>,
}

impl LearningWallet {
    pub fn credits_to_next_level(&self) -> Option<i64> {
        self.next_level_threshold
            .map(|threshold| (threshold - self.credits).max(0))
    }

    pub fn level_progress_percent(&self) -> i64 {
        match self.next_level_threshold {
            Some(threshold) if threshold > 0 => {
                ((self.credits * 100) / threshold).clamp(0, 100)
            }
            _ => 100,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    pub id: CourseId,
    pub title: String,
    pub description: String,
    pub domain: CourseDomain,
    pub credits: i64,
    pub duration: String,
    pub status: CourseStatus,
    pub progress_percent: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleFit {
    pub title: String,
    pub caption: String,
    pub score: i64,
    pub band: FitBand,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct MobilityReport {
    pub role_fits: Vec<RoleFit>,
    pub emerging_roles: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GapItem {
    pub skill: String,
    pub required: i64,
    pub current: i64,
    pub level: GapLevel,
}

impl GapItem {
    /// Current score as a share of the required score, capped at 100.
    pub fn completion_percent(&self) -> i64 {
        if self.required <= 0 {
            return 100;
        }
        ((self.current * 100) / self.required).clamp(0, 100)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DomainGapGroup {
    pub domain: String,
    pub items: Vec<GapItem>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct GapReport {
    pub target_role: String,
    pub current_role: String,
    pub match_percent: i64,
    pub fit_caption: String,
    pub fit_headline: String,
    pub explanation: String,
    pub action_plan: Vec<String>,
    pub readiness_window: String,
    pub readiness_note: String,
    pub domains: Vec<DomainGapGroup>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatSeedMessage {
    pub speaker: ChatSpeaker,
    pub text: String,
    pub clock: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CoachActionKind {
    Course,
    Activity,
    CareerGoal,
}

impl CoachActionKind {
    pub const fn label(self) -> &'static str {
        match self {
            Self::Course => "Course",
            Self::Activity => "Activity",
            Self::CareerGoal => "Career Goal",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CoachAction {
    pub kind: CoachActionKind,
    pub title: String,
    pub detail: String,
}

/// Everything the coach screen needs besides the live transcript: the
/// seeded conversation, the quick prompts, the offline fallback reply the
/// runtime serves when no collaborator is configured, and the recommended
/// action cards.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CoachContent {
    pub seed_transcript: Vec<ChatSeedMessage>,
    pub quick_prompts: Vec<String>,
    pub canned_reply: String,
    pub actions: Vec<CoachAction>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CourseCatalog {
    pub recommended: Vec<Course>,
    pub enrolled: Vec<Course>,
}

#[cfg(test)]
mod tests {
    use super::{GapItem, GapLevel, LearningWallet, Screen, SkillLevel, WalletLevel};

    #[test]
    fn skill_level_parse_round_trip() {
        for level in [
            SkillLevel::Developing,
            SkillLevel::Proficient,
            SkillLevel::Advanced,
            SkillLevel::Expert,
        ] {
            assert_eq!(SkillLevel::parse(level.as_str()), Some(level));
        }
        assert_eq!(SkillLevel::parse("grandmaster"), None);
    }

    #[test]
    fn wallet_progress_math() {
        let wallet = LearningWallet {
            level: WalletLevel::Bronze,
            credits: 120,
            next_level_threshold: Some(160),
        };
        assert_eq!(wallet.credits_to_next_level(), Some(40));
        assert_eq!(wallet.level_progress_percent(), 75);

        let capped = LearningWallet {
            level: WalletLevel::Platinum,
            credits: 900,
            next_level_threshold: None,
        };
        assert_eq!(capped.credits_to_next_level(), None);
        assert_eq!(capped.level_progress_percent(), 100);
    }

    #[test]
    fn gap_completion_is_clamped() {
        let item = GapItem {
            skill: "Coaching Juniors".to_owned(),
            required: 75,
            current: 45,
            level: GapLevel::High,
        };
        assert_eq!(item.completion_percent(), 60);

        let overshoot = GapItem {
            skill: "Financial Reporting".to_owned(),
            required: 80,
            current: 92,
            level: GapLevel::Small,
        };
        assert_eq!(overshoot.completion_percent(), 100);
    }

    #[test]
    fn only_career_mobility_replaces_the_page_shell() {
        for screen in Screen::ALL {
            assert_eq!(
                screen.uses_page_shell(),
                screen != Screen::CareerMobility,
                "unexpected shell flag for {}",
                screen.label()
            );
        }
    }
}
