// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

pub mod validation;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use skilldeck_app::{
    ChatSeedMessage, ChatSpeaker, CoachAction, CoachActionKind, CoachContent, Course,
    CourseCatalog, CourseDomain, CourseId, CourseStatus, DomainGapGroup, FitBand, GapItem,
    GapLevel, GapReport, LearningWallet, MobilityReport, RoleFit, Skill, SkillId, SkillLevel,
    SubSkill, SubSkillId, SubSkillStatus, Trend, UserProfile, WalletLevel,
};
use std::fs;
use std::path::Path;

pub use validation::validate_pack_path;

pub const APP_NAME: &str = "skilldeck";

/// The read-only content a session is populated with once at startup:
/// profile, wallet, skill scores and breakdowns, the course catalogue, the
/// mobility report, the target-role gap report, and the coach script. The
/// navigation controller never writes to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ContentPack {
    pub profile: UserProfile,
    pub wallet: LearningWallet,
    pub skills: Vec<Skill>,
    pub sub_skills: Vec<SubSkill>,
    pub recommended_courses: Vec<Course>,
    pub enrolled_courses: Vec<Course>,
    pub mobility: MobilityReport,
    pub gap_report: GapReport,
    pub coach: CoachContent,
}

impl ContentPack {
    /// Decode a pack from JSON and validate it.
    pub fn from_json_str(raw: &str) -> Result<Self> {
        let pack: Self = serde_json::from_str(raw).context("decode content pack JSON")?;
        pack.validate()?;
        Ok(pack)
    }

    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("read content pack {}", path.display()))?;
        Self::from_json_str(&raw)
            .with_context(|| format!("load content pack {}", path.display()))
    }

    pub fn validate(&self) -> Result<()> {
        validation::validate_pack(self)
    }

    pub fn sub_skills_for(&self, skill: SkillId) -> Vec<SubSkill> {
        self.sub_skills
            .iter()
            .filter(|sub| sub.skill_id == skill)
            .cloned()
            .collect()
    }

    pub fn course_catalog(&self) -> CourseCatalog {
        CourseCatalog {
            recommended: self.recommended_courses.clone(),
            enrolled: self.enrolled_courses.clone(),
        }
    }

    /// The built-in pack shipped with the binary.
    pub fn builtin() -> Self {
        Self {
            profile: UserProfile {
                name: "Ahmed Khan".to_owned(),
                role: "Accountant".to_owned(),
                organization: "Small Finance Co.".to_owned(),
                location: "Sharjah, UAE".to_owned(),
                last_updated: "Today".to_owned(),
            },
            wallet: LearningWallet {
                level: WalletLevel::Bronze,
                credits: 120,
                next_level_threshold: Some(160),
            },
            skills: vec![
                skill(1, "Technical Skills", 85, SkillLevel::Advanced, Trend::Stable),
                skill(2, "Behavioural Skills", 72, SkillLevel::Proficient, Trend::Up),
                skill(3, "Digital Literacy", 64, SkillLevel::Developing, Trend::Up),
                skill(4, "Leadership Skills", 45, SkillLevel::Developing, Trend::Down),
            ],
            sub_skills: vec![
                sub_skill(1, 1, "Financial Reporting", 92, SubSkillStatus::Strong),
                sub_skill(2, 1, "UAE VAT Compliance", 88, SubSkillStatus::Strong),
                sub_skill(3, 1, "Budget Forecasting", 76, SubSkillStatus::Good),
                sub_skill(4, 1, "Internal Controls", 65, SubSkillStatus::Improving),
                sub_skill(5, 1, "Risk & Audit Readiness", 48, SubSkillStatus::NeedsFocus),
                sub_skill(6, 2, "Stakeholder Communication", 70, SubSkillStatus::Good),
                sub_skill(7, 2, "Problem Solving", 72, SubSkillStatus::Good),
                sub_skill(8, 3, "Excel / Sheets Mastery", 70, SubSkillStatus::Good),
                sub_skill(9, 3, "Financial BI Tools", 60, SubSkillStatus::Improving),
                sub_skill(10, 3, "Cloud Accounting Software", 58, SubSkillStatus::Improving),
                sub_skill(11, 4, "Coaching Juniors", 45, SubSkillStatus::NeedsFocus),
                sub_skill(12, 4, "Decision Making", 55, SubSkillStatus::Improving),
            ],
            recommended_courses: vec![
                Course {
                    id: CourseId::new(1),
                    title: "Advanced VAT Compliance (UAE)".to_owned(),
                    description: "Master the intricacies of UAE VAT laws, filing procedures, and common compliance pitfalls for finance professionals.".to_owned(),
                    domain: CourseDomain::Technical,
                    credits: 30,
                    duration: "4 weeks".to_owned(),
                    status: CourseStatus::NotStarted,
                    progress_percent: None,
                },
                Course {
                    id: CourseId::new(2),
                    title: "Financial Controls & Risk Awareness".to_owned(),
                    description: "Learn to design and implement robust internal controls to mitigate financial risks in SME environments.".to_owned(),
                    domain: CourseDomain::Technical,
                    credits: 25,
                    duration: "2 weeks".to_owned(),
                    status: CourseStatus::NotStarted,
                    progress_percent: None,
                },
                Course {
                    id: CourseId::new(3),
                    title: "Business Communication for Finance".to_owned(),
                    description: "Enhance your ability to communicate complex financial data to non-finance stakeholders effectively.".to_owned(),
                    domain: CourseDomain::Behavioural,
                    credits: 20,
                    duration: "1 week".to_owned(),
                    status: CourseStatus::NotStarted,
                    progress_percent: None,
                },
                Course {
                    id: CourseId::new(4),
                    title: "Digital Tools for Accountants".to_owned(),
                    description: "Introduction to modern cloud accounting software and automation tools transforming the industry.".to_owned(),
                    domain: CourseDomain::Digital,
                    credits: 15,
                    duration: "3 days".to_owned(),
                    status: CourseStatus::NotStarted,
                    progress_percent: None,
                },
            ],
            enrolled_courses: vec![
                enrolled(101, "Intro to AI in Finance", CourseDomain::Digital, 15, "2 weeks", CourseStatus::Ongoing, 65),
                enrolled(102, "Ethics in Accounting", CourseDomain::Behavioural, 10, "1 week", CourseStatus::Ongoing, 20),
                enrolled(201, "Excel Mastery 2024", CourseDomain::Digital, 20, "3 weeks", CourseStatus::Completed, 100),
                enrolled(202, "Basic VAT Principles", CourseDomain::Technical, 15, "2 weeks", CourseStatus::Completed, 100),
            ],
            mobility: MobilityReport {
                role_fits: vec![
                    RoleFit {
                        title: "Senior Accountant".to_owned(),
                        caption: "Accountant".to_owned(),
                        score: 87,
                        band: FitBand::BestFit,
                    },
                    RoleFit {
                        title: "Financial Analyst".to_owned(),
                        caption: "Finance Executive".to_owned(),
                        score: 71,
                        band: FitBand::Good,
                    },
                    RoleFit {
                        title: "Compliance Officer".to_owned(),
                        caption: "View Gaps".to_owned(),
                        score: 63,
                        band: FitBand::ViewGaps,
                    },
                ],
                emerging_roles: vec![
                    "Trusted ESG Specialist".to_owned(),
                    "SME Finance Advisor".to_owned(),
                    "Digital Finance Officer".to_owned(),
                ],
            },
            gap_report: GapReport {
                target_role: "Senior Accountant".to_owned(),
                current_role: "Accountant".to_owned(),
                match_percent: 78,
                fit_caption: "Good Fit".to_owned(),
                fit_headline: "Strong Potential".to_owned(),
                explanation: "You already meet most technical requirements for a Senior Accountant. Your main gaps are in risk & audit readiness and people leadership, which are critical for the senior level.".to_owned(),
                action_plan: vec![
                    "Enroll in 'Financial Controls & Risk Awareness' (25 credits)".to_owned(),
                    "Take 'Digital Tools for Accountants' (15 credits) to bridge the tech gap".to_owned(),
                    "Join one internal project where you present monthly financials to leadership".to_owned(),
                    "Complete a short leadership micro-course on giving feedback".to_owned(),
                ],
                readiness_window: "4-6 Months".to_owned(),
                readiness_note: "If you complete 2 courses and apply skills in a project, you could be ready for Senior Accountant in 4-6 months.".to_owned(),
                domains: vec![
                    DomainGapGroup {
                        domain: "Technical Skills".to_owned(),
                        items: vec![
                            gap("Financial Reporting", 90, 88, GapLevel::Small),
                            gap("UAE VAT Compliance", 85, 75, GapLevel::Moderate),
                            gap("Risk & Audit Readiness", 85, 60, GapLevel::High),
                        ],
                    },
                    DomainGapGroup {
                        domain: "Behavioural Skills".to_owned(),
                        items: vec![
                            gap("Stakeholder Communication", 80, 70, GapLevel::Moderate),
                            gap("Problem Solving", 80, 72, GapLevel::Small),
                        ],
                    },
                    DomainGapGroup {
                        domain: "Digital Literacy".to_owned(),
                        items: vec![
                            gap("Excel / Sheets Mastery", 85, 70, GapLevel::Moderate),
                            gap("Financial BI Tools", 80, 60, GapLevel::High),
                        ],
                    },
                    DomainGapGroup {
                        domain: "Leadership Skills".to_owned(),
                        items: vec![
                            gap("Coaching Juniors", 75, 45, GapLevel::High),
                            gap("Decision Making", 80, 55, GapLevel::High),
                        ],
                    },
                ],
            },
            coach: CoachContent {
                seed_transcript: vec![
                    ChatSeedMessage {
                        speaker: ChatSpeaker::User,
                        text: "How can I move towards a Senior Accountant role?".to_owned(),
                        clock: "10:30 AM".to_owned(),
                    },
                    ChatSeedMessage {
                        speaker: ChatSpeaker::Coach,
                        text: "Based on your current profile, you're 87% of the way there! To bridge the gap to Senior Accountant, I recommend focusing on these key areas:\n\n1. Risk & Audit Readiness (Currently 'Needs Focus')\n2. Leadership Skills (Currently 'Developing')\n\nI've found some learning paths that fit your schedule.".to_owned(),
                        clock: "10:30 AM".to_owned(),
                    },
                ],
                quick_prompts: vec![
                    "Where are my biggest gaps?".to_owned(),
                    "What should I learn next?".to_owned(),
                    "How can I reach the next level?".to_owned(),
                ],
                canned_reply: "That's a great question. Based on your 'Technical Skills' score of 85, you are well-positioned. I'd suggest starting with the 'Financial Controls' module to boost your audit readiness score specifically.".to_owned(),
                actions: vec![
                    CoachAction {
                        kind: CoachActionKind::Course,
                        title: "Financial Controls & Risk Awareness".to_owned(),
                        detail: "25 Credits / Technical".to_owned(),
                    },
                    CoachAction {
                        kind: CoachActionKind::Activity,
                        title: "Improve Leadership".to_owned(),
                        detail: "Join internal project as finance lead".to_owned(),
                    },
                    CoachAction {
                        kind: CoachActionKind::CareerGoal,
                        title: "Target: Senior Accountant".to_owned(),
                        detail: "Status: 87% Match".to_owned(),
                    },
                ],
            },
        }
    }
}

fn skill(id: i64, name: &str, score: i64, level: SkillLevel, trend: Trend) -> Skill {
    Skill {
        id: SkillId::new(id),
        name: name.to_owned(),
        score,
        level,
        trend,
    }
}

fn sub_skill(id: i64, skill_id: i64, name: &str, score: i64, status: SubSkillStatus) -> SubSkill {
    SubSkill {
        id: SubSkillId::new(id),
        skill_id: SkillId::new(skill_id),
        name: name.to_owned(),
        score,
        status,
    }
}

fn enrolled(
    id: i64,
    title: &str,
    domain: CourseDomain,
    credits: i64,
    duration: &str,
    status: CourseStatus,
    progress: i64,
) -> Course {
    Course {
        id: CourseId::new(id),
        title: title.to_owned(),
        description: String::new(),
        domain,
        credits,
        duration: duration.to_owned(),
        status,
        progress_percent: Some(progress),
    }
}

fn gap(skill: &str, required: i64, current: i64, level: GapLevel) -> GapItem {
    GapItem {
        skill: skill.to_owned(),
        required,
        current,
        level,
    }
}

#[cfg(test)]
mod tests {
    use super::ContentPack;
    use skilldeck_app::{CourseStatus, SkillId, SubSkillStatus};

    #[test]
    fn builtin_pack_validates() {
        let pack = ContentPack::builtin();
        pack.validate().expect("built-in pack must be valid");
    }

    #[test]
    fn builtin_pack_matches_distilled_profile() {
        let pack = ContentPack::builtin();
        assert_eq!(pack.profile.name, "Ahmed Khan");
        assert_eq!(pack.wallet.credits, 120);
        assert_eq!(pack.skills.len(), 4);
        assert_eq!(pack.skills[2].id, SkillId::new(3));
        assert_eq!(pack.skills[2].name, "Digital Literacy");
        assert_eq!(pack.skills[2].score, 64);
    }

    #[test]
    fn sub_skills_are_grouped_by_parent() {
        let pack = ContentPack::builtin();
        let technical = pack.sub_skills_for(SkillId::new(1));
        assert_eq!(technical.len(), 5);
        assert_eq!(technical[0].name, "Financial Reporting");
        assert_eq!(technical[4].status, SubSkillStatus::NeedsFocus);

        let leadership = pack.sub_skills_for(SkillId::new(4));
        assert_eq!(leadership.len(), 2);
        assert!(pack.sub_skills_for(SkillId::new(99)).is_empty());
    }

    #[test]
    fn course_catalog_splits_recommended_and_enrolled() {
        let catalog = ContentPack::builtin().course_catalog();
        assert_eq!(catalog.recommended.len(), 4);
        assert!(
            catalog
                .recommended
                .iter()
                .all(|course| course.status == CourseStatus::NotStarted)
        );
        assert_eq!(catalog.enrolled.len(), 4);
        assert_eq!(
            catalog
                .enrolled
                .iter()
                .filter(|course| course.status == CourseStatus::Ongoing)
                .count(),
            2
        );
    }

    #[test]
    fn json_round_trip_preserves_the_pack() {
        let pack = ContentPack::builtin();
        let raw = serde_json::to_string(&pack).expect("encode pack");
        let decoded = ContentPack::from_json_str(&raw).expect("decode pack");
        assert_eq!(decoded, pack);
    }
}
