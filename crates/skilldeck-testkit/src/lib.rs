// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::Result;
use skilldeck_app::{
    Course, CourseDomain, CourseId, CourseStatus, GapItem, GapLevel, LearningWallet, Skill,
    SkillId, SkillLevel, SubSkill, SubSkillId, SubSkillStatus, Trend, UserProfile, WalletLevel,
};
use std::path::PathBuf;

const SKILL_AREAS: [&str; 8] = [
    "Technical Skills",
    "Behavioural Skills",
    "Digital Literacy",
    "Leadership Skills",
    "Analytical Skills",
    "Regulatory Knowledge",
    "Communication",
    "Project Delivery",
];

const COMPETENCIES: [&str; 12] = [
    "Financial Reporting",
    "Budget Forecasting",
    "Internal Controls",
    "Risk & Audit Readiness",
    "Stakeholder Communication",
    "Problem Solving",
    "Excel / Sheets Mastery",
    "Financial BI Tools",
    "Cloud Accounting Software",
    "Coaching Juniors",
    "Decision Making",
    "Process Documentation",
];

const COURSE_TOPICS: [&str; 10] = [
    "VAT Compliance Essentials",
    "Financial Controls & Risk Awareness",
    "Business Communication for Finance",
    "Digital Tools for Accountants",
    "Intro to AI in Finance",
    "Ethics in Accounting",
    "Spreadsheet Mastery",
    "Presenting to Leadership",
    "Data Visualisation Basics",
    "Audit Readiness Workshop",
];

const COURSE_DURATIONS: [&str; 5] = ["3 days", "1 week", "2 weeks", "3 weeks", "4 weeks"];

const COURSE_DOMAINS: [CourseDomain; 4] = [
    CourseDomain::Technical,
    CourseDomain::Behavioural,
    CourseDomain::Digital,
    CourseDomain::Leadership,
];

const TRENDS: [Trend; 3] = [Trend::Up, Trend::Down, Trend::Stable];

const FIRST_NAMES: [&str; 8] = [
    "Avery", "Jordan", "Taylor", "Riley", "Morgan", "Casey", "Alex", "Quinn",
];
const LAST_NAMES: [&str; 8] = [
    "Walker", "Martin", "Hill", "Evans", "Lopez", "Gray", "Ward", "Young",
];
const ROLES: [&str; 6] = [
    "Accountant",
    "Financial Analyst",
    "Auditor",
    "Payroll Officer",
    "Finance Executive",
    "Controller",
];
const ORGANIZATIONS: [&str; 5] = [
    "Small Finance Co.",
    "Harbor Trading LLC",
    "Summit Logistics",
    "Crescent Retail Group",
    "Northline Services",
];
const LOCATIONS: [&str; 5] = [
    "Sharjah, UAE",
    "Dubai, UAE",
    "Abu Dhabi, UAE",
    "Ajman, UAE",
    "Ras Al Khaimah, UAE",
];

#[derive(Debug, Clone)]
struct DeterministicRng {
    state: u64,
}

impl DeterministicRng {
    fn new(seed: u64) -> Self {
        let mut state = seed ^ 0x9E37_79B9_7F4A_7C15;
        if state == 0 {
            state = 0xA409_3822_299F_31D0;
        }
        Self { state }
    }

    fn next_u64(&mut self) -> u64 {
        self.state = self
            .state
            .wrapping_mul(6_364_136_223_846_793_005)
            .wrapping_add(1_442_695_040_888_963_407);

        let mut x = self.state;
        x ^= x >> 13;
        x ^= x << 7;
        x ^= x >> 17;
        x
    }

    fn int_n(&mut self, n: usize) -> usize {
        if n <= 1 {
            return 0;
        }
        (self.next_u64() % (n as u64)) as usize
    }
}

/// Seeded generator of plausible talent-profile data. Same seed, same
/// output, so fixtures stay stable across runs.
#[derive(Debug, Clone)]
pub struct SampleData {
    rng: DeterministicRng,
    next_id: i64,
}

impl SampleData {
    pub fn new(seed: u64) -> Self {
        Self {
            rng: DeterministicRng::new(seed),
            next_id: 1,
        }
    }

    pub fn int_n(&mut self, n: usize) -> usize {
        self.rng.int_n(n)
    }

    fn take_id(&mut self) -> i64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }

    pub fn profile(&mut self) -> UserProfile {
        let first = FIRST_NAMES[self.rng.int_n(FIRST_NAMES.len())];
        let last = LAST_NAMES[self.rng.int_n(LAST_NAMES.len())];
        UserProfile {
            name: format!("{first} {last}"),
            role: ROLES[self.rng.int_n(ROLES.len())].to_owned(),
            organization: ORGANIZATIONS[self.rng.int_n(ORGANIZATIONS.len())].to_owned(),
            location: LOCATIONS[self.rng.int_n(LOCATIONS.len())].to_owned(),
            last_updated: "Today".to_owned(),
        }
    }

    pub fn wallet(&mut self) -> LearningWallet {
        let credits = (self.rng.int_n(150) + 10) as i64;
        LearningWallet {
            level: WalletLevel::Bronze,
            credits,
            next_level_threshold: Some(credits + (self.rng.int_n(80) + 20) as i64),
        }
    }

    pub fn skill(&mut self) -> Skill {
        let id = self.take_id();
        let score = self.rng.int_n(101) as i64;
        Skill {
            id: SkillId::new(id),
            name: format!(
                "{} {}",
                SKILL_AREAS[self.rng.int_n(SKILL_AREAS.len())],
                id
            ),
            score,
            level: level_for_score(score),
            trend: TRENDS[self.rng.int_n(TRENDS.len())],
        }
    }

    pub fn sub_skill(&mut self, skill_id: SkillId) -> SubSkill {
        let id = self.take_id();
        let score = self.rng.int_n(101) as i64;
        SubSkill {
            id: SubSkillId::new(id),
            skill_id,
            name: format!(
                "{} {}",
                COMPETENCIES[self.rng.int_n(COMPETENCIES.len())],
                id
            ),
            score,
            status: status_for_score(score),
        }
    }

    pub fn course(&mut self, status: CourseStatus) -> Course {
        let id = self.take_id();
        let progress_percent = match status {
            CourseStatus::NotStarted => None,
            CourseStatus::Ongoing => Some(self.rng.int_n(99) as i64 + 1),
            CourseStatus::Completed => Some(100),
        };
        Course {
            id: CourseId::new(id),
            title: format!(
                "{} {}",
                COURSE_TOPICS[self.rng.int_n(COURSE_TOPICS.len())],
                id
            ),
            description: "Short practical module for finance professionals.".to_owned(),
            domain: COURSE_DOMAINS[self.rng.int_n(COURSE_DOMAINS.len())],
            credits: (self.rng.int_n(6) as i64 + 1) * 5,
            duration: COURSE_DURATIONS[self.rng.int_n(COURSE_DURATIONS.len())].to_owned(),
            status,
            progress_percent,
        }
    }

    pub fn gap_item(&mut self) -> GapItem {
        let required = (self.rng.int_n(31) + 70) as i64;
        let current = self.rng.int_n(required as usize + 1) as i64;
        GapItem {
            skill: COMPETENCIES[self.rng.int_n(COMPETENCIES.len())].to_owned(),
            required,
            current,
            level: gap_level_for(required, current),
        }
    }
}

pub fn level_for_score(score: i64) -> SkillLevel {
    if score >= 90 {
        SkillLevel::Expert
    } else if score >= 80 {
        SkillLevel::Advanced
    } else if score >= 70 {
        SkillLevel::Proficient
    } else {
        SkillLevel::Developing
    }
}

pub fn status_for_score(score: i64) -> SubSkillStatus {
    if score >= 85 {
        SubSkillStatus::Strong
    } else if score >= 70 {
        SubSkillStatus::Good
    } else if score >= 55 {
        SubSkillStatus::Improving
    } else {
        SubSkillStatus::NeedsFocus
    }
}

pub fn gap_level_for(required: i64, current: i64) -> GapLevel {
    let gap = required - current;
    if gap <= 5 {
        GapLevel::Small
    } else if gap <= 15 {
        GapLevel::Moderate
    } else {
        GapLevel::High
    }
}

/// Temp directory plus a path inside it for file-based fixtures.
pub fn temp_fixture_path(file_name: &str) -> Result<(tempfile::TempDir, PathBuf)> {
    let dir = tempfile::tempdir()?;
    let path = dir.path().join(file_name);
    Ok((dir, path))
}

#[cfg(test)]
mod tests {
    use super::{SampleData, gap_level_for, level_for_score, status_for_score};
    use skilldeck_app::{CourseStatus, GapLevel, SkillLevel, SubSkillStatus};

    #[test]
    fn same_seed_produces_same_data() {
        let mut a = SampleData::new(7);
        let mut b = SampleData::new(7);
        assert_eq!(a.skill(), b.skill());
        assert_eq!(a.course(CourseStatus::Ongoing), b.course(CourseStatus::Ongoing));
    }

    #[test]
    fn generated_scores_stay_in_range() {
        let mut data = SampleData::new(99);
        for _ in 0..50 {
            let skill = data.skill();
            assert!((0..=100).contains(&skill.score));

            let sub = data.sub_skill(skill.id);
            assert!((0..=100).contains(&sub.score));
            assert_eq!(sub.skill_id, skill.id);

            let gap = data.gap_item();
            assert!(gap.current <= gap.required);
        }
    }

    #[test]
    fn ongoing_courses_always_carry_progress() {
        let mut data = SampleData::new(3);
        for _ in 0..20 {
            let course = data.course(CourseStatus::Ongoing);
            let progress = course.progress_percent.expect("ongoing needs progress");
            assert!((1..=100).contains(&progress));
        }
        assert_eq!(
            data.course(CourseStatus::Completed).progress_percent,
            Some(100)
        );
        assert_eq!(data.course(CourseStatus::NotStarted).progress_percent, None);
    }

    #[test]
    fn score_bands_match_the_source_labels() {
        assert_eq!(level_for_score(85), SkillLevel::Advanced);
        assert_eq!(level_for_score(72), SkillLevel::Proficient);
        assert_eq!(level_for_score(45), SkillLevel::Developing);
        assert_eq!(status_for_score(92), SubSkillStatus::Strong);
        assert_eq!(status_for_score(76), SubSkillStatus::Good);
        assert_eq!(status_for_score(65), SubSkillStatus::Improving);
        assert_eq!(status_for_score(48), SubSkillStatus::NeedsFocus);
        assert_eq!(gap_level_for(90, 88), GapLevel::Small);
        assert_eq!(gap_level_for(85, 75), GapLevel::Moderate);
        assert_eq!(gap_level_for(85, 60), GapLevel::High);
    }
}
