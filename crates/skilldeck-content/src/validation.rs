// Copyright 2026 Phillip Cloud
// Licensed under the Apache License, Version 2.0

use anyhow::{Result, bail};
use skilldeck_app::{Course, CourseStatus};
use std::collections::BTreeSet;

use crate::ContentPack;

pub const MAX_SCORE: i64 = 100;

pub fn validate_pack(pack: &ContentPack) -> Result<()> {
    if pack.profile.name.trim().is_empty() {
        bail!("profile name must not be empty");
    }

    if pack.wallet.credits < 0 {
        bail!("wallet credits must be non-negative, got {}", pack.wallet.credits);
    }
    if let Some(threshold) = pack.wallet.next_level_threshold
        && threshold <= 0
    {
        bail!("wallet next_level_threshold must be positive, got {threshold}");
    }

    if pack.skills.is_empty() {
        bail!("content pack must define at least one skill domain");
    }
    let mut skill_ids = BTreeSet::new();
    for skill in &pack.skills {
        if skill.name.trim().is_empty() {
            bail!("skill {} has an empty name", skill.id.get());
        }
        check_score(&skill.name, skill.score)?;
        if !skill_ids.insert(skill.id) {
            bail!("duplicate skill id {}", skill.id.get());
        }
    }

    let mut sub_skill_ids = BTreeSet::new();
    for sub in &pack.sub_skills {
        if sub.name.trim().is_empty() {
            bail!("sub-skill {} has an empty name", sub.id.get());
        }
        check_score(&sub.name, sub.score)?;
        if !sub_skill_ids.insert(sub.id) {
            bail!("duplicate sub-skill id {}", sub.id.get());
        }
        if !skill_ids.contains(&sub.skill_id) {
            bail!(
                "sub-skill {:?} references unknown skill id {}",
                sub.name,
                sub.skill_id.get()
            );
        }
    }

    let mut course_ids = BTreeSet::new();
    for course in pack
        .recommended_courses
        .iter()
        .chain(&pack.enrolled_courses)
    {
        validate_course(course)?;
        if !course_ids.insert(course.id) {
            bail!("duplicate course id {}", course.id.get());
        }
    }

    for fit in &pack.mobility.role_fits {
        if fit.title.trim().is_empty() {
            bail!("role fit entry has an empty title");
        }
        check_score(&fit.title, fit.score)?;
    }

    check_score("target role match", pack.gap_report.match_percent)?;
    for group in &pack.gap_report.domains {
        if group.domain.trim().is_empty() {
            bail!("gap domain group has an empty name");
        }
        for item in &group.items {
            if item.skill.trim().is_empty() {
                bail!("gap item in {:?} has an empty skill name", group.domain);
            }
            check_score(&item.skill, item.required)?;
            check_score(&item.skill, item.current)?;
        }
    }

    for prompt in &pack.coach.quick_prompts {
        if prompt.trim().is_empty() {
            bail!("coach quick prompt must not be empty");
        }
    }

    Ok(())
}

fn validate_course(course: &Course) -> Result<()> {
    if course.title.trim().is_empty() {
        bail!("course {} has an empty title", course.id.get());
    }
    if course.credits < 0 {
        bail!(
            "course {:?} has negative credits ({})",
            course.title,
            course.credits
        );
    }
    match (course.status, course.progress_percent) {
        (CourseStatus::NotStarted, Some(progress)) => {
            bail!(
                "course {:?} is not started but reports progress {progress}",
                course.title
            );
        }
        (CourseStatus::Ongoing | CourseStatus::Completed, None) => {
            bail!("course {:?} is missing a progress value", course.title);
        }
        (_, Some(progress)) if !(0..=MAX_SCORE).contains(&progress) => {
            bail!(
                "course {:?} progress {progress} is outside 0..={MAX_SCORE}",
                course.title
            );
        }
        _ => Ok(()),
    }
}

fn check_score(label: &str, score: i64) -> Result<()> {
    if !(0..=MAX_SCORE).contains(&score) {
        bail!("score {score} for {label:?} is outside 0..={MAX_SCORE}");
    }
    Ok(())
}

/// Reject pack paths that are really URIs; the pack is always a local file.
pub fn validate_pack_path(path: &str) -> Result<()> {
    if path.is_empty() {
        bail!("content pack path must not be empty");
    }

    if let Some(index) = path.find("://")
        && index > 0
    {
        let scheme = &path[..index];
        if scheme.chars().all(char::is_alphabetic) {
            bail!(
                "content pack path {path:?} looks like a URI ({scheme}://); pass a filesystem path instead"
            );
        }
    }

    if path.starts_with("file:") {
        bail!("content pack path {path:?} uses file: URI syntax; pass a plain filesystem path");
    }

    Ok(())
}
