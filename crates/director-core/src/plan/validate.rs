//! Structural checks over a finished plan.
//!
//! Verifies:
//! - At least one act, and no act without scenes.
//! - Scene ids strictly increase across the flattened script.
//! - Minute marks parse, start at `00:00`, never go backwards, and the
//!   last scene ends exactly at the runtime budget.
//! - Every list section and headline field is non-empty.

use thiserror::Error;

use super::timeline::{RUNTIME_SECS, format_timestamp, parse_duration, parse_timestamp};
use crate::model::Plan;

/// Errors that can occur during plan validation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PlanValidationError {
    #[error("plan must contain at least one act")]
    NoActs,

    #[error("act {0} has no scenes")]
    EmptyAct(u32),

    #[error("scene id {0} appears more than once")]
    DuplicateSceneId(u32),

    #[error("scene {next} follows scene {previous}; ids must increase")]
    SceneOrder { previous: u32, next: u32 },

    #[error("scene {scene} has an invalid minute mark {value:?}")]
    BadTimestamp { scene: u32, value: String },

    #[error("scene {scene} has an invalid duration {value:?}")]
    BadDuration { scene: u32, value: String },

    #[error("first scene starts at {0}, expected 00:00")]
    LateStart(String),

    #[error("scene {scene} starts at {mark}, before the previous scene")]
    MinuteMarkOrder { scene: u32, mark: String },

    #[error("scene {scene} ends at {end}, past the runtime budget")]
    RuntimeExceeded { scene: u32, end: String },

    #[error("script ends at {0}; it must fill the full runtime")]
    RuntimeIncomplete(String),

    #[error("section {0} must not be empty")]
    EmptySection(&'static str),
}

/// Validate a plan's structure.
pub fn validate_plan(plan: &Plan) -> Result<(), PlanValidationError> {
    if plan.script.acts.is_empty() {
        return Err(PlanValidationError::NoActs);
    }
    if let Some(act) = plan.script.acts.iter().find(|act| act.scenes.is_empty()) {
        return Err(PlanValidationError::EmptyAct(act.id));
    }

    validate_timeline(plan)?;
    validate_sections(plan)
}

fn validate_timeline(plan: &Plan) -> Result<(), PlanValidationError> {
    let mut previous: Option<(u32, u32)> = None;
    let mut end = 0;

    for scene in plan.scenes() {
        let start = parse_timestamp(&scene.minute_mark).ok_or_else(|| {
            PlanValidationError::BadTimestamp {
                scene: scene.id,
                value: scene.minute_mark.clone(),
            }
        })?;
        let length =
            parse_duration(&scene.duration).ok_or_else(|| PlanValidationError::BadDuration {
                scene: scene.id,
                value: scene.duration.clone(),
            })?;

        match previous {
            None if start != 0 => {
                return Err(PlanValidationError::LateStart(scene.minute_mark.clone()));
            }
            Some((prev_id, _)) if scene.id == prev_id => {
                return Err(PlanValidationError::DuplicateSceneId(scene.id));
            }
            Some((prev_id, _)) if scene.id < prev_id => {
                return Err(PlanValidationError::SceneOrder {
                    previous: prev_id,
                    next: scene.id,
                });
            }
            Some((_, prev_start)) if start < prev_start => {
                return Err(PlanValidationError::MinuteMarkOrder {
                    scene: scene.id,
                    mark: scene.minute_mark.clone(),
                });
            }
            _ => {}
        }

        end = match start.checked_add(length) {
            Some(end) if end <= RUNTIME_SECS => end,
            overrun => {
                return Err(PlanValidationError::RuntimeExceeded {
                    scene: scene.id,
                    end: overrun.map_or_else(|| "past u32 seconds".to_owned(), format_timestamp),
                });
            }
        };
        previous = Some((scene.id, start));
    }

    if end != RUNTIME_SECS {
        return Err(PlanValidationError::RuntimeIncomplete(format_timestamp(end)));
    }
    Ok(())
}

fn validate_sections(plan: &Plan) -> Result<(), PlanValidationError> {
    let text_fields = [
        ("theme", plan.theme.is_empty()),
        ("setting", plan.setting.is_empty()),
        ("targetAudience", plan.target_audience.is_empty()),
        ("trendReason", plan.trend_reason.is_empty()),
        ("hookLine", plan.hook_line.is_empty()),
    ];
    let lists = [
        ("emotionalTriggers", plan.emotional_triggers.is_empty()),
        ("retentionStrategy", plan.retention_strategy.is_empty()),
        ("voiceDesign", plan.voice_design.is_empty()),
        ("soundDesign.ambient", plan.sound_design.ambient.is_empty()),
        ("soundDesign.effects", plan.sound_design.effects.is_empty()),
        ("soundDesign.score", plan.sound_design.score.is_empty()),
        (
            "retentionBoosters.hookLines",
            plan.retention_boosters.hook_lines.is_empty(),
        ),
        (
            "retentionBoosters.suspenseMoments",
            plan.retention_boosters.suspense_moments.is_empty(),
        ),
        (
            "retentionBoosters.emotionalDialogues",
            plan.retention_boosters.emotional_dialogues.is_empty(),
        ),
        (
            "retentionBoosters.openLoops",
            plan.retention_boosters.open_loops.is_empty(),
        ),
        (
            "monetization.adSafeMoments",
            plan.monetization.ad_safe_moments.is_empty(),
        ),
        ("monetization.midRolls", plan.monetization.mid_rolls.is_empty()),
        (
            "monetization.compliance",
            plan.monetization.compliance.is_empty(),
        ),
        ("copyright", plan.copyright.is_empty()),
    ];

    match text_fields.into_iter().chain(lists).find(|(_, empty)| *empty) {
        Some((section, _)) => Err(PlanValidationError::EmptySection(section)),
        None => Ok(()),
    }
}
