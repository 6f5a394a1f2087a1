//! Plan generation: idea text in, fully populated [`Plan`] out.
//!
//! Generation is a pure function of the idea text. The only source of
//! variation is a seed taken from the SHA-256 of the trimmed idea, which
//! picks the hook line and the protagonist's name.

use sha2::{Digest, Sha256};
use thiserror::Error;

use super::bindings::Bindings;
use super::timeline::{self, ACTS, BEATS, Beat};
use crate::model::{
    Act, DialogueLine, MidRoll, Monetization, Plan, RetentionBoosters, SceneBlueprint, Script,
    SoundDesign, VisualPrompt, VoiceBlueprint,
};
use crate::theme::library::{BeatTemplate, CastRole, TemplateLibrary, TemplateSet};
use crate::theme::{Expression, detect_role};

/// Errors that can occur during plan generation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GenerateError {
    #[error("story idea must not be empty or whitespace")]
    InvalidInput,
}

/// Generate a plan from the builtin template library.
pub fn generate_plan(idea: &str) -> Result<Plan, GenerateError> {
    TemplateLibrary::builtin().generate(idea)
}

// ---------------------------------------------------------------------------
// Seed
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq)]
struct Seed {
    value: u64,
    fingerprint: String,
}

impl Seed {
    fn from_idea(idea: &str) -> Self {
        let digest = Sha256::digest(idea.as_bytes());
        let mut head = [0u8; 8];
        head.copy_from_slice(&digest[..8]);
        Self {
            value: u64::from_be_bytes(head),
            fingerprint: hex::encode(head),
        }
    }

    /// Deterministically pick one item; `salt` decorrelates separate picks.
    fn pick<'t, T>(&self, items: &'t [T], salt: u32) -> Option<&'t T> {
        if items.is_empty() {
            return None;
        }
        let mixed = self.value.rotate_left(salt.wrapping_mul(16) % 64);
        items.get((mixed % items.len() as u64) as usize)
    }
}

// ---------------------------------------------------------------------------
// Generation
// ---------------------------------------------------------------------------

impl TemplateLibrary {
    /// Generate a plan from this library.
    pub fn generate(&self, idea: &str) -> Result<Plan, GenerateError> {
        let idea = idea.trim();
        if idea.is_empty() {
            return Err(GenerateError::InvalidInput);
        }

        let category = self.classify(idea);
        let set = self.theme(category);
        let seed = Seed::from_idea(idea);

        let detected = detect_role(idea);
        let expression = match detected {
            Some(role) if role.expression != Expression::Neutral => role.expression,
            _ => set.cast.default_expression,
        };
        let protagonist = seed
            .pick(set.cast.names.pool(expression), 1)
            .map(String::as_str)
            .unwrap_or_default();

        let bindings = Bindings {
            idea,
            protagonist,
            role: detected.map_or(set.cast.default_role.as_str(), |role| role.noun),
            their: expression.possessive(),
            ally: &set.cast.ally,
            antagonist: &set.cast.antagonist,
            narrator: &set.cast.narrator,
            setting: &set.setting_name,
        };

        let script = build_script(set, &bindings);
        let retention_boosters = build_retention(set, &bindings, &script);
        let monetization = build_monetization(self, set, &bindings, &script);

        Ok(Plan {
            idea: idea.to_owned(),
            category,
            fingerprint: seed.fingerprint.clone(),
            target_audience: set.target_audience.clone(),
            emotional_triggers: set.emotional_triggers.clone(),
            retention_strategy: set.retention_strategy.clone(),
            trend_reason: bindings.apply(&set.trend_reason),
            hook_line: seed
                .pick(&set.hook_lines, 0)
                .map(|line| bindings.apply(line))
                .unwrap_or_default(),
            theme: set.theme.clone(),
            setting: set.setting.clone(),
            script,
            voice_design: build_voices(set, &bindings, expression),
            sound_design: SoundDesign {
                ambient: set.sound.ambient.clone(),
                effects: set.sound.effects.clone(),
                score: set.sound.score.clone(),
            },
            retention_boosters,
            monetization,
            copyright: apply_all(&bindings, &self.common().copyright),
        })
    }
}

fn apply_all(bindings: &Bindings<'_>, templates: &[String]) -> Vec<String> {
    templates.iter().map(|t| bindings.apply(t)).collect()
}

fn build_script(set: &TemplateSet, bindings: &Bindings<'_>) -> Script {
    let mut acts: Vec<Act> = ACTS
        .iter()
        .zip(&set.acts)
        .map(|(slot, focus)| Act {
            id: slot.id,
            title: slot.title.to_owned(),
            focus: bindings.apply(focus),
            scenes: Vec::new(),
        })
        .collect();

    for (idx, (beat, template)) in BEATS.iter().zip(&set.beats).enumerate() {
        let scene = build_scene(idx as u32 + 1, beat, template, set, bindings);
        if let Some(act) = acts.get_mut(beat.act) {
            act.scenes.push(scene);
        }
    }

    Script { acts }
}

fn build_scene(
    id: u32,
    beat: &Beat,
    template: &BeatTemplate,
    set: &TemplateSet,
    bindings: &Bindings<'_>,
) -> SceneBlueprint {
    let optional = |text: &Option<String>| text.as_deref().map(|t| bindings.apply(t));
    SceneBlueprint {
        id,
        minute_mark: timeline::format_timestamp(beat.start_secs),
        duration: timeline::format_duration(beat.duration_secs),
        title: bindings.apply(&template.title),
        description: bindings.apply(&template.description),
        emotional_tone: bindings.apply(&template.tone),
        pacing: beat.pacing.to_owned(),
        pattern_interrupt: optional(&template.pattern_interrupt),
        emotional_peak: optional(&template.emotional_peak),
        cliffhanger: optional(&template.cliffhanger),
        dialogue: template
            .dialogue
            .iter()
            .map(|line| DialogueLine {
                speaker: bindings.speaker(line.speaker).to_owned(),
                line: bindings.apply(&line.line),
            })
            .collect(),
        visual_prompt: VisualPrompt {
            character_focus: bindings.apply(&template.focus),
            camera_angle: beat.camera.to_owned(),
            lighting: set
                .visuals
                .lighting
                .get(beat.act)
                .cloned()
                .unwrap_or_default(),
            environment: set
                .visuals
                .environment
                .get(beat.act)
                .map(|env| bindings.apply(env))
                .unwrap_or_default(),
            action: bindings.apply(&template.action),
        },
    }
}

fn build_voices(
    set: &TemplateSet,
    bindings: &Bindings<'_>,
    expression: Expression,
) -> Vec<VoiceBlueprint> {
    set.voices
        .iter()
        .map(|voice| {
            let gender = match (voice.role, &voice.gender) {
                (CastRole::Protagonist, _) => expression.voice_label().to_owned(),
                (_, Some(gender)) => gender.clone(),
                (_, None) => Expression::Neutral.voice_label().to_owned(),
            };
            VoiceBlueprint {
                character: bindings.speaker(voice.role).to_owned(),
                style: voice.style.clone(),
                gender,
                age_tone: voice.age_tone.clone(),
                emotion_palette: voice.emotion_palette.clone(),
                speaking_speed: voice.speaking_speed.clone(),
            }
        })
        .collect()
}

/// Scene cliffhangers first, marked with their minute mark, then the
/// theme's own suspense moments. Emotional dialogues quote every line of
/// every scene that carries an emotional peak.
fn build_retention(set: &TemplateSet, bindings: &Bindings<'_>, script: &Script) -> RetentionBoosters {
    let scenes = || script.acts.iter().flat_map(|act| act.scenes.iter());

    let mut suspense_moments: Vec<String> = scenes()
        .filter_map(|scene| {
            scene
                .cliffhanger
                .as_ref()
                .map(|text| format!("{} · {text}", scene.minute_mark))
        })
        .collect();
    suspense_moments.extend(apply_all(bindings, &set.suspense_moments));

    let emotional_dialogues = scenes()
        .filter(|scene| scene.emotional_peak.is_some())
        .flat_map(|scene| scene.dialogue.iter())
        .map(|line| format!("{}: “{}”", line.speaker, line.line))
        .collect();

    RetentionBoosters {
        hook_lines: apply_all(bindings, &set.hook_lines),
        suspense_moments,
        emotional_dialogues,
        open_loops: apply_all(bindings, &set.open_loops),
    }
}

/// One mid-roll per act boundary after the first act, each preceded in the
/// ad-safe list by a note naming the scene it follows.
fn build_monetization(
    library: &TemplateLibrary,
    set: &TemplateSet,
    bindings: &Bindings<'_>,
    script: &Script,
) -> Monetization {
    let scenes: Vec<&SceneBlueprint> = script.acts.iter().flat_map(|act| &act.scenes).collect();
    let starts = timeline::act_starts();
    let boundaries = &starts[1..];

    let mid_rolls: Vec<MidRoll> = boundaries
        .iter()
        .zip(&set.mid_roll_hooks)
        .map(|(&secs, hook)| MidRoll {
            timestamp: timeline::format_timestamp(secs),
            description: bindings.apply(hook),
        })
        .collect();

    let mut ad_safe_moments: Vec<String> = boundaries
        .iter()
        .filter_map(|&secs| {
            let idx = BEATS.iter().position(|beat| beat.end_secs() == secs)?;
            let scene = scenes.get(idx)?;
            Some(format!(
                "{}: natural pause after “{}” resolves, before the next act opens",
                timeline::format_timestamp(secs),
                scene.title
            ))
        })
        .collect();
    ad_safe_moments.extend(apply_all(bindings, &library.common().ad_safe));

    Monetization {
        ad_safe_moments,
        mid_rolls,
        compliance: apply_all(bindings, &library.common().compliance),
    }
}
