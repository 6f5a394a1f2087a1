//! Plan data model.
//!
//! Every type here is an immutable value produced by the generator. JSON
//! field names are camelCase (`targetAudience`, `minuteMark`, ...) so the
//! serialized plan matches what the web view consumes.

use serde::{Deserialize, Serialize};

use crate::theme::ThemeCategory;

// ---------------------------------------------------------------------------
// Plan
// ---------------------------------------------------------------------------

/// The complete output of one generation call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Plan {
    /// The idea text the plan was generated from (trimmed).
    pub idea: String,
    /// Theme category selected by keyword classification.
    pub category: ThemeCategory,
    /// Short hex digest of the trimmed idea text.
    pub fingerprint: String,
    pub target_audience: String,
    pub emotional_triggers: Vec<String>,
    pub retention_strategy: Vec<String>,
    pub trend_reason: String,
    pub hook_line: String,
    pub theme: String,
    pub setting: String,
    pub script: Script,
    pub voice_design: Vec<VoiceBlueprint>,
    pub sound_design: SoundDesign,
    pub retention_boosters: RetentionBoosters,
    pub monetization: Monetization,
    pub copyright: Vec<String>,
}

impl Plan {
    /// Iterate over every scene in screen-time order.
    pub fn scenes(&self) -> impl Iterator<Item = &SceneBlueprint> {
        self.script.acts.iter().flat_map(|act| act.scenes.iter())
    }

    /// Total number of scenes across all acts.
    pub fn scene_count(&self) -> usize {
        self.script.acts.iter().map(|act| act.scenes.len()).sum()
    }
}

// ---------------------------------------------------------------------------
// Script
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Script {
    pub acts: Vec<Act>,
}

/// A group of contiguous scenes around one narrative focus.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Act {
    /// 1-based act number.
    pub id: u32,
    pub title: String,
    pub focus: String,
    pub scenes: Vec<SceneBlueprint>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SceneBlueprint {
    /// 1-based scene number, unique within the plan.
    pub id: u32,
    /// Start of the scene as `MM:SS`.
    pub minute_mark: String,
    /// Human-readable length, e.g. `1m 30s`.
    pub duration: String,
    pub title: String,
    pub description: String,
    pub emotional_tone: String,
    pub pacing: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pattern_interrupt: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emotional_peak: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cliffhanger: Option<String>,
    pub dialogue: Vec<DialogueLine>,
    pub visual_prompt: VisualPrompt,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DialogueLine {
    pub speaker: String,
    pub line: String,
}

/// Shot description handed to an image or video model.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VisualPrompt {
    pub character_focus: String,
    pub camera_angle: String,
    pub lighting: String,
    pub environment: String,
    pub action: String,
}

// ---------------------------------------------------------------------------
// Voice, sound, retention, monetization
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VoiceBlueprint {
    pub character: String,
    pub style: String,
    /// Gender expression of the voice.
    pub gender: String,
    pub age_tone: String,
    pub emotion_palette: String,
    pub speaking_speed: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SoundDesign {
    pub ambient: Vec<String>,
    pub effects: Vec<String>,
    pub score: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RetentionBoosters {
    pub hook_lines: Vec<String>,
    pub suspense_moments: Vec<String>,
    pub emotional_dialogues: Vec<String>,
    pub open_loops: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Monetization {
    pub ad_safe_moments: Vec<String>,
    pub mid_rolls: Vec<MidRoll>,
    pub compliance: Vec<String>,
}

/// Recommended placement for an in-video ad break.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MidRoll {
    pub timestamp: String,
    pub description: String,
}
