//! Template library: the authored content behind every theme category.
//!
//! Template sets are defined in `themes.toml` and embedded in the binary at
//! compile time. [`TemplateLibrary::from_toml`] parses and validates a
//! library, so a malformed set is rejected before any plan is built from it.

use std::collections::{HashMap, HashSet};
use std::sync::LazyLock;

use serde::Deserialize;
use thiserror::Error;

use super::{Expression, ThemeCategory, pick_category, score_words, tokenize};
use crate::plan::bindings::{PLACEHOLDERS, placeholders};
use crate::plan::timeline::{ACT_COUNT, SCENE_COUNT};

/// Errors that can occur while loading a template library.
#[derive(Debug, Error)]
pub enum LibraryError {
    #[error("TOML parse error: {0}")]
    TomlError(#[from] toml::de::Error),

    #[error("theme {0} is defined more than once")]
    DuplicateCategory(ThemeCategory),

    #[error("theme {0} is missing")]
    MissingCategory(ThemeCategory),

    #[error("theme {category}: expected {expected} {field}, found {found}")]
    WrongCount {
        category: ThemeCategory,
        field: &'static str,
        expected: usize,
        found: usize,
    },

    #[error("theme {category}: {field} must not be empty")]
    EmptyList {
        category: ThemeCategory,
        field: &'static str,
    },

    #[error("common section: {0} must not be empty")]
    EmptyCommon(&'static str),

    #[error("theme {category}: keyword {keyword:?} must be lower-case alphanumeric")]
    InvalidKeyword {
        category: ThemeCategory,
        keyword: String,
    },

    #[error("keyword {keyword:?} is claimed by both {first} and {second}")]
    DuplicateKeyword {
        keyword: String,
        first: ThemeCategory,
        second: ThemeCategory,
    },

    #[error("theme {0} has no protagonist voice")]
    MissingProtagonistVoice(ThemeCategory),

    #[error("theme {0} has no emotional-peak beat with dialogue")]
    NoEmotionalDialogue(ThemeCategory),

    #[error("unknown placeholder {{{placeholder}}} in {context}")]
    UnknownPlaceholder { context: String, placeholder: String },

    #[error("theme {category}: {field} is copied verbatim and must not use placeholders")]
    PlaceholderInStaticField {
        category: ThemeCategory,
        field: &'static str,
    },
}

// ---------------------------------------------------------------------------
// TOML shape
// ---------------------------------------------------------------------------

/// Rules shared by every plan regardless of category.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CommonTemplates {
    pub compliance: Vec<String>,
    pub ad_safe: Vec<String>,
    pub copyright: Vec<String>,
}

/// The authored content selected by one theme category.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TemplateSet {
    pub category: ThemeCategory,
    pub keywords: Vec<String>,
    pub theme: String,
    /// Long-form setting description copied into the plan.
    pub setting: String,
    /// Short place name bound to `{setting}`.
    pub setting_name: String,
    pub target_audience: String,
    pub trend_reason: String,
    pub hook_lines: Vec<String>,
    pub emotional_triggers: Vec<String>,
    pub retention_strategy: Vec<String>,
    /// Narrative focus per act.
    pub acts: Vec<String>,
    pub suspense_moments: Vec<String>,
    pub open_loops: Vec<String>,
    /// One hook per act boundary after the first act.
    pub mid_roll_hooks: Vec<String>,
    pub cast: Cast,
    pub visuals: Visuals,
    pub sound: SoundTemplates,
    pub voices: Vec<VoiceTemplate>,
    pub beats: Vec<BeatTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Cast {
    /// Bound to `{role}` when the idea names no role.
    pub default_role: String,
    /// Used when the idea names no role or a gender-neutral one.
    pub default_expression: Expression,
    pub ally: String,
    pub antagonist: String,
    pub narrator: String,
    pub names: NamePools,
}

/// Protagonist names keyed by expression.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct NamePools {
    pub masculine: Vec<String>,
    pub feminine: Vec<String>,
    pub neutral: Vec<String>,
}

impl NamePools {
    pub fn pool(&self, expression: Expression) -> &[String] {
        match expression {
            Expression::Masculine => &self.masculine,
            Expression::Feminine => &self.feminine,
            Expression::Neutral => &self.neutral,
        }
    }
}

/// Lighting and environment per act.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Visuals {
    pub lighting: Vec<String>,
    pub environment: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SoundTemplates {
    pub ambient: Vec<String>,
    pub effects: Vec<String>,
    pub score: Vec<String>,
}

/// Which cast member a voice or dialogue line belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CastRole {
    Protagonist,
    Ally,
    Antagonist,
    Narrator,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct VoiceTemplate {
    pub role: CastRole,
    pub style: String,
    /// Ignored for the protagonist, whose voice follows the detected role.
    #[serde(default)]
    pub gender: Option<String>,
    pub age_tone: String,
    pub emotion_palette: String,
    pub speaking_speed: String,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct BeatTemplate {
    pub title: String,
    pub description: String,
    pub tone: String,
    /// Character focus of the visual prompt.
    pub focus: String,
    /// Action of the visual prompt.
    pub action: String,
    #[serde(default)]
    pub pattern_interrupt: Option<String>,
    #[serde(default)]
    pub emotional_peak: Option<String>,
    #[serde(default)]
    pub cliffhanger: Option<String>,
    #[serde(default)]
    pub dialogue: Vec<LineTemplate>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LineTemplate {
    pub speaker: CastRole,
    pub line: String,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawLibrary {
    common: CommonTemplates,
    themes: Vec<TemplateSet>,
}

impl TemplateSet {
    /// Every string that is interpolated when a plan is built.
    pub fn template_strings(&self) -> Vec<&str> {
        let mut out: Vec<&str> = vec![self.trend_reason.as_str()];
        let lists = [
            &self.hook_lines,
            &self.acts,
            &self.suspense_moments,
            &self.open_loops,
            &self.mid_roll_hooks,
            &self.visuals.environment,
        ];
        out.extend(lists.into_iter().flatten().map(String::as_str));
        for beat in &self.beats {
            out.extend([
                beat.title.as_str(),
                beat.description.as_str(),
                beat.tone.as_str(),
                beat.focus.as_str(),
                beat.action.as_str(),
            ]);
            out.extend(
                [&beat.pattern_interrupt, &beat.emotional_peak, &beat.cliffhanger]
                    .into_iter()
                    .flatten()
                    .map(String::as_str),
            );
            out.extend(beat.dialogue.iter().map(|l| l.line.as_str()));
        }
        out
    }

    /// Fields copied into the plan verbatim, by name.
    fn static_fields(&self) -> Vec<(&'static str, Vec<&str>)> {
        fn strs(list: &[String]) -> Vec<&str> {
            list.iter().map(String::as_str).collect()
        }
        vec![
            ("theme", vec![self.theme.as_str()]),
            ("setting", vec![self.setting.as_str()]),
            ("target_audience", vec![self.target_audience.as_str()]),
            ("emotional_triggers", strs(&self.emotional_triggers)),
            ("retention_strategy", strs(&self.retention_strategy)),
            ("visuals.lighting", strs(&self.visuals.lighting)),
            ("sound.ambient", strs(&self.sound.ambient)),
            ("sound.effects", strs(&self.sound.effects)),
            ("sound.score", strs(&self.sound.score)),
        ]
    }
}

// ---------------------------------------------------------------------------
// Library
// ---------------------------------------------------------------------------

/// A validated set of templates, one per [`ThemeCategory`].
#[derive(Debug, Clone)]
pub struct TemplateLibrary {
    common: CommonTemplates,
    /// In classification priority order.
    themes: Vec<TemplateSet>,
    /// Index of the `general` theme.
    fallback: usize,
}

/// The embedded theme library TOML.
static BUILTIN_TOML: &str = include_str!("themes.toml");

static BUILTIN: LazyLock<TemplateLibrary> = LazyLock::new(|| {
    TemplateLibrary::from_toml(BUILTIN_TOML).expect("embedded themes.toml is invalid")
});

impl TemplateLibrary {
    /// The library compiled into the binary.
    ///
    /// # Panics
    ///
    /// Panics on first use if the embedded TOML fails validation. A unit test
    /// loads it, so a released build always carries a valid library.
    pub fn builtin() -> &'static TemplateLibrary {
        &BUILTIN
    }

    /// Parse and validate a library from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, LibraryError> {
        let raw: RawLibrary = toml::from_str(content)?;
        validate(&raw)?;
        let fallback = raw
            .themes
            .iter()
            .position(|t| t.category == ThemeCategory::General)
            .ok_or(LibraryError::MissingCategory(ThemeCategory::General))?;
        Ok(Self {
            common: raw.common,
            themes: raw.themes,
            fallback,
        })
    }

    pub fn common(&self) -> &CommonTemplates {
        &self.common
    }

    /// All template sets in classification priority order.
    pub fn themes(&self) -> &[TemplateSet] {
        &self.themes
    }

    pub fn categories(&self) -> Vec<ThemeCategory> {
        self.themes.iter().map(|t| t.category).collect()
    }

    /// Template set for a category. Every category is present once the
    /// library validates, so this never misses.
    pub fn theme(&self, category: ThemeCategory) -> &TemplateSet {
        self.themes
            .iter()
            .find(|t| t.category == category)
            .unwrap_or(&self.themes[self.fallback])
    }

    /// Keyword hit counts per category, in priority order.
    pub fn score(&self, idea: &str) -> Vec<(ThemeCategory, usize)> {
        let words = tokenize(idea);
        score_words(
            &words,
            self.themes
                .iter()
                .map(|t| (t.category, t.keywords.as_slice())),
        )
    }

    pub fn classify(&self, idea: &str) -> ThemeCategory {
        pick_category(&self.score(idea))
    }
}

// ---------------------------------------------------------------------------
// Validation
// ---------------------------------------------------------------------------

fn validate(raw: &RawLibrary) -> Result<(), LibraryError> {
    let common = &raw.common;
    for (field, list) in [
        ("compliance", &common.compliance),
        ("ad_safe", &common.ad_safe),
        ("copyright", &common.copyright),
    ] {
        if list.is_empty() {
            return Err(LibraryError::EmptyCommon(field));
        }
        for text in list {
            check_placeholders(text, || format!("common.{field}"))?;
        }
    }

    let mut seen = HashSet::new();
    for set in &raw.themes {
        if !seen.insert(set.category) {
            return Err(LibraryError::DuplicateCategory(set.category));
        }
    }
    for category in ThemeCategory::ALL {
        if !seen.contains(&category) {
            return Err(LibraryError::MissingCategory(category));
        }
    }

    let mut owners: HashMap<&str, ThemeCategory> = HashMap::new();
    for set in &raw.themes {
        for keyword in &set.keywords {
            let valid = !keyword.is_empty()
                && keyword
                    .chars()
                    .all(|c| c.is_alphanumeric() && !c.is_uppercase());
            if !valid {
                return Err(LibraryError::InvalidKeyword {
                    category: set.category,
                    keyword: keyword.clone(),
                });
            }
            if let Some(&first) = owners.get(keyword.as_str()) {
                return Err(LibraryError::DuplicateKeyword {
                    keyword: keyword.clone(),
                    first,
                    second: set.category,
                });
            }
            owners.insert(keyword.as_str(), set.category);
        }
        validate_set(set)?;
    }

    Ok(())
}

fn validate_set(set: &TemplateSet) -> Result<(), LibraryError> {
    let category = set.category;

    for (field, expected, found) in [
        ("beats", SCENE_COUNT, set.beats.len()),
        ("acts", ACT_COUNT, set.acts.len()),
        ("visuals.lighting", ACT_COUNT, set.visuals.lighting.len()),
        ("visuals.environment", ACT_COUNT, set.visuals.environment.len()),
        ("mid_roll_hooks", ACT_COUNT - 1, set.mid_roll_hooks.len()),
    ] {
        if found != expected {
            return Err(LibraryError::WrongCount {
                category,
                field,
                expected,
                found,
            });
        }
    }

    let non_empty = [
        ("hook_lines", set.hook_lines.is_empty()),
        ("emotional_triggers", set.emotional_triggers.is_empty()),
        ("retention_strategy", set.retention_strategy.is_empty()),
        ("suspense_moments", set.suspense_moments.is_empty()),
        ("open_loops", set.open_loops.is_empty()),
        ("voices", set.voices.is_empty()),
        ("sound.ambient", set.sound.ambient.is_empty()),
        ("sound.effects", set.sound.effects.is_empty()),
        ("sound.score", set.sound.score.is_empty()),
        ("cast.names.masculine", set.cast.names.masculine.is_empty()),
        ("cast.names.feminine", set.cast.names.feminine.is_empty()),
        ("cast.names.neutral", set.cast.names.neutral.is_empty()),
    ];
    if let Some((field, _)) = non_empty.into_iter().find(|(_, empty)| *empty) {
        return Err(LibraryError::EmptyList { category, field });
    }

    if !set.voices.iter().any(|v| v.role == CastRole::Protagonist) {
        return Err(LibraryError::MissingProtagonistVoice(category));
    }
    if !set
        .beats
        .iter()
        .any(|b| b.emotional_peak.is_some() && !b.dialogue.is_empty())
    {
        return Err(LibraryError::NoEmotionalDialogue(category));
    }

    for text in set.template_strings() {
        check_placeholders(text, || format!("theme {category}"))?;
    }
    for (field, texts) in set.static_fields() {
        if texts.iter().any(|t| !placeholders(t).is_empty()) {
            return Err(LibraryError::PlaceholderInStaticField { category, field });
        }
    }

    Ok(())
}

fn check_placeholders(text: &str, context: impl Fn() -> String) -> Result<(), LibraryError> {
    match placeholders(text)
        .into_iter()
        .find(|name| !PLACEHOLDERS.contains(name))
    {
        Some(unknown) => Err(LibraryError::UnknownPlaceholder {
            context: context(),
            placeholder: unknown.to_owned(),
        }),
        None => Ok(()),
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
