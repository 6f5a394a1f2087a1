//! Theme taxonomy: categories, keyword classification and role detection.
//!
//! The keyword tables themselves live in the template library
//! ([`library::TemplateLibrary`]); this module holds the category enum and
//! the scoring rules applied to an idea.

pub mod library;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

pub use library::{LibraryError, TemplateLibrary, TemplateSet};

// ---------------------------------------------------------------------------
// ThemeCategory
// ---------------------------------------------------------------------------

/// Coarse classification bucket inferred from an idea's keywords.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ThemeCategory {
    Hero,
    Mystery,
    Adventure,
    Family,
    /// Fallback when no keyword matches.
    General,
}

impl ThemeCategory {
    pub const ALL: [ThemeCategory; 5] = [
        Self::Hero,
        Self::Mystery,
        Self::Adventure,
        Self::Family,
        Self::General,
    ];

    /// Human-facing label used in rendered output.
    pub fn label(self) -> &'static str {
        match self {
            Self::Hero => "Hero",
            Self::Mystery => "Mystery",
            Self::Adventure => "Adventure",
            Self::Family => "Family",
            Self::General => "General",
        }
    }
}

impl fmt::Display for ThemeCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Hero => "hero",
            Self::Mystery => "mystery",
            Self::Adventure => "adventure",
            Self::Family => "family",
            Self::General => "general",
        };
        f.write_str(s)
    }
}

impl FromStr for ThemeCategory {
    type Err = ThemeCategoryParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "hero" => Ok(Self::Hero),
            "mystery" => Ok(Self::Mystery),
            "adventure" => Ok(Self::Adventure),
            "family" => Ok(Self::Family),
            "general" => Ok(Self::General),
            other => Err(ThemeCategoryParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`ThemeCategory`] string.
#[derive(Debug, Clone)]
pub struct ThemeCategoryParseError(pub String);

impl fmt::Display for ThemeCategoryParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "invalid theme category: {:?}", self.0)
    }
}

impl std::error::Error for ThemeCategoryParseError {}

// ---------------------------------------------------------------------------
// Classification
// ---------------------------------------------------------------------------

/// Classify an idea against the builtin template library.
pub fn classify(idea: &str) -> ThemeCategory {
    TemplateLibrary::builtin().classify(idea)
}

/// Per-category keyword hit counts against the builtin library, in
/// library order.
pub fn score(idea: &str) -> Vec<(ThemeCategory, usize)> {
    TemplateLibrary::builtin().score(idea)
}

/// Lower-case the idea and split it on anything that is not alphanumeric.
pub(crate) fn tokenize(idea: &str) -> Vec<String> {
    idea.split(|c: char| !c.is_alphanumeric())
        .filter(|word| !word.is_empty())
        .map(str::to_lowercase)
        .collect()
}

/// A word matches a keyword exactly, once a plural `s`/`es` is stripped, or
/// when an `-ies` plural meets a keyword ending in `y`.
pub(crate) fn matches_keyword(word: &str, keyword: &str) -> bool {
    word == keyword
        || word.strip_suffix("es") == Some(keyword)
        || word.strip_suffix('s') == Some(keyword)
        || word
            .strip_suffix("ies")
            .is_some_and(|stem| keyword.strip_suffix('y') == Some(stem))
}

/// Count keyword hits per category.
///
/// Each word counts at most once per category; repeated words count again.
pub(crate) fn score_words<'a, I>(words: &[String], table: I) -> Vec<(ThemeCategory, usize)>
where
    I: IntoIterator<Item = (ThemeCategory, &'a [String])>,
{
    table
        .into_iter()
        .map(|(category, keywords)| {
            let hits = words
                .iter()
                .filter(|word| keywords.iter().any(|kw| matches_keyword(word, kw)))
                .count();
            (category, hits)
        })
        .collect()
}

/// Highest score wins; the earliest entry wins a tie; all-zero falls back
/// to [`ThemeCategory::General`].
pub(crate) fn pick_category(scores: &[(ThemeCategory, usize)]) -> ThemeCategory {
    let mut best: Option<(ThemeCategory, usize)> = None;
    for &(category, hits) in scores {
        if hits == 0 {
            continue;
        }
        match best {
            Some((_, top)) if top >= hits => {}
            _ => best = Some((category, hits)),
        }
    }
    best.map(|(category, _)| category)
        .unwrap_or(ThemeCategory::General)
}

// ---------------------------------------------------------------------------
// Roles
// ---------------------------------------------------------------------------

/// Voice/gender expression carried by a role noun or a name pool.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Expression {
    Masculine,
    Feminine,
    Neutral,
}

impl Expression {
    /// Possessive pronoun bound to `{their}`.
    pub fn possessive(self) -> &'static str {
        match self {
            Self::Masculine => "his",
            Self::Feminine => "her",
            Self::Neutral => "their",
        }
    }

    /// Label used in the voice design section.
    pub fn voice_label(self) -> &'static str {
        match self {
            Self::Masculine => "Masculine",
            Self::Feminine => "Feminine",
            Self::Neutral => "Neutral",
        }
    }
}

/// A role noun found in the idea, e.g. "father" or "detective".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Role {
    pub noun: &'static str,
    pub expression: Expression,
}

const ROLES: &[(&str, Expression)] = &[
    ("father", Expression::Masculine),
    ("dad", Expression::Masculine),
    ("grandfather", Expression::Masculine),
    ("grandpa", Expression::Masculine),
    ("son", Expression::Masculine),
    ("boy", Expression::Masculine),
    ("brother", Expression::Masculine),
    ("man", Expression::Masculine),
    ("king", Expression::Masculine),
    ("prince", Expression::Masculine),
    ("mother", Expression::Feminine),
    ("mom", Expression::Feminine),
    ("grandmother", Expression::Feminine),
    ("grandma", Expression::Feminine),
    ("daughter", Expression::Feminine),
    ("girl", Expression::Feminine),
    ("sister", Expression::Feminine),
    ("woman", Expression::Feminine),
    ("queen", Expression::Feminine),
    ("princess", Expression::Feminine),
    ("witch", Expression::Feminine),
    ("kid", Expression::Neutral),
    ("child", Expression::Neutral),
    ("parent", Expression::Neutral),
    ("teenager", Expression::Neutral),
    ("student", Expression::Neutral),
    ("teacher", Expression::Neutral),
    ("inventor", Expression::Neutral),
    ("detective", Expression::Neutral),
    ("scientist", Expression::Neutral),
    ("doctor", Expression::Neutral),
    ("nurse", Expression::Neutral),
    ("soldier", Expression::Neutral),
    ("pilot", Expression::Neutral),
    ("captain", Expression::Neutral),
    ("explorer", Expression::Neutral),
    ("farmer", Expression::Neutral),
    ("orphan", Expression::Neutral),
    ("knight", Expression::Neutral),
    ("wizard", Expression::Neutral),
    ("robot", Expression::Neutral),
];

/// Find the first role noun in the idea, in reading order.
pub fn detect_role(idea: &str) -> Option<Role> {
    tokenize(idea).iter().find_map(|word| {
        ROLES
            .iter()
            .find(|(noun, _)| matches_keyword(word, noun))
            .map(|&(noun, expression)| Role { noun, expression })
    })
}
