//! Presentation of a plan as JSON, Markdown or HTML.
//!
//! Renderers never derive content: every plan field is printed in plan
//! order, untruncated. HTML output escapes all text.

pub mod html;
pub mod markdown;

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::model::Plan;

/// Headings of the eight plan sections, in display order.
pub const SECTION_TITLES: [&str; 8] = [
    "Viral Strategy",
    "15-Minute Script",
    "Visual Prompts",
    "Voice Design",
    "Sound Design",
    "Retention Boosters",
    "Monetization",
    "Copyright Protection",
];

/// Errors that can occur while rendering a plan.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),
}

// ---------------------------------------------------------------------------
// OutputFormat
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    Json,
    #[default]
    Markdown,
    Html,
}

impl OutputFormat {
    /// Conventional file extension, without the dot.
    pub fn extension(self) -> &'static str {
        match self {
            Self::Json => "json",
            Self::Markdown => "md",
            Self::Html => "html",
        }
    }
}

impl fmt::Display for OutputFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Json => "json",
            Self::Markdown => "markdown",
            Self::Html => "html",
        };
        f.write_str(s)
    }
}

impl FromStr for OutputFormat {
    type Err = OutputFormatParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "json" => Ok(Self::Json),
            "markdown" | "md" => Ok(Self::Markdown),
            "html" => Ok(Self::Html),
            other => Err(OutputFormatParseError(other.to_owned())),
        }
    }
}

/// Error returned when parsing an invalid [`OutputFormat`] string.
#[derive(Debug, Clone)]
pub struct OutputFormatParseError(pub String);

impl fmt::Display for OutputFormatParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid output format: {:?} (expected json, markdown, or html)",
            self.0
        )
    }
}

impl std::error::Error for OutputFormatParseError {}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

/// Render a plan in the requested format.
///
/// HTML output is a standalone page without the submission form.
pub fn render(plan: &Plan, format: OutputFormat) -> Result<String, RenderError> {
    match format {
        OutputFormat::Json => {
            let mut json = serde_json::to_string_pretty(plan)?;
            json.push('\n');
            Ok(json)
        }
        OutputFormat::Markdown => Ok(markdown::render_plan(plan)),
        OutputFormat::Html => Ok(html::render_page(&html::PageView::standalone(plan))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::plan::generate_plan;

    #[test]
    fn format_parse_and_display() {
        for format in [OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
            assert_eq!(format.to_string().parse::<OutputFormat>().unwrap(), format);
        }
        assert_eq!("md".parse::<OutputFormat>().unwrap(), OutputFormat::Markdown);
        assert_eq!(OutputFormat::Markdown.extension(), "md");
        assert_eq!(OutputFormat::Html.extension(), "html");
        let err = "pdf".parse::<OutputFormat>().unwrap_err();
        assert!(err.to_string().contains("pdf"));
    }

    #[test]
    fn default_format_is_markdown() {
        assert_eq!(OutputFormat::default(), OutputFormat::Markdown);
    }

    #[test]
    fn json_round_trips_the_plan() {
        let plan = generate_plan("Pirates hunt treasure on a lost island").unwrap();
        let json = render(&plan, OutputFormat::Json).unwrap();
        let back: Plan = serde_json::from_str(&json).unwrap();
        assert_eq!(back, plan);
        assert!(json.contains("\"targetAudience\""));
        assert!(json.contains("\"minuteMark\""));
        assert!(json.contains("\"category\": \"adventure\""));
    }

    #[test]
    fn every_format_names_every_section() {
        let plan = generate_plan("Pirates hunt treasure on a lost island").unwrap();
        for format in [OutputFormat::Markdown, OutputFormat::Html] {
            let out = render(&plan, format).unwrap();
            for title in SECTION_TITLES {
                assert!(out.contains(title), "{format} output lacks {title}");
            }
        }
    }
}
