use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use director_core::{OutputFormat, Plan, generate_plan, render, validate_plan};

/// Read the idea from the positional argument or a file, trimmed.
///
/// Exactly one source must be given; empty input is refused here so the
/// user sees a command-level error instead of a generator error.
pub fn read_idea(idea: Option<&str>, file: Option<&str>) -> Result<String> {
    let raw = match (idea, file) {
        (Some(_), Some(_)) => bail!("pass the idea as an argument or with --file, not both"),
        (Some(text), None) => text.to_owned(),
        (None, Some(path)) => std::fs::read_to_string(path)
            .with_context(|| format!("cannot read idea file: {path}"))?,
        (None, None) => bail!("no story idea given; pass it as an argument or with --file"),
    };

    let trimmed = raw.trim();
    if trimmed.is_empty() {
        tracing::warn!("rejected empty story idea");
        bail!("story idea must not be empty or whitespace");
    }
    Ok(trimmed.to_owned())
}

/// Generate, validate and render a plan for `idea`.
pub fn build_document(idea: &str, format: OutputFormat) -> Result<(Plan, String)> {
    let plan = generate_plan(idea)?;
    validate_plan(&plan).context("generated plan failed validation")?;
    tracing::info!(
        category = %plan.category,
        fingerprint = %plan.fingerprint,
        scenes = plan.scene_count(),
        "generated plan"
    );
    let document = render(&plan, format)?;
    Ok((plan, document))
}

/// Where to write the document. An existing directory gets a file named
/// after the plan's fingerprint, e.g. `plan-1a2b3c4d5e6f7a8b.md`.
pub fn output_path(output: &str, plan: &Plan, format: OutputFormat) -> PathBuf {
    let path = Path::new(output);
    if path.is_dir() {
        path.join(format!("plan-{}.{}", plan.fingerprint, format.extension()))
    } else {
        path.to_path_buf()
    }
}

/// Execute `director generate`.
pub fn run_generate(
    idea: Option<&str>,
    file: Option<&str>,
    format: OutputFormat,
    output: Option<&str>,
) -> Result<()> {
    let idea = read_idea(idea, file)?;
    let (plan, document) = build_document(&idea, format)?;

    let target = output.map(|out| output_path(out, &plan, format));

    let mut writer: Box<dyn Write> = if let Some(path) = &target {
        Box::new(
            std::fs::File::create(path)
                .with_context(|| format!("cannot create output file: {}", path.display()))?,
        )
    } else {
        Box::new(std::io::stdout().lock())
    };
    writer.write_all(document.as_bytes())?;
    writer.flush()?;

    if let Some(path) = &target {
        println!(
            "Wrote {format} plan ({} theme, {} scenes) to {}",
            plan.category,
            plan.scene_count(),
            path.display()
        );
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn idea_argument_is_trimmed() {
        let idea = read_idea(Some("  A hero rises \n"), None).unwrap();
        assert_eq!(idea, "A hero rises");
    }

    #[test]
    fn idea_file_is_read_and_trimmed() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("idea.txt");
        std::fs::write(&path, "\nA detective and a locked room\n\n").unwrap();

        let idea = read_idea(None, Some(path.to_str().unwrap())).unwrap();
        assert_eq!(idea, "A detective and a locked room");
    }

    #[test]
    fn blank_or_missing_idea_is_refused() {
        for blank in ["", "   ", "\n\t"] {
            let err = read_idea(Some(blank), None).unwrap_err();
            assert!(err.to_string().contains("must not be empty"), "{err}");
        }
        assert!(read_idea(None, None).is_err());
        assert!(read_idea(Some("a"), Some("b.txt")).is_err());
    }

    #[test]
    fn unreadable_file_names_the_path() {
        let err = read_idea(None, Some("/definitely/not/here.txt")).unwrap_err();
        assert!(err.to_string().contains("/definitely/not/here.txt"));
    }

    #[test]
    fn document_matches_requested_format() {
        let idea = "Create a superhero story where a father saves his family";
        let (plan, json) = build_document(idea, OutputFormat::Json).unwrap();
        let parsed: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed["idea"], idea);
        assert_eq!(parsed["fingerprint"], plan.fingerprint.as_str());

        let (_, markdown) = build_document(idea, OutputFormat::Markdown).unwrap();
        assert!(markdown.starts_with("# Viral Production Plan"));

        let (_, html) = build_document(idea, OutputFormat::Html).unwrap();
        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(!html.contains("<form"));
    }

    #[test]
    fn directory_output_is_named_by_fingerprint() {
        let tmp = tempfile::TempDir::new().unwrap();
        let dir = tmp.path().to_str().unwrap();
        let (plan, _) = build_document("A shy robot learns to dance", OutputFormat::Html).unwrap();

        let path = output_path(dir, &plan, OutputFormat::Html);
        assert_eq!(path, tmp.path().join(format!("plan-{}.html", plan.fingerprint)));

        let file = tmp.path().join("custom.txt");
        let file = file.to_str().unwrap();
        assert_eq!(output_path(file, &plan, OutputFormat::Json), PathBuf::from(file));

        run_generate(
            Some("A shy robot learns to dance"),
            None,
            OutputFormat::Json,
            Some(dir),
        )
        .unwrap();
        let written = tmp.path().join(format!("plan-{}.json", plan.fingerprint));
        assert!(std::fs::read_to_string(written).unwrap().contains("\"fingerprint\""));
    }

    #[test]
    fn run_generate_writes_output_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let out = tmp.path().join("plan.md");
        let out_str = out.to_str().unwrap();

        run_generate(
            Some("Two explorers search a jungle island"),
            None,
            OutputFormat::Markdown,
            Some(out_str),
        )
        .unwrap();

        let written = std::fs::read_to_string(&out).unwrap();
        assert!(written.contains("> Two explorers search a jungle island"));
        assert!(written.contains("## 8. Copyright Protection"));
    }
}
