use anyhow::Result;
use director_core::theme::{TemplateLibrary, detect_role};

/// Render the classification report for `idea`.
fn classification_report(library: &TemplateLibrary, idea: &str) -> String {
    let category = library.classify(idea);
    let mut out = format!("Category: {category} ({})\n", category.label());

    match detect_role(idea) {
        Some(role) => out.push_str(&format!("Role:     {}\n", role.noun)),
        None => out.push_str(&format!(
            "Role:     {} (theme default)\n",
            library.theme(category).cast.default_role
        )),
    }

    out.push_str("\nScores:\n");
    for (candidate, hits) in library.score(idea) {
        let marker = if candidate == category { "*" } else { " " };
        out.push_str(&format!("  {marker} {:<10} {hits}\n", candidate.to_string()));
    }
    out
}

/// Execute `director classify`.
pub fn run_classify(idea: &str) -> Result<()> {
    let idea = idea.trim();
    if idea.is_empty() {
        anyhow::bail!("story idea must not be empty or whitespace");
    }
    print!("{}", classification_report(TemplateLibrary::builtin(), idea));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_marks_winning_category() {
        let report = classification_report(
            TemplateLibrary::builtin(),
            "Create a superhero story where a father saves his family",
        );
        assert!(report.starts_with("Category: hero"), "{report}");
        assert!(report.contains("Role:     father"));
        assert!(report.contains("* hero"));
        assert!(report.contains("  family"));
    }

    #[test]
    fn report_without_keywords_falls_back() {
        let report = classification_report(TemplateLibrary::builtin(), "A story about a laundromat");
        assert!(report.starts_with("Category: general"), "{report}");
        assert!(report.contains("(theme default)"));
    }

    #[test]
    fn blank_idea_is_refused() {
        assert!(run_classify("   ").is_err());
    }
}
