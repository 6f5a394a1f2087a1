use anyhow::Result;
use director_core::theme::TemplateLibrary;

fn themes_listing(library: &TemplateLibrary, verbose: bool) -> String {
    let mut out = String::new();
    for set in library.themes() {
        let keywords = if set.keywords.is_empty() {
            "(fallback)".to_owned()
        } else {
            set.keywords.join(", ")
        };
        out.push_str(&format!("{:<10} {keywords}\n", set.category.to_string()));
        if verbose {
            out.push_str(&format!("           theme:   {}\n", set.theme));
            out.push_str(&format!("           setting: {}\n", set.setting_name));
            out.push_str(&format!("           cast:    {} vs. {}\n", set.cast.ally, set.cast.antagonist));
        }
    }
    out
}

/// Execute `director themes`.
pub fn run_themes(verbose: bool) -> Result<()> {
    print!("{}", themes_listing(TemplateLibrary::builtin(), verbose));
    Ok(())
}
