//! Integration tests for plan generation.
//!
//! Runs the public API over a corpus of ideas and checks the properties
//! every plan must have: determinism, structural completeness, the fixed
//! 15-minute timeline, and keyword-driven theming.

use director_core::plan::timeline::{RUNTIME_SECS, parse_duration, parse_timestamp};
use director_core::theme::TemplateLibrary;
use director_core::{
    GenerateError, OutputFormat, Plan, ThemeCategory, classify, generate_plan, render,
    validate_plan,
};

const CORPUS: &[&str] = &[
    "Create a superhero story where a father saves his family",
    "A detective uncovers a secret in a haunted lighthouse",
    "Two explorers search a jungle island for lost treasure",
    "A grandma brings her family home for one last holiday",
    "A shy robot learns to dance",
    "A teenage inventor builds wings out of umbrellas",
    "The mystery of the vanished orchestra",
    "Mom and dad forget their own anniversary",
    "a",
    "ÜBER-HERO!!! rescues   kittens ... in Tokyo",
    "A story with {braces} and <angle brackets> & ampersands",
];

fn plan(idea: &str) -> Plan {
    generate_plan(idea).unwrap_or_else(|e| panic!("generation failed for {idea:?}: {e}"))
}

// -----------------------------------------------------------------------
// Properties
// -----------------------------------------------------------------------

#[test]
fn generation_is_deterministic() {
    for idea in CORPUS {
        assert_eq!(plan(idea), plan(idea), "plan differs for {idea:?}");
    }
}

#[test]
fn every_plan_validates() {
    for idea in CORPUS {
        let plan = plan(idea);
        assert_eq!(validate_plan(&plan), Ok(()), "invalid plan for {idea:?}");
        assert_eq!(plan.script.acts.len(), 4);
        assert_eq!(plan.scene_count(), 10);
        assert!(plan.script.acts.iter().all(|act| !act.scenes.is_empty()));
    }
}

#[test]
fn timeline_fills_fifteen_minutes() {
    for idea in CORPUS {
        let plan = plan(idea);
        let mut last_start = 0;
        let mut end = 0;
        for (idx, scene) in plan.scenes().enumerate() {
            let start = parse_timestamp(&scene.minute_mark).unwrap();
            if idx == 0 {
                assert_eq!(start, 0, "first scene must start at 00:00");
            }
            assert!(start >= last_start, "minute marks went backwards");
            last_start = start;
            end = start + parse_duration(&scene.duration).unwrap();
        }
        assert_eq!(end, RUNTIME_SECS);
    }
}

#[test]
fn scene_ids_are_unique_and_increasing() {
    let plan = plan(CORPUS[0]);
    let ids: Vec<u32> = plan.scenes().map(|s| s.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<u32>>());
}

#[test]
fn every_list_section_is_populated() {
    for idea in CORPUS {
        let plan = plan(idea);
        assert!(!plan.target_audience.is_empty());
        assert!(!plan.emotional_triggers.is_empty());
        assert!(!plan.retention_strategy.is_empty());
        assert!(!plan.voice_design.is_empty());
        assert!(!plan.sound_design.ambient.is_empty());
        assert!(!plan.sound_design.effects.is_empty());
        assert!(!plan.sound_design.score.is_empty());
        assert!(!plan.retention_boosters.hook_lines.is_empty());
        assert!(!plan.retention_boosters.suspense_moments.is_empty());
        assert!(!plan.retention_boosters.emotional_dialogues.is_empty());
        assert!(!plan.retention_boosters.open_loops.is_empty());
        assert!(!plan.monetization.ad_safe_moments.is_empty());
        assert_eq!(plan.monetization.mid_rolls.len(), 3);
        assert!(!plan.monetization.compliance.is_empty());
        assert!(!plan.copyright.is_empty());
    }
}

#[test]
fn fingerprint_tracks_idea_text() {
    let a = plan("A knight guards a bridge");
    let b = plan("A knight guards a bridge");
    let c = plan("A knight guards a tower");
    assert_eq!(a.fingerprint, b.fingerprint);
    assert_ne!(a.fingerprint, c.fingerprint);
    assert_eq!(a.fingerprint.len(), 16);
}

// -----------------------------------------------------------------------
// Keyword sensitivity
// -----------------------------------------------------------------------

#[test]
fn keyword_changes_theme() {
    let hero = plan("A superhero story");
    let plain = plan("A story about a laundromat");
    assert_eq!(hero.category, ThemeCategory::Hero);
    assert_eq!(plain.category, ThemeCategory::General);
    assert_ne!(hero.theme, plain.theme);
}

#[test]
fn classification_is_case_and_plural_insensitive() {
    assert_eq!(classify("HEROES of the harbor"), ThemeCategory::Hero);
    assert_eq!(classify("Ghosts, clues and secrets"), ThemeCategory::Mystery);
    assert_eq!(classify("Dragons over the mountains"), ThemeCategory::Adventure);
    assert_eq!(classify("Two families feud over a farm"), ThemeCategory::Family);
    assert_eq!(classify("The mysteries beneath the town"), ThemeCategory::Mystery);
}

#[test]
fn every_category_is_reachable() {
    let reached: Vec<ThemeCategory> = CORPUS.iter().map(|idea| plan(idea).category).collect();
    for category in ThemeCategory::ALL {
        assert!(reached.contains(&category), "{category} never selected");
    }
}

// -----------------------------------------------------------------------
// Scenarios
// -----------------------------------------------------------------------

#[test]
fn scenario_superhero_father() {
    let plan = plan("Create a superhero story where a father saves his family");
    assert_eq!(plan.category, ThemeCategory::Hero);

    let theme = plan.theme.to_lowercase();
    assert!(theme.contains("heroism"), "{}", plan.theme);
    assert!(theme.contains("protects the family"), "{}", plan.theme);

    assert!(!plan.target_audience.is_empty());
    assert_eq!(plan.script.acts.len(), 4);
    assert_eq!(plan.scene_count(), 10);
}

#[test]
fn scenario_blank_input_is_rejected() {
    for idea in ["", " ", "\t\n  \r\n"] {
        assert_eq!(generate_plan(idea), Err(GenerateError::InvalidInput));
    }
}

#[test]
fn scenario_same_category_shares_strategy() {
    let a = plan("A superhero rescues a cat");
    let b = plan("A brave kid becomes a hero");
    assert_eq!(a.category, ThemeCategory::Hero);
    assert_eq!(b.category, ThemeCategory::Hero);

    assert_eq!(a.theme, b.theme);
    assert_eq!(a.setting, b.setting);
    assert_eq!(a.target_audience, b.target_audience);
    assert_eq!(a.emotional_triggers, b.emotional_triggers);
    assert_eq!(a.retention_strategy, b.retention_strategy);
    assert_ne!(a.trend_reason, b.trend_reason);
}

// -----------------------------------------------------------------------
// Library and rendering
// -----------------------------------------------------------------------

#[test]
fn builtin_library_generates_same_as_free_function() {
    let idea = "Pirates race a rival crew to a sunken kingdom";
    assert_eq!(
        TemplateLibrary::builtin().generate(idea).unwrap(),
        plan(idea)
    );
}

#[test]
fn renders_every_format_for_every_idea() {
    for idea in CORPUS {
        let plan = plan(idea);
        for format in [OutputFormat::Json, OutputFormat::Markdown, OutputFormat::Html] {
            let out = render(&plan, format).unwrap();
            assert!(!out.is_empty());
            for scene in plan.scenes() {
                let title = match format {
                    OutputFormat::Html => director_core::render::html::escape(&scene.title),
                    _ => scene.title.clone(),
                };
                assert!(out.contains(&title), "{format} lacks {:?}", scene.title);
            }
        }
    }
}

/// Prompt fields, sound lists, emotional dialogues and mid-roll descriptions
/// in the order a rendered document must show them.
fn detail_sequence(plan: &Plan) -> Vec<String> {
    let mut seq = Vec::new();
    for scene in plan.scenes() {
        let prompt = &scene.visual_prompt;
        seq.extend([
            prompt.character_focus.clone(),
            prompt.camera_angle.clone(),
            prompt.lighting.clone(),
            prompt.environment.clone(),
            prompt.action.clone(),
        ]);
    }
    let sound = &plan.sound_design;
    seq.extend(sound.ambient.iter().chain(&sound.effects).chain(&sound.score).cloned());
    seq.extend(plan.retention_boosters.emotional_dialogues.iter().cloned());
    seq.extend(plan.monetization.mid_rolls.iter().map(|m| m.description.clone()));
    seq
}

fn assert_in_order_after(doc: &str, anchor: &str, needles: &[String], label: &str) {
    let mut from = doc
        .find(anchor)
        .unwrap_or_else(|| panic!("{label}: anchor {anchor:?} missing"))
        + anchor.len();
    for needle in needles {
        let pos = doc[from..]
            .find(needle.as_str())
            .unwrap_or_else(|| panic!("{label}: {needle:?} missing or out of order"));
        from += pos + needle.len();
    }
}

#[test]
fn rendered_documents_keep_every_detail_in_order() {
    for idea in CORPUS {
        let plan = plan(idea);
        let details = detail_sequence(&plan);

        let markdown = render(&plan, OutputFormat::Markdown).unwrap();
        assert_in_order_after(&markdown, "## 3. Visual Prompts", &details, "markdown");

        let html = render(&plan, OutputFormat::Html).unwrap();
        let escaped: Vec<String> = details
            .iter()
            .map(|d| director_core::render::html::escape(d))
            .collect();
        assert_in_order_after(&html, "3</span> Visual Prompts</h2>", &escaped, "html");
    }
}

#[test]
fn html_escapes_user_supplied_idea() {
    let plan = plan("A story with {braces} and <angle brackets> & ampersands");
    let html = render(&plan, OutputFormat::Html).unwrap();
    assert!(html.contains("&lt;angle brackets&gt; &amp; ampersands"));
    assert!(!html.contains("<angle brackets>"));
}
