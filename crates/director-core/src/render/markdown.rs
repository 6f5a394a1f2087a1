//! Markdown rendering of a plan, for terminals and files.

use super::SECTION_TITLES;
use crate::model::{Plan, SceneBlueprint};

/// Render the plan as a Markdown document with the eight numbered sections.
pub fn render_plan(plan: &Plan) -> String {
    let bodies = [
        strategy(plan),
        script(plan),
        visual_prompts(plan),
        voices(plan),
        sound(plan),
        retention(plan),
        monetization(plan),
        numbered(&plan.copyright),
    ];

    let mut out = format!(
        "# Viral Production Plan\n\n{}\n\n`{}` · fingerprint `{}`\n",
        blockquote(&plan.idea),
        plan.category,
        plan.fingerprint
    );
    for (idx, (body, title)) in bodies.iter().zip(SECTION_TITLES).enumerate() {
        out.push_str(&format!("\n## {}. {title}\n\n{body}", idx + 1));
    }
    out
}

/// Quote every line so a multi-line idea stays inside one blockquote.
fn blockquote(text: &str) -> String {
    text.lines()
        .map(|line| {
            if line.trim().is_empty() {
                ">".to_owned()
            } else {
                format!("> {line}")
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bullets(items: &[String]) -> String {
    items.iter().map(|item| format!("- {item}\n")).collect()
}

fn numbered(items: &[String]) -> String {
    items
        .iter()
        .enumerate()
        .map(|(idx, item)| format!("{}. {item}\n", idx + 1))
        .collect()
}

fn strategy(plan: &Plan) -> String {
    format!(
        "**Category:** {category}\n\n\
**Target audience:** {audience}\n\n\
**Hook line:** {hook}\n\n\
**Why it can trend:** {trend}\n\n\
**Theme:** {theme}\n\n\
**Setting:** {setting}\n\n\
### Emotional triggers\n\n{triggers}\n\
### Retention strategy\n\n{strategy}",
        category = plan.category.label(),
        audience = plan.target_audience,
        hook = plan.hook_line,
        trend = plan.trend_reason,
        theme = plan.theme,
        setting = plan.setting,
        triggers = bullets(&plan.emotional_triggers),
        strategy = numbered(&plan.retention_strategy),
    )
}

fn script(plan: &Plan) -> String {
    plan.script
        .acts
        .iter()
        .map(|act| {
            let scenes: String = act.scenes.iter().map(scene).collect();
            format!("### Act {}: {}\n\n_{}_\n\n{scenes}", act.id, act.title, act.focus)
        })
        .collect()
}

fn scene(scene: &SceneBlueprint) -> String {
    let mut out = format!(
        "#### Scene {} · {} ({}): {}\n\n{}\n\n- **Tone:** {}\n- **Pacing:** {}\n",
        scene.id,
        scene.minute_mark,
        scene.duration,
        scene.title,
        scene.description,
        scene.emotional_tone,
        scene.pacing,
    );
    for (label, note) in [
        ("Pattern interrupt", &scene.pattern_interrupt),
        ("Emotional peak", &scene.emotional_peak),
        ("Cliffhanger", &scene.cliffhanger),
    ] {
        if let Some(note) = note {
            out.push_str(&format!("- **{label}:** {note}\n"));
        }
    }
    if !scene.dialogue.is_empty() {
        out.push('\n');
        for line in &scene.dialogue {
            out.push_str(&format!("> **{}:** {}\n", line.speaker, line.line));
        }
    }
    out.push('\n');
    out
}

fn visual_prompts(plan: &Plan) -> String {
    plan.scenes()
        .map(|scene| {
            let prompt = &scene.visual_prompt;
            format!(
                "#### Scene {}: {}\n\n\
- **Character focus:** {}\n\
- **Camera angle:** {}\n\
- **Lighting:** {}\n\
- **Environment:** {}\n\
- **Action:** {}\n\n",
                scene.id,
                scene.title,
                prompt.character_focus,
                prompt.camera_angle,
                prompt.lighting,
                prompt.environment,
                prompt.action,
            )
        })
        .collect()
}

fn voices(plan: &Plan) -> String {
    let rows: String = plan
        .voice_design
        .iter()
        .map(|v| {
            format!(
                "| {} | {} | {} | {} | {} | {} |\n",
                cell(&v.character),
                cell(&v.style),
                cell(&v.gender),
                cell(&v.age_tone),
                cell(&v.emotion_palette),
                cell(&v.speaking_speed),
            )
        })
        .collect();
    format!(
        "| Character | Style | Gender | Age / tone | Emotion palette | Speaking speed |\n\
|---|---|---|---|---|---|\n{rows}"
    )
}

/// Pipes would split a table cell.
fn cell(text: &str) -> String {
    text.replace('|', "\\|")
}

fn sound(plan: &Plan) -> String {
    let sound = &plan.sound_design;
    format!(
        "### Ambient\n\n{}\n### Effects\n\n{}\n### Score\n\n{}",
        bullets(&sound.ambient),
        bullets(&sound.effects),
        bullets(&sound.score),
    )
}

fn retention(plan: &Plan) -> String {
    let boosters = &plan.retention_boosters;
    format!(
        "### Hook lines\n\n{}\n### Suspense moments\n\n{}\n### Emotional dialogues\n\n{}\n### Open loops\n\n{}",
        bullets(&boosters.hook_lines),
        bullets(&boosters.suspense_moments),
        bullets(&boosters.emotional_dialogues),
        bullets(&boosters.open_loops),
    )
}

fn monetization(plan: &Plan) -> String {
    let money = &plan.monetization;
    let mid_rolls: String = money
        .mid_rolls
        .iter()
        .map(|m| format!("- **{}** {}\n", m.timestamp, m.description))
        .collect();
    format!(
        "### Ad-safe moments\n\n{}\n### Mid-roll placements\n\n{mid_rolls}\n### Compliance\n\n{}",
        bullets(&money.ad_safe_moments),
        bullets(&money.compliance),
    )
}
