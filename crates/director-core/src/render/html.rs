//! HTML rendering: the single-page view with the idea form and the eight
//! numbered plan sections.

use super::SECTION_TITLES;
use crate::model::{Plan, SceneBlueprint};

/// Everything the page needs besides the plan itself.
#[derive(Debug, Clone, Copy)]
pub struct PageView<'a> {
    pub plan: &'a Plan,
    /// Text shown in the idea textarea.
    pub draft: &'a str,
    /// Message shown above the plan, e.g. after a rejected submission.
    pub notice: Option<&'a str>,
    /// Whether to render the submission form.
    pub form: bool,
}

impl<'a> PageView<'a> {
    /// A read-only page for saving to disk.
    pub fn standalone(plan: &'a Plan) -> Self {
        Self {
            plan,
            draft: &plan.idea,
            notice: None,
            form: false,
        }
    }

    /// A page with the submission form, as served over HTTP.
    pub fn interactive(plan: &'a Plan, draft: &'a str, notice: Option<&'a str>) -> Self {
        Self {
            plan,
            draft,
            notice,
            form: true,
        }
    }
}

const STYLE: &str = "\
body{margin:0;font-family:system-ui,sans-serif;background:#0f1117;color:#e8e8ef;line-height:1.5}\
header{padding:2rem;background:linear-gradient(90deg,#b0123b,#5b21b6);text-align:center}\
header h1{margin:0}main{max-width:960px;margin:0 auto;padding:1.5rem}\
.idea-form{display:flex;flex-direction:column;gap:.5rem;margin-bottom:1.5rem}\
textarea{font:inherit;padding:.75rem;border-radius:6px;border:1px solid #444;background:#1a1d27;color:inherit}\
button{align-self:flex-start;padding:.6rem 1.4rem;border:0;border-radius:6px;background:#e11d48;color:#fff;font-weight:600;cursor:pointer}\
.notice{padding:.75rem;border-radius:6px;background:#7c2d12}\
.plan-section{margin:1.5rem 0;padding:1rem 1.25rem;border-radius:8px;background:#171a24}\
.num{display:inline-block;min-width:1.6rem;text-align:center;border-radius:50%;background:#e11d48;color:#fff}\
.scene,.prompt{border-left:3px solid #5b21b6;padding-left:.75rem;margin:1rem 0}\
.note{color:#fbbf24}blockquote{margin:.5rem 0 .5rem 1rem;color:#c4c4d4}\
table{border-collapse:collapse;width:100%}th,td{border:1px solid #333;padding:.4rem;text-align:left}";

/// Escape text for HTML element and attribute content.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            other => out.push(other),
        }
    }
    out
}

/// Render the complete HTML document.
pub fn render_page(view: &PageView<'_>) -> String {
    let form = if view.form {
        format!(
            "<form method=\"post\" action=\"/\" class=\"idea-form\">\
<label for=\"idea\">Story idea</label>\
<textarea id=\"idea\" name=\"idea\" rows=\"3\" placeholder=\"Describe your story idea\">{draft}</textarea>\
<button type=\"submit\">Generate Viral Plan</button>\
</form>",
            draft = escape(view.draft),
        )
    } else {
        String::new()
    };
    let notice = view
        .notice
        .map(|n| format!("<p class=\"notice\" role=\"alert\">{}</p>", escape(n)))
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n\
<html lang=\"en\"><head><meta charset=\"utf-8\">\
<meta name=\"viewport\" content=\"width=device-width, initial-scale=1\">\
<title>Viral Production Director</title><style>{STYLE}</style></head><body>\
<header><h1>Viral Production Director</h1>\
<p>Turn any story idea into a 15-minute viral YouTube production plan.</p></header>\
<main>{form}{notice}\n{plan}\n</main></body></html>\n",
        plan = render_plan(view.plan),
    )
}

/// Render the eight plan sections without the page chrome.
pub fn render_plan(plan: &Plan) -> String {
    let bodies = [
        strategy(plan),
        script(plan),
        visual_prompts(plan),
        voices(plan),
        sound(plan),
        retention(plan),
        monetization(plan),
        ordered_list(&plan.copyright),
    ];
    bodies
        .iter()
        .zip(SECTION_TITLES)
        .enumerate()
        .map(|(idx, (body, title))| {
            format!(
                "<section class=\"plan-section\"><h2><span class=\"num\">{n}</span> {title}</h2>{body}</section>",
                n = idx + 1,
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

// ---------------------------------------------------------------------------
// Section bodies
// ---------------------------------------------------------------------------

fn field(label: &str, value: &str) -> String {
    format!("<p><strong>{label}:</strong> {}</p>", escape(value))
}

fn list(items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ul>{rows}</ul>")
}

fn ordered_list(items: &[String]) -> String {
    let rows: String = items
        .iter()
        .map(|item| format!("<li>{}</li>", escape(item)))
        .collect();
    format!("<ol>{rows}</ol>")
}

fn titled_list(title: &str, items: &[String]) -> String {
    format!("<h3>{title}</h3>{}", list(items))
}

fn strategy(plan: &Plan) -> String {
    [
        field("Idea", &plan.idea),
        field("Category", plan.category.label()),
        field("Target audience", &plan.target_audience),
        field("Hook line", &plan.hook_line),
        field("Why it can trend", &plan.trend_reason),
        field("Theme", &plan.theme),
        field("Setting", &plan.setting),
        titled_list("Emotional triggers", &plan.emotional_triggers),
        format!(
            "<h3>Retention strategy</h3>{}",
            ordered_list(&plan.retention_strategy)
        ),
        format!(
            "<p class=\"fingerprint\">Plan fingerprint: <code>{}</code></p>",
            escape(&plan.fingerprint)
        ),
    ]
    .concat()
}

fn script(plan: &Plan) -> String {
    plan.script
        .acts
        .iter()
        .map(|act| {
            let scenes: String = act.scenes.iter().map(scene).collect();
            format!(
                "<article class=\"act\"><h3>Act {id}: {title}</h3><p class=\"focus\">{focus}</p>{scenes}</article>",
                id = act.id,
                title = escape(&act.title),
                focus = escape(&act.focus),
            )
        })
        .collect()
}

fn scene(scene: &SceneBlueprint) -> String {
    let notes: String = [
        ("Pattern interrupt", &scene.pattern_interrupt),
        ("Emotional peak", &scene.emotional_peak),
        ("Cliffhanger", &scene.cliffhanger),
    ]
    .into_iter()
    .filter_map(|(label, text)| {
        text.as_ref().map(|t| {
            format!(
                "<p class=\"note\"><strong>{label}:</strong> {}</p>",
                escape(t)
            )
        })
    })
    .collect();
    let dialogue: String = scene
        .dialogue
        .iter()
        .map(|line| {
            format!(
                "<p><strong>{}:</strong> {}</p>",
                escape(&line.speaker),
                escape(&line.line)
            )
        })
        .collect();
    let dialogue = if dialogue.is_empty() {
        dialogue
    } else {
        format!("<blockquote>{dialogue}</blockquote>")
    };

    format!(
        "<div class=\"scene\"><h4>Scene {id} · {mark} ({duration}): {title}</h4>\
<p>{description}</p>\
<p><strong>Tone:</strong> {tone} · <strong>Pacing:</strong> {pacing}</p>\
{notes}{dialogue}</div>",
        id = scene.id,
        mark = escape(&scene.minute_mark),
        duration = escape(&scene.duration),
        title = escape(&scene.title),
        description = escape(&scene.description),
        tone = escape(&scene.emotional_tone),
        pacing = escape(&scene.pacing),
    )
}

fn visual_prompts(plan: &Plan) -> String {
    plan.scenes()
        .map(|scene| {
            let prompt = &scene.visual_prompt;
            format!(
                "<div class=\"prompt\"><h4>Scene {id}: {title}</h4><ul>\
<li><strong>Character focus:</strong> {focus}</li>\
<li><strong>Camera angle:</strong> {camera}</li>\
<li><strong>Lighting:</strong> {lighting}</li>\
<li><strong>Environment:</strong> {environment}</li>\
<li><strong>Action:</strong> {action}</li></ul></div>",
                id = scene.id,
                title = escape(&scene.title),
                focus = escape(&prompt.character_focus),
                camera = escape(&prompt.camera_angle),
                lighting = escape(&prompt.lighting),
                environment = escape(&prompt.environment),
                action = escape(&prompt.action),
            )
        })
        .collect()
}

fn voices(plan: &Plan) -> String {
    let rows: String = plan
        .voice_design
        .iter()
        .map(|voice| {
            format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>",
                escape(&voice.character),
                escape(&voice.style),
                escape(&voice.gender),
                escape(&voice.age_tone),
                escape(&voice.emotion_palette),
                escape(&voice.speaking_speed),
            )
        })
        .collect();
    format!(
        "<table><tr><th>Character</th><th>Style</th><th>Gender</th><th>Age / tone</th>\
<th>Emotion palette</th><th>Speaking speed</th></tr>{rows}</table>"
    )
}

fn sound(plan: &Plan) -> String {
    let sound = &plan.sound_design;
    [
        titled_list("Ambient", &sound.ambient),
        titled_list("Effects", &sound.effects),
        titled_list("Score", &sound.score),
    ]
    .concat()
}

fn retention(plan: &Plan) -> String {
    let boosters = &plan.retention_boosters;
    [
        titled_list("Hook lines", &boosters.hook_lines),
        titled_list("Suspense moments", &boosters.suspense_moments),
        titled_list("Emotional dialogues", &boosters.emotional_dialogues),
        titled_list("Open loops", &boosters.open_loops),
    ]
    .concat()
}

fn monetization(plan: &Plan) -> String {
    let money = &plan.monetization;
    let mid_rolls: String = money
        .mid_rolls
        .iter()
        .map(|m| {
            format!(
                "<li><strong>{}</strong> {}</li>",
                escape(&m.timestamp),
                escape(&m.description)
            )
        })
        .collect();
    [
        titled_list("Ad-safe moments", &money.ad_safe_moments),
        format!("<h3>Mid-roll placements</h3><ul>{mid_rolls}</ul>"),
        titled_list("Compliance", &money.compliance),
    ]
    .concat()
}
