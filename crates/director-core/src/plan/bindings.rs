//! Placeholder bindings and single-pass template interpolation.

use crate::theme::library::CastRole;

/// Every placeholder name a template may use, without braces.
pub const PLACEHOLDERS: [&str; 8] = [
    "idea",
    "protagonist",
    "role",
    "their",
    "ally",
    "antagonist",
    "narrator",
    "setting",
];

/// Values substituted into `{name}` placeholders for one plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bindings<'a> {
    pub idea: &'a str,
    pub protagonist: &'a str,
    pub role: &'a str,
    pub their: &'a str,
    pub ally: &'a str,
    pub antagonist: &'a str,
    pub narrator: &'a str,
    pub setting: &'a str,
}

impl<'a> Bindings<'a> {
    pub fn get(&self, key: &str) -> Option<&'a str> {
        match key {
            "idea" => Some(self.idea),
            "protagonist" => Some(self.protagonist),
            "role" => Some(self.role),
            "their" => Some(self.their),
            "ally" => Some(self.ally),
            "antagonist" => Some(self.antagonist),
            "narrator" => Some(self.narrator),
            "setting" => Some(self.setting),
            _ => None,
        }
    }

    /// Display name of a cast member.
    pub fn speaker(&self, role: CastRole) -> &'a str {
        match role {
            CastRole::Protagonist => self.protagonist,
            CastRole::Ally => self.ally,
            CastRole::Antagonist => self.antagonist,
            CastRole::Narrator => self.narrator,
        }
    }

    /// Substitute known placeholders in one pass.
    ///
    /// Substituted values are never rescanned, so braces inside the idea
    /// text come through literally. Unknown `{...}` sequences are kept as-is.
    pub fn apply(&self, template: &str) -> String {
        let mut out = String::with_capacity(template.len() + 32);
        let mut rest = template;
        while let Some(open) = rest.find('{') {
            out.push_str(&rest[..open]);
            let after = &rest[open + 1..];
            let resolved = after
                .find('}')
                .and_then(|close| self.get(&after[..close]).map(|value| (close, value)));
            match resolved {
                Some((close, value)) => {
                    out.push_str(value);
                    rest = &after[close + 1..];
                }
                None => {
                    out.push('{');
                    rest = after;
                }
            }
        }
        out.push_str(rest);
        out
    }
}

/// Placeholder names referenced by a template, in order of appearance.
///
/// Only `{name}` sequences made of lower-case letters and underscores count
/// as placeholders.
pub fn placeholders(template: &str) -> Vec<&str> {
    let mut found = Vec::new();
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            break;
        };
        let key = &after[..close];
        if !key.is_empty() && key.chars().all(|c| c.is_ascii_lowercase() || c == '_') {
            found.push(key);
            rest = &after[close + 1..];
        } else {
            rest = after;
        }
    }
    found
}
