//! Fixed 15-minute beat sheet shared by every plan.
//!
//! The structural shape (act count, scene count, timing) never varies with
//! the idea; only the content poured into it does.

/// Total runtime budget in seconds.
pub const RUNTIME_SECS: u32 = 15 * 60;

/// Number of acts in every script.
pub const ACT_COUNT: usize = 4;

/// Number of scenes in every script.
pub const SCENE_COUNT: usize = 10;

/// Act-level skeleton: number and title.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ActSlot {
    pub id: u32,
    pub title: &'static str,
}

/// Scene-level skeleton: where a scene sits and how it is shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Beat {
    /// 0-based index into [`ACTS`].
    pub act: usize,
    pub start_secs: u32,
    pub duration_secs: u32,
    pub pacing: &'static str,
    pub camera: &'static str,
}

impl Beat {
    pub const fn end_secs(&self) -> u32 {
        self.start_secs + self.duration_secs
    }
}

pub const ACTS: [ActSlot; ACT_COUNT] = [
    ActSlot {
        id: 1,
        title: "The Hook",
    },
    ActSlot {
        id: 2,
        title: "Rising Stakes",
    },
    ActSlot {
        id: 3,
        title: "The Darkest Hour",
    },
    ActSlot {
        id: 4,
        title: "Triumph & Open Loop",
    },
];

pub const BEATS: [Beat; SCENE_COUNT] = [
    Beat {
        act: 0,
        start_secs: 0,
        duration_secs: 45,
        pacing: "Rapid-fire cuts every 2-3 seconds",
        camera: "Extreme close-up snapping to a wide crane reveal",
    },
    Beat {
        act: 0,
        start_secs: 45,
        duration_secs: 105,
        pacing: "Measured build with quick character beats",
        camera: "Handheld medium shots at eye level",
    },
    Beat {
        act: 0,
        start_secs: 150,
        duration_secs: 90,
        pacing: "Accelerating; tension ramps every ten seconds",
        camera: "Dutch-angle push-in",
    },
    Beat {
        act: 1,
        start_secs: 240,
        duration_secs: 90,
        pacing: "Purposeful, goal-driven montage",
        camera: "Tracking shot alongside the lead",
    },
    Beat {
        act: 1,
        start_secs: 330,
        duration_secs: 90,
        pacing: "Stop-start with a hard pattern break",
        camera: "Whip pan into a low-angle hero shot",
    },
    Beat {
        act: 1,
        start_secs: 420,
        duration_secs: 90,
        pacing: "Slow burn into a sudden reveal",
        camera: "Over-the-shoulder into a slow dolly zoom",
    },
    Beat {
        act: 2,
        start_secs: 510,
        duration_secs: 90,
        pacing: "Slow and lingering; let silence breathe",
        camera: "High-angle wide with the lead small in frame",
    },
    Beat {
        act: 2,
        start_secs: 600,
        duration_secs: 90,
        pacing: "Quiet build to a decisive turn",
        camera: "Intimate close-up, shallow depth of field",
    },
    Beat {
        act: 3,
        start_secs: 690,
        duration_secs: 120,
        pacing: "Full-throttle climax, cutting on action",
        camera: "Sweeping drone orbit intercut with close-ups",
    },
    Beat {
        act: 3,
        start_secs: 810,
        duration_secs: 90,
        pacing: "Warm deceleration, then a sharp final sting",
        camera: "Slow pull-back wide ending on a snap zoom",
    },
];

/// Start second of every act, in order.
pub fn act_starts() -> [u32; ACT_COUNT] {
    let mut starts = [0; ACT_COUNT];
    for (idx, slot) in starts.iter_mut().enumerate() {
        *slot = BEATS
            .iter()
            .find(|beat| beat.act == idx)
            .map(|beat| beat.start_secs)
            .unwrap_or(RUNTIME_SECS);
    }
    starts
}

/// Format seconds as a `MM:SS` minute mark.
pub fn format_timestamp(secs: u32) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}

/// Parse a `MM:SS` minute mark back into seconds.
pub fn parse_timestamp(mark: &str) -> Option<u32> {
    let (minutes, seconds) = mark.split_once(':')?;
    if minutes.len() != 2 || seconds.len() != 2 {
        return None;
    }
    let minutes: u32 = minutes.parse().ok()?;
    let seconds: u32 = seconds.parse().ok()?;
    if seconds >= 60 {
        return None;
    }
    Some(minutes * 60 + seconds)
}

/// Format a scene length, e.g. `45s`, `2m`, `1m 45s`.
pub fn format_duration(secs: u32) -> String {
    match (secs / 60, secs % 60) {
        (0, s) => format!("{s}s"),
        (m, 0) => format!("{m}m"),
        (m, s) => format!("{m}m {s}s"),
    }
}

/// Parse a label produced by [`format_duration`] back into seconds.
pub fn parse_duration(label: &str) -> Option<u32> {
    let mut total = 0u32;
    let mut seen = false;
    for part in label.split_whitespace() {
        let secs = if let Some(m) = part.strip_suffix('m') {
            m.parse::<u32>().ok()?.checked_mul(60)?
        } else if let Some(s) = part.strip_suffix('s') {
            s.parse::<u32>().ok()?
        } else {
            return None;
        };
        total = total.checked_add(secs)?;
        seen = true;
    }
    seen.then_some(total)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn beats_are_contiguous_and_fill_runtime() {
        let mut cursor = 0;
        for beat in &BEATS {
            assert_eq!(beat.start_secs, cursor, "gap before beat at {cursor}s");
            assert!(beat.duration_secs > 0);
            cursor = beat.end_secs();
        }
        assert_eq!(cursor, RUNTIME_SECS);
    }

    #[test]
    fn every_act_has_a_beat_and_acts_are_ordered() {
        let mut last_act = 0;
        for beat in &BEATS {
            assert!(beat.act >= last_act, "acts must not interleave");
            last_act = beat.act;
        }
        for idx in 0..ACT_COUNT {
            assert!(
                BEATS.iter().any(|b| b.act == idx),
                "act {} has no beats",
                idx + 1
            );
        }
    }

    #[test]
    fn act_starts_match_boundaries() {
        assert_eq!(act_starts(), [0, 240, 510, 690]);
    }

    #[test]
    fn timestamps_format_and_parse() {
        assert_eq!(format_timestamp(0), "00:00");
        assert_eq!(format_timestamp(510), "08:30");
        assert_eq!(format_timestamp(RUNTIME_SECS), "15:00");
        assert_eq!(parse_timestamp("08:30"), Some(510));
        assert_eq!(parse_timestamp("8:30"), None);
        assert_eq!(parse_timestamp("08:75"), None);
        assert_eq!(parse_timestamp("garbage"), None);
    }

    #[test]
    fn durations_format_and_parse() {
        assert_eq!(format_duration(45), "45s");
        assert_eq!(format_duration(120), "2m");
        assert_eq!(format_duration(105), "1m 45s");
        assert_eq!(parse_duration("4294967295m"), None);
        assert_eq!(parse_duration("4294967295s 1s"), None);
        assert_eq!(parse_duration("4294967295s"), Some(u32::MAX));
        assert_eq!(parse_duration("1m 45s"), Some(105));
        assert_eq!(parse_duration("2m"), Some(120));
        assert_eq!(parse_duration(""), None);
        assert_eq!(parse_duration("soon"), None);
    }
}
