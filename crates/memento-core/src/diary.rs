use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::task::RecordId;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Mood {
    Happy,
    Sad,
    Excited,
    Angry,
    Relaxed,
    Anxious,
    Thoughtful,
    Neutral,
}

impl Mood {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "happy" => Some(Mood::Happy),
            "sad" => Some(Mood::Sad),
            "excited" => Some(Mood::Excited),
            "angry" => Some(Mood::Angry),
            "relaxed" => Some(Mood::Relaxed),
            "anxious" => Some(Mood::Anxious),
            "thoughtful" => Some(Mood::Thoughtful),
            "neutral" => Some(Mood::Neutral),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            Mood::Happy => "happy",
            Mood::Sad => "sad",
            Mood::Excited => "excited",
            Mood::Angry => "angry",
            Mood::Relaxed => "relaxed",
            Mood::Anxious => "anxious",
            Mood::Thoughtful => "thoughtful",
            Mood::Neutral => "neutral",
        }
    }

    pub fn emoji(&self) -> &'static str {
        match self {
            Mood::Happy => "😊",
            Mood::Sad => "😢",
            Mood::Excited => "😃",
            Mood::Angry => "😠",
            Mood::Relaxed => "😌",
            Mood::Anxious => "😰",
            Mood::Thoughtful => "🤔",
            Mood::Neutral => "😐",
        }
    }
}

impl Default for Mood {
    fn default() -> Self {
        Mood::Neutral
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiaryEntry {
    pub id: RecordId,

    pub title: String,

    pub content: String,

    pub date: NaiveDate,

    pub mood: Mood,

    pub tags: Vec<String>,
}

/// Fields collected from the write form before the store assigns an id
/// and fills in the defaults (dated today, neutral mood).
#[derive(Debug, Clone, Default)]
pub struct DiaryDraft {
    pub title: String,
    pub content: String,
    pub date: Option<NaiveDate>,
    pub mood: Option<Mood>,
    pub tags: Vec<String>,
}

/// Lowercases and trims a raw tag, rejecting ones that trim to nothing.
pub fn normalize_tag(raw: &str) -> Option<String> {
    let tag = raw.trim().to_lowercase();
    if tag.is_empty() { None } else { Some(tag) }
}

/// Normalizes a whole tag list, dropping duplicates while keeping the
/// order tags were first seen in.
pub fn normalize_tags<S: AsRef<str>>(raw: &[S]) -> Vec<String> {
    let mut tags: Vec<String> = Vec::with_capacity(raw.len());
    for item in raw {
        if let Some(tag) = normalize_tag(item.as_ref())
            && !tags.contains(&tag)
        {
            tags.push(tag);
        }
    }
    tags
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalize_tag_lowercases_and_trims() {
        assert_eq!(normalize_tag("  Work "), Some("work".to_string()));
        assert_eq!(normalize_tag("IDEAS"), Some("ideas".to_string()));
        assert_eq!(normalize_tag("   "), None);
    }

    #[test]
    fn normalize_tags_dedups_preserving_first_seen_order() {
        let raw = ["Work", "ideas", "WORK", " Ideas ", "plans"];
        assert_eq!(normalize_tags(&raw), vec!["work", "ideas", "plans"]);
    }

    #[test]
    fn mood_parse_round_trips_labels() {
        for mood in [
            Mood::Happy,
            Mood::Sad,
            Mood::Excited,
            Mood::Angry,
            Mood::Relaxed,
            Mood::Anxious,
            Mood::Thoughtful,
            Mood::Neutral,
        ] {
            assert_eq!(Mood::parse(mood.label()), Some(mood));
        }
        assert_eq!(Mood::parse("melancholy"), None);
    }

    #[test]
    fn mood_serde_uses_lowercase_names() {
        let json = serde_json::to_string(&Mood::Thoughtful).unwrap();
        assert_eq!(json, "\"thoughtful\"");
        let back: Mood = serde_json::from_str("\"relaxed\"").unwrap();
        assert_eq!(back, Mood::Relaxed);
    }
}
