//! Seed records each page starts from. The collections are deliberately
//! separate per page; the dashboard's short task and entry lists are not
//! views over the fuller to-do and diary collections.

use chrono::NaiveDate;

use crate::diary::{DiaryEntry, Mood};
use crate::task::{Priority, RecordId, Task};

fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default()
}

fn task(
    id: u64,
    title: &str,
    completed: bool,
    due: NaiveDate,
    priority: Priority,
    category: &str,
) -> Task {
    Task {
        id: RecordId(id),
        title: title.to_string(),
        completed,
        due,
        priority,
        category: category.to_string(),
    }
}

pub fn todo_tasks() -> Vec<Task> {
    vec![
        task(
            1,
            "Complete project proposal",
            true,
            date(2025, 6, 15),
            Priority::High,
            "work",
        ),
        task(
            2,
            "Review client feedback",
            false,
            date(2025, 6, 16),
            Priority::Medium,
            "work",
        ),
        task(
            3,
            "Prepare presentation slides",
            false,
            date(2025, 6, 17),
            Priority::High,
            "work",
        ),
        task(
            4,
            "Schedule team meeting",
            true,
            date(2025, 6, 15),
            Priority::Low,
            "work",
        ),
        task(
            5,
            "Buy groceries",
            false,
            date(2025, 6, 15),
            Priority::Medium,
            "personal",
        ),
        task(
            6,
            "Go for a run",
            false,
            date(2025, 6, 15),
            Priority::Low,
            "health",
        ),
        task(
            7,
            "Read 30 pages",
            false,
            date(2025, 6, 16),
            Priority::Medium,
            "personal",
        ),
        task(
            8,
            "Call mom",
            false,
            date(2025, 6, 17),
            Priority::High,
            "personal",
        ),
    ]
}

/// The dashboard's own short task list. The source records carry only a
/// title, flag, and due date; the remaining fields take model defaults.
pub fn dashboard_tasks() -> Vec<Task> {
    vec![
        task(
            1,
            "Complete project proposal",
            true,
            date(2025, 6, 15),
            Priority::Medium,
            "personal",
        ),
        task(
            2,
            "Review client feedback",
            false,
            date(2025, 6, 16),
            Priority::Medium,
            "personal",
        ),
        task(
            3,
            "Prepare presentation slides",
            false,
            date(2025, 6, 17),
            Priority::Medium,
            "personal",
        ),
        task(
            4,
            "Schedule team meeting",
            true,
            date(2025, 6, 15),
            Priority::Medium,
            "personal",
        ),
    ]
}

pub fn dashboard_entries() -> Vec<DiaryEntry> {
    vec![
        DiaryEntry {
            id: RecordId(1),
            title: "A productive day".to_string(),
            content: "Today was incredibly productive. I managed to complete all my tasks \
                      ahead of schedule."
                .to_string(),
            date: date(2025, 6, 14),
            mood: Mood::Neutral,
            tags: vec![],
        },
        DiaryEntry {
            id: RecordId(2),
            title: "New project ideas".to_string(),
            content: "Had a brainstorming session and came up with some exciting new project \
                      ideas."
                .to_string(),
            date: date(2025, 6, 13),
            mood: Mood::Neutral,
            tags: vec![],
        },
    ]
}

pub fn diary_entries() -> Vec<DiaryEntry> {
    vec![
        DiaryEntry {
            id: RecordId(1),
            title: "A productive day".to_string(),
            content: "Today was incredibly productive. I managed to complete all my tasks \
                      ahead of schedule. I started the day with a morning run, which gave me \
                      energy for the entire day. Then I focused on my project proposal and \
                      finished it by noon. In the afternoon, I had a great meeting with the \
                      team where we discussed our next steps. Overall, it was a day well \
                      spent!"
                .to_string(),
            date: date(2025, 6, 14),
            mood: Mood::Happy,
            tags: vec!["work".to_string(), "productivity".to_string()],
        },
        DiaryEntry {
            id: RecordId(2),
            title: "New project ideas".to_string(),
            content: "Had a brainstorming session and came up with some exciting new project \
                      ideas. I think the concept of a mindfulness app could be really \
                      interesting to explore. I also thought about a recipe sharing platform \
                      with a focus on sustainability. Need to flesh these ideas out more, but \
                      I'm excited about the possibilities."
                .to_string(),
            date: date(2025, 6, 13),
            mood: Mood::Excited,
            tags: vec!["ideas".to_string(), "creativity".to_string()],
        },
        DiaryEntry {
            id: RecordId(3),
            title: "Reflections on the week".to_string(),
            content: "Looking back at this week, I've made good progress on my goals. I've \
                      been consistent with my morning routine and managed to read for at \
                      least 30 minutes every day. I need to work on being more patient with \
                      myself when things don't go as planned. Tomorrow is a new day with new \
                      opportunities."
                .to_string(),
            date: date(2025, 6, 12),
            mood: Mood::Thoughtful,
            tags: vec!["reflection".to_string(), "personal growth".to_string()],
        },
        DiaryEntry {
            id: RecordId(4),
            title: "Weekend plans".to_string(),
            content: "Planning a relaxing weekend. I want to visit the farmers market in the \
                      morning, then maybe go for a hike if the weather is nice. In the \
                      evening, I'll probably watch that new movie everyone's been talking \
                      about. It's important to take time to recharge."
                .to_string(),
            date: date(2025, 6, 11),
            mood: Mood::Relaxed,
            tags: vec!["weekend".to_string(), "plans".to_string()],
        },
    ]
}
