use crate::diary::DiaryEntry;
use crate::task::Task;

/// Tri-state completion filter backing the All / Active / Completed
/// buttons on the to-do page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusFilter {
    All,
    Active,
    Completed,
}

impl StatusFilter {
    pub fn parse(token: &str) -> Option<Self> {
        match token.to_ascii_lowercase().as_str() {
            "all" => Some(StatusFilter::All),
            "active" | "open" | "pending" => Some(StatusFilter::Active),
            "completed" | "done" => Some(StatusFilter::Completed),
            _ => None,
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            StatusFilter::All => "all",
            StatusFilter::Active => "active",
            StatusFilter::Completed => "completed",
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            StatusFilter::All => true,
            StatusFilter::Active => !task.completed,
            StatusFilter::Completed => task.completed,
        }
    }
}

impl Default for StatusFilter {
    fn default() -> Self {
        StatusFilter::All
    }
}

/// Category filter: either everything or an exact category string.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryFilter {
    All,
    Only(String),
}

impl CategoryFilter {
    pub fn parse(token: &str) -> Self {
        if token.eq_ignore_ascii_case("all") {
            CategoryFilter::All
        } else {
            CategoryFilter::Only(token.to_string())
        }
    }

    pub fn label(&self) -> &str {
        match self {
            CategoryFilter::All => "all",
            CategoryFilter::Only(name) => name,
        }
    }

    pub fn matches(&self, task: &Task) -> bool {
        match self {
            CategoryFilter::All => true,
            CategoryFilter::Only(name) => task.category == *name,
        }
    }
}

impl Default for CategoryFilter {
    fn default() -> Self {
        CategoryFilter::All
    }
}

pub fn task_matches(task: &Task, status: StatusFilter, category: &CategoryFilter) -> bool {
    status.matches(task) && category.matches(task)
}

/// Case-insensitive substring match against title, content, or any tag.
/// An empty term matches every entry.
pub fn entry_matches_search(entry: &DiaryEntry, term: &str) -> bool {
    let needle = term.to_lowercase();
    entry.title.to_lowercase().contains(&needle)
        || entry.content.to_lowercase().contains(&needle)
        || entry.tags.iter().any(|tag| tag.contains(&needle))
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::*;
    use crate::diary::Mood;
    use crate::task::{Priority, RecordId, Task};

    fn task(completed: bool, category: &str) -> Task {
        Task {
            id: RecordId(1),
            title: "Water the plants".to_string(),
            completed,
            due: NaiveDate::from_ymd_opt(2025, 6, 15).unwrap(),
            priority: Priority::Medium,
            category: category.to_string(),
        }
    }

    fn entry() -> DiaryEntry {
        DiaryEntry {
            id: RecordId(1),
            title: "A productive day".to_string(),
            content: "Managed to finish the sprint backlog early.".to_string(),
            date: NaiveDate::from_ymd_opt(2025, 6, 14).unwrap(),
            mood: Mood::Happy,
            tags: vec!["work".to_string(), "productivity".to_string()],
        }
    }

    #[test]
    fn status_filter_is_tri_state() {
        let open = task(false, "home");
        let done = task(true, "home");
        assert!(StatusFilter::All.matches(&open));
        assert!(StatusFilter::All.matches(&done));
        assert!(StatusFilter::Active.matches(&open));
        assert!(!StatusFilter::Active.matches(&done));
        assert!(!StatusFilter::Completed.matches(&open));
        assert!(StatusFilter::Completed.matches(&done));
    }

    #[test]
    fn category_filter_requires_exact_match() {
        let home = task(false, "home");
        assert!(CategoryFilter::All.matches(&home));
        assert!(CategoryFilter::Only("home".to_string()).matches(&home));
        assert!(!CategoryFilter::Only("work".to_string()).matches(&home));
        assert!(!CategoryFilter::Only("Home".to_string()).matches(&home));
    }

    #[test]
    fn filters_compose_with_and() {
        let done_home = task(true, "home");
        assert!(task_matches(
            &done_home,
            StatusFilter::Completed,
            &CategoryFilter::Only("home".to_string()),
        ));
        assert!(!task_matches(
            &done_home,
            StatusFilter::Active,
            &CategoryFilter::Only("home".to_string()),
        ));
        assert!(!task_matches(
            &done_home,
            StatusFilter::Completed,
            &CategoryFilter::Only("work".to_string()),
        ));
    }

    #[test]
    fn search_hits_title_content_and_tags_case_insensitively() {
        let entry = entry();
        assert!(entry_matches_search(&entry, "PRODUCTIVE"));
        assert!(entry_matches_search(&entry, "sprint BACKLOG"));
        assert!(entry_matches_search(&entry, "Work"));
        assert!(!entry_matches_search(&entry, "holiday"));
    }

    #[test]
    fn empty_search_term_matches_everything() {
        assert!(entry_matches_search(&entry(), ""));
    }

    #[test]
    fn filter_parse_tokens() {
        assert_eq!(StatusFilter::parse("Done"), Some(StatusFilter::Completed));
        assert_eq!(StatusFilter::parse("active"), Some(StatusFilter::Active));
        assert_eq!(StatusFilter::parse("everything"), None);
        assert_eq!(CategoryFilter::parse("ALL"), CategoryFilter::All);
        assert_eq!(
            CategoryFilter::parse("work"),
            CategoryFilter::Only("work".to_string())
        );
    }
}
