//! In-memory stores for tasks and diary entries. Nothing here ever
//! touches the filesystem; state lives exactly as long as the page that
//! owns it.

use chrono::{DateTime, Utc};
use tracing::{debug, instrument, trace};

use crate::datetime::local_today;
use crate::diary::{DiaryDraft, DiaryEntry, Mood, normalize_tag, normalize_tags};
use crate::filter::{CategoryFilter, StatusFilter, entry_matches_search, task_matches};
use crate::task::{RecordId, Task, TaskDraft};

pub const DEFAULT_CATEGORY: &str = "personal";

/// Hands out identifiers derived from the wall clock, bumping past the
/// previous one when two allocations land in the same millisecond.
#[derive(Debug, Clone, Default)]
pub struct IdAllocator {
    last: u64,
}

impl IdAllocator {
    pub fn starting_after(last: u64) -> Self {
        Self { last }
    }

    pub fn allocate(&mut self, now: DateTime<Utc>) -> RecordId {
        let millis = now.timestamp_millis().max(0) as u64;
        self.last = millis.max(self.last + 1);
        RecordId(self.last)
    }
}

/// The narrow surface a task page needs from its collection. Mutations
/// aimed at an absent id are silent no-ops reported through the return
/// value, never errors.
pub trait TaskRepository {
    /// Appends a new task built from the draft. Returns `None` when the
    /// trimmed title is empty.
    fn add(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Option<RecordId>;

    /// Flips the completion flag. Returns whether a task matched.
    fn toggle(&mut self, id: RecordId) -> bool;

    /// Removes the task. Returns whether a task matched.
    fn delete(&mut self, id: RecordId) -> bool;

    /// Replaces the whole record in place, keeping the stored id.
    /// Returns whether a task matched.
    fn edit(&mut self, id: RecordId, updated: Task) -> bool;

    /// Tasks passing both filters, in insertion order.
    fn query(&self, status: StatusFilter, category: &CategoryFilter) -> Vec<&Task>;

    fn all(&self) -> &[Task];

    /// Distinct categories in first-seen order.
    fn categories(&self) -> Vec<String>;
}

/// Counterpart of [`TaskRepository`] for the diary page.
pub trait DiaryRepository {
    /// Prepends a new entry built from the draft so the newest entry
    /// renders first. Returns `None` when the trimmed title or content
    /// is empty.
    fn add(&mut self, draft: DiaryDraft, now: DateTime<Utc>) -> Option<RecordId>;

    /// Replaces the whole record in place, keeping the stored id and
    /// normalizing the supplied tags. Returns whether an entry matched.
    fn edit(&mut self, id: RecordId, updated: DiaryEntry) -> bool;

    /// Removes the entry. Returns whether an entry matched.
    fn delete(&mut self, id: RecordId) -> bool;

    /// Adds a normalized tag. Returns false when the entry is absent,
    /// the tag trims to nothing, or the tag is already present.
    fn add_tag(&mut self, id: RecordId, raw: &str) -> bool;

    /// Removes a tag by its normalized form. Returns whether anything
    /// came off.
    fn remove_tag(&mut self, id: RecordId, raw: &str) -> bool;

    /// Entries matching the search term, in stored (newest-first) order.
    fn search(&self, term: &str) -> Vec<&DiaryEntry>;

    fn all(&self) -> &[DiaryEntry];
}

#[derive(Debug, Clone, Default)]
pub struct MemoryTaskStore {
    tasks: Vec<Task>,
    ids: IdAllocator,
}

impl MemoryTaskStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a store over pre-existing records; the id allocator starts
    /// above the largest seeded id.
    pub fn seeded(tasks: Vec<Task>) -> Self {
        let last = tasks.iter().map(|t| t.id.0).max().unwrap_or(0);
        Self {
            tasks,
            ids: IdAllocator::starting_after(last),
        }
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == id)
    }

    pub fn completed_count(&self) -> usize {
        self.tasks.iter().filter(|t| t.completed).count()
    }
}

impl TaskRepository for MemoryTaskStore {
    #[instrument(skip(self, draft, now))]
    fn add(&mut self, draft: TaskDraft, now: DateTime<Utc>) -> Option<RecordId> {
        let title = draft.title.trim();
        if title.is_empty() {
            debug!("rejected task with empty title");
            return None;
        }
        let id = self.ids.allocate(now);
        let task = Task {
            id,
            title: title.to_string(),
            completed: false,
            due: draft.due.unwrap_or_else(|| local_today(now)),
            priority: draft.priority.unwrap_or_default(),
            category: draft
                .category
                .unwrap_or_else(|| DEFAULT_CATEGORY.to_string()),
        };
        debug!(%id, title = %task.title, due = %task.due, "added task");
        self.tasks.push(task);
        Some(id)
    }

    #[instrument(skip(self))]
    fn toggle(&mut self, id: RecordId) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(task) => {
                task.completed = !task.completed;
                trace!(%id, completed = task.completed, "toggled task");
                true
            }
            None => {
                debug!(%id, "toggle aimed at absent task");
                false
            }
        }
    }

    #[instrument(skip(self))]
    fn delete(&mut self, id: RecordId) -> bool {
        let before = self.tasks.len();
        self.tasks.retain(|t| t.id != id);
        let removed = self.tasks.len() < before;
        if removed {
            debug!(%id, "deleted task");
        } else {
            debug!(%id, "delete aimed at absent task");
        }
        removed
    }

    #[instrument(skip(self, updated))]
    fn edit(&mut self, id: RecordId, mut updated: Task) -> bool {
        match self.tasks.iter_mut().find(|t| t.id == id) {
            Some(slot) => {
                updated.id = id;
                *slot = updated;
                debug!(%id, "edited task");
                true
            }
            None => {
                debug!(%id, "edit aimed at absent task");
                false
            }
        }
    }

    fn query(&self, status: StatusFilter, category: &CategoryFilter) -> Vec<&Task> {
        self.tasks
            .iter()
            .filter(|t| task_matches(t, status, category))
            .collect()
    }

    fn all(&self) -> &[Task] {
        &self.tasks
    }

    fn categories(&self) -> Vec<String> {
        let mut seen: Vec<String> = Vec::new();
        for task in &self.tasks {
            if !seen.contains(&task.category) {
                seen.push(task.category.clone());
            }
        }
        seen
    }
}

#[derive(Debug, Clone, Default)]
pub struct MemoryDiaryStore {
    entries: Vec<DiaryEntry>,
    ids: IdAllocator,
}

impl MemoryDiaryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn seeded(entries: Vec<DiaryEntry>) -> Self {
        let last = entries.iter().map(|e| e.id.0).max().unwrap_or(0);
        Self {
            entries,
            ids: IdAllocator::starting_after(last),
        }
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, id: RecordId) -> Option<&DiaryEntry> {
        self.entries.iter().find(|e| e.id == id)
    }
}

impl DiaryRepository for MemoryDiaryStore {
    #[instrument(skip(self, draft, now))]
    fn add(&mut self, draft: DiaryDraft, now: DateTime<Utc>) -> Option<RecordId> {
        let title = draft.title.trim();
        let content = draft.content.trim();
        if title.is_empty() || content.is_empty() {
            debug!("rejected entry with empty title or content");
            return None;
        }
        let id = self.ids.allocate(now);
        let entry = DiaryEntry {
            id,
            title: title.to_string(),
            content: content.to_string(),
            date: draft.date.unwrap_or_else(|| local_today(now)),
            mood: draft.mood.unwrap_or(Mood::Neutral),
            tags: normalize_tags(&draft.tags),
        };
        debug!(%id, title = %entry.title, date = %entry.date, "added entry");
        self.entries.insert(0, entry);
        Some(id)
    }

    #[instrument(skip(self, updated))]
    fn edit(&mut self, id: RecordId, mut updated: DiaryEntry) -> bool {
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(slot) => {
                updated.id = id;
                updated.tags = normalize_tags(&updated.tags);
                *slot = updated;
                debug!(%id, "edited entry");
                true
            }
            None => {
                debug!(%id, "edit aimed at absent entry");
                false
            }
        }
    }

    #[instrument(skip(self))]
    fn delete(&mut self, id: RecordId) -> bool {
        let before = self.entries.len();
        self.entries.retain(|e| e.id != id);
        let removed = self.entries.len() < before;
        if removed {
            debug!(%id, "deleted entry");
        } else {
            debug!(%id, "delete aimed at absent entry");
        }
        removed
    }

    #[instrument(skip(self))]
    fn add_tag(&mut self, id: RecordId, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            debug!(%id, "rejected empty tag");
            return false;
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                if entry.tags.contains(&tag) {
                    trace!(%id, %tag, "tag already present");
                    false
                } else {
                    entry.tags.push(tag);
                    true
                }
            }
            None => false,
        }
    }

    #[instrument(skip(self))]
    fn remove_tag(&mut self, id: RecordId, raw: &str) -> bool {
        let Some(tag) = normalize_tag(raw) else {
            return false;
        };
        match self.entries.iter_mut().find(|e| e.id == id) {
            Some(entry) => {
                let before = entry.tags.len();
                entry.tags.retain(|t| t != &tag);
                entry.tags.len() < before
            }
            None => false,
        }
    }

    fn search(&self, term: &str) -> Vec<&DiaryEntry> {
        self.entries
            .iter()
            .filter(|e| entry_matches_search(e, term))
            .collect()
    }

    fn all(&self) -> &[DiaryEntry] {
        &self.entries
    }
}
