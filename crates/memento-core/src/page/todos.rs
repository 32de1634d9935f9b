use std::io::Write;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument};

use crate::config::Config;
use crate::datetime::{format_short_date, local_today, parse_input_date};
use crate::filter::{CategoryFilter, StatusFilter};
use crate::page::{PageView, parse_id};
use crate::render::{self, Renderer, capitalize, write_table};
use crate::route::Route;
use crate::samples;
use crate::store::{MemoryTaskStore, TaskRepository};
use crate::task::{Priority, Task, TaskDraft};

/// The `/todos` page: the full task collection plus the two sidebar
/// filters. Both filters apply together to the rendered list.
#[derive(Debug, Clone)]
pub struct TodoPage {
    tasks: MemoryTaskStore,
    status: StatusFilter,
    category: CategoryFilter,
}

impl TodoPage {
    pub fn mount() -> Self {
        Self {
            tasks: MemoryTaskStore::seeded(samples::todo_tasks()),
            status: StatusFilter::All,
            category: CategoryFilter::All,
        }
    }

    pub fn empty() -> Self {
        Self {
            tasks: MemoryTaskStore::new(),
            status: StatusFilter::All,
            category: CategoryFilter::All,
        }
    }

    pub fn tasks(&self) -> &MemoryTaskStore {
        &self.tasks
    }

    pub fn status_filter(&self) -> StatusFilter {
        self.status
    }

    pub fn category_filter(&self) -> &CategoryFilter {
        &self.category
    }
}

impl PageView for TodoPage {
    fn route(&self) -> Route {
        Route::Todos
    }

    #[instrument(skip(self, args, now))]
    fn apply(
        &mut self,
        action: &str,
        args: &[String],
        now: DateTime<Utc>,
    ) -> anyhow::Result<String> {
        let today = local_today(now);
        match action {
            "add" => {
                info!("action add");
                let (title, fields) = parse_title_and_fields(args, today)?;
                match self.tasks.add(draft_from_fields(title, &fields), now) {
                    Some(id) => Ok(format!("Created task {id}.")),
                    None => Ok("Nothing added: a task title is required.".to_string()),
                }
            }
            "toggle" => {
                info!("action toggle");
                let id = parse_id(args.first(), "toggle")?;
                if self.tasks.toggle(id) {
                    Ok(format!("Toggled task {id}."))
                } else {
                    Ok(format!("No task {id}."))
                }
            }
            "delete" => {
                info!("action delete");
                let id = parse_id(args.first(), "delete")?;
                if self.tasks.delete(id) {
                    Ok(format!("Deleted task {id}."))
                } else {
                    Ok(format!("No task {id}."))
                }
            }
            "edit" => {
                info!("action edit");
                let id = parse_id(args.first(), "edit")?;
                let Some(existing) = self.tasks.get(id) else {
                    return Ok(format!("No task {id}."));
                };
                let mut updated = existing.clone();
                let (title, fields) = parse_title_and_fields(&args[1..], today)?;
                if !title.is_empty() {
                    updated.title = title;
                }
                apply_fields(&mut updated, &fields);
                self.tasks.edit(id, updated);
                Ok(format!("Modified task {id}."))
            }
            "status" => {
                let token = args
                    .first()
                    .ok_or_else(|| anyhow!("status requires all, active, or completed"))?;
                let status = StatusFilter::parse(token)
                    .ok_or_else(|| anyhow!("invalid status filter: {token}"))?;
                self.status = status;
                Ok(format!("Showing {} tasks.", status.label()))
            }
            "category" => {
                let token = args
                    .first()
                    .ok_or_else(|| anyhow!("category requires a name or all"))?;
                self.category = CategoryFilter::parse(token);
                match &self.category {
                    CategoryFilter::All => Ok("Showing every category.".to_string()),
                    CategoryFilter::Only(name) => Ok(format!("Filtering by category {name}.")),
                }
            }
            other => Err(anyhow!("unknown action on /todos: {other}")),
        }
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        renderer: &Renderer,
        _cfg: &Config,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let today = local_today(now);
        render::write_navbar(&mut *out, renderer, &Route::Todos)?;
        writeln!(out)?;
        writeln!(out, "{}", renderer.paint("To-Do List", "1"))?;
        writeln!(out, "Organize and manage your tasks efficiently")?;
        writeln!(out)?;

        writeln!(out, "Filters")?;
        write!(out, "  Status:     ")?;
        for (filter, label) in [
            (StatusFilter::All, "All Tasks"),
            (StatusFilter::Active, "Active"),
            (StatusFilter::Completed, "Completed"),
        ] {
            if filter == self.status {
                write!(out, "{}  ", renderer.paint(&format!("[{label}]"), "36"))?;
            } else {
                write!(out, "{label}  ")?;
            }
        }
        writeln!(out)?;

        write!(out, "  Categories: ")?;
        if self.category == CategoryFilter::All {
            write!(out, "{}  ", renderer.paint("[All Categories]", "36"))?;
        } else {
            write!(out, "All Categories  ")?;
        }
        for category in self.tasks.categories() {
            let label = capitalize(&category);
            if self.category == CategoryFilter::Only(category) {
                write!(out, "{}  ", renderer.paint(&format!("[{label}]"), "36"))?;
            } else {
                write!(out, "{label}  ")?;
            }
        }
        writeln!(out)?;
        writeln!(out)?;

        let visible = self.tasks.query(self.status, &self.category);
        writeln!(out, "Tasks ({})", visible.len())?;
        if visible.is_empty() {
            writeln!(out)?;
            writeln!(out, "No tasks found")?;
            let hint = match self.status {
                StatusFilter::All => "Add a new task to get started!",
                StatusFilter::Completed => "You have no completed tasks yet.",
                StatusFilter::Active => "You have no active tasks.",
            };
            writeln!(out, "{hint}")?;
        } else {
            let headers = vec![
                "".to_string(),
                "ID".to_string(),
                "Title".to_string(),
                "Due".to_string(),
                "Priority".to_string(),
                "Category".to_string(),
            ];
            let mut rows = Vec::with_capacity(visible.len());
            for task in visible {
                let done = if task.completed { "[x]" } else { "[ ]" };
                let id = renderer.paint(&task.id.to_string(), "33");
                let title = if task.completed {
                    renderer.paint(&task.title, "9")
                } else {
                    task.title.clone()
                };
                let due = format_short_date(task.due);
                let due = if task.due < today && !task.completed {
                    renderer.paint(&due, "31")
                } else {
                    due
                };
                rows.push(vec![
                    done.to_string(),
                    id,
                    title,
                    due,
                    task.priority.label().to_string(),
                    capitalize(&task.category),
                ]);
            }
            write_table(&mut *out, headers, rows)?;
        }
        writeln!(out)?;
        render::write_footer(&mut *out)
    }

    fn export<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let json = serde_json::to_string(self.tasks.all())?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    fn help_lines(&self) -> &'static [&'static str] {
        &[
            "add <title> [due:DATE] [priority:LEVEL] [category:NAME]",
            "toggle <id>",
            "delete <id>",
            "edit <id> [new title] [due:DATE] [priority:LEVEL] [category:NAME]",
            "status <all|active|completed>",
            "category <name|all>",
        ]
    }
}

#[derive(Debug, Clone)]
enum FieldMod {
    Due(NaiveDate),
    Priority(Priority),
    Category(String),
}

/// Splits action arguments into free title words and `key:value`
/// fields. A `--` token turns everything after it into title words,
/// mirroring how a quoted form field keeps colons literal.
fn parse_title_and_fields(
    args: &[String],
    today: NaiveDate,
) -> anyhow::Result<(String, Vec<FieldMod>)> {
    let mut title_parts = Vec::new();
    let mut fields = Vec::new();

    let mut literal = false;
    for arg in args {
        if arg == "--" {
            literal = true;
            continue;
        }

        if !literal && let Some(field) = parse_one_field(arg, today)? {
            fields.push(field);
            continue;
        }

        title_parts.push(arg.clone());
    }

    Ok((title_parts.join(" "), fields))
}

fn parse_one_field(tok: &str, today: NaiveDate) -> anyhow::Result<Option<FieldMod>> {
    let Some((key, value)) = tok.split_once(':') else {
        return Ok(None);
    };

    match key.to_ascii_lowercase().as_str() {
        "due" => Ok(Some(FieldMod::Due(parse_input_date(value, today)?))),
        "pri" | "priority" => {
            let priority = Priority::parse(value).ok_or_else(|| {
                anyhow!("invalid priority: {value} (expected low, medium, or high)")
            })?;
            Ok(Some(FieldMod::Priority(priority)))
        }
        "cat" | "category" => Ok(Some(FieldMod::Category(value.to_string()))),
        _ => Ok(None),
    }
}

fn draft_from_fields(title: String, fields: &[FieldMod]) -> TaskDraft {
    let mut draft = TaskDraft::new(title);
    for field in fields {
        match field {
            FieldMod::Due(date) => draft.due = Some(*date),
            FieldMod::Priority(priority) => draft.priority = Some(*priority),
            FieldMod::Category(category) => draft.category = Some(category.clone()),
        }
    }
    draft
}

fn apply_fields(task: &mut Task, fields: &[FieldMod]) {
    for field in fields {
        match field {
            FieldMod::Due(date) => task.due = *date,
            FieldMod::Priority(priority) => task.priority = *priority,
            FieldMod::Category(category) => task.category = category.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2025, 6, 16, 12, 0, 0).unwrap()
    }

    fn args(tokens: &[&str]) -> Vec<String> {
        tokens.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn mount_seeds_the_eight_sample_tasks() {
        let page = TodoPage::mount();
        assert_eq!(page.tasks().len(), 8);
        assert_eq!(page.status_filter(), StatusFilter::All);
        assert_eq!(*page.category_filter(), CategoryFilter::All);
    }

    #[test]
    fn add_with_fields_fills_the_draft() {
        let mut page = TodoPage::empty();
        let feedback = page
            .apply(
                "add",
                &args(&["Plan", "sprint", "due:2025-06-20", "priority:high", "category:work"]),
                now(),
            )
            .unwrap();
        assert!(feedback.starts_with("Created task "));

        let task = &page.tasks().all()[0];
        assert_eq!(task.title, "Plan sprint");
        assert_eq!(task.due, NaiveDate::from_ymd_opt(2025, 6, 20).unwrap());
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "work");
    }

    #[test]
    fn add_without_title_reports_the_rejection() {
        let mut page = TodoPage::empty();
        let feedback = page.apply("add", &args(&["due:2025-06-20"]), now()).unwrap();
        assert_eq!(feedback, "Nothing added: a task title is required.");
        assert!(page.tasks().is_empty());
    }

    #[test]
    fn literal_marker_keeps_field_lookalikes_in_the_title() {
        let mut page = TodoPage::empty();
        page.apply("add", &args(&["--", "Read", "due:diligence", "notes"]), now())
            .unwrap();
        assert_eq!(page.tasks().all()[0].title, "Read due:diligence notes");
    }

    #[test]
    fn toggle_by_seed_id_flips_completion() {
        let mut page = TodoPage::mount();
        let feedback = page.apply("toggle", &args(&["2"]), now()).unwrap();
        assert_eq!(feedback, "Toggled task 2.");
        assert!(page.tasks().get(crate::task::RecordId(2)).unwrap().completed);
    }

    #[test]
    fn mutating_an_absent_id_reports_a_noop() {
        let mut page = TodoPage::mount();
        assert_eq!(page.apply("toggle", &args(&["99"]), now()).unwrap(), "No task 99.");
        assert_eq!(page.apply("delete", &args(&["99"]), now()).unwrap(), "No task 99.");
        assert_eq!(
            page.apply("edit", &args(&["99", "renamed"]), now()).unwrap(),
            "No task 99."
        );
        assert_eq!(page.tasks().len(), 8);
    }

    #[test]
    fn edit_changes_named_fields_and_keeps_the_rest() {
        let mut page = TodoPage::mount();
        page.apply("edit", &args(&["5", "priority:high"]), now())
            .unwrap();
        let task = page.tasks().get(crate::task::RecordId(5)).unwrap();
        assert_eq!(task.title, "Buy groceries");
        assert_eq!(task.priority, Priority::High);
        assert_eq!(task.category, "personal");
    }

    #[test]
    fn status_and_category_filters_narrow_the_view() {
        let mut page = TodoPage::mount();
        page.apply("status", &args(&["active"]), now()).unwrap();
        page.apply("category", &args(&["work"]), now()).unwrap();
        let visible = page
            .tasks()
            .query(page.status_filter(), page.category_filter());
        let titles: Vec<&str> = visible.iter().map(|t| t.title.as_str()).collect();
        assert_eq!(
            titles,
            vec!["Review client feedback", "Prepare presentation slides"]
        );
    }

    #[test]
    fn unknown_actions_error() {
        let mut page = TodoPage::mount();
        assert!(page.apply("archive", &args(&["1"]), now()).is_err());
        assert!(page.apply("status", &args(&["someday"]), now()).is_err());
    }

    #[test]
    fn render_lists_tasks_and_marks_overdue() {
        let page = TodoPage::mount();
        let mut out = Vec::new();
        let cfg = Config::default();
        page.render(&mut out, &Renderer::plain(), &cfg, now()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("To-Do List"));
        assert!(text.contains("Tasks (8)"));
        assert!(text.contains("Buy groceries"));
        assert!(text.contains("Jun 15, 2025"));
        assert!(text.contains("[x]"));
        assert!(text.contains("[All Categories]"));
    }

    #[test]
    fn render_empty_states_follow_the_active_filter() {
        let mut page = TodoPage::empty();
        let cfg = Config::default();

        let mut out = Vec::new();
        page.render(&mut out, &Renderer::plain(), &cfg, now()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("No tasks found"));
        assert!(text.contains("Add a new task to get started!"));

        page.apply("status", &args(&["completed"]), now()).unwrap();
        let mut out = Vec::new();
        page.render(&mut out, &Renderer::plain(), &cfg, now()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("You have no completed tasks yet."));

        page.apply("status", &args(&["active"]), now()).unwrap();
        let mut out = Vec::new();
        page.render(&mut out, &Renderer::plain(), &cfg, now()).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("You have no active tasks."));
    }

    #[test]
    fn export_dumps_the_collection_as_json() {
        let page = TodoPage::mount();
        let mut out = Vec::new();
        page.export(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.contains("\"title\":\"Complete project proposal\""));
        assert!(text.contains("\"dueDate\":\"2025-06-15\""));
        assert!(text.contains("\"priority\":\"high\""));
    }
}
