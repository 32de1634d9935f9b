use std::io::Write;

use anyhow::anyhow;
use chrono::{DateTime, Utc};
use serde::Serialize;
use tracing::{info, instrument};

use crate::config::Config;
use crate::datetime::{
    format_long_date, format_month_day, format_short_date, format_short_ordinal_date, local_today,
};
use crate::diary::DiaryEntry;
use crate::page::{PageView, parse_id};
use crate::render::{self, Renderer, clip_preview, progress_bar, write_table};
use crate::route::Route;
use crate::samples;
use crate::store::{DiaryRepository, MemoryDiaryStore, MemoryTaskStore, TaskRepository};
use crate::task::{Task, TaskDraft};

/// The `/dashboard` page: a short task list with quick add, a recent
/// diary excerpt, and the three stat cards. Its collections are its
/// own; the fuller pages never see mutations made here.
#[derive(Debug, Clone)]
pub struct DashboardPage {
    tasks: MemoryTaskStore,
    entries: MemoryDiaryStore,
}

impl DashboardPage {
    pub fn mount() -> Self {
        Self {
            tasks: MemoryTaskStore::seeded(samples::dashboard_tasks()),
            entries: MemoryDiaryStore::seeded(samples::dashboard_entries()),
        }
    }

    pub fn empty() -> Self {
        Self {
            tasks: MemoryTaskStore::new(),
            entries: MemoryDiaryStore::new(),
        }
    }

    pub fn tasks(&self) -> &MemoryTaskStore {
        &self.tasks
    }

    pub fn entries(&self) -> &MemoryDiaryStore {
        &self.entries
    }

    pub fn completion_rate(&self) -> u32 {
        let total = self.tasks.len();
        if total == 0 {
            return 0;
        }
        let completed = self.tasks.completed_count();
        ((completed as f64 / total as f64) * 100.0).round() as u32
    }
}

#[derive(Serialize)]
struct DashboardExport<'a> {
    tasks: &'a [Task],
    entries: &'a [DiaryEntry],
}

impl PageView for DashboardPage {
    fn route(&self) -> Route {
        Route::Dashboard
    }

    #[instrument(skip(self, args, now))]
    fn apply(
        &mut self,
        action: &str,
        args: &[String],
        now: DateTime<Utc>,
    ) -> anyhow::Result<String> {
        match action {
            "add" => {
                info!("action add");
                // The quick-add form has a single field: every word is
                // title, the due date is today, everything else default.
                let draft = TaskDraft::new(args.join(" "));
                match self.tasks.add(draft, now) {
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
            other => Err(anyhow!("unknown action on /dashboard: {other}")),
        }
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        renderer: &Renderer,
        cfg: &Config,
        now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        let today = local_today(now);
        render::write_navbar(&mut *out, renderer, &Route::Dashboard)?;
        writeln!(out)?;
        writeln!(out, "{}", renderer.paint("Dashboard", "1"))?;
        writeln!(out, "{}", format_long_date(today))?;
        writeln!(out)?;

        let rate = self.completion_rate();
        writeln!(
            out,
            "Tasks Completed   {}/{}   {} {}% completed",
            self.tasks.completed_count(),
            self.tasks.len(),
            progress_bar(rate, 20),
            rate
        )?;
        let last_entry = match self.entries.all().first() {
            Some(entry) => format!("Last entry: {}", format_short_ordinal_date(entry.date)),
            None => "Last entry: No entries yet".to_string(),
        };
        writeln!(
            out,
            "Diary Entries     {}     {}",
            self.entries.len(),
            last_entry
        )?;
        writeln!(out, "Streak            7 days  Keep it up! You're on a roll.")?;
        writeln!(out)?;

        writeln!(
            out,
            "{}  (View All: memento /todos)",
            renderer.paint("Today's Tasks", "1")
        )?;
        if self.tasks.is_empty() {
            writeln!(out)?;
            writeln!(out, "No tasks for today. Add a new task to get started!")?;
        } else {
            let headers = vec![
                "".to_string(),
                "ID".to_string(),
                "Title".to_string(),
                "Due".to_string(),
            ];
            let mut rows = Vec::with_capacity(self.tasks.len());
            for task in self.tasks.all() {
                let done = if task.completed { "[x]" } else { "[ ]" };
                let title = if task.completed {
                    renderer.paint(&task.title, "9")
                } else {
                    task.title.clone()
                };
                rows.push(vec![
                    done.to_string(),
                    renderer.paint(&task.id.to_string(), "33"),
                    title,
                    format_month_day(task.due),
                ]);
            }
            write_table(&mut *out, headers, rows)?;
        }
        writeln!(out)?;

        writeln!(
            out,
            "{}  (View All: memento /diary)",
            renderer.paint("Recent Diary Entries", "1")
        )?;
        if self.entries.is_empty() {
            writeln!(out)?;
            writeln!(out, "No diary entries yet. Start writing today!")?;
        } else {
            for entry in self.entries.all() {
                writeln!(out)?;
                writeln!(
                    out,
                    "{}  {}",
                    renderer.paint(&entry.title, "1"),
                    format_short_date(entry.date)
                )?;
                let (preview, _) = clip_preview(&entry.content, cfg.preview_chars);
                writeln!(out, "{preview}")?;
            }
        }
        writeln!(out)?;
        render::write_footer(&mut *out)
    }

    fn export<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let json = serde_json::to_string(&DashboardExport {
            tasks: self.tasks.all(),
            entries: self.entries.all(),
        })?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    fn help_lines(&self) -> &'static [&'static str] {
        &["add <title>", "toggle <id>", "delete <id>"]
    }
}
