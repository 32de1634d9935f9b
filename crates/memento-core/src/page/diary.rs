use std::io::Write;

use anyhow::anyhow;
use chrono::{DateTime, NaiveDate, Utc};
use tracing::{info, instrument, warn};

use crate::config::Config;
use crate::datetime::{format_long_date, local_today, parse_input_date};
use crate::diary::{DiaryDraft, Mood, normalize_tag};
use crate::page::{PageView, parse_id};
use crate::render::{self, Renderer, clip_preview};
use crate::route::Route;
use crate::samples;
use crate::store::{DiaryRepository, MemoryDiaryStore};
use crate::task::RecordId;

/// The `/diary` page: the journal collection, the live search box, and
/// the single expanded-card slot.
#[derive(Debug, Clone)]
pub struct DiaryPage {
    entries: MemoryDiaryStore,
    search: String,
    expanded: Option<RecordId>,
}

impl DiaryPage {
    pub fn mount() -> Self {
        Self {
            entries: MemoryDiaryStore::seeded(samples::diary_entries()),
            search: String::new(),
            expanded: None,
        }
    }

    pub fn empty() -> Self {
        Self {
            entries: MemoryDiaryStore::new(),
            search: String::new(),
            expanded: None,
        }
    }

    pub fn entries(&self) -> &MemoryDiaryStore {
        &self.entries
    }

    pub fn search_term(&self) -> &str {
        &self.search
    }

    pub fn expanded(&self) -> Option<RecordId> {
        self.expanded
    }
}

impl PageView for DiaryPage {
    fn route(&self) -> Route {
        Route::Diary
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
            "write" | "add" => {
                info!("action write");
                let fields = parse_entry_fields(args, today)?;
                if !fields.remove_tags.is_empty() {
                    warn!("tag removals ignored when writing a new entry");
                }
                let draft = DiaryDraft {
                    title: fields.title,
                    content: fields.content,
                    date: fields.date,
                    mood: fields.mood,
                    tags: fields.add_tags,
                };
                match self.entries.add(draft, now) {
                    Some(id) => Ok(format!("Created entry {id}.")),
                    None => {
                        Ok("Nothing added: both a title and content are required.".to_string())
                    }
                }
            }
            "edit" => {
                info!("action edit");
                let id = parse_id(args.first(), "edit")?;
                let Some(existing) = self.entries.get(id) else {
                    return Ok(format!("No entry {id}."));
                };
                let fields = parse_entry_fields(&args[1..], today)?;
                let mut updated = existing.clone();
                if !fields.title.is_empty() {
                    updated.title = fields.title;
                }
                if !fields.content.is_empty() {
                    updated.content = fields.content;
                }
                if let Some(mood) = fields.mood {
                    updated.mood = mood;
                }
                if let Some(date) = fields.date {
                    updated.date = date;
                }
                for raw in &fields.remove_tags {
                    if let Some(tag) = normalize_tag(raw) {
                        updated.tags.retain(|existing| existing != &tag);
                    }
                }
                updated.tags.extend(fields.add_tags);
                self.entries.edit(id, updated);
                Ok(format!("Modified entry {id}."))
            }
            "delete" => {
                info!("action delete");
                let id = parse_id(args.first(), "delete")?;
                if self.entries.delete(id) {
                    if self.expanded == Some(id) {
                        self.expanded = None;
                    }
                    Ok(format!("Deleted entry {id}."))
                } else {
                    Ok(format!("No entry {id}."))
                }
            }
            "tag" => {
                let id = parse_id(args.first(), "tag")?;
                if self.entries.get(id).is_none() {
                    return Ok(format!("No entry {id}."));
                }
                let raw = args[1..].join(" ");
                if self.entries.add_tag(id, &raw) {
                    Ok(format!("Tagged entry {id}."))
                } else {
                    Ok("Tag unchanged (empty or already present).".to_string())
                }
            }
            "untag" => {
                let id = parse_id(args.first(), "untag")?;
                if self.entries.get(id).is_none() {
                    return Ok(format!("No entry {id}."));
                }
                let raw = args[1..].join(" ");
                if self.entries.remove_tag(id, &raw) {
                    Ok(format!("Untagged entry {id}."))
                } else {
                    Ok("Tag unchanged (not present).".to_string())
                }
            }
            "search" => {
                self.search = args.join(" ");
                if self.search.is_empty() {
                    Ok("Search cleared.".to_string())
                } else {
                    Ok(format!("Searching for \"{}\".", self.search))
                }
            }
            "expand" => {
                let id = parse_id(args.first(), "expand")?;
                if self.entries.get(id).is_none() {
                    return Ok(format!("No entry {id}."));
                }
                if self.expanded == Some(id) {
                    self.expanded = None;
                    Ok(format!("Collapsed entry {id}."))
                } else {
                    self.expanded = Some(id);
                    Ok(format!("Expanded entry {id}."))
                }
            }
            other => Err(anyhow!("unknown action on /diary: {other}")),
        }
    }

    fn render<W: Write>(
        &self,
        out: &mut W,
        renderer: &Renderer,
        cfg: &Config,
        _now: DateTime<Utc>,
    ) -> anyhow::Result<()> {
        render::write_navbar(&mut *out, renderer, &Route::Diary)?;
        writeln!(out)?;
        writeln!(out, "{}", renderer.paint("Diary", "1"))?;
        writeln!(out, "Capture your thoughts and memories")?;
        writeln!(out)?;

        if !self.search.is_empty() {
            writeln!(out, "Search: \"{}\"", self.search)?;
            writeln!(out)?;
        }

        let visible = self.entries.search(&self.search);
        if visible.is_empty() {
            writeln!(out, "No entries found")?;
            let hint = if self.search.is_empty() {
                "Start writing your first diary entry!"
            } else {
                "No entries match your search. Try different keywords."
            };
            writeln!(out, "{hint}")?;
        } else {
            for entry in visible {
                writeln!(
                    out,
                    "{}  {}",
                    renderer.paint(&entry.title, "1"),
                    renderer.paint(&format!("[{}]", entry.id), "33")
                )?;
                writeln!(
                    out,
                    "{} • {}",
                    format_long_date(entry.date),
                    entry.mood.emoji()
                )?;

                let expanded = self.expanded == Some(entry.id);
                let (preview, clipped) = clip_preview(&entry.content, cfg.preview_chars);
                if expanded || !clipped {
                    writeln!(out, "{}", entry.content)?;
                    if clipped {
                        writeln!(out, "Show Less: expand {}", entry.id)?;
                    }
                } else {
                    writeln!(out, "{preview}")?;
                    writeln!(out, "Read More: expand {}", entry.id)?;
                }

                if !entry.tags.is_empty() {
                    writeln!(out, "Tags: {}", entry.tags.join(", "))?;
                }
                writeln!(out)?;
            }
        }
        writeln!(out)?;
        render::write_footer(&mut *out)
    }

    fn export<W: Write>(&self, out: &mut W) -> anyhow::Result<()> {
        let json = serde_json::to_string(self.entries.all())?;
        writeln!(out, "{json}")?;
        Ok(())
    }

    fn help_lines(&self) -> &'static [&'static str] {
        &[
            "write <title> [mood:NAME] [date:DATE] [+tag]... :: <content>",
            "edit <id> [new title] [mood:NAME] [date:DATE] [+tag|-tag]... [:: new content]",
            "delete <id>",
            "tag <id> <tag words>",
            "untag <id> <tag words>",
            "search [terms]",
            "expand <id>",
        ]
    }
}

#[derive(Debug, Clone, Default)]
struct EntryFields {
    title: String,
    content: String,
    mood: Option<Mood>,
    date: Option<NaiveDate>,
    add_tags: Vec<String>,
    remove_tags: Vec<String>,
}

/// Grammar shared by `write` and `edit`: words before `::` are the
/// title, words after it the content. Before the separator, `+tag` and
/// `-tag` adjust the tag set and `mood:`/`date:` set those fields; a
/// colon key that is neither stays in the title.
fn parse_entry_fields(args: &[String], today: NaiveDate) -> anyhow::Result<EntryFields> {
    let mut fields = EntryFields::default();
    let mut title_parts: Vec<String> = Vec::new();
    let mut content_parts: Vec<String> = Vec::new();
    let mut in_content = false;

    for arg in args {
        if !in_content && arg == "::" {
            in_content = true;
            continue;
        }
        if in_content {
            content_parts.push(arg.clone());
            continue;
        }

        if let Some(tag) = arg.strip_prefix('+') {
            fields.add_tags.push(tag.to_string());
            continue;
        }
        if let Some(tag) = arg.strip_prefix('-') {
            fields.remove_tags.push(tag.to_string());
            continue;
        }

        if let Some((key, value)) = arg.split_once(':') {
            match key.to_ascii_lowercase().as_str() {
                "mood" => {
                    fields.mood = Some(
                        Mood::parse(value).ok_or_else(|| anyhow!("unknown mood: {value}"))?,
                    );
                    continue;
                }
                "date" => {
                    fields.date = Some(parse_input_date(value, today)?);
                    continue;
                }
                _ => {}
            }
        }

        title_parts.push(arg.clone());
    }

    fields.title = title_parts.join(" ");
    fields.content = content_parts.join(" ");
    Ok(fields)
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

    fn render_to_string(page: &DiaryPage, cfg: &Config) -> String {
        let mut out = Vec::new();
        page.render(&mut out, &Renderer::plain(), cfg, now()).unwrap();
        String::from_utf8(out).unwrap()
    }

    #[test]
    fn mount_seeds_four_entries_newest_first() {
        let page = DiaryPage::mount();
        assert_eq!(page.entries().len(), 4);
        assert_eq!(page.entries().all()[0].title, "A productive day");
        assert_eq!(page.entries().all()[3].title, "Weekend plans");
    }

    #[test]
    fn write_prepends_and_fills_fields() {
        let mut page = DiaryPage::mount();
        let feedback = page
            .apply(
                "write",
                &args(&[
                    "Evening",
                    "walk",
                    "mood:relaxed",
                    "date:2025-06-16",
                    "+outdoors",
                    "::",
                    "Took",
                    "a",
                    "long",
                    "walk.",
                ]),
                now(),
            )
            .unwrap();
        assert!(feedback.starts_with("Created entry "));

        let newest = &page.entries().all()[0];
        assert_eq!(newest.title, "Evening walk");
        assert_eq!(newest.content, "Took a long walk.");
        assert_eq!(newest.mood, Mood::Relaxed);
        assert_eq!(newest.date, NaiveDate::from_ymd_opt(2025, 6, 16).unwrap());
        assert_eq!(newest.tags, vec!["outdoors"]);
        assert_eq!(page.entries().len(), 5);
    }

    #[test]
    fn write_without_content_is_rejected() {
        let mut page = DiaryPage::empty();
        let feedback = page
            .apply("write", &args(&["Title", "only"]), now())
            .unwrap();
        assert_eq!(
            feedback,
            "Nothing added: both a title and content are required."
        );
        assert!(page.entries().is_empty());

        let feedback = page
            .apply("write", &args(&["::", "content", "only"]), now())
            .unwrap();
        assert_eq!(
            feedback,
            "Nothing added: both a title and content are required."
        );
    }

    #[test]
    fn edit_rewrites_named_parts_only() {
        let mut page = DiaryPage::mount();
        page.apply(
            "edit",
            &args(&["3", "mood:happy", "+patience", "-reflection"]),
            now(),
        )
        .unwrap();

        let entry = page.entries().get(RecordId(3)).unwrap();
        assert_eq!(entry.title, "Reflections on the week");
        assert_eq!(entry.mood, Mood::Happy);
        assert_eq!(entry.tags, vec!["personal growth", "patience"]);
        assert!(entry.content.starts_with("Looking back at this week"));
    }

    #[test]
    fn edit_replaces_content_after_separator() {
        let mut page = DiaryPage::mount();
        page.apply("edit", &args(&["4", "::", "Changed", "my", "mind."]), now())
            .unwrap();
        let entry = page.entries().get(RecordId(4)).unwrap();
        assert_eq!(entry.content, "Changed my mind.");
        assert_eq!(entry.title, "Weekend plans");
    }

    #[test]
    fn tag_actions_normalize_and_dedup() {
        let mut page = DiaryPage::mount();
        assert_eq!(
            page.apply("tag", &args(&["1", "Deep", "Work"]), now()).unwrap(),
            "Tagged entry 1."
        );
        assert_eq!(
            page.entries().get(RecordId(1)).unwrap().tags,
            vec!["work", "productivity", "deep work"]
        );
        assert_eq!(
            page.apply("tag", &args(&["1", "DEEP", "WORK"]), now()).unwrap(),
            "Tag unchanged (empty or already present)."
        );
        assert_eq!(
            page.apply("untag", &args(&["1", "deep", "work"]), now()).unwrap(),
            "Untagged entry 1."
        );
        assert_eq!(
            page.apply("untag", &args(&["999", "work"]), now()).unwrap(),
            "No entry 999."
        );
    }

    #[test]
    fn search_narrows_and_clears() {
        let mut page = DiaryPage::mount();
        page.apply("search", &args(&["productive"]), now()).unwrap();
        assert_eq!(page.entries().search(page.search_term()).len(), 1);

        page.apply("search", &args(&["PRODUCTIVE"]), now()).unwrap();
        assert_eq!(page.entries().search(page.search_term()).len(), 1);

        let feedback = page.apply("search", &args(&[]), now()).unwrap();
        assert_eq!(feedback, "Search cleared.");
        assert_eq!(page.entries().search(page.search_term()).len(), 4);
    }

    #[test]
    fn expand_toggles_one_entry_at_a_time() {
        let mut page = DiaryPage::mount();
        page.apply("expand", &args(&["1"]), now()).unwrap();
        assert_eq!(page.expanded(), Some(RecordId(1)));

        // Expanding another entry moves the slot.
        page.apply("expand", &args(&["2"]), now()).unwrap();
        assert_eq!(page.expanded(), Some(RecordId(2)));

        let feedback = page.apply("expand", &args(&["2"]), now()).unwrap();
        assert_eq!(feedback, "Collapsed entry 2.");
        assert_eq!(page.expanded(), None);

        assert_eq!(
            page.apply("expand", &args(&["42"]), now()).unwrap(),
            "No entry 42."
        );
    }

    #[test]
    fn deleting_the_expanded_entry_clears_the_slot() {
        let mut page = DiaryPage::mount();
        page.apply("expand", &args(&["2"]), now()).unwrap();
        page.apply("delete", &args(&["2"]), now()).unwrap();
        assert_eq!(page.expanded(), None);
        assert_eq!(page.entries().len(), 3);
    }

    #[test]
    fn render_clips_long_content_until_expanded() {
        let mut page = DiaryPage::mount();
        let cfg = Config::default();

        let text = render_to_string(&page, &cfg);
        assert!(text.contains("Read More: expand 1"));
        assert!(!text.contains("Overall, it was a day well spent!"));

        page.apply("expand", &args(&["1"]), now()).unwrap();
        let text = render_to_string(&page, &cfg);
        assert!(text.contains("Overall, it was a day well spent!"));
        assert!(text.contains("Show Less: expand 1"));
    }

    #[test]
    fn render_empty_states_depend_on_the_search_box() {
        let mut page = DiaryPage::empty();
        let cfg = Config::default();

        let text = render_to_string(&page, &cfg);
        assert!(text.contains("No entries found"));
        assert!(text.contains("Start writing your first diary entry!"));

        page.apply("search", &args(&["nothing", "matches", "this"]), now())
            .unwrap();
        let text = render_to_string(&page, &cfg);
        assert!(text.contains("No entries match your search. Try different keywords."));
    }

    #[test]
    fn render_shows_mood_emoji_and_tags() {
        let page = DiaryPage::mount();
        let text = render_to_string(&page, &Config::default());
        assert!(text.contains("Saturday, June 14th, 2025 • 😊"));
        assert!(text.contains("Tags: work, productivity"));
        assert!(text.contains("Tags: reflection, personal growth"));
    }

    #[test]
    fn export_dumps_entries_with_tags_and_moods() {
        let page = DiaryPage::mount();
        let mut out = Vec::new();
        page.export(&mut out).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert!(text.starts_with("[{\"id\":1,"));
        assert!(text.contains("\"mood\":\"thoughtful\""));
        assert!(text.contains("\"tags\":[\"weekend\",\"plans\"]"));
    }
}
