use std::io::{self, IsTerminal, Write};

use anyhow::anyhow;
use unicode_width::UnicodeWidthStr;

use crate::config::Config;
use crate::route::Route;

pub const CHROME_WIDTH: usize = 64;

const NAV_LINKS: [(&str, &str); 4] = [
    ("/", "Home"),
    ("/dashboard", "Dashboard"),
    ("/todos", "To-Do List"),
    ("/diary", "Diary"),
];

#[derive(Debug, Clone)]
pub struct Renderer {
    color: bool,
}

impl Renderer {
    pub fn new(cfg: &Config) -> anyhow::Result<Self> {
        let color = match cfg.color.to_ascii_lowercase().as_str() {
            "on" | "yes" | "true" | "1" => true,
            "off" | "no" | "false" | "0" => false,
            other => return Err(anyhow!("invalid color setting: {other}")),
        };

        Ok(Self { color })
    }

    /// Renderer with color forced off, for captured output.
    pub fn plain() -> Self {
        Self { color: false }
    }

    pub fn paint(&self, text: &str, code: &str) -> String {
        if !self.color || !io::stdout().is_terminal() {
            return text.to_string();
        }
        format!("\x1b[{code}m{text}\x1b[0m")
    }
}

/// Top navigation bar shared by every page; the current route renders
/// bracketed and highlighted.
pub fn write_navbar<W: Write>(
    mut writer: W,
    renderer: &Renderer,
    current: &Route,
) -> anyhow::Result<()> {
    let links: Vec<String> = NAV_LINKS
        .iter()
        .map(|(path, label)| {
            if *path == current.path() {
                renderer.paint(&format!("[{label}]"), "36")
            } else {
                (*label).to_string()
            }
        })
        .collect();

    writeln!(
        writer,
        "{}    {}",
        renderer.paint("Memento", "1"),
        links.join("  ")
    )?;
    writeln!(writer, "{}", "=".repeat(CHROME_WIDTH))?;
    Ok(())
}

pub fn write_footer<W: Write>(mut writer: W) -> anyhow::Result<()> {
    writeln!(writer, "{}", "=".repeat(CHROME_WIDTH))?;
    writeln!(writer, "Memento: organize your life, one day at a time.")?;
    Ok(())
}

pub fn write_table<W: Write>(
    mut writer: W,
    headers: Vec<String>,
    rows: Vec<Vec<String>>,
) -> anyhow::Result<()> {
    let column_count = headers.len();
    let mut widths = vec![0usize; column_count];

    for (idx, header) in headers.iter().enumerate() {
        widths[idx] = widths[idx].max(UnicodeWidthStr::width(header.as_str()));
    }

    for row in &rows {
        for (idx, cell) in row.iter().enumerate() {
            widths[idx] = widths[idx].max(UnicodeWidthStr::width(strip_ansi(cell).as_str()));
        }
    }

    for idx in 0..column_count {
        write!(writer, "{:width$} ", headers[idx], width = widths[idx])?;
    }
    writeln!(writer)?;

    for idx in 0..column_count {
        write!(writer, "{:-<width$} ", "", width = widths[idx])?;
    }
    writeln!(writer)?;

    for row in rows {
        for idx in 0..column_count {
            let cell = &row[idx];
            let visible_width = UnicodeWidthStr::width(strip_ansi(cell).as_str());
            let padding = widths[idx].saturating_sub(visible_width);
            write!(writer, "{}{} ", cell, " ".repeat(padding))?;
        }
        writeln!(writer)?;
    }

    Ok(())
}

/// Clips content to `limit` characters for the collapsed card view.
/// Returns the text to show and whether anything was cut.
pub fn clip_preview(content: &str, limit: usize) -> (String, bool) {
    if content.chars().count() <= limit {
        return (content.to_string(), false);
    }
    let clipped: String = content.chars().take(limit).collect();
    (format!("{clipped}..."), true)
}

pub fn progress_bar(percent: u32, width: usize) -> String {
    let clamped = percent.min(100) as usize;
    let filled = clamped * width / 100;
    format!("[{}{}]", "#".repeat(filled), "-".repeat(width - filled))
}

/// Uppercases the first character only, the way category and priority
/// chips are labeled.
pub fn capitalize(word: &str) -> String {
    let mut chars = word.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn strip_ansi(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut escaped = false;

    for ch in s.chars() {
        if escaped {
            if ch == 'm' {
                escaped = false;
            }
            continue;
        }

        if ch == '\x1b' {
            escaped = true;
            continue;
        }

        out.push(ch);
    }

    out
}
