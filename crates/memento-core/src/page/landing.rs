use std::io::Write;

use crate::render::{self, Renderer};
use crate::route::Route;

const FEATURES: [(&str, &str); 3] = [
    (
        "Smart To-Do Lists",
        "Create, organize, and prioritize your tasks with our intuitive to-do list manager.",
    ),
    (
        "Beautiful Diary",
        "Capture your thoughts, memories, and reflections in our elegant digital diary.",
    ),
    (
        "Calendar Integration",
        "View your tasks and diary entries in a beautiful calendar interface.",
    ),
];

const STEPS: [(&str, &str); 3] = [
    (
        "Create an Account",
        "Sign up for a free account to get started with Memento.",
    ),
    (
        "Add Your Tasks",
        "Create and organize your to-do lists with our intuitive interface.",
    ),
    (
        "Write Your Diary",
        "Capture your thoughts and memories in our beautiful diary interface.",
    ),
];

const TESTIMONIALS: [(&str, &str, &str); 3] = [
    (
        "Memento has completely transformed how I organize my day. The interface is beautiful and intuitive.",
        "Sarah L.",
        "Product Designer",
    ),
    (
        "I've tried many to-do apps, but Memento is by far the best. The diary feature is a game-changer.",
        "Michael J.",
        "Software Engineer",
    ),
    (
        "As a student, Memento helps me stay organized and focused. I love the clean design and ease of use.",
        "Aisha T.",
        "Graduate Student",
    ),
];

pub fn render<W: Write>(out: &mut W, renderer: &Renderer) -> anyhow::Result<()> {
    render::write_navbar(&mut *out, renderer, &Route::Landing)?;
    writeln!(out)?;
    writeln!(
        out,
        "{}",
        renderer.paint("Organize Your Life, One Day at a Time", "1")
    )?;
    writeln!(
        out,
        "Memento helps you manage your tasks and capture your thoughts"
    )?;
    writeln!(out, "in a beautiful, intuitive interface.")?;
    writeln!(out)?;
    writeln!(out, "Get Started: memento /dashboard")?;
    writeln!(out)?;

    writeln!(out, "{}", renderer.paint("Powerful Features", "1"))?;
    writeln!(
        out,
        "Everything you need to stay organized and capture your thoughts"
    )?;
    writeln!(out, "in one beautiful application.")?;
    for (name, blurb) in FEATURES {
        writeln!(out, "  * {name}: {blurb}")?;
    }
    writeln!(out)?;

    writeln!(out, "{}", renderer.paint("How It Works", "1"))?;
    writeln!(
        out,
        "Getting started with Memento is easy. Follow these simple steps"
    )?;
    writeln!(out, "to organize your life.")?;
    for (idx, (name, blurb)) in STEPS.iter().enumerate() {
        writeln!(out, "  {}. {name}: {blurb}", idx + 1)?;
    }
    writeln!(out)?;

    writeln!(out, "{}", renderer.paint("What Our Users Say", "1"))?;
    writeln!(
        out,
        "Don't just take our word for it. Here's what our users have to"
    )?;
    writeln!(out, "say about Memento.")?;
    for (quote, author, role) in TESTIMONIALS {
        writeln!(out, "  \"{quote}\"")?;
        writeln!(out, "      {author}, {role}")?;
    }
    writeln!(out)?;

    writeln!(out, "{}", renderer.paint("Ready to Get Organized?", "1"))?;
    writeln!(
        out,
        "Join thousands of users who are already using Memento to organize"
    )?;
    writeln!(out, "their lives and capture their thoughts.")?;
    writeln!(out, "Get Started Now: memento /dashboard")?;
    writeln!(out)?;
    render::write_footer(&mut *out)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn landing_page_carries_the_hero_and_all_sections() {
        let mut out = Vec::new();
        render(&mut out, &Renderer::plain()).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.contains("Organize Your Life, One Day at a Time"));
        assert!(text.contains("Powerful Features"));
        assert!(text.contains("Smart To-Do Lists"));
        assert!(text.contains("How It Works"));
        assert!(text.contains("1. Create an Account"));
        assert!(text.contains("What Our Users Say"));
        assert!(text.contains("Sarah L., Product Designer"));
        assert!(text.contains("Ready to Get Organized?"));
    }
}
