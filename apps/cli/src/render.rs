use std::io::{self, Write};

use client_core::{sort_stories, SortKey, SortSpec, StoriesState};

const TITLE_WIDTH: usize = 48;
const AUTHOR_WIDTH: usize = 16;

pub fn render_stories(
    out: &mut impl Write,
    state: &StoriesState,
    sort: SortSpec,
) -> io::Result<()> {
    if state.is_error() {
        writeln!(out, "Something went wrong while fetching stories.")?;
    }

    writeln!(
        out,
        "{:<12} {:<title$} {:<author$} {:>8} {:>7}",
        header("id", SortKey::None, sort),
        header("title", SortKey::Title, sort),
        header("author", SortKey::Author, sort),
        header("comments", SortKey::Comment, sort),
        header("points", SortKey::Point, sort),
        title = TITLE_WIDTH,
        author = AUTHOR_WIDTH,
    )?;

    for story in sort_stories(state.items(), sort) {
        writeln!(
            out,
            "{:<12} {:<title$} {:<author$} {:>8} {:>7}",
            story.object_id.as_str(),
            truncate(&story.title, TITLE_WIDTH),
            truncate(&story.author, AUTHOR_WIDTH),
            story.num_comments,
            story.points,
            title = TITLE_WIDTH,
            author = AUTHOR_WIDTH,
        )?;
    }

    writeln!(
        out,
        "{} stories, {} comments, page {}",
        state.items().len(),
        state.sum_comments(),
        state.current_page()
    )?;

    if state.is_loading() {
        writeln!(out, "Loading ...")?;
    }
    Ok(())
}

pub fn render_recent(out: &mut impl Write, recent: &[String]) -> io::Result<()> {
    if recent.is_empty() {
        return writeln!(out, "no recent searches");
    }
    for (index, term) in recent.iter().enumerate() {
        writeln!(out, "{:>2}. {term}", index + 1)?;
    }
    Ok(())
}

/// The active column gets an arrow; which column is active is derived from
/// the sort spec only.
fn header(label: &str, key: SortKey, sort: SortSpec) -> String {
    if key != sort.key || key == SortKey::None {
        return label.to_string();
    }
    let descending = matches!(key, SortKey::Comment | SortKey::Point) != sort.reversed;
    format!("{label}{}", if descending { "↓" } else { "↑" })
}

fn truncate(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut cut: String = value.chars().take(width.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
