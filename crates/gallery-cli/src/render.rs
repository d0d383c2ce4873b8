//! Table rendering of a controller frame.

use comfy_table::modifiers::UTF8_ROUND_CORNERS;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{
    Attribute, Cell, CellAlignment, Color, ColumnConstraint, ContentArrangement, Table, Width,
};
use gallery_core::{Item, RenderFrame, SelectionPhase};

/// Inscriptions longer than this many characters are cut.
pub const NOTE_PREVIEW_CHARS: usize = 50;

/// Message shown in place of rows for an empty page.
pub const EMPTY_MESSAGE: &str = "No artworks found";

/// Message shown in place of rows while the page is loading.
pub const LOADING_MESSAGE: &str = "Loading artworks...";

/// Renders the visible page plus a status footer.
pub fn render_frame(frame: &RenderFrame) -> String {
    let mut out = String::new();

    if frame.items.is_empty() {
        out.push_str(empty_message(frame));
    } else {
        out.push_str(&build_table(frame).to_string());
    }
    out.push('\n');
    out.push_str(&footer_line(frame));
    out
}

/// Placeholder for a page without rows: loading, the failure notice, or
/// [`EMPTY_MESSAGE`].
fn empty_message(frame: &RenderFrame) -> &'static str {
    if frame.loading {
        LOADING_MESSAGE
    } else {
        frame.notice.unwrap_or(EMPTY_MESSAGE)
    }
}

fn build_table(frame: &RenderFrame) -> Table {
    let mut table = Table::new();
    table.set_header(vec![
        header_cell(""),
        header_cell("ID"),
        header_cell("Title"),
        header_cell("Origin"),
        header_cell("Artist"),
        header_cell("Inscriptions"),
        header_cell("Date Range"),
    ]);
    apply_table_style(&mut table);
    align_column(&mut table, 0, CellAlignment::Center);
    align_column(&mut table, 1, CellAlignment::Right);

    for item in &frame.items {
        let checked = frame.selected_on_page.iter().any(|s| s.id == item.id);
        table.add_row(item_row(item, checked));
    }
    table
}

fn item_row(item: &Item, checked: bool) -> Vec<Cell> {
    vec![
        check_cell(checked),
        dim_cell(item.id),
        Cell::new(&item.title).add_attribute(Attribute::Bold),
        Cell::new(&item.origin_label),
        Cell::new(&item.attribution_label),
        dim_cell(truncate_note(&item.note)),
        Cell::new(format_range(item.range_start, item.range_end)),
    ]
}

/// Cuts an inscription to [`NOTE_PREVIEW_CHARS`] characters plus `...`.
pub fn truncate_note(note: &str) -> String {
    if note.chars().count() > NOTE_PREVIEW_CHARS {
        let head: String = note.chars().take(NOTE_PREVIEW_CHARS).collect();
        format!("{head}...")
    } else {
        note.to_string()
    }
}

/// Formats a creation range; a zero bound reads as `Unknown`.
pub fn format_range(start: i32, end: i32) -> String {
    format!("{} - {}", year_label(start), year_label(end))
}

fn year_label(year: i32) -> String {
    if year == 0 {
        "Unknown".to_string()
    } else {
        year.to_string()
    }
}

/// One-line status: position, totals and selection lifecycle.
pub fn footer_line(frame: &RenderFrame) -> String {
    let pages = frame.cursor.page_count(frame.total_count).max(1);
    let mut line = format!(
        "Page {} of {} | {} records | {} selected",
        frame.cursor.page_number(),
        pages,
        frame.total_count,
        frame.selected_count
    );
    if frame.phase != SelectionPhase::Idle {
        line.push_str(&format!(
            " | target {} ({})",
            frame.target_size,
            frame.phase.label()
        ));
    }
    if frame.loading {
        line.push_str(" | loading");
    }
    line
}

fn apply_table_style(table: &mut Table) {
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .apply_modifier(UTF8_ROUND_CORNERS)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_width(160);
    table.set_constraints(vec![
        ColumnConstraint::Absolute(Width::Fixed(5)),
        ColumnConstraint::LowerBoundary(Width::Fixed(8)),
        ColumnConstraint::UpperBoundary(Width::Percentage(30)),
        ColumnConstraint::UpperBoundary(Width::Fixed(16)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::UpperBoundary(Width::Percentage(25)),
        ColumnConstraint::LowerBoundary(Width::Fixed(17)),
    ]);
}

fn align_column(table: &mut Table, index: usize, alignment: CellAlignment) {
    if let Some(column) = table.column_mut(index) {
        column.set_cell_alignment(alignment);
    }
}

fn header_cell(label: &str) -> Cell {
    Cell::new(label)
        .fg(Color::Cyan)
        .add_attribute(Attribute::Bold)
}

fn check_cell(checked: bool) -> Cell {
    if checked {
        Cell::new("[x]")
            .fg(Color::Green)
            .add_attribute(Attribute::Bold)
    } else {
        dim_cell("[ ]")
    }
}

fn dim_cell<T: ToString>(value: T) -> Cell {
    Cell::new(value).fg(Color::DarkGrey)
}
