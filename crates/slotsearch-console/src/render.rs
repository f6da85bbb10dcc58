//! Text rendering of the distance table.
//!
//! Rows are occupied-slot counts, columns are cursor quantities.

use owo_colors::OwoColorize;
use slotsearch_core::OccupancyMode;
use slotsearch_solver::table::DistanceTable;

/// Renders distances as a plain grid, `.` for unresolved shapes.
///
/// # Examples
///
/// ```
/// use slotsearch_core::{Inventory, OccupancyMode};
/// use slotsearch_console::render_table;
/// use slotsearch_solver::scope::SearchState;
///
/// let state = SearchState::fresh(Inventory::new(vec![2, 0], 0), 2, OccupancyMode::Exact).unwrap();
/// let text = render_table(state.table());
/// assert!(text.contains("1: 0 . ."));
/// ```
pub fn render_table(table: &DistanceTable) -> String {
    let instance = table.instance();
    let cell_width = cell_width(table);
    let label_width = digits(instance.slot_count() as u64);

    let mut out = header(instance.columns(), cell_width, label_width);
    for row in 0..instance.rows() {
        out.push_str(&format!("{row:>label_width$}:"));
        for col in 0..instance.columns() {
            let cell = match table.distance_at(row * instance.columns() + col) {
                Some(d) => d.to_string(),
                None => ".".to_string(),
            };
            out.push_str(&format!(" {cell:>cell_width$}"));
        }
        out.push('\n');
    }
    out
}

/// Renders distances colored by how close they are to the largest one.
///
/// Structurally impossible shapes are a dim `.`, possible but unresolved
/// shapes a dim block.
pub fn render_heatmap(table: &DistanceTable, mode: OccupancyMode) -> String {
    let instance = table.instance();
    let cell_width = cell_width(table).max(2);
    let label_width = digits(instance.slot_count() as u64);
    let max = table.max_distance().unwrap_or(0).max(1);

    let mut out = header(instance.columns(), cell_width, label_width);
    for row in 0..instance.rows() {
        out.push_str(&format!("{row:>label_width$}:"));
        for col in 0..instance.columns() {
            let idx = row * instance.columns() + col;
            let cell = match table.distance_at(idx) {
                Some(d) => color_bucket(d, max, &format!("{d:>cell_width$}")),
                None if instance.is_possible(instance.shape_at(idx), mode) => {
                    format!("{:>cell_width$}", "██").bright_black().to_string()
                }
                None => format!("{:>cell_width$}", ".").bright_black().to_string(),
            };
            out.push(' ');
            out.push_str(&cell);
        }
        out.push('\n');
    }
    out
}

// Five equal buckets of the largest resolved distance.
fn color_bucket(d: u32, max: u32, text: &str) -> String {
    let ratio = f64::from(d) / f64::from(max);
    if ratio < 0.2 {
        text.bright_cyan().to_string()
    } else if ratio < 0.4 {
        text.bright_blue().to_string()
    } else if ratio < 0.6 {
        text.bright_green().to_string()
    } else if ratio < 0.8 {
        text.bright_yellow().to_string()
    } else {
        text.bright_red().to_string()
    }
}

fn header(columns: usize, cell_width: usize, label_width: usize) -> String {
    let mut out = " ".repeat(label_width + 1);
    for col in 0..columns {
        out.push_str(&format!(" {col:>cell_width$}"));
    }
    out.push_str("\n\n");
    out
}

fn cell_width(table: &DistanceTable) -> usize {
    let widest_distance = digits(u64::from(table.max_distance().unwrap_or(0)));
    let widest_cursor = digits(u64::from(table.instance().capacity()));
    widest_distance.max(widest_cursor)
}

fn digits(n: u64) -> usize {
    n.to_string().len()
}
