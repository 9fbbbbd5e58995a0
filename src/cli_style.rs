/*!
 * esi-remote CLI styling
 *
 * Themed text, icons and the tables used to print saves and actors.
 */

use comfy_table::{presets, Attribute, Cell, Color, ContentArrangement, Table};
use console::{style, StyledObject};

use crate::model::{ActiveSave, OperatorActor, Save};

// ============================================================================
// THEME COLORS
// ============================================================================

pub struct Theme;

impl Theme {
    pub fn primary<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan()
    }

    pub fn success<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).green()
    }

    pub fn warning<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).yellow()
    }

    pub fn error<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).red()
    }

    /// Muted/secondary text (dim)
    pub fn muted<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).dim()
    }

    /// Header style (bold cyan)
    pub fn header<D: std::fmt::Display>(text: D) -> StyledObject<D> {
        style(text).cyan().bold()
    }
}

// ============================================================================
// ICONS
// ============================================================================

pub struct Icons;

impl Icons {
    pub const SUCCESS: &'static str = "✓";
    pub const ERROR: &'static str = "✗";
    pub const WARNING: &'static str = "⚠";
    pub const INFO: &'static str = "ℹ";
    pub const ACTIVE: &'static str = "▶";
    pub const HIDDEN: &'static str = "○";
    pub const VISIBLE: &'static str = "●";
    pub const ARROW_RIGHT: &'static str = "→";
}

/// Draw a section header with a line
pub fn section_header(title: &str) {
    let line_len = 50 - title.chars().count().min(40);
    println!(
        "\n{} {}",
        Theme::header(title),
        Theme::muted("─".repeat(line_len))
    );
}

// ============================================================================
// TABLES
// ============================================================================

pub fn create_table() -> Table {
    let mut table = Table::new();
    table
        .load_preset(presets::UTF8_FULL)
        .set_content_arrangement(ContentArrangement::Dynamic);
    table
}

fn header_cells(titles: &[&str]) -> Vec<Cell> {
    titles
        .iter()
        .map(|t| Cell::new(t).fg(Color::Cyan).add_attribute(Attribute::Bold))
        .collect()
}

fn visibility_cell(visible: bool) -> Cell {
    if visible {
        Cell::new(format!("{} visible", Icons::VISIBLE)).fg(Color::Green)
    } else {
        Cell::new(format!("{} hidden", Icons::HIDDEN)).fg(Color::DarkGrey)
    }
}

/// Saves with their sub saves indented beneath them; the active scenario is marked
pub fn saves_table<'a>(saves: impl IntoIterator<Item = &'a Save>, active: &ActiveSave) -> Table {
    let mut table = create_table();
    table.set_header(header_cells(&["", "ID", "Scenario", "Category", "Path"]));

    fn add(table: &mut Table, save: &Save, depth: usize, active: &ActiveSave) {
        let marker = if save.scenario_id() == active.scenario_id() {
            Cell::new(Icons::ACTIVE).fg(Color::Green)
        } else {
            Cell::new("")
        };
        table.add_row(vec![
            marker,
            Cell::new(save.scenario_id()),
            Cell::new(format!("{}{}", "  ".repeat(depth), save.scenario_name())),
            Cell::new(save.category_name()),
            Cell::new(save.absolute_path()).fg(Color::DarkGrey),
        ]);
        for sub in save.sub_saves() {
            add(table, sub, depth + 1, active);
        }
    }

    for save in saves {
        add(&mut table, save, 0, active);
    }
    table
}

pub fn actors_table<'a>(actors: impl IntoIterator<Item = &'a OperatorActor>) -> Table {
    let mut table = create_table();
    table.set_header(header_cells(&[
        "ID",
        "Name",
        "Type",
        "Visible",
        "Properties",
        "Enums",
        "Actions",
    ]));

    for actor in actors {
        table.add_row(vec![
            Cell::new(actor.id()).add_attribute(Attribute::Bold),
            Cell::new(actor.name()),
            Cell::new(actor.actor_type()),
            visibility_cell(actor.is_visible()),
            Cell::new(actor.properties().len()),
            Cell::new(actor.property_enums().len()),
            Cell::new(actor.actions().len()),
        ]);
    }
    table
}

pub fn properties_table(actor: &OperatorActor) -> Table {
    let mut table = create_table();
    table.set_header(header_cells(&["Name", "Display name", "Type", "Value", "Range", "Step"]));
    for property in actor.properties() {
        table.add_row(vec![
            Cell::new(property.name()),
            Cell::new(property.display_name()),
            Cell::new(property.value_type()),
            Cell::new(property.value())
                .fg(Color::White)
                .add_attribute(Attribute::Bold),
            Cell::new(format!("{}..{}", property.min_value(), property.max_value()))
                .fg(Color::DarkGrey),
            Cell::new(property.step_size()).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub fn enums_table(actor: &OperatorActor) -> Table {
    let mut table = create_table();
    table.set_header(header_cells(&["Name", "Display name", "Current", "Allowed"]));
    for property_enum in actor.property_enums() {
        let allowed: Vec<&str> = property_enum
            .all_values()
            .into_iter()
            .map(|field| field.enum_field_value())
            .collect();
        table.add_row(vec![
            Cell::new(property_enum.name()),
            Cell::new(property_enum.display_name()),
            Cell::new(property_enum.current_value().enum_field_value())
                .fg(Color::White)
                .add_attribute(Attribute::Bold),
            Cell::new(allowed.join(", ")).fg(Color::DarkGrey),
        ]);
    }
    table
}

pub fn actions_table(actor: &OperatorActor) -> Table {
    let mut table = create_table();
    table.set_header(header_cells(&["Name", "Display name", "Button"]));
    for action in actor.actions() {
        table.add_row(vec![
            Cell::new(action.name()),
            Cell::new(action.display_name()),
            Cell::new(action.button_name()).fg(Color::DarkGrey),
        ]);
    }
    table
}

// ============================================================================
// MESSAGES
// ============================================================================

/// Print a styled error message with optional suggestion
pub fn print_error(message: &str, suggestion: Option<&str>) {
    eprintln!(
        "\n{} {}",
        Theme::error(format!("{} Error:", Icons::ERROR)),
        message
    );

    if let Some(hint) = suggestion {
        eprintln!(
            "  {} {}",
            Theme::muted(Icons::ARROW_RIGHT),
            Theme::muted(hint)
        );
    }
    eprintln!();
}

pub fn print_warning(message: &str) {
    eprintln!(
        "{} {}",
        Theme::warning(Icons::WARNING.to_string()),
        Theme::warning(message)
    );
}

pub fn print_success(message: &str) {
    println!(
        "{} {}",
        Theme::success(Icons::SUCCESS.to_string()),
        Theme::success(message)
    );
}

pub fn print_info(message: &str) {
    println!("{} {}", Theme::primary(Icons::INFO.to_string()), message);
}
