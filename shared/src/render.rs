//! Team status fragment for the operator dashboard.

use serde_json::Value;

use crate::field::{DATE_PLACEHOLDER, format_fixed2};
use crate::html::{Cell, Fragment, Row, Table};
use crate::rebus::rebus_matrix;
use crate::seating::SeatingPlan;
use crate::snapshot::{MinibusState, TeamSnapshot};
use crate::stage::stage_label;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RenderOptions {
    /// Append the rebus progress row.
    pub rebus_matrix: bool,
    /// Prefix the fragment with `<h3>number: name</h3>`.
    pub team_header: bool,
}

impl Default for RenderOptions {
    fn default() -> Self {
        Self {
            rebus_matrix: true,
            team_header: false,
        }
    }
}

/// Render a raw team snapshot with the default options.
pub fn render(team: &Value) -> String {
    render_with(team, &RenderOptions::default())
}

pub fn render_with(team: &Value, options: &RenderOptions) -> String {
    render_snapshot(&TeamSnapshot::from_json(team), options).to_string()
}

/// Build the overview fragment.
///
/// Layout, top to bottom: optional header, seating table, status line,
/// position, milestone times, optional rebus row.
pub fn render_snapshot(team: &TeamSnapshot, options: &RenderOptions) -> Fragment {
    let mut fragment = Fragment::new();

    if options.team_header {
        fragment.heading(format!("{}: {}", team.team_number, team.team_name));
    }

    if let Some(seating) = team.minibus.as_ref().and_then(|m| m.seating.as_ref()) {
        fragment.table(SeatingPlan::reconcile(&team.connected_users, seating).to_table());
    }

    fragment.line(format!("Status: {}", stage_label(team.rally_stage)));

    match team.minibus.as_ref().and_then(position_rows) {
        Some(rows) => {
            let summary = Row::new()
                .with_cell(Cell::text("Position"))
                .with_cell(Cell::nested(rows));
            fragment.table(Table::new().with_row(summary)).newline();
        }
        None => {
            fragment.line("Position: Unknown");
        }
    }
    fragment.line_break();

    let times = &team.timestamps;
    let milestones = [
        ("Start time", &times.start),
        ("Lunch time", &times.lunch),
        ("Arrived at goal", &times.found_goal),
        ("Ended", &times.goal),
        ("Latest update", &times.watchdog),
    ];
    for (label, time) in milestones {
        let time = time.as_deref().unwrap_or(DATE_PLACEHOLDER);
        fragment.line(format!("{label}: {time}"));
    }

    if options.rebus_matrix {
        fragment.table(rebus_matrix(team));
    }

    fragment
}

/// One row each for section, distance and speed; `None` if the minibus reports none of them.
fn position_rows(minibus: &MinibusState) -> Option<Table> {
    if !minibus.has_position() {
        return None;
    }

    let mut rows = Table::new();
    let lines = [
        minibus
            .current_section
            .as_ref()
            .map(|section| format!("Section {section}")),
        minibus
            .distance
            .map(|distance| format!("Distance {}", format_fixed2(distance))),
        minibus
            .speed
            .map(|speed| format!("Speed {}", format_fixed2(speed))),
    ];
    for line in lines.into_iter().flatten() {
        rows.push_row(Row::new().with_cell(Cell::text(line)));
    }
    Some(rows)
}
