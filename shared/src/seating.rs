use std::collections::HashMap;

use indexmap::IndexSet;

use crate::html::{Cell, Row, Table};
use crate::snapshot::{Occupant, SEAT_COUNT, Seating, User, UserId};

const SEATS_PER_ROW: usize = 3;

/// A connected user that has no seat.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Standing {
    pub id: String,
    pub name: String,
}

/// Seats matched against the connected users.
///
/// Every connected id ends up either in a seat or in `standing`, exactly once.
/// A seat may hold an id nobody is connected with; it is shown but does not
/// affect `standing`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeatingPlan {
    pub seats: [Option<Occupant>; SEAT_COUNT],
    pub standing: Vec<Standing>,
}

impl SeatingPlan {
    pub fn reconcile(connected: &[User], seating: &Seating) -> Self {
        let mut unseated: IndexSet<&UserId> = IndexSet::new();
        // Names are looked up by id text, so a later duplicate id renames the earlier one.
        let mut names: HashMap<&str, &str> = HashMap::new();
        for user in connected {
            unseated.insert(&user.id);
            names.insert(user.id.text(), &user.name);
        }

        for occupant in seating.occupied() {
            unseated.shift_remove(&occupant.id);
        }

        let standing = unseated
            .into_iter()
            .map(|id| Standing {
                id: id.text().to_owned(),
                name: names.get(id.text()).copied().unwrap_or_default().to_owned(),
            })
            .collect();

        Self {
            seats: seating.seats().clone(),
            standing,
        }
    }

    /// Three rows of three seats, plus a full-width row for anyone without a seat.
    pub fn to_table(&self) -> Table {
        let mut table = Table::bordered(1);
        for seat_row in self.seats.chunks(SEATS_PER_ROW) {
            table.push_row(seat_row.iter().map(seat_cell).collect());
        }

        if !self.standing.is_empty() {
            let listing: String = self
                .standing
                .iter()
                .map(|user| format!("[{}] {} ", user.id, user.name))
                .collect();
            let listing = Cell::text(listing).with_colspan(SEATS_PER_ROW as u32);
            table.push_row(Row::new().with_cell(listing).ending_line());
        }
        table
    }
}

fn seat_cell(seat: &Option<Occupant>) -> Cell {
    match seat {
        Some(occupant) => Cell::text(format!("[{}] {}", occupant.id.text(), occupant.name)),
        None => Cell::empty(),
    }
}
