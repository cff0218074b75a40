//! Lenient typed view over one team snapshot from the live-tracking feed.
//!
//! Every field is optional and construction never fails: values of the wrong
//! type fall back to the same defaults a missing field gets.

use std::collections::BTreeMap;

use serde_json::Value;

use crate::field::{
    as_number, date_field, display_value, field, get_value, get_value_or_empty, has_value,
    is_truthy, members, parse_int_lenient,
};
use crate::stage::RallyStage;

/// Number of seats in the minibus, numbered from 1.
pub const SEAT_COUNT: usize = 9;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct TeamSnapshot {
    pub team_number: String,
    pub team_name: String,
    pub rally_stage: Option<RallyStage>,
    pub minibus: Option<MinibusState>,
    pub connected_users: Vec<User>,
    pub timestamps: Timestamps,
    /// Keyed by rebus number as it appears in the feed ("1".."8").
    pub rebus_solutions: BTreeMap<String, RebusSolution>,
    pub rebus_statuses: Vec<RebusStatus>,
}

/// Milestone times as display text; `None` when missing or `null`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Timestamps {
    pub start: Option<String>,
    pub lunch: Option<String>,
    pub found_goal: Option<String>,
    pub goal: Option<String>,
    pub watchdog: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct MinibusState {
    pub current_section: Option<String>,
    pub distance: Option<f64>,
    pub speed: Option<f64>,
    pub seating: Option<Seating>,
}

impl MinibusState {
    pub fn has_position(&self) -> bool {
        self.current_section.is_some() || self.distance.is_some() || self.speed.is_some()
    }
}

/// Occupants of seats 1..=9; index 0 is seat 1.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Seating {
    seats: [Option<Occupant>; SEAT_COUNT],
}

impl Seating {
    pub fn from_json(seating: Option<&Value>) -> Self {
        let seats = std::array::from_fn(|index| {
            let seat_number = (index + 1).to_string();
            field(seating, &seat_number)
                .filter(|occupant| !occupant.is_null())
                .map(Occupant::from_json)
        });
        Self { seats }
    }

    pub fn seat(&self, seat_number: usize) -> Option<&Occupant> {
        let index = seat_number.checked_sub(1)?;
        self.seats.get(index)?.as_ref()
    }

    pub fn seats(&self) -> &[Option<Occupant>; SEAT_COUNT] {
        &self.seats
    }

    pub fn occupied(&self) -> impl Iterator<Item = &Occupant> {
        self.seats.iter().flatten()
    }
}

/// Identity of a connected user.
///
/// Ids compare by JSON type and value, so `1` and `"1"` are different users,
/// while `1` and `1.0` are the same one.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct UserId {
    key: String,
    text: String,
}

impl UserId {
    pub fn from_json(id: &Value) -> Self {
        let text = display_value(id).into_owned();
        let key = match id {
            Value::String(_) => format!("s:{text}"),
            Value::Number(_) => format!("n:{text}"),
            other => format!("j:{other}"),
        };
        Self { key, text }
    }

    /// Text shown between the brackets in `[id] name`.
    pub fn text(&self) -> &str {
        &self.text
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct User {
    pub id: UserId,
    pub name: String,
}

impl User {
    /// Entries without a usable id cannot be reconciled against seats and are skipped.
    pub fn from_json(user: &Value) -> Option<Self> {
        let id = field(Some(user), "id").filter(|id| !id.is_null())?;
        Some(Self {
            id: UserId::from_json(id),
            name: display_value(get_value_or_empty(Some(user), "name")).into_owned(),
        })
    }
}

/// Whoever sits in a seat. The id may or may not belong to a connected user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Occupant {
    pub id: UserId,
    pub name: String,
}

impl Occupant {
    pub fn from_json(occupant: &Value) -> Self {
        Self {
            id: UserId::from_json(get_value_or_empty(Some(occupant), "id")),
            name: display_value(get_value_or_empty(Some(occupant), "name")).into_owned(),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RebusSolution {
    pub test_count: i64,
    pub solved: bool,
}

impl RebusSolution {
    pub fn from_json(solution: &Value) -> Self {
        let zero = Value::String("0".to_owned());
        Self {
            test_count: parse_int_lenient(get_value(Some(solution), "test_count", &zero)),
            solved: is_truthy(get_value(Some(solution), "solved", &Value::Bool(false))),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebusStatus {
    pub rebus_number: i64,
    pub given: GivenRebuses,
}

impl RebusStatus {
    pub fn from_json(status: &Value) -> Self {
        let zero = Value::String("0".to_owned());
        Self {
            rebus_number: parse_int_lenient(get_value(Some(status), "rebus-number", &zero)),
            given: GivenRebuses::from_json(field(Some(status), "given_rebuses")),
        }
    }
}

/// Hint texts handed out for one rebus. An empty string means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GivenRebuses {
    pub normal: String,
    pub help: String,
    pub solution: String,
}

impl GivenRebuses {
    pub fn from_json(given: Option<&Value>) -> Self {
        let text = |key| match field(given, key) {
            Some(Value::String(text)) => text.clone(),
            _ => String::new(),
        };
        Self {
            normal: text("Normal"),
            help: text("Help"),
            solution: text("Solution"),
        }
    }
}

impl TeamSnapshot {
    pub fn from_json(team: &Value) -> Self {
        let team = Some(team);
        Self {
            team_number: display_value(get_value_or_empty(team, "team-number")).into_owned(),
            team_name: display_value(get_value_or_empty(team, "team-name")).into_owned(),
            rally_stage: field(team, "rally-stage").and_then(RallyStage::from_value),
            minibus: has_value(team, "minibus")
                .then(|| MinibusState::from_json(field(team, "minibus"))),
            connected_users: members(field(team, "connected-users"))
                .filter_map(User::from_json)
                .collect(),
            timestamps: Timestamps::from_json(team),
            rebus_solutions: rebus_solutions(field(team, "rebus-solutions")),
            rebus_statuses: members(field(team, "rebus-statuses"))
                .map(RebusStatus::from_json)
                .collect(),
        }
    }
}

impl Timestamps {
    pub fn from_json(team: Option<&Value>) -> Self {
        let date = |key| date_field(team, key).map(|text| text.into_owned());
        Self {
            start: date("start-time"),
            lunch: date("lunch-time"),
            found_goal: date("found-goal-time"),
            goal: date("goal-time"),
            watchdog: date("watchdog"),
        }
    }
}

impl MinibusState {
    pub fn from_json(minibus: Option<&Value>) -> Self {
        Self {
            current_section: field(minibus, "current_section")
                .map(|section| display_value(section).into_owned()),
            distance: field(minibus, "distance").and_then(as_number),
            speed: field(minibus, "speed").and_then(as_number),
            seating: has_value(minibus, "seating")
                .then(|| Seating::from_json(field(minibus, "seating"))),
        }
    }
}

fn rebus_solutions(solutions: Option<&Value>) -> BTreeMap<String, RebusSolution> {
    match solutions {
        Some(Value::Object(map)) => map
            .iter()
            .map(|(number, solution)| (number.clone(), RebusSolution::from_json(solution)))
            .collect(),
        Some(Value::Array(items)) => items
            .iter()
            .enumerate()
            .map(|(index, solution)| (index.to_string(), RebusSolution::from_json(solution)))
            .collect(),
        _ => BTreeMap::new(),
    }
}
