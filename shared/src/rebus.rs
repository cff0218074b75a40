use crate::html::{Cell, CssColor, Row, Table};
use crate::snapshot::{GivenRebuses, TeamSnapshot};

/// Rebuses shown in the progress matrix, numbered from 1.
pub const REBUS_COUNT: i64 = 8;

/// How much help a team has been given for a rebus, from least to most.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum HintTier {
    Normal,
    Help,
    Solution,
}

impl HintTier {
    pub const ALL: [Self; 3] = [Self::Normal, Self::Help, Self::Solution];

    pub fn letter(self) -> &'static str {
        match self {
            Self::Normal => "N",
            Self::Help => "H",
            Self::Solution => "S",
        }
    }

    pub fn color(self, solved: bool) -> CssColor {
        match (self, solved) {
            (Self::Normal, true) => CssColor::Green,
            (Self::Normal, false) => CssColor::Cyan,
            (Self::Help, true) => CssColor::Yellow,
            (Self::Help, false) => CssColor::Orange,
            (Self::Solution, true) => CssColor::Red,
            (Self::Solution, false) => CssColor::Magenta,
        }
    }
}

impl GivenRebuses {
    pub fn is_given(&self, tier: HintTier) -> bool {
        let text = match tier {
            HintTier::Normal => &self.normal,
            HintTier::Help => &self.help,
            HintTier::Solution => &self.solution,
        };
        !text.is_empty()
    }
}

/// One cell of the progress matrix.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RebusProgress {
    pub number: i64,
    pub test_count: i64,
    pub solved: bool,
    pub given: GivenRebuses,
}

impl RebusProgress {
    pub fn for_rebus(team: &TeamSnapshot, number: i64) -> Self {
        let solution = team
            .rebus_solutions
            .get(&number.to_string())
            .copied()
            .unwrap_or_default();
        // Several statuses may name the same rebus; the last one counts.
        let given = team
            .rebus_statuses
            .iter()
            .rev()
            .find(|status| status.rebus_number == number)
            .map(|status| status.given.clone())
            .unwrap_or_default();

        Self {
            number,
            test_count: solution.test_count,
            solved: solution.solved,
            given,
        }
    }

    /// Highest tier handed out. Each tier overrides the ones before it.
    pub fn tier(&self) -> Option<HintTier> {
        HintTier::ALL
            .into_iter()
            .rev()
            .find(|tier| self.given.is_given(*tier))
    }

    pub fn color(&self) -> Option<CssColor> {
        self.tier().map(|tier| tier.color(self.solved))
    }

    /// Tier letter followed by the number of attempts, e.g. `H3`; empty with no hints given.
    pub fn label(&self) -> String {
        self.tier()
            .map(|tier| format!("{}{}", tier.letter(), self.test_count))
            .unwrap_or_default()
    }

    pub fn cell(&self) -> Cell {
        let label = self.label();
        let cell = if label.is_empty() {
            Cell::empty()
        } else {
            Cell::text(label)
        };
        cell.with_background(self.color())
    }
}

pub fn rebus_progress(team: &TeamSnapshot) -> Vec<RebusProgress> {
    (1..=REBUS_COUNT)
        .map(|number| RebusProgress::for_rebus(team, number))
        .collect()
}

/// Single-row table with one cell per rebus.
pub fn rebus_matrix(team: &TeamSnapshot) -> Table {
    let row: Row = rebus_progress(team)
        .iter()
        .map(RebusProgress::cell)
        .collect();
    Table::bordered(1).with_row(row)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::{HintTier, RebusProgress, rebus_matrix, rebus_progress};
    use crate::html::CssColor;
    use crate::snapshot::TeamSnapshot;

    fn progress(team: serde_json::Value, number: i64) -> RebusProgress {
        RebusProgress::for_rebus(&TeamSnapshot::from_json(&team), number)
    }

    #[test]
    fn help_overrides_normal_when_solution_is_empty() {
        let rebus = progress(
            json!({
                "rebus-solutions": { "3": { "test_count": "2", "solved": true } },
                "rebus-statuses": [
                    { "rebus-number": "3", "given_rebuses": { "Normal": "x", "Help": "y", "Solution": "" } }
                ]
            }),
            3,
        );
        assert_eq!(rebus.tier(), Some(HintTier::Help));
        assert_eq!(rebus.label(), "H2");
        assert_eq!(rebus.color(), Some(CssColor::Yellow));
    }

    #[test]
    fn solution_overrides_everything() {
        let rebus = progress(
            json!({
                "rebus-statuses": [
                    { "rebus-number": 5, "given_rebuses": { "Normal": "", "Help": "", "Solution": "z" } }
                ]
            }),
            5,
        );
        assert_eq!(rebus.label(), "S0");
        assert_eq!(rebus.color(), Some(CssColor::Magenta));
    }

    #[test]
    fn tier_colors_depend_on_solved() {
        let expected = [
            (HintTier::Normal, CssColor::Green, CssColor::Cyan),
            (HintTier::Help, CssColor::Yellow, CssColor::Orange),
            (HintTier::Solution, CssColor::Red, CssColor::Magenta),
        ];
        for (tier, solved, unsolved) in expected {
            assert_eq!(tier.color(true), solved);
            assert_eq!(tier.color(false), unsolved);
        }
    }

    #[test]
    fn no_hints_means_blank_cell() {
        let rebus = progress(
            json!({ "rebus-solutions": { "1": { "test_count": "4", "solved": true } } }),
            1,
        );
        assert_eq!(rebus.tier(), None);
        assert_eq!(rebus.label(), "");
        assert_eq!(rebus.cell().to_string(), "<td></td>");
    }

    #[test]
    fn last_matching_status_wins() {
        let rebus = progress(
            json!({
                "rebus-statuses": [
                    { "rebus-number": "2", "given_rebuses": { "Help": "first" } },
                    { "rebus-number": "2", "given_rebuses": { "Normal": "second" } }
                ]
            }),
            2,
        );
        assert_eq!(rebus.tier(), Some(HintTier::Normal));
    }

    #[test]
    fn malformed_numbers_parse_to_zero() {
        let team = json!({
            "rebus-solutions": { "0": { "test_count": "x" } },
            "rebus-statuses": [ { "rebus-number": "seven", "given_rebuses": { "Normal": "n" } } ]
        });
        // "seven" reads as rebus 0, which is outside the matrix.
        let cells = rebus_progress(&TeamSnapshot::from_json(&team));
        assert_eq!(cells.len(), 8);
        assert!(cells.iter().all(|rebus| rebus.tier().is_none()));
    }

    #[test]
    fn matrix_is_one_row_of_eight() {
        let team = TeamSnapshot::from_json(&json!({
            "rebus-solutions": { "8": { "test_count": 1, "solved": false } },
            "rebus-statuses": [ { "rebus-number": "8", "given_rebuses": { "Normal": "n" } } ]
        }));
        let table = rebus_matrix(&team);
        assert_eq!(table.rows().len(), 1);
        assert_eq!(table.rows()[0].len(), 8);
        assert_eq!(
            table.rows()[0].cells()[7].to_string(),
            "<td style='background-color: cyan'>N1</td>"
        );
    }
}
