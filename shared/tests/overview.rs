use rally_shared::{RenderOptions, render, render_with};
use serde_json::{Value, json};

fn lions() -> Value {
    json!({
        "team-name": "Lions",
        "team-number": 3,
        "rally-stage": 1,
        "minibus": {
            "speed": 8.333,
            "current_section": 12,
            "distance": 1520.5,
            "seating": {
                "1": { "id": 11, "name": "Anna" },
                "2": { "id": 12, "name": "Bo" },
                "5": { "id": 40, "name": "Guest" }
            }
        },
        "connected-users": [
            { "id": 11, "name": "Anna" },
            { "id": 12, "name": "Bo" },
            { "id": 13, "name": "Cia" },
            { "id": 14, "name": "Dan" }
        ],
        "start-time": "2024-05-18 09:00:00",
        "lunch-time": null,
        "found-goal-time": null,
        "goal-time": null,
        "watchdog": "2024-05-18 10:12:44",
        "rebus-solutions": {
            "1": { "test_count": "2", "solved": true },
            "2": { "test_count": "1", "solved": false }
        },
        "rebus-statuses": [
            { "rebus-number": "1", "given_rebuses": { "Normal": "r1", "Help": "", "Solution": "" } },
            { "rebus-number": "2", "given_rebuses": { "Normal": "r2", "Help": "h2", "Solution": "" } },
            { "rebus-number": "3", "given_rebuses": { "Normal": "r3", "Help": "", "Solution": "" } }
        ]
    })
}

const LIONS_SEATING: &str = "<table border='1'>\
    <tr><td>[11] Anna</td><td>[12] Bo</td><td></td></tr>\
    <tr><td></td><td>[40] Guest</td><td></td></tr>\
    <tr><td></td><td></td><td></td></tr>\
    <tr><td colspan='3'>[13] Cia [14] Dan </td></tr>\n\
    </table>";

const LIONS_BODY: &str = "Status: Morning started<br>\n\
    <table><tr><td>Position</td><td><table>\
    <tr><td>Section 12</td></tr>\
    <tr><td>Distance 1520.50</td></tr>\
    <tr><td>Speed 8.33</td></tr>\
    </table></td></tr></table>\n\
    <br>\n\
    Start time: 2024-05-18 09:00:00<br>\n\
    Lunch time: -<br>\n\
    Arrived at goal: -<br>\n\
    Ended: -<br>\n\
    Latest update: 2024-05-18 10:12:44<br>\n";

const LIONS_REBUSES: &str = "<table border='1'><tr>\
    <td style='background-color: green'>N2</td>\
    <td style='background-color: orange'>H1</td>\
    <td style='background-color: cyan'>N0</td>\
    <td></td><td></td><td></td><td></td><td></td>\
    </tr></table>";

#[test]
fn full_snapshot_renders_in_dashboard_order() {
    assert_eq!(
        render(&lions()),
        format!("{LIONS_SEATING}{LIONS_BODY}{LIONS_REBUSES}")
    );
}

#[test]
fn variant_without_rebus_matrix() {
    let options = RenderOptions {
        rebus_matrix: false,
        team_header: false,
    };
    assert_eq!(
        render_with(&lions(), &options),
        format!("{LIONS_SEATING}{LIONS_BODY}")
    );
}

#[test]
fn variant_with_team_header() {
    let options = RenderOptions {
        rebus_matrix: true,
        team_header: true,
    };
    assert_eq!(
        render_with(&lions(), &options),
        format!("<h3>3: Lions</h3>\n{LIONS_SEATING}{LIONS_BODY}{LIONS_REBUSES}")
    );
}

#[test]
fn every_connected_user_appears_exactly_once() {
    let team = json!({
        "connected-users": [{ "id": 1, "name": "A" }, { "id": 2, "name": "B" }],
        "minibus": { "seating": { "1": { "id": 1, "name": "A" } } }
    });
    let html = render(&team);
    assert_eq!(html.matches("[1] A").count(), 1);
    assert_eq!(html.matches("[2] B").count(), 1);
    assert!(html.contains("<tr><td>[1] A</td><td></td><td></td></tr>"));
    assert!(html.contains("<tr><td colspan='3'>[2] B </td></tr>\n</table>"));
}

#[test]
fn everyone_seated_means_no_standing_row() {
    let team = json!({
        "connected-users": [{ "id": 1, "name": "A" }],
        "minibus": { "seating": { "9": { "id": 1, "name": "A" } } }
    });
    let html = render(&team);
    assert!(!html.contains("colspan"));
    assert!(html.contains("<tr><td></td><td></td><td>[1] A</td></tr></table>"));
}

#[test]
fn help_with_solved_rebus_is_yellow() {
    let team = json!({
        "rebus-solutions": { "3": { "test_count": "4", "solved": true } },
        "rebus-statuses": [
            { "rebus-number": "3", "given_rebuses": { "Normal": "x", "Help": "y", "Solution": "" } }
        ]
    });
    assert!(render(&team).contains(
        "<td></td><td></td><td style='background-color: yellow'>H4</td><td></td>"
    ));
}

#[test]
fn odd_inputs_never_panic() {
    let inputs = [
        Value::Null,
        json!({}),
        json!([]),
        json!("team"),
        json!(42),
        json!({ "rally-stage": 3.5, "minibus": [], "connected-users": [null, 1, { "name": "x" }] }),
        json!({ "minibus": { "seating": [null, { "id": null }] }, "connected-users": [{ "id": null }] }),
        json!({ "rebus-statuses": [null, 1, "x"], "rebus-solutions": { "1": null } }),
    ];
    for input in inputs {
        let html = render(&input);
        assert!(html.contains("Latest update: "), "{input}");
    }
}
