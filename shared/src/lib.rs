pub mod field;
pub mod html;
pub mod rebus;
pub mod render;
pub mod seating;
pub mod snapshot;
pub mod stage;

pub use field::{get_date_value, get_value, get_value_or_empty, has_value};
pub use render::{RenderOptions, render, render_snapshot, render_with};
pub use snapshot::TeamSnapshot;
pub use stage::RallyStage;
