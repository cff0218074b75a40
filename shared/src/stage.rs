use serde_json::Value;

use crate::field::display_value;

/// Label shown when the stage is missing or its code is not one of ours.
pub const UNKNOWN_STAGE_LABEL: &str = "N/A";

/// Where a team is in the rally timeline, as reported in `rally-stage`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RallyStage {
    NotStarted,
    MorningStarted,
    AtLunch,
    AfternoonStarted,
    FoundGoal,
    RallyEnded,
}

impl RallyStage {
    pub const ALL: [Self; 6] = [
        Self::NotStarted,
        Self::MorningStarted,
        Self::AtLunch,
        Self::AfternoonStarted,
        Self::FoundGoal,
        Self::RallyEnded,
    ];

    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "0" => Some(Self::NotStarted),
            "1" => Some(Self::MorningStarted),
            "2" => Some(Self::AtLunch),
            "3" => Some(Self::AfternoonStarted),
            "4" => Some(Self::FoundGoal),
            "5" => Some(Self::RallyEnded),
            _ => None,
        }
    }

    /// Stage from a raw snapshot value. Numbers map through their text, so `3` and `"3"` agree.
    pub fn from_value(value: &Value) -> Option<Self> {
        Self::from_code(&display_value(value))
    }

    pub fn code(self) -> &'static str {
        match self {
            Self::NotStarted => "0",
            Self::MorningStarted => "1",
            Self::AtLunch => "2",
            Self::AfternoonStarted => "3",
            Self::FoundGoal => "4",
            Self::RallyEnded => "5",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::NotStarted => "Not started",
            Self::MorningStarted => "Morning started",
            Self::AtLunch => "At lunch",
            Self::AfternoonStarted => "Afternoon started",
            Self::FoundGoal => "Found goal",
            Self::RallyEnded => "Rally ended",
        }
    }
}

pub fn stage_label(stage: Option<RallyStage>) -> &'static str {
    stage.map_or(UNKNOWN_STAGE_LABEL, RallyStage::label)
}
