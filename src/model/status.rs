//! Report status: the closed set of values a report can carry.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Where a reported task stands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Completed,

    #[serde(rename = "WIP")]
    Wip,

    #[serde(rename = "Yet to Start")]
    YetToStart,

    Delayed,
}

/// Returned when a status label is not one of the known values.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected one of: Completed, WIP, Yet to Start, Delayed)")]
pub struct UnknownStatus(pub String);

impl Status {
    /// Every status, in the order they are offered.
    pub const ALL: [Self; 4] = [Self::Completed, Self::Wip, Self::YetToStart, Self::Delayed];

    /// The label shown to users and written to exports.
    pub fn label(self) -> &'static str {
        match self {
            Self::Completed => "Completed",
            Self::Wip => "WIP",
            Self::YetToStart => "Yet to Start",
            Self::Delayed => "Delayed",
        }
    }

    pub fn tone(self) -> StatusTone {
        match self {
            Self::Completed => StatusTone::Success,
            Self::Wip => StatusTone::Progress,
            Self::YetToStart => StatusTone::Neutral,
            Self::Delayed => StatusTone::Alert,
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = UnknownStatus;

    /// Accepts the display labels case-insensitively, with `-` or `_`
    /// standing in for spaces (`yet-to-start`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_lowercase().replace(['-', '_'], " ");
        match normalized.as_str() {
            "completed" => Ok(Self::Completed),
            "wip" => Ok(Self::Wip),
            "yet to start" => Ok(Self::YetToStart),
            "delayed" => Ok(Self::Delayed),
            _ => Err(UnknownStatus(s.to_string())),
        }
    }
}

/// Display category for a status cell.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Success,
    Progress,
    Neutral,
    Alert,
}

impl StatusTone {
    /// Map a raw status label to its tone.
    ///
    /// Only exact display labels are recognized. Anything else falls back to
    /// [`StatusTone::Neutral`], the same tone as "Yet to Start".
    pub fn for_label(label: &str) -> Self {
        Status::ALL
            .into_iter()
            .find(|s| s.label() == label)
            .map_or(Self::Neutral, Status::tone)
    }

    /// Single-character marker used in table output.
    pub fn marker(self) -> char {
        match self {
            Self::Success => '+',
            Self::Progress => '~',
            Self::Neutral => '-',
            Self::Alert => '!',
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_labels_loosely() {
        assert_eq!("Completed".parse::<Status>().unwrap(), Status::Completed);
        assert_eq!("wip".parse::<Status>().unwrap(), Status::Wip);
        assert_eq!("Yet to Start".parse::<Status>().unwrap(), Status::YetToStart);
        assert_eq!("yet-to-start".parse::<Status>().unwrap(), Status::YetToStart);
        assert_eq!("DELAYED".parse::<Status>().unwrap(), Status::Delayed);
    }

    #[test]
    fn rejects_unknown_status() {
        let err = "Blocked".parse::<Status>().unwrap_err();
        assert_eq!(err, UnknownStatus("Blocked".to_string()));
    }

    #[test]
    fn known_statuses_have_distinct_tones() {
        let cases = [
            ("Completed", StatusTone::Success),
            ("WIP", StatusTone::Progress),
            ("Yet to Start", StatusTone::Neutral),
            ("Delayed", StatusTone::Alert),
        ];
        for (label, expected) in cases {
            assert_eq!(StatusTone::for_label(label), expected, "{label}");
        }
    }

    #[test]
    fn unknown_label_shares_yet_to_start_tone() {
        assert_eq!(StatusTone::for_label("On Hold"), StatusTone::Neutral);
        assert_eq!(StatusTone::for_label(""), Status::YetToStart.tone());
        assert_eq!(StatusTone::for_label("completed"), StatusTone::Neutral);
        assert_eq!(StatusTone::for_label("wip"), StatusTone::Neutral);
        assert_eq!(StatusTone::for_label(" Delayed "), StatusTone::Neutral);
    }

    #[test]
    fn serializes_with_display_labels() {
        let json = serde_json::to_string(&Status::YetToStart).unwrap();
        assert_eq!(json, "\"Yet to Start\"");
        let back: Status = serde_json::from_str("\"WIP\"").unwrap();
        assert_eq!(back, Status::Wip);
    }
}
