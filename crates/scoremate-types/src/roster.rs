use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ball::BallEvent;

/// A change to who is batting or bowling, made between deliveries.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum RosterChange {
    /// A new batsman takes the slot of one who is out.
    BatsmanIn { name: String },
    /// Another bowler takes the ball at the start of an over.
    BowlerChange { name: String },
}

impl RosterChange {
    pub fn name(&self) -> &str {
        match self {
            Self::BatsmanIn { name } | Self::BowlerChange { name } => name,
        }
    }
}

impl fmt::Display for RosterChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::BatsmanIn { name } => write!(f, "{name} in"),
            Self::BowlerChange { name } => write!(f, "{name} to bowl"),
        }
    }
}

/// One entry in a match's ball log.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LogEntry {
    Ball(BallEvent),
    Roster(RosterChange),
}

impl LogEntry {
    pub fn ball(&self) -> Option<&BallEvent> {
        match self {
            Self::Ball(event) => Some(event),
            Self::Roster(_) => None,
        }
    }
}

impl From<BallEvent> for LogEntry {
    fn from(event: BallEvent) -> Self {
        Self::Ball(event)
    }
}

impl From<RosterChange> for LogEntry {
    fn from(change: RosterChange) -> Self {
        Self::Roster(change)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn roster_change_json_shape() {
        let change = RosterChange::BatsmanIn { name: "C".into() };
        let json = serde_json::to_value(&change).unwrap();
        assert_eq!(json, serde_json::json!({ "kind": "batsmanIn", "name": "C" }));
        assert_eq!(change.to_string(), "C in");
        assert_eq!(change.name(), "C");
    }

    #[test]
    fn entries_are_tagged_by_kind() {
        let ball = LogEntry::from(BallEvent::normal(2));
        let json = serde_json::to_value(&ball).unwrap();
        assert_eq!(json["ball"]["runs"], 2);
        assert_eq!(ball.ball(), Some(&BallEvent::normal(2)));

        let change = LogEntry::from(RosterChange::BowlerChange { name: "Y".into() });
        let back: LogEntry = serde_json::from_str(&serde_json::to_string(&change).unwrap()).unwrap();
        assert_eq!(back, change);
        assert_eq!(back.ball(), None);
    }
}
