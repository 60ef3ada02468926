use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::TypeError;

/// How a delivery is attributed: to the bat, or to one of the extras.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum BallType {
    Normal,
    Wide,
    NoBall,
    Bye,
    LegBye,
    Wicket,
}

impl BallType {
    /// Legal deliveries count toward the six-ball over. Wides and no-balls
    /// never do, whatever was scored off them.
    pub fn is_legal(self) -> bool {
        !matches!(self, Self::Wide | Self::NoBall)
    }

    /// Whether runs recorded on this ball type are hit by the striker.
    pub fn is_off_the_bat(self) -> bool {
        matches!(self, Self::Normal | Self::NoBall)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Normal => "normal",
            Self::Wide => "wide",
            Self::NoBall => "noBall",
            Self::Bye => "bye",
            Self::LegBye => "legBye",
            Self::Wicket => "wicket",
        }
    }
}

impl fmt::Display for BallType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BallType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "normal" => Ok(Self::Normal),
            "wide" => Ok(Self::Wide),
            "noBall" => Ok(Self::NoBall),
            "bye" => Ok(Self::Bye),
            "legBye" => Ok(Self::LegBye),
            "wicket" => Ok(Self::Wicket),
            other => Err(TypeError::UnknownBallType(other.to_string())),
        }
    }
}

/// Mode of dismissal.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WicketType {
    Bowled,
    Caught,
    Lbw,
    RunOut,
    Stumped,
    HitWicket,
}

impl WicketType {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Bowled => "bowled",
            Self::Caught => "caught",
            Self::Lbw => "lbw",
            Self::RunOut => "runout",
            Self::Stumped => "stumped",
            Self::HitWicket => "hitwicket",
        }
    }
}

impl fmt::Display for WicketType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WicketType {
    type Err = TypeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "bowled" => Ok(Self::Bowled),
            "caught" => Ok(Self::Caught),
            "lbw" => Ok(Self::Lbw),
            "runout" => Ok(Self::RunOut),
            "stumped" => Ok(Self::Stumped),
            "hitwicket" => Ok(Self::HitWicket),
            other => Err(TypeError::UnknownWicketType(other.to_string())),
        }
    }
}

/// A single recorded delivery.
///
/// `ball_type` decides run, extra and legality attribution; `is_wicket`
/// alone decides whether a dismissal happened. The two are independent, so
/// a `Wicket` ball type with `is_wicket == false` dismisses nobody and a
/// `Normal` ball with `is_wicket == true` does.
///
/// `batsman` and `bowler` default to the current striker and bowler when
/// absent.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BallEvent {
    pub ball_type: BallType,
    #[serde(default)]
    pub runs: u32,
    #[serde(default)]
    pub is_wicket: bool,
    #[serde(default)]
    pub wicket_type: Option<WicketType>,
    #[serde(default)]
    pub batsman: Option<String>,
    #[serde(default)]
    pub bowler: Option<String>,
    #[serde(default)]
    pub new_batsman: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
}

impl BallEvent {
    /// A delivery of the given type with no wicket and default actors.
    pub fn new(ball_type: BallType, runs: u32) -> Self {
        Self {
            ball_type,
            runs,
            is_wicket: false,
            wicket_type: None,
            batsman: None,
            bowler: None,
            new_batsman: None,
            commentary: None,
        }
    }

    pub fn normal(runs: u32) -> Self {
        Self::new(BallType::Normal, runs)
    }

    pub fn wide() -> Self {
        Self::new(BallType::Wide, 0)
    }

    pub fn no_ball(runs: u32) -> Self {
        Self::new(BallType::NoBall, runs)
    }

    pub fn bye(runs: u32) -> Self {
        Self::new(BallType::Bye, runs)
    }

    pub fn leg_bye(runs: u32) -> Self {
        Self::new(BallType::LegBye, runs)
    }

    /// Mark this delivery as a dismissal.
    pub fn with_wicket(mut self, wicket_type: WicketType, new_batsman: Option<&str>) -> Self {
        self.is_wicket = true;
        self.wicket_type = Some(wicket_type);
        self.new_batsman = new_batsman.map(str::to_string);
        self
    }

    pub fn by_batsman(mut self, name: &str) -> Self {
        self.batsman = Some(name.to_string());
        self
    }

    pub fn by_bowler(mut self, name: &str) -> Self {
        self.bowler = Some(name.to_string());
        self
    }

    pub fn is_legal(&self) -> bool {
        self.ball_type.is_legal()
    }
}
