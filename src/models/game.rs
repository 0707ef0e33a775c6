//! Match (board), seats, and results for one-on-one games.

use crate::models::player::{Player, PlayerName};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Outcome of a board.
#[derive(Clone, Copy, Debug, Default, Eq, Hash, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchResult {
    /// Not entered yet.
    #[default]
    Unset,
    WhiteWin,
    BlackWin,
    Draw,
    /// White seat had no opponent this round.
    Bye,
}

impl MatchResult {
    /// Points for (white, black). Bye and unset boards award nothing here.
    pub fn points(self) -> Option<(f64, f64)> {
        match self {
            MatchResult::WhiteWin => Some((1.0, 0.0)),
            MatchResult::BlackWin => Some((0.0, 1.0)),
            MatchResult::Draw => Some((0.5, 0.5)),
            MatchResult::Bye | MatchResult::Unset => None,
        }
    }

    /// True for a result a played board can end with.
    pub fn is_decisive_or_draw(self) -> bool {
        self.points().is_some()
    }
}

impl fmt::Display for MatchResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            MatchResult::Unset => "-",
            MatchResult::WhiteWin => "1-0",
            MatchResult::BlackWin => "0-1",
            MatchResult::Draw => "0.5-0.5",
            MatchResult::Bye => "BYE",
        };
        f.write_str(text)
    }
}

/// A player sitting at a board, with the rating they had when paired.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct Seat {
    pub name: PlayerName,
    pub rating: u32,
}

impl Seat {
    pub fn of(p: &Player) -> Self {
        Self {
            name: p.name.clone(),
            rating: p.rating,
        }
    }
}

/// Who sits across from white.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Opponent {
    Player(Seat),
    Bye,
}

/// A single board of a round.
#[derive(Clone, Debug, Eq, PartialEq, Serialize, Deserialize)]
pub struct GameMatch {
    pub white: Seat,
    pub black: Opponent,
    pub result: MatchResult,
}

impl GameMatch {
    pub fn new(white: &Player, black: &Player) -> Self {
        Self {
            white: Seat::of(white),
            black: Opponent::Player(Seat::of(black)),
            result: MatchResult::Unset,
        }
    }

    pub fn bye(player: &Player) -> Self {
        Self {
            white: Seat::of(player),
            black: Opponent::Bye,
            result: MatchResult::Bye,
        }
    }

    pub fn is_bye(&self) -> bool {
        matches!(self.black, Opponent::Bye)
    }

    /// Black seat, if this is a played board.
    pub fn black_seat(&self) -> Option<&Seat> {
        match &self.black {
            Opponent::Player(seat) => Some(seat),
            Opponent::Bye => None,
        }
    }

    /// Whether `name` sits at this board.
    pub fn involves(&self, name: &str) -> bool {
        self.white.name == name || self.black_seat().is_some_and(|s| s.name == name)
    }
}
