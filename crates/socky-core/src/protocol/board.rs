//! Board snapshot: the `grid` and `clients` fields of an inbound payload.
//!
//! Besides (or instead of) the pre-rendered `gridString`, the game server
//! broadcasts its raw state:
//!
//! ```json
//! {
//!   "type": "state",
//!   "grid": [["·","b","b"],["·","f","·"]],
//!   "clients": [{"name":"ann","color":"red","snake":{"Score":3}}]
//! }
//! ```
//!
//! Extraction is lenient.  A missing or ill-typed `grid` simply means there
//! is no grid; a `clients` entry that does not look like a player is skipped.
//! None of this ever turns a valid message into an error.

use serde::Deserialize;
use serde_json::Value;
use tracing::debug;

use crate::protocol::inbound::InboundMessage;

/// Grid cell the server uses for a snake body segment.
pub const CELL_BODY: &str = "b";
/// Grid cell the server uses for food.
pub const CELL_FOOD: &str = "f";

const GLYPH_BODY: &str = "◉";
const GLYPH_FOOD: &str = "⊗";

/// One row of the scoreboard.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerSummary {
    pub name: String,
    pub color: String,
    pub score: i64,
}

/// The board state extracted from one inbound payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoardSnapshot {
    /// Cells by row, exactly as the server sent them.
    pub grid: Vec<Vec<String>>,
    /// Players, in the order the server listed them.
    pub players: Vec<PlayerSummary>,
}

// Private mirror of the server's client object.  Every field defaults so an
// entry with missing fields still yields a row.
#[derive(Deserialize)]
struct WireClient {
    #[serde(default)]
    name: String,
    #[serde(default)]
    color: String,
    #[serde(default)]
    snake: WireSnake,
}

#[derive(Deserialize, Default)]
struct WireSnake {
    #[serde(rename = "Score", default)]
    score: i64,
}

impl BoardSnapshot {
    /// Extracts a snapshot from a decoded message.
    ///
    /// Returns `None` when the payload carries neither a usable `grid` nor
    /// any usable `clients` entry.
    pub fn from_message(msg: &InboundMessage) -> Option<Self> {
        Self::from_value(msg.body())
    }

    /// Same as [`BoardSnapshot::from_message`], working on a raw JSON value.
    pub fn from_value(body: &Value) -> Option<Self> {
        let grid = body
            .get("grid")
            .and_then(|g| Vec::<Vec<String>>::deserialize(g).ok())
            .unwrap_or_default();

        let players: Vec<PlayerSummary> = body
            .get("clients")
            .and_then(Value::as_array)
            .map(|entries| {
                entries
                    .iter()
                    .filter_map(|entry| match WireClient::deserialize(entry) {
                        Ok(c) => Some(PlayerSummary {
                            name: c.name,
                            color: c.color,
                            score: c.snake.score,
                        }),
                        Err(e) => {
                            debug!("skipping malformed client entry: {e}");
                            None
                        }
                    })
                    .collect()
            })
            .unwrap_or_default();

        if grid.is_empty() && players.is_empty() {
            return None;
        }
        Some(Self { grid, players })
    }

    /// Renders the grid as text rows, one string per row.
    ///
    /// Body and food cells are drawn with glyphs; every other cell is shown
    /// as the server sent it.  Cells are separated by a single space.
    pub fn render_grid(&self) -> Vec<String> {
        self.grid
            .iter()
            .map(|row| {
                row.iter()
                    .map(|cell| match cell.as_str() {
                        CELL_BODY => GLYPH_BODY,
                        CELL_FOOD => GLYPH_FOOD,
                        other => other,
                    })
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .collect()
    }

    /// Renders the scoreboard, highest score first.
    ///
    /// Each row is `name  color  score`.  Ties keep the server's order.
    /// Players without a name are listed as `anonymous`, a missing color as
    /// `-`.
    pub fn render_scoreboard(&self) -> Vec<String> {
        let mut players: Vec<&PlayerSummary> = self.players.iter().collect();
        // `sort_by` is stable, so equal scores keep their original order.
        players.sort_by(|a, b| b.score.cmp(&a.score));
        players
            .into_iter()
            .map(|p| {
                let name = if p.name.is_empty() { "anonymous" } else { &p.name };
                let color = if p.color.is_empty() { "-" } else { &p.color };
                format!("{name:<16} {color:<8} {}", p.score)
            })
            .collect()
    }

    /// Grid rows, then a blank line, then the scoreboard (if any players).
    pub fn render(&self) -> Vec<String> {
        let mut lines = self.render_grid();
        let scores = self.render_scoreboard();
        if !scores.is_empty() {
            if !lines.is_empty() {
                lines.push(String::new());
            }
            lines.extend(scores);
        }
        lines
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
