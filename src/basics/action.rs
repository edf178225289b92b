use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{json, Value};

use crate::basics::card::Identity;
use crate::basics::variant::Variant;
use super::clue::{BaseClue, ClueKind};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TurnAction {
	pub num: usize,
	pub current_player_index: i32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClueAction {
	pub giver: usize,
	pub target: usize,
	pub list: Vec<usize>,
	pub clue: BaseClue,
	pub turn: usize,
	#[serde(default)]
	pub ignore_negative: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawAction {
	pub player_index: usize,
	pub order: usize,
	pub suit_index: i32,
	pub rank: i32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayAction {
	pub player_index: usize,
	pub order: usize,
	pub suit_index: i32,
	pub rank: i32
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscardAction {
	pub player_index: usize,
	pub order: usize,
	pub suit_index: i32,
	pub rank: i32,
	pub failed: bool
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StrikeAction {
	pub num: usize,
	pub turn: usize,
	pub order: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GameOverAction {
	pub end_condition: usize,
	pub player_index: usize
}

/** A primitive game event, as exchanged with the server and within hypotheticals. */
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Action {
	#[serde(rename = "turn")]
	Turn(TurnAction),
	#[serde(rename = "clue")]
	Clue(ClueAction),
	#[serde(rename = "draw")]
	Draw(DrawAction),
	#[serde(rename = "play")]
	Play(PlayAction),
	#[serde(rename = "discard")]
	Discard(DiscardAction),
	#[serde(rename = "strike")]
	Strike(StrikeAction),
	#[serde(rename = "gameOver")]
	GameOver(GameOverAction),
}

/** Converts a possibly-unknown identity into the wire representation (-1 when unknown). */
pub fn wire_id(id: Option<Identity>) -> (i32, i32) {
	match id {
		Some(Identity { suit_index, rank }) => (suit_index as i32, rank as i32),
		None => (-1, -1),
	}
}

/** Reads a wire identity, where -1 marks an unknown suit or rank. */
pub fn from_wire(suit_index: i32, rank: i32) -> Option<Identity> {
	(suit_index >= 0 && rank >= 0).then(|| Identity { suit_index: suit_index as usize, rank: rank as usize })
}

impl Action {
	pub fn play(player_index: usize, order: usize, id: Option<Identity>) -> Self {
		let (suit_index, rank) = wire_id(id);
		Action::Play(PlayAction { player_index, order, suit_index, rank })
	}

	pub fn discard(player_index: usize, order: usize, id: Option<Identity>, failed: bool) -> Self {
		let (suit_index, rank) = wire_id(id);
		Action::Discard(DiscardAction { player_index, order, suit_index, rank, failed })
	}

	pub fn clue(giver: usize, target: usize, clue: BaseClue, list: Vec<usize>, turn: usize) -> Self {
		Action::Clue(ClueAction { giver, target, clue, list, turn, ignore_negative: false })
	}

	pub fn draw(player_index: usize, order: usize, id: Option<Identity>) -> Self {
		let (suit_index, rank) = wire_id(id);
		Action::Draw(DrawAction { player_index, order, suit_index, rank })
	}

	pub fn strike(num: usize, turn: usize, order: usize) -> Self {
		Action::Strike(StrikeAction { num, turn, order })
	}

	pub fn turn(num: usize, current_player_index: i32) -> Self {
		Action::Turn(TurnAction { num, current_player_index })
	}

	pub fn game_over(end_condition: usize, player_index: usize) -> Self {
		Action::GameOver(GameOverAction { end_condition, player_index })
	}

	/** The card orders an event moves or touches. */
	pub fn orders(&self) -> Vec<usize> {
		match self {
			Action::Play(PlayAction { order, .. }) |
			Action::Discard(DiscardAction { order, .. }) |
			Action::Draw(DrawAction { order, .. }) => vec![*order],
			Action::Clue(ClueAction { list, .. }) => list.clone(),
			_ => Vec::new(),
		}
	}

	pub fn fmt(&self, variant: &Variant, player_names: &[String]) -> String {
		let log_id = |suit_index: &i32, rank: &i32| match from_wire(*suit_index, *rank) {
			Some(id) => variant.log_id(id),
			None => "xx".to_string(),
		};

		match self {
			Action::Clue(ClueAction { giver, target, clue, .. }) => {
				format!("{} clues {} to {}", player_names[*giver], clue.name(variant), player_names[*target])
			}
			Action::Play(PlayAction { player_index, suit_index, rank, order }) => {
				format!("{} plays {} ({})", player_names[*player_index], log_id(suit_index, rank), order)
			}
			Action::Discard(DiscardAction { player_index, suit_index, rank, failed, order }) => {
				format!("{} {} {} ({})", player_names[*player_index], if *failed { "bombs" } else { "discards" }, log_id(suit_index, rank), order)
			}
			Action::Draw(DrawAction { player_index, suit_index, rank, order }) => {
				format!("{} draws {} ({})", player_names[*player_index], log_id(suit_index, rank), order)
			}
			Action::Strike(StrikeAction { num, order, .. }) => {
				format!("Strike {num} ({order})")
			}
			Action::Turn(TurnAction { num, current_player_index }) => {
				let name = usize::try_from(*current_player_index).ok().and_then(|i| player_names.get(i)).map_or("nobody", |n| n.as_str());
				format!("Turn {num} ({name})")
			}
			Action::GameOver(GameOverAction { .. }) => {
				"Game over!".to_string()
			}
		}
	}
}

/** An action chosen by a player, before it has been resolved into events. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PerformAction {
	Play { target: usize },
	Discard { target: usize },
	Colour { target: usize, value: usize },
	Rank { target: usize, value: usize },
	Terminate { target: usize, value: usize }
}

impl<'de> Deserialize<'de> for PerformAction {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		use serde::de::Error;

		let s = Value::deserialize(deserializer)?;
		let map = s.as_object().ok_or_else(|| D::Error::custom(format!("expected an object, got {s}")))?;

		let field = |name: &str| map.get(name).and_then(Value::as_u64).map(|n| n as usize)
			.ok_or_else(|| D::Error::missing_field(match name { "target" => "target", "value" => "value", _ => "type" }));

		let target = field("target")?;

		match field("type")? {
			0 => Ok(PerformAction::Play { target }),
			1 => Ok(PerformAction::Discard { target }),
			2 => Ok(PerformAction::Colour { target, value: field("value")? }),
			3 => Ok(PerformAction::Rank { target, value: field("value")? }),
			4 => Ok(PerformAction::Terminate { target, value: field("value").unwrap_or(0) }),
			other => Err(D::Error::custom(format!("invalid action type {other}")))
		}
	}
}

impl PerformAction {
	pub fn to_clue(&self) -> Option<(usize, BaseClue)> {
		match *self {
			PerformAction::Colour { target, value } => Some((target, BaseClue { kind: ClueKind::COLOUR, value })),
			PerformAction::Rank { target, value } => Some((target, BaseClue { kind: ClueKind::RANK, value })),
			_ => None,
		}
	}
}

/** Hypothetical control messages exchanged through the relay during a shared replay. */
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ReplayCommand {
	#[serde(rename = "hypoStart")]
	HypoStart,
	#[serde(rename = "hypoEnd")]
	HypoEnd,
	#[serde(rename = "hypoBack")]
	HypoBack,
	#[serde(rename = "hypoToggleRevealed")]
	HypoToggleRevealed,
	#[serde(rename = "hypoAction")]
	HypoAction {
		#[serde(rename = "actionJSON")]
		action_json: String
	},
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplayActionMessage {
	#[serde(rename = "tableID")]
	pub table_id: u32,
	#[serde(flatten)]
	pub command: ReplayCommand,
}

impl ReplayCommand {
	pub fn json(&self, table_id: u32) -> Value {
		json!(ReplayActionMessage { table_id, command: self.clone() })
	}
}
