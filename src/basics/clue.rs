use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::basics::variant::Variant;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClueKind {
	COLOUR,
	RANK
}

impl Serialize for ClueKind {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		serializer.serialize_u8(*self as u8)
	}
}

impl<'de> Deserialize<'de> for ClueKind {
	fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
	where
		D: Deserializer<'de>,
	{
		let s = Value::deserialize(deserializer)?;
		match s {
			Value::Number(n) => match n.as_u64() {
				Some(0) => Ok(ClueKind::COLOUR),
				Some(1) => Ok(ClueKind::RANK),
				_ => Err(serde::de::Error::unknown_variant(&n.to_string(), &["0", "1"])),
			},
			_ => Err(serde::de::Error::unknown_variant(&s.to_string(), &["number"])),
		}
	}
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BaseClue {
	#[serde(rename="type")]
	pub kind: ClueKind,
	pub value: usize
}

impl BaseClue {
	pub fn rank(value: usize) -> Self {
		Self { kind: ClueKind::RANK, value }
	}

	pub fn name(&self, variant: &Variant) -> String {
		match self.kind {
			ClueKind::COLOUR => variant.clue_colours.get(self.value).map(|c| c.to_lowercase()).unwrap_or_else(|| format!("colour {}", self.value)),
			ClueKind::RANK => self.value.to_string(),
		}
	}
}

/** A positive clue as remembered by the card it touched. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CardClue {
	pub kind: ClueKind,
	pub value: usize,
	pub giver: usize,
	pub segment: usize
}

impl PartialEq<BaseClue> for CardClue {
	fn eq(&self, other: &BaseClue) -> bool {
		self.kind == other.kind && self.value == other.value
	}
}

impl PartialEq<CardClue> for BaseClue {
	fn eq(&self, other: &CardClue) -> bool {
		self.kind == other.kind && self.value == other.value
	}
}

/** An entry in the clue log. */
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct StateClue {
	pub kind: ClueKind,
	pub value: usize,
	pub giver: usize,
	pub target: usize,
	pub list: Vec<usize>,
	pub neg_list: Vec<usize>,
	pub segment: usize,
}

impl StateClue {
	pub fn to_base(&self) -> BaseClue {
		BaseClue { kind: self.kind, value: self.value }
	}
}

/** Returns the index of the first log entry that differs between the two logs, if any. */
pub fn first_clue_change(old: &[StateClue], new: &[StateClue]) -> Option<usize> {
	match old.iter().zip(new).position(|(a, b)| a != b) {
		Some(index) => Some(index),
		None => (old.len() != new.len()).then(|| old.len().min(new.len())),
	}
}
