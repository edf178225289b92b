use serde::Deserialize;
use std::fmt::Debug;
use std::sync::Arc;

use super::card::Identity;
use super::clue::{BaseClue, ClueKind};
use super::identity_set::IdentitySet;

/** The rank of the START card in Up or Down. */
pub const START_RANK: usize = 0;
pub const MAX_RANK: usize = 5;

/**
 * Decides which clue colours touch a prism card.
 * The segment is provided so that rules may depend on when the clue is given.
 */
pub trait PrismRule: Debug + Send + Sync {
	fn touches(&self, colour_index: usize, rank: usize, num_colours: usize, segment: usize) -> bool;
}

/** Prism cards cycle through the clue colours by rank (1s are the first colour, 2s the second...). */
#[derive(Debug, Clone, Copy, Default)]
pub struct RankCycle;

impl PrismRule for RankCycle {
	fn touches(&self, colour_index: usize, rank: usize, num_colours: usize, _segment: usize) -> bool {
		if rank == START_RANK {
			return true;
		}
		num_colours > 0 && (rank - 1) % num_colours == colour_index
	}
}

#[derive(Debug, Deserialize, Clone, PartialEq, Eq)]
pub struct Suit {
	pub name: String,
	pub abbreviation: String,
	#[serde(rename = "clueColors", default)]
	pub clue_colours: Vec<String>,
	#[serde(rename = "allClueColors", default)]
	pub all_clue_colours: bool,
	#[serde(rename = "noClueColors", default)]
	pub no_clue_colours: bool,
	#[serde(rename = "allClueRanks", default)]
	pub all_clue_ranks: bool,
	#[serde(rename = "noClueRanks", default)]
	pub no_clue_ranks: bool,
	#[serde(default)]
	pub prism: bool,
	#[serde(rename = "oneOfEach", default)]
	pub one_of_each: bool,
	#[serde(default)]
	pub reversed: bool,
}

impl Suit {
	pub fn new(name: &str, abbreviation: &str, clue_colours: &[&str]) -> Self {
		Self {
			name: name.to_string(),
			abbreviation: abbreviation.to_string(),
			clue_colours: clue_colours.iter().map(|&c| c.to_string()).collect(),
			all_clue_colours: false,
			no_clue_colours: false,
			all_clue_ranks: false,
			no_clue_ranks: false,
			prism: false,
			one_of_each: false,
			reversed: false,
		}
	}

	/** A suit touched by the clue colour of the same name. */
	pub fn basic(name: &str, abbreviation: &str) -> Self {
		Self::new(name, abbreviation, &[name])
	}

	pub fn all_colours(mut self) -> Self {
		self.all_clue_colours = true;
		self.clue_colours.clear();
		self
	}

	pub fn no_colours(mut self) -> Self {
		self.no_clue_colours = true;
		self.clue_colours.clear();
		self
	}

	pub fn all_ranks(mut self) -> Self {
		self.all_clue_ranks = true;
		self
	}

	pub fn no_ranks(mut self) -> Self {
		self.no_clue_ranks = true;
		self
	}

	pub fn prism(mut self) -> Self {
		self.prism = true;
		self.clue_colours.clear();
		self
	}

	pub fn one_of_each(mut self) -> Self {
		self.one_of_each = true;
		self
	}

	pub fn reversed(mut self) -> Self {
		self.reversed = true;
		self
	}
}

fn default_ranks() -> Vec<usize> {
	vec![1, 2, 3, 4, 5]
}

fn default_max_strikes() -> usize {
	3
}

fn default_prism_rule() -> Arc<dyn PrismRule> {
	Arc::new(RankCycle)
}

#[derive(Debug, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
	#[serde(default)]
	pub id: u32,
	pub name: String,
	pub suits: Vec<Suit>,
	#[serde(default = "default_ranks")]
	pub ranks: Vec<usize>,
	#[serde(rename = "clueColors")]
	pub clue_colours: Vec<String>,
	#[serde(default)]
	pub clue_starved: bool,
	#[serde(default)]
	pub up_or_down: bool,
	#[serde(default = "default_max_strikes")]
	pub max_strikes: usize,
	#[serde(skip, default = "default_prism_rule")]
	pub prism_rule: Arc<dyn PrismRule>,
}

impl Variant {
	/** Builds a variant whose clue colours are every colour named by its suits, in order. */
	pub fn new(id: u32, name: &str, suits: Vec<Suit>) -> Self {
		let mut clue_colours: Vec<String> = Vec::new();
		for colour in suits.iter().flat_map(|suit| &suit.clue_colours) {
			if !clue_colours.contains(colour) {
				clue_colours.push(colour.clone());
			}
		}

		Self {
			id,
			name: name.to_string(),
			suits,
			ranks: default_ranks(),
			clue_colours,
			clue_starved: false,
			up_or_down: false,
			max_strikes: default_max_strikes(),
			prism_rule: default_prism_rule(),
		}
	}

	/** Parses a JSON descriptor. Up or Down descriptors gain the START rank if they don't list it. */
	pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
		let mut variant: Self = serde_json::from_str(json)?;
		variant.add_start_rank();
		Ok(variant)
	}

	fn add_start_rank(&mut self) {
		if self.up_or_down && !self.ranks.contains(&START_RANK) {
			self.ranks.push(START_RANK);
		}
	}

	pub fn with_clue_starved(mut self) -> Self {
		self.clue_starved = true;
		self
	}

	pub fn with_up_or_down(mut self) -> Self {
		self.up_or_down = true;
		self.add_start_rank();
		self
	}

	pub fn with_prism_rule(mut self, rule: Arc<dyn PrismRule>) -> Self {
		self.prism_rule = rule;
		self
	}

	/** The rank values that may be given as a rank clue. */
	pub fn clue_ranks(&self) -> Vec<usize> {
		self.ranks.iter().copied().filter(|&rank| rank != START_RANK).collect()
	}

	pub fn max_rank(&self) -> usize {
		self.clue_ranks().into_iter().max().unwrap_or(MAX_RANK)
	}

	pub fn short_form(&self, suit_index: usize) -> &str {
		&self.suits[suit_index].abbreviation
	}

	/** Parses short identities such as "r1" or "bs" (a START card). */
	pub fn expand_short(&self, short: &str) -> Option<Identity> {
		let mut chars = short.chars();
		let suit = chars.next()?.to_string();
		let rank = chars.as_str();

		let suit_index = self.suits.iter().position(|s| s.abbreviation.eq_ignore_ascii_case(&suit))?;
		let rank = if rank == "s" { START_RANK } else { rank.parse().ok()? };

		self.ranks.contains(&rank).then_some(Identity { suit_index, rank })
	}

	pub fn log_id(&self, id: Identity) -> String {
		if id.rank == START_RANK {
			format!("{}s", self.short_form(id.suit_index))
		} else {
			format!("{}{}", self.short_form(id.suit_index), id.rank)
		}
	}
}

pub fn all_ids(variant: &Variant) -> impl Iterator<Item = Identity> + '_ {
	(0..variant.suits.len()).flat_map(move |suit_index|
		variant.ranks.iter().map(move |&rank| Identity { suit_index, rank })
	)
}

/** Returns every identity that a clue would touch. */
pub fn touch_possibilities(clue: &BaseClue, variant: &Variant, segment: usize) -> IdentitySet {
	all_ids(variant).filter(|&id| id_touched(id, variant, clue, segment)).collect()
}

pub fn id_touched(id: Identity, variant: &Variant, clue: &BaseClue, segment: usize) -> bool {
	let BaseClue { kind, value } = *clue;
	let Identity { suit_index, rank } = id;
	let suit = &variant.suits[suit_index];

	match kind {
		ClueKind::COLOUR => {
			if suit.no_clue_colours {
				return false;
			}

			if suit.all_clue_colours {
				return true;
			}

			if suit.prism {
				return variant.prism_rule.touches(value, rank, variant.clue_colours.len(), segment);
			}

			variant.clue_colours.get(value).is_some_and(|colour| suit.clue_colours.contains(colour))
		}
		ClueKind::RANK => {
			if suit.no_clue_ranks || rank == START_RANK {
				return false;
			}

			if suit.all_clue_ranks {
				return true;
			}

			rank == value
		}
	}
}

pub fn card_count(variant: &Variant, id: Identity) -> usize {
	let Identity { suit_index, rank } = id;
	let suit = &variant.suits[suit_index];

	if suit.one_of_each || rank == START_RANK {
		return 1;
	}

	if variant.up_or_down {
		return [0, 1, 2, 2, 2, 1][rank];
	}

	if suit.reversed {
		[0, 1, 2, 2, 2, 3][rank]
	}
	else {
		[0, 3, 2, 2, 2, 1][rank]
	}
}

/** The number of cards in the deck (excluding the stack bases). */
pub fn total_cards(variant: &Variant) -> usize {
	all_ids(variant).map(|id| card_count(variant, id)).sum()
}
