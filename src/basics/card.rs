use std::fmt::{self, Display, Formatter};
use serde::{Deserialize, Serialize};

use crate::basics::identity_set::IdentitySet;
use crate::basics::variant::{all_ids, total_cards, Variant};
use super::clue::{CardClue, ClueKind};

pub trait Identifiable {
	fn id(&self) -> Option<Identity>;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Identity {
	#[serde(rename="suitIndex")]
	pub suit_index: usize,
	pub rank: usize
}

impl Identifiable for Identity {
	fn id(&self) -> Option<Identity> {
		Some(*self)
	}
}

/** Where a card currently lives. Every card has exactly one holder. */
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CardLocation {
	Deck,
	Hand(usize),
	PlayStack(usize),
	Discard,
}

impl Display for CardLocation {
	fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
		match self {
			CardLocation::Deck => write!(f, "deck"),
			CardLocation::Hand(player_index) => write!(f, "hand {player_index}"),
			CardLocation::PlayStack(suit_index) => write!(f, "play stack {suit_index}"),
			CardLocation::Discard => write!(f, "discard pile"),
		}
	}
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardState {
	pub order: usize,
	pub location: CardLocation,
	/** The true identity, if it is known from this viewpoint. */
	pub identity: Option<Identity>,
	pub possible_cards_from_clues: IdentitySet,
	/** Clue information combined with the card's own identity once revealed. */
	pub possible_cards: IdentitySet,
	pub possible_cards_for_empathy: IdentitySet,
	pub positive_colour_clues: Vec<usize>,
	pub positive_rank_clues: Vec<usize>,
	pub clues: Vec<CardClue>,
	pub has_clue_applied: bool,
	pub num_positive_clues: usize,
	pub segment_drawn: Option<usize>,
	pub segment_first_clued: Option<usize>,
	pub segment_played: Option<usize>,
	pub segment_discarded: Option<usize>,
	pub is_misplayed: bool,
	pub dealt_to_starting_hand: bool,
	/** Every identity left in the card's empathy can never be played. */
	pub is_known_trash_from_empathy: bool,
	/** The card's holder is next to act after a discard left a possible identity of this card with one copy. */
	pub in_double_discard: bool,
}

/**
 * Builds the state of a card before any information is known about it.
 * Orders past the end of the deck are the bases of the play stacks.
 */
pub fn initial_card_state(order: usize, variant: &Variant) -> CardState {
	let possible = IdentitySet::from_iter(all_ids(variant));
	let total = total_cards(variant);

	CardState {
		order,
		location: if order < total { CardLocation::Deck } else { CardLocation::PlayStack(order - total) },
		identity: None,
		possible_cards_from_clues: possible,
		possible_cards: possible,
		possible_cards_for_empathy: possible,
		positive_colour_clues: Vec::new(),
		positive_rank_clues: Vec::new(),
		clues: Vec::new(),
		has_clue_applied: false,
		num_positive_clues: 0,
		segment_drawn: None,
		segment_first_clued: None,
		segment_played: None,
		segment_discarded: None,
		is_misplayed: false,
		dealt_to_starting_hand: false,
		is_known_trash_from_empathy: false,
		in_double_discard: false,
	}
}

impl CardState {
	/**
	 * Narrows the card's candidates by a clue. `touch_ids` holds every identity the clue touches.
	 * A positive clue keeps only those identities, a negative one removes them.
	 */
	pub fn apply_clue(&mut self, clue: &CardClue, positive: bool, touch_ids: &IdentitySet) {
		self.possible_cards_from_clues = if positive {
			self.possible_cards_from_clues.intersect(touch_ids)
		} else {
			self.possible_cards_from_clues.difference(touch_ids)
		};

		self.possible_cards = self.possible_cards.intersect(&self.possible_cards_from_clues);
		self.possible_cards_for_empathy = self.possible_cards_for_empathy.intersect(&self.possible_cards_from_clues);
		self.has_clue_applied = true;

		if positive {
			match clue.kind {
				ClueKind::COLOUR => self.positive_colour_clues.push(clue.value),
				ClueKind::RANK => self.positive_rank_clues.push(clue.value),
			}
			self.num_positive_clues += 1;
			self.clues.push(*clue);
			self.segment_first_clued.get_or_insert(clue.segment);
		}
	}

	/** Records the card's true identity once it becomes visible to this viewpoint. */
	pub fn reveal(&mut self, id: Identity) {
		self.identity = Some(id);

		let narrowed = self.possible_cards.intersect(&IdentitySet::single(id));
		if !narrowed.is_empty() {
			self.possible_cards = narrowed;
		}
	}

	pub fn suit_determined(&self) -> bool {
		self.possible_cards_from_clues.suits().len() == 1
	}

	pub fn rank_determined(&self) -> bool {
		self.possible_cards_from_clues.ranks().len() == 1
	}

	pub fn clued(&self) -> bool {
		self.num_positive_clues > 0
	}
}

impl Identifiable for CardState {
	fn id(&self) -> Option<Identity> {
		self.identity
	}
}
