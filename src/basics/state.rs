use std::hash::Hasher;
use std::sync::Arc;

use crate::basics::variant::{card_count, total_cards, Variant};
use super::card::{initial_card_state, CardLocation, CardState, Identifiable, Identity};
use super::clue::StateClue;
use super::clue_tokens;
use super::play_stacks::{initial_direction, next_playable_ranks, reachable_ranks, stack_finished, StackDirection};

use ahash::AHasher;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TurnInfo {
	pub turn_num: usize,
	pub current_player_index: usize,
	/** Increases by one for every action taken. */
	pub segment: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct StrikeRecord {
	pub order: usize,
	pub segment: usize,
}

#[derive(Debug, Clone)]
pub struct GameState {
	pub variant: Arc<Variant>,
	pub player_names: Vec<String>,
	pub num_players: usize,
	/** The player whose own cards are hidden from this state, if any. */
	pub our_player_index: Option<usize>,
	/** Every card in the game, indexed by order. Includes the stack bases after the deck. */
	pub cards: Vec<CardState>,
	pub hands: Vec<Vec<usize>>,
	/** The orders of the cards on each stack, starting with the stack base. */
	pub play_stacks: Vec<Vec<usize>>,
	pub play_stack_directions: Vec<StackDirection>,
	pub play_stack_starts: Vec<Option<usize>>,
	pub discard_pile: Vec<usize>,
	/** The order of the next card to draw. */
	pub card_order: usize,
	pub cards_left: usize,
	pub turn: TurnInfo,
	pub strikes: Vec<StrikeRecord>,
	pub clue_tokens: usize,
	pub endgame_turns: Option<usize>,
	pub clues: Vec<StateClue>,
}

impl GameState {
	pub fn new(player_names: Vec<String>, our_player_index: Option<usize>, variant: Arc<Variant>) -> Self {
		let num_players = player_names.len();
		let num_suits = variant.suits.len();
		let total = total_cards(&variant);

		Self {
			num_players,
			our_player_index,
			cards: (0..total + num_suits).map(|order| initial_card_state(order, &variant)).collect(),
			hands: vec![Vec::new(); num_players],
			play_stacks: (0..num_suits).map(|suit_index| vec![total + suit_index]).collect(),
			play_stack_directions: (0..num_suits).map(|suit_index| initial_direction(suit_index, &variant)).collect(),
			play_stack_starts: vec![None; num_suits],
			discard_pile: Vec::new(),
			card_order: 0,
			cards_left: total,
			turn: TurnInfo::default(),
			strikes: Vec::new(),
			clue_tokens: clue_tokens::max_tokens(&variant),
			endgame_turns: None,
			clues: Vec::new(),
			player_names,
			variant,
		}
	}

	pub fn hash(&self) -> u64 {
		let mut hasher = AHasher::default();

		let mut write_orders = |orders: &[usize]| {
			hasher.write_usize(orders.len());
			for &order in orders {
				hasher.write_usize(order);
			}
		};

		for hand in &self.hands {
			write_orders(hand);
		}
		for stack in &self.play_stacks {
			write_orders(stack);
		}
		write_orders(&self.discard_pile);

		for card in &self.cards[..self.card_order] {
			hasher.write_usize(card.id().map_or(usize::MAX, |id| id.suit_index * 8 + id.rank));
			hasher.write_u64(card.possible_cards_from_clues.bits());
			hasher.write_u64(card.possible_cards_for_empathy.bits());
		}

		hasher.write_usize(self.card_order);
		hasher.write_usize(self.clue_tokens);
		hasher.write_usize(self.strikes.len());
		hasher.write_usize(self.turn.turn_num);
		hasher.write_usize(self.turn.current_player_index);
		hasher.write_usize(self.turn.segment);
		hasher.write_usize(self.clues.len());

		match self.endgame_turns {
			Some(turns) => {
				hasher.write_u8(1);
				hasher.write_usize(turns);
			}
			None => {
				hasher.write_u8(0);
			}
		}

		hasher.finish()
	}

	pub fn hand_size(&self) -> usize {
		[0, 0, 5, 5, 4, 4, 3].get(self.num_players).copied().unwrap_or(0)
	}

	pub fn stack_rank(&self, suit_index: usize) -> Option<usize> {
		super::play_stacks::stack_rank(&self.play_stacks[suit_index], &self.cards)
	}

	pub fn next_playable_ranks(&self, suit_index: usize) -> Vec<usize> {
		next_playable_ranks(
			suit_index,
			&self.play_stacks[suit_index],
			self.play_stack_directions[suit_index],
			&self.play_stack_starts,
			&self.variant,
			&self.cards,
		)
	}

	pub fn stack_finished(&self, suit_index: usize) -> bool {
		stack_finished(
			suit_index,
			&self.play_stacks[suit_index],
			self.play_stack_directions[suit_index],
			&self.play_stack_starts,
			&self.variant,
			&self.cards,
		)
	}

	pub fn reachable_ranks(&self, suit_index: usize) -> Vec<usize> {
		reachable_ranks(
			suit_index,
			&self.play_stacks[suit_index],
			self.play_stack_directions[suit_index],
			&self.play_stack_starts,
			&self.variant,
			&self.cards,
		)
	}

	/** Whether no copy of the identity can ever be played, given the stacks so far. */
	pub fn is_trash(&self, id: Identity) -> bool {
		!self.reachable_ranks(id.suit_index).contains(&id.rank)
	}

	/** The number of copies of an identity that have not been discarded or misplayed. */
	pub fn copies_left(&self, id: Identity) -> usize {
		let discarded = self.discard_pile.iter().filter(|&&order| self.cards[order].identity == Some(id)).count();
		card_count(&self.variant, id).saturating_sub(discarded)
	}

	pub fn is_playable(&self, id: Identity) -> bool {
		self.next_playable_ranks(id.suit_index).contains(&id.rank)
	}

	#[inline]
	pub fn score(&self) -> usize {
		self.play_stacks.iter().map(|stack| stack.len() - 1).sum()
	}

	#[inline]
	pub fn max_score(&self) -> usize {
		self.variant.suits.len() * self.variant.clue_ranks().len()
	}

	pub fn ended(&self) -> bool {
		self.strikes.len() >= self.variant.max_strikes || self.score() == self.max_score() || self.endgame_turns == Some(0)
	}

	pub fn next_player_index(&self, player_index: usize) -> usize {
		(player_index + 1) % self.num_players
	}

	/**
	 * Moves a card from its current holder to a new one, keeping every card in exactly one holder.
	 * Cards can never return to the deck.
	 */
	pub fn relocate(&mut self, order: usize, to: CardLocation) {
		let from = self.cards[order].location;

		match from {
			CardLocation::Deck => (),
			CardLocation::Hand(player_index) => self.hands[player_index].retain(|&o| o != order),
			CardLocation::PlayStack(suit_index) => self.play_stacks[suit_index].retain(|&o| o != order),
			CardLocation::Discard => self.discard_pile.retain(|&o| o != order),
		}

		match to {
			CardLocation::Deck => panic!("Tried to return card {order} from the {from} to the deck!"),
			CardLocation::Hand(player_index) => self.hands[player_index].insert(0, order),
			CardLocation::PlayStack(suit_index) => self.play_stacks[suit_index].push(order),
			CardLocation::Discard => self.discard_pile.push(order),
		}

		self.cards[order].location = to;
	}

	/** Returns whether every card is held by exactly one holder, and that holder matches the card's location. */
	pub fn check_partition(&self) -> bool {
		let mut seen = vec![0usize; self.cards.len()];

		let mut mark = |orders: &[usize], location: CardLocation| {
			orders.iter().all(|&order| {
				seen[order] += 1;
				self.cards[order].location == location
			})
		};

		let held = self.hands.iter().enumerate().all(|(i, hand)| mark(hand, CardLocation::Hand(i))) &&
			self.play_stacks.iter().enumerate().all(|(i, stack)| mark(stack, CardLocation::PlayStack(i))) &&
			mark(&self.discard_pile, CardLocation::Discard);

		held && self.cards.iter().all(|card| match card.location {
			CardLocation::Deck => seen[card.order] == 0 && card.order >= self.card_order,
			_ => seen[card.order] == 1,
		})
	}

	/**
	 * Recomputes empathy for every card in a hand. An identity is removed when the holder can see
	 * every copy of it elsewhere. The result is always within the card's clue information.
	 * Cards whose empathy holds only trash are marked as known trash.
	 */
	pub fn recompute_empathy(&mut self) {
		let reachable = (0..self.variant.suits.len()).map(|suit_index| self.reachable_ranks(suit_index)).collect::<Vec<_>>();
		let mut visible: Vec<Vec<usize>> = vec![vec![0; self.variant.suits.len() * 6]; self.num_players];

		for card in &self.cards[..self.card_order] {
			if let Some(id) = card.identity {
				for (player_index, counts) in visible.iter_mut().enumerate() {
					if card.location != CardLocation::Hand(player_index) {
						counts[id.suit_index * 6 + id.rank] += 1;
					}
				}
			}
		}

		for (player_index, hand) in self.hands.iter().enumerate() {
			for &order in hand {
				let card = &mut self.cards[order];
				let counts = &visible[player_index];
				let empathy = card.possible_cards_from_clues.filter(|id| counts[id.suit_index * 6 + id.rank] < card_count(&self.variant, id));

				card.possible_cards_for_empathy = if empathy.is_empty() { card.possible_cards_from_clues } else { empathy };
				card.is_known_trash_from_empathy = card.possible_cards_for_empathy.iter().all(|id| !reachable[id.suit_index].contains(&id.rank));
			}
		}
	}

	pub fn log_id(&self, id: Identity) -> String {
		self.variant.log_id(id)
	}

	pub fn log_iden<T>(&self, iden: &T) -> String where T: Identifiable {
		match iden.id() {
			Some(id) => self.log_id(id),
			None => "xx".to_string(),
		}
	}
}
