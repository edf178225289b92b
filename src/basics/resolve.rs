use std::collections::HashMap;

use crate::error::ActionError;
use super::action::{Action, PerformAction};
use super::card::{CardLocation, Identity};
use super::clue::{BaseClue, ClueKind};
use super::clue_tokens;
use super::state::GameState;
use super::variant::id_touched;

/**
 * Where the identities of cards come from when resolving an action.
 * Morphs take priority over the identity table, which takes priority over what the state itself knows.
 */
#[derive(Debug, Clone, Copy)]
pub struct IdentityLookup<'a> {
	pub identities: &'a [Option<Identity>],
	pub morphs: Option<&'a HashMap<usize, Identity>>,
}

impl<'a> IdentityLookup<'a> {
	pub fn new(identities: &'a [Option<Identity>]) -> Self {
		Self { identities, morphs: None }
	}

	pub fn with_morphs(mut self, morphs: &'a HashMap<usize, Identity>) -> Self {
		self.morphs = Some(morphs);
		self
	}

	pub fn id(&self, state: &GameState, order: usize) -> Option<Identity> {
		self.morphs.and_then(|morphs| morphs.get(&order).copied())
			.or_else(|| self.identities.get(order).copied().flatten())
			.or_else(|| state.cards.get(order).and_then(|card| card.identity))
	}

	/** The true identity of a card, ignoring morphs. Used for draws. */
	pub fn true_id(&self, state: &GameState, order: usize) -> Option<Identity> {
		self.identities.get(order).copied().flatten()
			.or_else(|| state.cards.get(order).and_then(|card| card.identity))
	}
}

fn expect_own_card(state: &GameState, actor: usize, order: usize) -> Result<(), ActionError> {
	match state.cards.get(order) {
		None => Err(ActionError::NoSuchCard { order }),
		Some(card) if card.location != CardLocation::Hand(actor) => {
			Err(ActionError::NotInHand { order, player_index: actor, location: card.location })
		}
		Some(_) => Ok(()),
	}
}

/** Returns the orders in the target's hand that the clue would touch. */
pub fn touched_cards(state: &GameState, target: usize, clue: &BaseClue, lookup: &IdentityLookup) -> Vec<usize> {
	state.hands[target].iter().copied().filter(|&order| {
		lookup.id(state, order).is_some_and(|id| id_touched(id, &state.variant, clue, state.turn.segment))
	}).collect()
}

/**
 * Checks whether the actor may take the action in the given state.
 * Nothing is written; an error here means the action must not be applied.
 */
pub fn validate(state: &GameState, actor: usize, action: &PerformAction, lookup: &IdentityLookup) -> Result<(), ActionError> {
	match *action {
		PerformAction::Play { target } | PerformAction::Discard { target } => {
			expect_own_card(state, actor, target)?;

			if matches!(action, PerformAction::Discard { .. }) && clue_tokens::at_max(state.clue_tokens, &state.variant) {
				return Err(ActionError::AtMaxClueTokens);
			}

			if lookup.id(state, target).is_none() {
				return Err(ActionError::UnknownIdentity { order: target });
			}
			Ok(())
		}
		PerformAction::Colour { target, value } | PerformAction::Rank { target, value } => {
			if target >= state.num_players || target == actor {
				return Err(ActionError::InvalidTarget { giver: actor, target });
			}

			let valid_value = match action {
				PerformAction::Colour { .. } => value < state.variant.clue_colours.len(),
				_ => state.variant.clue_ranks().contains(&value),
			};

			if !valid_value {
				return Err(ActionError::InvalidClueValue { value });
			}

			if clue_tokens::at_min(state.clue_tokens, &state.variant) {
				return Err(ActionError::NotEnoughClueTokens);
			}

			let clue = BaseClue {
				kind: if matches!(action, PerformAction::Colour { .. }) { ClueKind::COLOUR } else { ClueKind::RANK },
				value
			};

			if touched_cards(state, target, &clue, lookup).is_empty() {
				return Err(ActionError::NoCardsTouched { target });
			}
			Ok(())
		}
		PerformAction::Terminate { .. } => Ok(()),
	}
}

/**
 * Translates a validated action into the primitive events that resolve it, ending with the turn event.
 * A replacement card is drawn after a play or discard while the identity table still has cards.
 */
pub fn to_events(state: &GameState, actor: usize, action: &PerformAction, lookup: &IdentityLookup) -> Vec<Action> {
	let mut events = Vec::new();

	match *action {
		PerformAction::Play { target } | PerformAction::Discard { target } => {
			let id = lookup.id(state, target);

			match action {
				PerformAction::Play { .. } => {
					if id.is_some_and(|id| state.is_playable(id)) {
						events.push(Action::play(actor, target, id));
					}
					else {
						events.push(Action::discard(actor, target, id, true));
						events.push(Action::strike(state.strikes.len() + 1, state.turn.segment, target));
					}
				}
				_ => events.push(Action::discard(actor, target, id, false)),
			}

			let order = state.card_order;
			if state.cards_left > 0 && order < lookup.identities.len() {
				events.push(Action::draw(actor, order, lookup.true_id(state, order)));
			}
		}
		PerformAction::Colour { .. } | PerformAction::Rank { .. } => {
			if let Some((target, clue)) = action.to_clue() {
				let list = touched_cards(state, target, &clue, lookup);
				events.push(Action::clue(actor, target, clue, list, state.turn.turn_num));
			}
		}
		PerformAction::Terminate { .. } => panic!("Terminating the game cannot be resolved into events!"),
	}

	events.push(Action::turn(state.turn.turn_num + 1, state.next_player_index(actor) as i32));
	events
}
