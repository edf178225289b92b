use log::warn;

use self::action::{from_wire, Action, ClueAction, DiscardAction, DrawAction, PlayAction, StrikeAction, TurnAction};
use self::card::{CardLocation, Identity};
use self::clue::{BaseClue, CardClue, StateClue};
use self::play_stacks::{direction_after_play, StackDirection};
use self::state::{GameState, StrikeRecord};
use self::variant::touch_possibilities;

pub mod action;
pub mod card;
pub mod clue;
pub mod clue_tokens;
pub mod game;
pub mod identity_set;
pub mod play_stacks;
pub mod resolve;
pub mod state;
pub mod variant;

/** Applies a primitive event to a state. Both the real game and hypothetical branches resolve through here. */
pub fn handle_event(state: &mut GameState, action: &Action) {
	match action {
		Action::Clue(clue) => on_clue(state, clue),
		Action::Play(play) => on_play(state, play),
		Action::Discard(discard) => on_discard(state, discard),
		Action::Draw(draw) => on_draw(state, draw),
		Action::Strike(strike) => on_strike(state, strike),
		Action::Turn(turn) => on_turn(state, turn),
		Action::GameOver(_) => (),
	}

	elim(state);
}

fn expect_in_hand(state: &GameState, order: usize, player_index: usize) {
	let location = state.cards.get(order).map(|card| card.location);

	if location != Some(CardLocation::Hand(player_index)) {
		panic!("Card {order} was expected in player {player_index}'s hand, but was in {location:?}! Hands were {:?}", state.hands);
	}
}

pub fn on_clue(state: &mut GameState, action: &ClueAction) {
	let &ClueAction { giver, target, ref list, clue, ignore_negative, .. } = action;
	let BaseClue { kind, value } = clue;
	clear_double_discard(state);
	let segment = state.turn.segment;
	let touch_ids = touch_possibilities(&clue, &state.variant, segment);

	for &order in list {
		expect_in_hand(state, order, target);
	}

	let mut neg_list = Vec::new();

	for &order in &state.hands[target] {
		let positive = list.contains(&order);

		if !positive {
			if ignore_negative {
				continue;
			}
			neg_list.push(order);
		}

		state.cards[order].apply_clue(&CardClue { kind, value, giver, segment }, positive, &touch_ids);
	}

	state.clues.push(StateClue { kind, value, giver, target, list: list.clone(), neg_list, segment });
	state.clue_tokens = clue_tokens::spend(state.clue_tokens, &state.variant);
	state.endgame_turns = state.endgame_turns.map(|turns| turns.saturating_sub(1));
}

pub fn on_play(state: &mut GameState, action: &PlayAction) {
	let &PlayAction { player_index, order, suit_index, rank } = action;
	expect_in_hand(state, order, player_index);
	clear_double_discard(state);

	let Some(id) = from_wire(suit_index, rank) else {
		panic!("Card {order} was played without revealing its identity!");
	};

	let segment = state.turn.segment;
	let card = &mut state.cards[order];
	card.reveal(id);
	card.segment_played.get_or_insert(segment);

	state.relocate(order, CardLocation::PlayStack(id.suit_index));

	let direction = direction_after_play(state.play_stack_directions[id.suit_index], id.rank, &state.variant);
	state.play_stack_directions[id.suit_index] = direction;

	if state.stack_finished(id.suit_index) {
		state.play_stack_directions[id.suit_index] = StackDirection::Finished;
		state.clue_tokens = clue_tokens::gain(state.clue_tokens, &state.variant);
	}

	state.endgame_turns = state.endgame_turns.map(|turns| turns.saturating_sub(1));
}

pub fn on_discard(state: &mut GameState, action: &DiscardAction) {
	let &DiscardAction { player_index, order, suit_index, rank, failed } = action;
	expect_in_hand(state, order, player_index);
	clear_double_discard(state);

	let segment = state.turn.segment;
	let id = from_wire(suit_index, rank);
	let card = &mut state.cards[order];

	if let Some(id) = id {
		card.reveal(id);
	}
	card.segment_discarded.get_or_insert(segment);

	if failed {
		card.is_misplayed = true;
	}
	else {
		state.clue_tokens = clue_tokens::gain(state.clue_tokens, &state.variant);
	}

	state.relocate(order, CardLocation::Discard);
	state.endgame_turns = state.endgame_turns.map(|turns| turns.saturating_sub(1));

	if let (Some(id), false) = (id, failed) {
		mark_double_discard(state, id, (player_index + 1) % state.num_players);
	}
}

fn clear_double_discard(state: &mut GameState) {
	for card in &mut state.cards {
		card.in_double_discard = false;
	}
}

/** After a discard leaves one copy of a needed identity, marks the next player's cards that could be it. */
fn mark_double_discard(state: &mut GameState, id: Identity, next_player: usize) {
	if state.is_trash(id) || state.copies_left(id) != 1 {
		return;
	}

	state.recompute_empathy();

	for &order in &state.hands[next_player] {
		let card = &mut state.cards[order];
		if card.possible_cards_for_empathy.contains(id) {
			card.in_double_discard = true;
		}
	}
}

pub fn on_draw(state: &mut GameState, action: &DrawAction) {
	let &DrawAction { player_index, order, suit_index, rank } = action;

	if order != state.card_order {
		panic!("Expected to draw card {}, but drew card {order}!", state.card_order);
	}

	// Nobody sees their own cards
	let id = if state.our_player_index == Some(player_index) { None } else { from_wire(suit_index, rank) };

	let segment = state.turn.segment;
	let starting_hand = order < state.num_players * state.hand_size();
	let card = &mut state.cards[order];
	card.identity = None;
	if let Some(id) = id {
		card.reveal(id);
	}
	card.segment_drawn = Some(segment);
	card.dealt_to_starting_hand = starting_hand;

	state.relocate(order, CardLocation::Hand(player_index));
	state.card_order = order + 1;
	state.cards_left = state.cards_left.saturating_sub(1);

	if state.cards_left == 0 {
		state.endgame_turns = Some(state.num_players);
	}
}

pub fn on_strike(state: &mut GameState, action: &StrikeAction) {
	let &StrikeAction { num, order, .. } = action;

	if num != state.strikes.len() + 1 {
		warn!("Received strike {num}, but {} strikes were already recorded.", state.strikes.len());
	}

	state.strikes.push(StrikeRecord { order, segment: state.turn.segment });
}

pub fn on_turn(state: &mut GameState, action: &TurnAction) {
	let &TurnAction { num, current_player_index } = action;

	if let Ok(player_index) = usize::try_from(current_player_index) {
		state.turn.current_player_index = player_index;
	}
	state.turn.turn_num = num;
	state.turn.segment += 1;
}

/** Refreshes every hand card's empathy after an event. */
pub fn elim(state: &mut GameState) {
	state.recompute_empathy();
}
