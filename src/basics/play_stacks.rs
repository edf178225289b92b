use crate::basics::card::CardState;
use crate::basics::variant::{Variant, START_RANK};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StackDirection {
	Undecided,
	Up,
	Down,
	Finished,
}

pub fn initial_direction(suit_index: usize, variant: &Variant) -> StackDirection {
	if variant.up_or_down {
		StackDirection::Undecided
	}
	else if variant.suits[suit_index].reversed {
		StackDirection::Down
	}
	else {
		StackDirection::Up
	}
}

/** The rank of the last card played on a stack. Stack bases have no identity and are skipped. */
pub fn stack_rank(stack: &[usize], cards: &[CardState]) -> Option<usize> {
	stack.iter().rev().find_map(|&order| cards[order].identity).map(|id| id.rank)
}

/**
 * Returns the ranks that may legally be played onto a suit's stack.
 * `stack` holds the orders of the cards on the stack, resolved through `cards`.
 */
pub fn next_playable_ranks(
	suit_index: usize,
	stack: &[usize],
	direction: StackDirection,
	starts: &[Option<usize>],
	variant: &Variant,
	cards: &[CardState],
) -> Vec<usize> {
	let current = stack_rank(stack, cards);
	let max = variant.max_rank();

	if direction == StackDirection::Finished {
		return Vec::new();
	}

	if variant.up_or_down {
		return match (direction, current) {
			(StackDirection::Undecided, None) => vec![1, max, START_RANK],
			(StackDirection::Undecided, Some(START_RANK)) => vec![2, max - 1],
			(StackDirection::Up, Some(rank)) if rank < max => vec![rank + 1],
			(StackDirection::Down, Some(rank)) if rank > 1 => vec![rank - 1],
			_ => Vec::new(),
		};
	}

	if let Some(start) = starts.get(suit_index).copied().flatten() {
		let played = stack.iter().filter(|&&order| cards[order].identity.is_some()).count();

		if played >= variant.clue_ranks().len() {
			return Vec::new();
		}

		return match current {
			None => vec![start],
			Some(rank) => vec![if rank >= max { 1 } else { rank + 1 }],
		};
	}

	if variant.suits[suit_index].reversed {
		match current {
			None => vec![max],
			Some(rank) if rank > 1 => vec![rank - 1],
			Some(_) => Vec::new(),
		}
	}
	else {
		match current {
			None => vec![1],
			Some(rank) if rank < max => vec![rank + 1],
			Some(_) => Vec::new(),
		}
	}
}

/**
 * The direction of a stack after a card of the given rank is successfully played onto it.
 * Whether the stack is finished is decided separately, from its next playable ranks.
 */
pub fn direction_after_play(direction: StackDirection, rank: usize, variant: &Variant) -> StackDirection {
	let max = variant.max_rank();

	match direction {
		StackDirection::Undecided if rank == 1 || rank == 2 => StackDirection::Up,
		StackDirection::Undecided if rank == max || rank == max - 1 => StackDirection::Down,
		other => other,
	}
}

/**
 * Returns every rank that could still be played onto a suit's stack, assuming each play succeeds.
 * Anything outside this list is trash.
 */
pub fn reachable_ranks(
	suit_index: usize,
	stack: &[usize],
	direction: StackDirection,
	starts: &[Option<usize>],
	variant: &Variant,
	cards: &[CardState],
) -> Vec<usize> {
	let current = stack_rank(stack, cards);
	let max = variant.max_rank();

	if direction == StackDirection::Finished {
		return Vec::new();
	}

	if variant.up_or_down {
		return match (direction, current) {
			(StackDirection::Undecided, None) => variant.ranks.clone(),
			(StackDirection::Undecided, Some(START_RANK)) => variant.clue_ranks(),
			(StackDirection::Up, Some(rank)) => (rank + 1..=max).collect(),
			(StackDirection::Down, Some(rank)) => (1..rank).collect(),
			_ => Vec::new(),
		};
	}

	if let Some(start) = starts.get(suit_index).copied().flatten() {
		let played = stack.iter().filter(|&&order| cards[order].identity.is_some()).count();
		let wrap = |rank: usize| if rank >= max { 1 } else { rank + 1 };

		let mut rank = current.map_or(start, wrap);
		let mut ranks = Vec::new();
		for _ in played..variant.clue_ranks().len() {
			ranks.push(rank);
			rank = wrap(rank);
		}
		return ranks;
	}

	match current {
		None => (1..=max).collect(),
		Some(rank) if variant.suits[suit_index].reversed => (1..rank).collect(),
		Some(rank) => (rank + 1..=max).collect(),
	}
}

/** A stack is finished once nothing more can be played on it, whichever way it was built. */
pub fn stack_finished(
	suit_index: usize,
	stack: &[usize],
	direction: StackDirection,
	starts: &[Option<usize>],
	variant: &Variant,
	cards: &[CardState],
) -> bool {
	next_playable_ranks(suit_index, stack, direction, starts, variant, cards).is_empty()
}
