use crate::basics::variant::Variant;

/** The most clues that can be banked, in displayed clues. */
pub const MAX_CLUE_NUM: usize = 8;

/**
 * Converts a number of displayed clues into internal token units.
 * Clue Starved variants keep two units per clue, so discarding regains half a clue.
 */
pub fn get_adjusted(n: usize, variant: &Variant) -> usize {
	if variant.clue_starved { n * 2 } else { n }
}

pub fn max_tokens(variant: &Variant) -> usize {
	get_adjusted(MAX_CLUE_NUM, variant)
}

/** Discarding is not allowed when this is true. */
pub fn at_max(tokens: usize, variant: &Variant) -> bool {
	tokens >= max_tokens(variant)
}

/** Clueing is not allowed when this is true. */
pub fn at_min(tokens: usize, variant: &Variant) -> bool {
	tokens < get_adjusted(1, variant)
}

/** Regains one token unit, bounded at the maximum. */
pub fn gain(tokens: usize, variant: &Variant) -> usize {
	(tokens + 1).min(max_tokens(variant))
}

pub fn spend(tokens: usize, variant: &Variant) -> usize {
	tokens.saturating_sub(get_adjusted(1, variant))
}

/** The number of clues shown to players. */
pub fn displayed(tokens: usize, variant: &Variant) -> f32 {
	if variant.clue_starved { tokens as f32 / 2.0 } else { tokens as f32 }
}
