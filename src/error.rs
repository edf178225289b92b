use thiserror::Error;

use crate::basics::card::CardLocation;

/** Why an action was rejected. A rejected action leaves every part of the state untouched. */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ActionError {
	#[error("the game is already over")]
	GameOver,
	#[error("it is player {current}'s turn, not player {actor}'s")]
	NotYourTurn { actor: usize, current: usize },
	#[error("an action is already being resolved")]
	NotAwaiting,
	#[error("the real game cannot be played while a hypothetical is active")]
	HypotheticalActive,
	#[error("card {order} is not in player {player_index}'s hand (it is in the {location})")]
	NotInHand { order: usize, player_index: usize, location: CardLocation },
	#[error("card {order} does not exist")]
	NoSuchCard { order: usize },
	#[error("player {target} cannot be clued by player {giver}")]
	InvalidTarget { giver: usize, target: usize },
	#[error("{value} is not a valid clue value in this variant")]
	InvalidClueValue { value: usize },
	#[error("the clue touches no cards in player {target}'s hand")]
	NoCardsTouched { target: usize },
	#[error("not enough clue tokens to give a clue")]
	NotEnoughClueTokens,
	#[error("cannot discard at the maximum number of clue tokens")]
	AtMaxClueTokens,
	#[error("the identity of card {order} is unknown")]
	UnknownIdentity { order: usize },
}

/** Problems with messages received from the relay. */
#[derive(Debug, Error)]
pub enum RelayError {
	#[error("malformed relay message: {0}")]
	Malformed(#[from] serde_json::Error),
	#[error("message for table {received} arrived at table {expected}")]
	WrongTable { expected: u32, received: u32 },
}

/** Problems with the options a game is created from. */
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SetupError {
	#[error("games need 2 to 6 players, not {count}")]
	InvalidPlayerCount { count: usize },
}
