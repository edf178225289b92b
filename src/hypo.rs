use colored::Colorize;
use log::{error, info, warn};
use nohash_hasher::IntSet;
use std::collections::HashMap;

use crate::basics;
use crate::basics::action::{Action, PerformAction, ReplayActionMessage, ReplayCommand};
use crate::basics::card::Identity;
use crate::basics::game::Game;
use crate::basics::resolve::{self, IdentityLookup};
use crate::basics::state::GameState;
use crate::error::{ActionError, RelayError};

/**
 * An isolated sequence of speculative actions layered on a copy of the real state.
 * Snapshots are only ever pushed or popped at the tail.
 */
#[derive(Debug, Clone)]
pub struct HypoBranch {
	/** Snapshot 0 is the real state at the time the branch started. */
	pub states: Vec<GameState>,
	/** Events received since the last turn event, not yet committed as a snapshot. */
	pending: Option<GameState>,
	pub drawn_cards_in_hypothetical: IntSet<usize>,
	pub show_drawn_cards: bool,
	/** Once a card drawn in the branch is used, revealing drawn cards is locked off until the branch ends. */
	pub toggle_enabled: bool,
	/** Identity overrides used when resolving plays and discards. */
	pub morphs: HashMap<usize, Identity>,
	pub actions: Vec<Action>,
}

impl HypoBranch {
	pub fn new(root: GameState) -> Self {
		Self {
			states: vec![root],
			pending: None,
			drawn_cards_in_hypothetical: IntSet::default(),
			show_drawn_cards: false,
			toggle_enabled: true,
			morphs: HashMap::new(),
			actions: Vec::new(),
		}
	}

	/** The latest committed snapshot. */
	pub fn current(&self) -> &GameState {
		self.states.last().unwrap_or_else(|| panic!("Hypothetical has no snapshots!"))
	}

	pub fn morph(&mut self, order: usize, id: Identity) {
		self.morphs.insert(order, id);
	}

	pub fn back(&mut self) -> bool {
		self.pending = None;

		if self.states.len() <= 1 {
			return false;
		}

		self.states.pop();
		true
	}

	pub fn toggle_revealed(&mut self) -> bool {
		if !self.toggle_enabled {
			return false;
		}

		self.show_drawn_cards = !self.show_drawn_cards;
		true
	}

	/** Locks the reveal toggle if a play, discard or clue involves a card drawn within this branch. */
	pub fn check_toggle_revealed_button(&mut self, event: &Action) {
		if !matches!(event, Action::Play(_) | Action::Discard(_) | Action::Clue(_)) {
			return;
		}

		if event.orders().iter().any(|order| self.drawn_cards_in_hypothetical.contains(order)) {
			self.toggle_enabled = false;
			self.show_drawn_cards = false;
		}
	}

	/**
	 * Applies one primitive event to the pending snapshot, committing it on the turn event.
	 * Committed snapshots are never written to.
	 */
	pub fn apply(&mut self, event: &Action) {
		let mut pending = match self.pending.take() {
			Some(pending) => pending,
			None => self.current().clone(),
		};

		basics::handle_event(&mut pending, event);
		self.actions.push(event.clone());

		self.check_toggle_revealed_button(event);
		if let Action::Draw(draw) = event {
			self.drawn_cards_in_hypothetical.insert(draw.order);
		}

		if let Action::Turn(_) = event {
			self.states.push(pending);
		}
		else {
			self.pending = Some(pending);
		}
	}
}

impl Game {
	/** The state of the hypothetical if one is active, otherwise the real state. */
	pub fn visible_state(&self) -> &GameState {
		match &self.hypothetical {
			Some(hypo) => hypo.current(),
			None => &self.state,
		}
	}

	fn start_branch(&mut self) -> bool {
		if self.hypothetical.is_some() {
			return false;
		}

		info!("{}", "------- STARTING HYPOTHETICAL -------".green());
		self.hypothetical = Some(HypoBranch::new(self.state.clone()));
		true
	}

	pub fn hypo_start(&mut self) {
		if !self.can_lead() {
			warn!("Only the leader can start a hypothetical.");
			return;
		}

		if self.start_branch() {
			self.queue_replay_command(ReplayCommand::HypoStart.json(self.table_id));
		}
	}

	/**
	 * Resolves an action within the hypothetical, using the same rules as the real game.
	 * Followers and games without a hypothetical ignore this.
	 */
	pub fn hypo_send(&mut self, action: PerformAction) -> Result<(), ActionError> {
		if !self.can_lead() {
			warn!("Only the leader can send hypothetical actions.");
			return Ok(());
		}

		let Some(hypo) = &self.hypothetical else {
			warn!("No hypothetical to send {action:?} to.");
			return Ok(());
		};

		if let PerformAction::Terminate { .. } = action {
			panic!("Can't send {action:?} to a hypothetical!");
		}

		let state = hypo.current();
		let actor = state.turn.current_player_index;
		let lookup = IdentityLookup::new(&self.identities).with_morphs(&hypo.morphs);

		resolve::validate(state, actor, &action, &lookup)?;
		let events = resolve::to_events(state, actor, &action, &lookup);

		for event in &events {
			self.apply_hypo_event(event);

			match serde_json::to_string(event) {
				Ok(action_json) => self.queue_replay_command(ReplayCommand::HypoAction { action_json }.json(self.table_id)),
				Err(e) => error!("Couldn't serialize hypothetical action {event:?}: {e}"),
			}
		}
		Ok(())
	}

	fn apply_hypo_event(&mut self, event: &Action) {
		let Some(hypo) = &mut self.hypothetical else {
			warn!("No hypothetical to apply {event:?} to.");
			return;
		};

		let state = hypo.current();
		if !matches!(event, Action::Draw(_) | Action::Turn(_)) {
			info!("{}", format!("[hypo] {}", event.fmt(&state.variant, &state.player_names)).cyan());
		}

		hypo.apply(event);
	}

	fn back_branch(&mut self) -> bool {
		match &mut self.hypothetical {
			Some(hypo) => hypo.back(),
			None => false,
		}
	}

	pub fn hypo_back(&mut self) {
		if !self.can_lead() {
			warn!("Only the leader can go back in a hypothetical.");
			return;
		}

		if self.back_branch() {
			self.queue_replay_command(ReplayCommand::HypoBack.json(self.table_id));
		}
	}

	fn end_branch(&mut self) -> bool {
		if self.hypothetical.take().is_none() {
			return false;
		}

		info!("{}", "------- ENDING HYPOTHETICAL -------".green());
		true
	}

	pub fn hypo_end(&mut self) {
		if !self.can_lead() {
			warn!("Only the leader can end a hypothetical.");
			return;
		}

		if self.end_branch() {
			self.queue_replay_command(ReplayCommand::HypoEnd.json(self.table_id));
		}
	}

	fn toggle_branch(&mut self) -> bool {
		match &mut self.hypothetical {
			Some(hypo) => hypo.toggle_revealed(),
			None => false,
		}
	}

	pub fn hypo_toggle_revealed(&mut self) {
		if !self.can_lead() {
			warn!("Only the leader can reveal hypothetical draws.");
			return;
		}

		if self.toggle_branch() {
			self.queue_replay_command(ReplayCommand::HypoToggleRevealed.json(self.table_id));
		}
	}

	/** Overrides the identity of a card for hypothetical plays and discards. Morphs are never sent to others. */
	pub fn hypo_morph(&mut self, order: usize, id: Identity) {
		match &mut self.hypothetical {
			Some(hypo) => hypo.morph(order, id),
			None => warn!("No hypothetical to morph card {order} in."),
		}
	}

	/**
	 * Applies a branch command received from the relay. Leaders already applied their own commands,
	 * so echoes are ignored.
	 */
	pub fn handle_replay_command(&mut self, data: &str) -> Result<(), RelayError> {
		let message: ReplayActionMessage = serde_json::from_str(data).inspect_err(|e| error!("Couldn't read replay command {data}: {e}"))?;

		if message.table_id != self.table_id {
			return Err(RelayError::WrongTable { expected: self.table_id, received: message.table_id });
		}

		if self.can_lead() {
			return Ok(());
		}

		match message.command {
			ReplayCommand::HypoStart => { self.start_branch(); }
			ReplayCommand::HypoEnd => { self.end_branch(); }
			ReplayCommand::HypoBack => { self.back_branch(); }
			ReplayCommand::HypoToggleRevealed => { self.toggle_branch(); }
			ReplayCommand::HypoAction { action_json } => {
				let event: Action = serde_json::from_str(&action_json).inspect_err(|e| error!("Couldn't read hypothetical action {action_json}: {e}"))?;
				self.apply_hypo_event(&event);
			}
		}
		Ok(())
	}
}
