use crate::basics::card::Identity;

/** Bits reserved per suit: ranks 0 (START) through 5. */
const RANKS_PER_SUIT: usize = 6;
const MAX_ORD: usize = 64;

#[derive(Debug, Copy, Clone, Eq, PartialEq, Hash, Default)]
pub struct IdentitySet(u64);

impl IdentitySet {
	pub const EMPTY: Self = IdentitySet(0);

	fn from_id(id: Identity) -> usize {
		id.suit_index * RANKS_PER_SUIT + id.rank
	}

	fn to_id(ord: usize) -> Identity {
		if ord < MAX_ORD {
			Identity { suit_index: ord / RANKS_PER_SUIT, rank: ord % RANKS_PER_SUIT }
		} else {
			panic!("Couldn't convert ordinal {} to identity!", ord);
		}
	}

	pub fn bits(&self) -> u64 {
		self.0
	}

	pub fn len(&self) -> usize {
		self.0.count_ones() as usize
	}

	#[inline]
	pub fn is_empty(&self) -> bool {
		self.0 == 0
	}

	pub fn single(id: Identity) -> Self {
		IdentitySet(1 << Self::from_id(id))
	}

	pub fn insert(&mut self, id: Identity) {
		self.0 |= 1u64 << Self::from_id(id);
	}

	pub fn contains(&self, id: Identity) -> bool {
		let bit = 1u64 << Self::from_id(id);
		(self.0 & bit) != 0
	}

	pub fn intersect(self, other: &Self) -> Self {
		IdentitySet(self.0 & other.0)
	}

	pub fn difference(self, other: &Self) -> Self {
		IdentitySet(self.0 & !other.0)
	}

	/** Returns whether every identity in this set is also in the other. */
	pub fn is_subset(&self, other: &Self) -> bool {
		self.0 & !other.0 == 0
	}

	pub fn filter<F>(&self, mut cond: F) -> Self where F: FnMut(Identity) -> bool {
		let mut res = *self;
		res.retain(|id| cond(id));
		res
	}

	pub fn retain<F>(&mut self, mut cond: F) where F: FnMut(Identity) -> bool {
		let mut bits = self.0;

		while bits != 0 {
			let tz = bits.trailing_zeros() as usize;
			bits &= bits - 1;

			if !cond(Self::to_id(tz)) {
				self.0 &= !(1u64 << tz);
			}
		}
	}

	/** The distinct suit indices among the identities. */
	pub fn suits(&self) -> Vec<usize> {
		let mut suits: Vec<usize> = self.iter().map(|id| id.suit_index).collect();
		suits.dedup();
		suits
	}

	/** The distinct ranks among the identities, ascending. */
	pub fn ranks(&self) -> Vec<usize> {
		let mut ranks: Vec<usize> = self.iter().map(|id| id.rank).collect();
		ranks.sort_unstable();
		ranks.dedup();
		ranks
	}

	pub fn iter(&self) -> IdentitySetIter {
		IdentitySetIter { bits: self.0 }
	}

	pub fn to_vec(&self) -> Vec<Identity> {
		self.iter().collect()
	}
}

impl FromIterator<Identity> for IdentitySet {
	fn from_iter<T: IntoIterator<Item = Identity>>(iter: T) -> Self {
		let mut set = IdentitySet::EMPTY;
		for id in iter {
			set.insert(id);
		}
		set
	}
}

pub struct IdentitySetIter {
	bits: u64,
}

impl Iterator for IdentitySetIter {
	type Item = Identity;

	#[inline]
	fn next(&mut self) -> Option<Identity> {
		if self.bits == 0 {
			return None;
		}
		let tz = self.bits.trailing_zeros();
		self.bits &= self.bits - 1;
		Some(IdentitySet::to_id(tz as usize))
	}

	fn size_hint(&self) -> (usize, Option<usize>) {
		let len = self.bits.count_ones() as usize;
		(len, Some(len))
	}
}

impl ExactSizeIterator for IdentitySetIter {}
