use std::collections::BTreeMap;

/// Frequency of frequencies: for every count value `c`, how many distinct
/// n-grams currently have exactly `c` occurrences (`N(c)`).
///
/// # Invariants
/// - The sum of all buckets equals the number of distinct n-grams recorded
/// - Buckets never go below zero
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FrequencyTable {
	buckets: BTreeMap<u64, u64>,
}

impl FrequencyTable {
	/// Creates an empty table.
	pub fn new() -> Self {
		Self::default()
	}

	/// Moves one n-gram from the `old` bucket to the `new` one.
	///
	/// An `old` count of zero means the n-gram was just created.
	pub fn record(&mut self, old: u64, new: u64) {
		if old > 0 {
			if let Some(bucket) = self.buckets.get_mut(&old) {
				*bucket -= 1;
				if *bucket == 0 {
					self.buckets.remove(&old);
				}
			}
		}
		*self.buckets.entry(new).or_insert(0) += 1;
	}

	/// Returns `N(count)`, zero for a count no n-gram has.
	pub fn get(&self, count: u64) -> u64 {
		self.buckets.get(&count).copied().unwrap_or(0)
	}

	/// Returns the number of distinct n-grams across all buckets.
	pub fn distinct(&self) -> u64 {
		self.buckets.values().sum()
	}

	/// Iterates over `(count, N(count))` pairs in increasing count order.
	pub fn iter(&self) -> impl Iterator<Item = (u64, u64)> + '_ {
		self.buckets.iter().map(|(count, n)| (*count, *n))
	}

	/// Good-Turing adjusted count `c* = (c+1) * N(c+1) / N(c)`.
	///
	/// An empty `N(c+1)` bucket counts as zero, so `c*` is zero whenever no
	/// n-gram sits one frequency above `c`.
	pub fn adjusted_count(&self, count: u64) -> f64 {
		let current = self.get(count);
		if current == 0 {
			return 0.0;
		}
		(count + 1) as f64 * self.get(count + 1) as f64 / current as f64
	}
}

#[cfg(test)]
mod tests {
	use super::*;

	#[test]
	fn record_moves_between_buckets() {
		let mut table = FrequencyTable::new();
		table.record(0, 1);
		table.record(0, 1);
		table.record(1, 2);
		assert_eq!(table.get(1), 1);
		assert_eq!(table.get(2), 1);
		assert_eq!(table.distinct(), 2);
	}

	#[test]
	fn emptied_buckets_disappear() {
		let mut table = FrequencyTable::new();
		table.record(0, 1);
		table.record(1, 2);
		assert_eq!(table.iter().collect::<Vec<_>>(), vec![(2, 1)]);
	}

	#[test]
	fn adjusted_count_uses_next_bucket() {
		let mut table = FrequencyTable::new();
		// three n-grams seen once, one seen twice
		for _ in 0..4 {
			table.record(0, 1);
		}
		table.record(1, 2);
		assert_eq!(table.adjusted_count(1), 2.0 * 1.0 / 3.0);
		// nothing has count 3
		assert_eq!(table.adjusted_count(2), 0.0);
	}
}
