use std::collections::BTreeMap;
use std::ops::AddAssign;

use rand::Rng;

/// Count type stored in a [`CountTrie`].
///
/// Raw tries count with `u64`; smoothed tries carry fractional `f64` counts.
pub trait Weight: Copy + Default + PartialOrd + AddAssign {
	fn as_f64(self) -> f64;
}

impl Weight for u64 {
	fn as_f64(self) -> f64 {
		self as f64
	}
}

impl Weight for f64 {
	fn as_f64(self) -> f64 {
		self
	}
}

/// One position of an n-token path.
///
/// `depth` is the number of levels left before a leaf. Leaves (`depth == 0`)
/// hold the count of the n-gram spelled by the root-to-leaf path; depth-1
/// nodes hold the total of every n-gram sharing their (n-1)-token context.
/// Other nodes carry no count.
#[derive(Clone, Debug)]
struct Node<C> {
	depth: usize,
	/// Ordered by token so that weighted sampling is reproducible.
	children: BTreeMap<String, Node<C>>,
	count: C,
}

impl<C: Weight> Node<C> {
	fn new(depth: usize) -> Self {
		Self { depth, children: BTreeMap::new(), count: C::default() }
	}

	fn derive<D: Weight>(&self, leaf: &mut impl FnMut(C) -> D) -> Node<D> {
		if self.depth == 0 {
			return Node { depth: 0, children: BTreeMap::new(), count: leaf(self.count) };
		}

		let children: BTreeMap<String, Node<D>> = self.children
			.iter()
			.map(|(token, child)| (token.clone(), child.derive(&mut *leaf)))
			.collect();

		// The context total is rebuilt from the derived leaves, the old one is discarded
		let mut count = D::default();
		if self.depth == 1 {
			for child in children.values() {
				count += child.count;
			}
		}

		Node { depth: self.depth, children, count }
	}

	fn leaves(&self) -> usize {
		if self.depth == 0 {
			1
		} else {
			self.children.values().map(Node::leaves).sum()
		}
	}
}

/// Prefix tree of every n-gram seen during training, keyed token by token.
///
/// Tokens are read from the front of the slice. `count` needs the `order`
/// tokens of an n-gram; context queries only read the first `order - 1`, so
/// they accept either the bare context or a full n-gram whose last token is
/// ignored (it may be a placeholder).
///
/// # Invariants
/// - The root has depth `order`, leaves have depth 0
/// - A depth-1 node's count equals the sum of its leaves' counts
#[derive(Clone, Debug)]
pub struct CountTrie<C = u64> {
	order: usize,
	root: Node<C>,
}

impl<C: Weight> CountTrie<C> {
	/// Creates an empty trie for n-grams of `order` tokens.
	pub fn new(order: usize) -> Self {
		Self { order, root: Node::new(order) }
	}

	/// Returns the n of the n-grams stored in this trie.
	pub fn order(&self) -> usize {
		self.order
	}

	/// Descends along `ngram` until a node of `stop_depth` is reached.
	///
	/// Returns `None` as soon as a token has no child (never-seen path).
	fn descend<T: AsRef<str>>(&self, ngram: &[T], stop_depth: usize) -> Option<&Node<C>> {
		let mut node = &self.root;
		while node.depth > stop_depth {
			let token = ngram.get(self.order - node.depth)?;
			node = node.children.get(token.as_ref())?;
		}
		Some(node)
	}

	/// Returns the count of `ngram`, or zero if it was never seen.
	pub fn count<T: AsRef<str>>(&self, ngram: &[T]) -> C {
		self.descend(ngram, 0).map(|node| node.count).unwrap_or_default()
	}

	/// Returns the total count of every n-gram sharing the first n-1 tokens
	/// of `ngram`, or zero if that context was never seen.
	pub fn context_total<T: AsRef<str>>(&self, ngram: &[T]) -> C {
		self.descend(ngram, 1).map(|node| node.count).unwrap_or_default()
	}

	/// Iterates over the tokens observed after the context of `ngram`,
	/// with their counts, in token order.
	pub fn continuations<T: AsRef<str>>(&self, ngram: &[T]) -> impl Iterator<Item = (&str, C)> {
		self.descend(ngram, 1)
			.into_iter()
			.flat_map(|node| node.children.iter())
			.map(|(token, child)| (token.as_str(), child.count))
	}

	/// Draws the next token after the context of `ngram`, weighted by count.
	///
	/// Performs a cumulative subtraction over the continuations in token
	/// order. Returns `None` if the context was never seen or has no mass.
	pub fn sample_next<T, R>(&self, ngram: &[T], rng: &mut R) -> Option<&str>
	where
		T: AsRef<str>,
		R: Rng,
	{
		let node = self.descend(ngram, 1)?;
		let total = node.count.as_f64();
		if total <= 0.0 {
			return None;
		}

		let mut r = rng.random_range(0.0..total);

		let mut fallback: Option<&str> = None;
		for (token, child) in &node.children {
			let weight = child.count.as_f64();
			if r < weight {
				return Some(token.as_str());
			}
			r -= weight;
			if weight > 0.0 {
				fallback = Some(token.as_str());
			}
		}

		// Rounding can leave a tiny remainder after the last child
		fallback
	}

	/// Returns the number of distinct n-grams (leaves).
	pub fn distinct_ngrams(&self) -> usize {
		self.root.leaves()
	}

	/// Builds a trie of the same shape with every leaf count rewritten by
	/// `leaf` and every context total recomputed from the new leaves.
	pub fn derive<D: Weight>(&self, mut leaf: impl FnMut(C) -> D) -> CountTrie<D> {
		CountTrie { order: self.order, root: self.root.derive(&mut leaf) }
	}
}

impl CountTrie<u64> {
	/// Records one occurrence of `ngram` and returns its new count.
	///
	/// Missing nodes are created on the way down. The depth-1 node on the
	/// path is incremented too, keeping the context total in step.
	///
	/// # Panics
	/// Panics if `ngram` holds fewer than `order` tokens.
	pub fn insert<T: AsRef<str>>(&mut self, ngram: &[T]) -> u64 {
		debug_assert_eq!(ngram.len(), self.order, "n-gram length must match the trie order");

		let mut node = &mut self.root;
		loop {
			if node.depth <= 1 {
				node.count += 1;
			}
			if node.depth == 0 {
				return node.count;
			}

			let token = ngram[self.order - node.depth].as_ref();
			let depth = node.depth - 1;
			node = node.children
				.entry(token.to_owned())
				.or_insert_with(|| Node::new(depth));
		}
	}
}
