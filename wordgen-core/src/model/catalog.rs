use std::collections::{HashMap, HashSet};

/// An ordered set of unique strings with stable numeric indices.
///
/// Used both for the vocabulary (one entry per word) and for the state
/// catalog (one entry per joined word window).
///
/// ## Invariants
/// - `items` is sorted lexicographically and holds no duplicate
/// - `index[items[i]] == i` for every `i`
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Catalog {
	items: Vec<String>,
	index: HashMap<String, usize>,
}

impl Catalog {
	/// Builds a catalog from any sequence of values.
	///
	/// Values are deduplicated through a hash set and sorted once, so the
	/// result does not depend on insertion order.
	pub fn new<I, S>(values: I) -> Self
	where
		I: IntoIterator<Item = S>,
		S: Into<String>,
	{
		let unique: HashSet<String> = values.into_iter().map(Into::into).collect();
		let mut items: Vec<String> = unique.into_iter().collect();
		items.sort_unstable();

		let index = items
			.iter()
			.enumerate()
			.map(|(i, item)| (item.clone(), i))
			.collect();

		Self { items, index }
	}

	/// Returns the index of `value`, if present.
	pub fn index_of(&self, value: &str) -> Option<usize> {
		self.index.get(value).copied()
	}

	/// Returns the value stored at `index`, if in range.
	pub fn get(&self, index: usize) -> Option<&str> {
		self.items.get(index).map(String::as_str)
	}

	pub fn contains(&self, value: &str) -> bool {
		self.index.contains_key(value)
	}

	pub fn len(&self) -> usize {
		self.items.len()
	}

	pub fn is_empty(&self) -> bool {
		self.items.is_empty()
	}

	/// Iterates over the values in index order.
	pub fn iter(&self) -> impl Iterator<Item = &str> {
		self.items.iter().map(String::as_str)
	}

	/// Returns the values as a sorted slice.
	pub fn as_slice(&self) -> &[String] {
		&self.items
	}
}
