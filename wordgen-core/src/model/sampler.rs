/// Picks the bucket a uniform draw falls into.
///
/// `entries` are `(index, probability)` pairs visited in the given order
/// (ascending index for model rows). Each probability is subtracted from
/// `draw`; the first entry leaving a non-positive remainder is returned.
///
/// - Zero or negative probabilities are skipped, an empty bucket can't be hit
/// - If rounding leaves a positive remainder after the last entry,
///   the last non-empty entry is returned
/// - Returns `None` only if no entry has a positive probability
///
/// Earlier entries win on exact boundaries.
pub fn sample<I>(entries: I, draw: f64) -> Option<usize>
where
	I: IntoIterator<Item = (usize, f64)>,
{
	let mut remainder = draw;
	let mut fallback: Option<usize> = None;

	for (index, probability) in entries {
		if probability <= 0.0 {
			continue;
		}
		remainder -= probability;
		if remainder <= 0.0 {
			return Some(index);
		}
		fallback = Some(index);
	}

	fallback
}

/// Same as [`sample`], over a dense row where the position is the index.
///
/// Unlike a plain walk over every column, zero columns are skipped: with
/// `[0.0, 1.0]` a draw of 0.0 gives 1, not 0. The rounding fallback is the
/// last non-zero column, not the last column of the row.
pub fn sample_dense(probabilities: &[f64], draw: f64) -> Option<usize> {
	sample(probabilities.iter().copied().enumerate(), draw)
}

#[cfg(test)]
mod tests {
	use super::*;
	use proptest::prelude::*;

	#[test]
	fn picks_the_matching_bucket() {
		let row = [0.25, 0.5, 0.25];
		assert_eq!(sample_dense(&row, 0.0), Some(0));
		assert_eq!(sample_dense(&row, 0.1), Some(0));
		assert_eq!(sample_dense(&row, 0.25), Some(0));
		assert_eq!(sample_dense(&row, 0.3), Some(1));
		assert_eq!(sample_dense(&row, 0.74), Some(1));
		assert_eq!(sample_dense(&row, 0.9), Some(2));
	}

	#[test]
	fn zero_probability_is_never_picked() {
		let row = [0.0, 1.0, 0.0];
		assert_eq!(sample_dense(&row, 0.0), Some(1));
		assert_eq!(sample_dense(&row, 0.999), Some(1));
	}

	#[test]
	fn rounding_falls_back_to_last_bucket() {
		let row = [0.3, 0.3, 0.3, 0.0];
		assert_eq!(sample_dense(&row, 0.95), Some(2));
	}

	#[test]
	fn sparse_entries_keep_their_index() {
		let row = vec![(3, 0.5), (9, 0.5)];
		assert_eq!(sample(row.clone(), 0.2), Some(3));
		assert_eq!(sample(row, 0.7), Some(9));
	}

	#[test]
	fn empty_rows() {
		assert_eq!(sample_dense(&[], 0.5), None);
		assert_eq!(sample_dense(&[0.0, 0.0], 0.5), None);
	}

	proptest! {
		#[test]
		fn index_stays_in_range(
			weights in proptest::collection::vec(0.0f64..10.0, 1..40),
			draw in 0.0f64..1.0,
		) {
			let total: f64 = weights.iter().sum();
			prop_assume!(total > 0.0);
			let row: Vec<f64> = weights.iter().map(|w| w / total).collect();

			let index = sample_dense(&row, draw).unwrap();
			prop_assert!(index < row.len());
			prop_assert!(row[index] > 0.0);
		}
	}
}
