// ---------------------------------------------------------------------------
// Hybrid Blender — normalized combination of content and collaborative axes
// ---------------------------------------------------------------------------
//
// Both score vectors cover the same candidate set. Each axis is min–max
// normalized to [0, 1] independently before the weighted sum; an all-equal
// axis normalizes to a constant 0.5 instead of dividing by zero. A
// candidate with no defined collaborative prediction contributes nothing
// on that axis, and when no prediction is defined at all the blend
// degrades to the raw content scores (the collaborative axis vanishes and
// the content weight is effectively 1).
// ---------------------------------------------------------------------------

/// Content weight in the blend; the collaborative axis gets `1 - alpha`.
pub const DEFAULT_BLEND_ALPHA: f64 = 0.6;

/// Min–max normalize to [0, 1]; all-equal input maps to a constant 0.5.
fn min_max_normalize(values: &[f64]) -> Vec<f64> {
	let Some(&first) = values.first() else {
		return Vec::new();
	};
	let (min, max) = values.iter().fold((first, first), |(lo, hi), &v| {
		(lo.min(v), hi.max(v))
	});
	if max > min {
		values.iter().map(|v| (v - min) / (max - min)).collect()
	} else {
		vec![0.5; values.len()]
	}
}

/// Blend content scores with collaborative predictions under `alpha`.
pub fn blend_scores(content: &[f64], collab: &[Option<f64>], alpha: f64) -> Vec<f64> {
	debug_assert_eq!(content.len(), collab.len());

	let defined: Vec<f64> = collab.iter().flatten().copied().collect();
	if defined.is_empty() {
		return content.to_vec();
	}

	let content_norm = min_max_normalize(content);
	let (min, max) = defined
		.iter()
		.fold((defined[0], defined[0]), |(lo, hi), &v| {
			(lo.min(v), hi.max(v))
		});

	content_norm
		.iter()
		.zip(collab.iter())
		.map(|(&c, prediction)| {
			let p = match prediction {
				Some(v) if max > min => (v - min) / (max - min),
				Some(_) => 0.5,
				None => 0.0,
			};
			alpha * c + (1.0 - alpha) * p
		})
		.collect()
}
