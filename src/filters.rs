// ---------------------------------------------------------------------------
// Filter Pipeline — hard exclusion rules applied before any scoring
// ---------------------------------------------------------------------------
//
// Rules run in order (category, environment, intensity) and short-circuit
// per venue. A filter only ever shrinks the surviving set; a venue excluded
// here is never brought back by score.
// ---------------------------------------------------------------------------

use crate::types::{Intensity, Venue, VenueQuery};

/// True if the venue survives every hard filter the query carries.
pub fn passes_filters(venue: &Venue, query: &VenueQuery) -> bool {
	matches_category(venue, &query.categories)
		&& matches_environment(venue, query.environment.as_deref())
		&& matches_intensity(&venue.levels, query.parsed_intensity())
}

/// Category rule: with a non-empty requested set, the venue's category
/// must be a member. An empty set means no category filter.
pub fn matches_category(venue: &Venue, wanted: &[String]) -> bool {
	wanted.is_empty() || wanted.iter().any(|c| *c == venue.category)
}

/// Environment rule: exact, case-sensitive match when requested.
pub fn matches_environment(venue: &Venue, wanted: Option<&str>) -> bool {
	wanted.is_none_or(|env| venue.environment == env)
}

/// Intensity rule: a venue with an empty level set is level-agnostic and
/// never excluded. Otherwise the venue's levels must intersect the set the
/// intensity resolves to. An unrecognized or absent intensity excludes
/// nothing.
pub fn matches_intensity(venue_levels: &[u8], intensity: Option<Intensity>) -> bool {
	if venue_levels.is_empty() {
		return true;
	}
	match intensity {
		None => true,
		Some(intensity) => intensity
			.levels()
			.iter()
			.any(|lvl| venue_levels.contains(lvl)),
	}
}
