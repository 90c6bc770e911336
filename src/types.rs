use serde::{Deserialize, Serialize};

/// A catalog entry: a gym, park, relaxation spot, or eatery.
///
/// Wire field names (`type`, `env`, `level`) follow the catalog feed format.
/// An empty `levels` set means the venue is level-agnostic and is never
/// excluded by an intensity filter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Venue {
	pub name: String,
	#[serde(rename = "type")]
	pub category: String,
	#[serde(rename = "env")]
	pub environment: String,
	#[serde(rename = "level", default)]
	pub levels: Vec<u8>,
	#[serde(default)]
	pub address: Option<String>,
	#[serde(default)]
	pub latitude: Option<f64>,
	#[serde(default)]
	pub longitude: Option<f64>,
}

/// A ranking request. Every field is optional; an empty query ranks the
/// whole catalog content-only.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct VenueQuery {
	#[serde(default)]
	pub categories: Vec<String>,
	#[serde(default)]
	pub environment: Option<String>,
	#[serde(default)]
	pub intensity: Option<String>,
	#[serde(default)]
	pub latitude: Option<f64>,
	#[serde(default)]
	pub longitude: Option<f64>,
	#[serde(rename = "userId", default)]
	pub user_id: Option<String>,
}

impl VenueQuery {
	/// The query location, present only when both coordinates are supplied.
	pub fn location(&self) -> Option<(f64, f64)> {
		match (self.latitude, self.longitude) {
			(Some(lat), Some(lon)) => Some((lat, lon)),
			_ => None,
		}
	}

	/// The intensity token resolved through the canonical mapping.
	/// Unrecognized tokens resolve to `None` (no intensity filter).
	pub fn parsed_intensity(&self) -> Option<Intensity> {
		self.intensity.as_deref().and_then(Intensity::parse)
	}
}

/// Requested workout intensity, resolved from a free-form token.
///
/// This is the single canonical mapping from intensity tokens to venue
/// level sets; no other string matching exists in the crate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Intensity {
	Low,
	Medium,
	High,
}

impl Intensity {
	/// Parse a token case-insensitively. `low*`/`1` → Low, `med*`/`2` →
	/// Medium, `high*`/`3` → High; anything else is unrecognized.
	pub fn parse(token: &str) -> Option<Self> {
		let s = token.trim().to_lowercase();
		if s.starts_with("low") || s == "1" {
			Some(Self::Low)
		} else if s.starts_with("med") || s == "2" {
			Some(Self::Medium)
		} else if s.starts_with("high") || s == "3" {
			Some(Self::High)
		} else {
			None
		}
	}

	/// The venue level set this intensity maps to.
	pub fn levels(self) -> &'static [u8] {
		match self {
			Self::Low => &[1],
			Self::Medium => &[2],
			Self::High => &[3],
		}
	}
}

/// One stored rating. The store keeps at most one live rating per
/// (user, venue) pair; later writes replace earlier ones.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Rating {
	#[serde(rename = "userId")]
	pub user_id: String,
	#[serde(rename = "venueName")]
	pub venue_name: String,
	pub score: f64,
}

/// A ranked result with its final blended score and, when the query
/// carried a location, the great-circle distance to the venue.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RankedVenue {
	pub name: String,
	pub score: f64,
	#[serde(rename = "distanceKm")]
	pub distance_km: Option<f64>,
}
