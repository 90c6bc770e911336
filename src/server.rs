// ---------------------------------------------------------------------------
// RankServer — NDJSON JSON-RPC 2.0 dispatch loop over stdio
// ---------------------------------------------------------------------------
//
// One request per line on stdin, one response per line on stdout.
// Unparseable lines are logged and skipped; a bad request never aborts
// the loop. The catalog is immutable; the rating store is the only
// mutable state.
// ---------------------------------------------------------------------------

use std::io::{self, BufRead, Write};

use serde_json::{json, Value};

use crate::catalog::VenueCatalog;
use crate::error::EngineError;
use crate::protocol::{error_frame, result_frame, JsonRpcRequest, RpcFailure};
use crate::ratings::MemoryRatingStore;
use crate::recommender::{rank_venues, RankingOptions};
use crate::types::{Rating, VenueQuery};

pub struct RankServer {
	catalog: VenueCatalog,
	ratings: MemoryRatingStore,
	options: RankingOptions,
}

impl RankServer {
	pub fn new(catalog: VenueCatalog) -> Self {
		Self {
			catalog,
			ratings: MemoryRatingStore::new(),
			options: RankingOptions::default(),
		}
	}

	pub fn run(&mut self) -> Result<(), EngineError> {
		let stdin = io::stdin();
		let reader = stdin.lock();
		let stdout = io::stdout();
		let mut writer = stdout.lock();

		for line_result in reader.lines() {
			let line = line_result?;
			if line.trim().is_empty() {
				continue;
			}

			let request: JsonRpcRequest = match serde_json::from_str(&line) {
				Ok(r) => r,
				Err(e) => {
					tracing::error!("Failed to parse request: {}", e);
					continue;
				}
			};

			let frame = match self.handle(&request.method, request.params) {
				Ok(result) => result_frame(request.id, result),
				Err(failure) => error_frame(request.id, &failure),
			};
			writeln!(writer, "{frame}")?;
			writer.flush()?;
		}

		Ok(())
	}

	/// Dispatch one request. Kept free of I/O so tests can call it directly.
	pub fn handle(&mut self, method: &str, params: Value) -> Result<Value, RpcFailure> {
		match method {
			"recommend" => self.recommend(params),
			"rating/upsert" => self.upsert_rating(params),
			"catalog/stats" => Ok(json!({
				"venueCount": self.catalog.len(),
				"dimension": self.catalog.vocabulary().dimension(),
				"ratingCount": self.ratings.rating_count(),
			})),
			_ => Err(RpcFailure::method_not_found(method)),
		}
	}

	fn recommend(&mut self, params: Value) -> Result<Value, RpcFailure> {
		let query: VenueQuery =
			serde_json::from_value(params).map_err(RpcFailure::invalid_params)?;
		let ranked = rank_venues(&self.catalog, &self.ratings, &query, &self.options);
		let names: Vec<&str> = ranked.iter().map(|v| v.name.as_str()).collect();
		Ok(json!({
			"names": names,
			"venues": ranked,
		}))
	}

	fn upsert_rating(&mut self, params: Value) -> Result<Value, RpcFailure> {
		let rating: Rating =
			serde_json::from_value(params).map_err(RpcFailure::invalid_params)?;
		if self.catalog.vector(&rating.venue_name).is_none() {
			tracing::warn!(venue = %rating.venue_name, "rating references a venue outside the catalog");
		}
		self.ratings
			.upsert(&rating.user_id, &rating.venue_name, rating.score)
			.map_err(|e| RpcFailure::engine(&e))?;
		Ok(json!({
			"ok": true,
			"ratingCount": self.ratings.rating_count(),
		}))
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::types::Venue;

	fn server() -> RankServer {
		let catalog = VenueCatalog::new(vec![
			Venue {
				name: "Ring".to_string(),
				category: "Boxing".to_string(),
				environment: "Indoor".to_string(),
				levels: vec![1, 2, 3],
				address: None,
				latitude: Some(45.0),
				longitude: Some(-73.0),
			},
			Venue {
				name: "La Fontaine".to_string(),
				category: "Parks".to_string(),
				environment: "Outdoor".to_string(),
				levels: vec![],
				address: None,
				latitude: Some(45.1),
				longitude: Some(-73.1),
			},
		])
		.unwrap();
		RankServer::new(catalog)
	}

	#[test]
	fn stats_reports_catalog_shape() {
		let mut s = server();
		let out = s.handle("catalog/stats", Value::Null).unwrap();
		assert_eq!(out["venueCount"], 2);
		assert_eq!(out["dimension"], 7);
		assert_eq!(out["ratingCount"], 0);
	}

	#[test]
	fn recommend_returns_ordered_names() {
		let mut s = server();
		let out = s
			.handle(
				"recommend",
				json!({"categories": ["Boxing"], "environment": "Indoor"}),
			)
			.unwrap();
		assert_eq!(out["names"], json!(["Ring"]));
		assert_eq!(out["venues"][0]["name"], "Ring");
	}

	#[test]
	fn recommend_rejects_malformed_params() {
		let mut s = server();
		let err = s.handle("recommend", json!({"categories": 42})).unwrap_err();
		assert_eq!(err.code, crate::protocol::INVALID_PARAMS);
	}

	#[test]
	fn rating_upsert_feeds_later_recommendations() {
		let mut s = server();
		s.handle(
			"rating/upsert",
			json!({"userId": "u1", "venueName": "Ring", "score": 4.0}),
		)
		.unwrap();
		let out = s
			.handle(
				"recommend",
				json!({"categories": ["Boxing"], "userId": "u1"}),
			)
			.unwrap();
		// The rated venue is never recommended back to the same user.
		assert_eq!(out["names"], json!([]));
	}

	#[test]
	fn rating_upsert_rejects_out_of_range_score() {
		let mut s = server();
		let err = s
			.handle(
				"rating/upsert",
				json!({"userId": "u1", "venueName": "Ring", "score": 9.0}),
			)
			.unwrap_err();
		assert_eq!(err.code, crate::protocol::ENGINE_ERROR);
		assert_eq!(err.data.unwrap()["rankCode"], "RANK_RATING_RANGE");
	}

	#[test]
	fn unknown_method_is_rejected() {
		let mut s = server();
		let err = s.handle("catalog/drop", Value::Null).unwrap_err();
		assert_eq!(err.code, crate::protocol::METHOD_NOT_FOUND);
	}
}
