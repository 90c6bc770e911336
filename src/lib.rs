// ---------------------------------------------------------------------------
// venue-rank-engine — ranks activity venues for a user's preferences
// ---------------------------------------------------------------------------
//
// The catalog is encoded once into a shared feature space
// ([`vocabulary`], cached by [`catalog::VenueCatalog`]); each request
// then runs hard filters, content scoring with a rating boost
// ([`personalization`]), neighborhood collaborative prediction
// ([`collaborative`]), the hybrid blend ([`hybrid`]), and the geo-aware
// final ordering ([`geo`]). [`server`] exposes the pipeline over
// JSON-RPC 2.0 / NDJSON stdio.
// ---------------------------------------------------------------------------

pub mod catalog;
pub mod collaborative;
pub mod cosine;
pub mod error;
pub mod filters;
pub mod geo;
pub mod hybrid;
pub mod personalization;
pub mod protocol;
pub mod ratings;
pub mod recommender;
pub mod server;
pub mod types;
pub mod vocabulary;
