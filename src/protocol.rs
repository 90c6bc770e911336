// ---------------------------------------------------------------------------
// JSON-RPC 2.0 protocol types for the NDJSON stdio front-end
// ---------------------------------------------------------------------------

use serde::Deserialize;
use serde_json::{json, Value};

// JSON-RPC 2.0 error codes
pub const INTERNAL_ERROR: i32 = -32603;
pub const METHOD_NOT_FOUND: i32 = -32601;
pub const INVALID_PARAMS: i32 = -32602;
pub const ENGINE_ERROR: i32 = -32000;

#[derive(Debug, Deserialize)]
pub struct JsonRpcRequest {
	pub id: u64,
	pub method: String,
	#[serde(default)]
	pub params: Value,
}

/// A dispatch failure, ready to serialize as a JSON-RPC error object.
#[derive(Debug)]
pub struct RpcFailure {
	pub code: i32,
	pub message: String,
	pub data: Option<Value>,
}

impl RpcFailure {
	pub fn method_not_found(method: &str) -> Self {
		Self {
			code: METHOD_NOT_FOUND,
			message: format!("Method not found: {method}"),
			data: None,
		}
	}

	pub fn invalid_params(detail: impl std::fmt::Display) -> Self {
		Self {
			code: INVALID_PARAMS,
			message: format!("Invalid params: {detail}"),
			data: None,
		}
	}

	pub fn engine(error: &crate::error::EngineError) -> Self {
		Self {
			code: ENGINE_ERROR,
			message: error.to_string(),
			data: Some(error.to_json_rpc_error()),
		}
	}
}

pub fn result_frame(id: u64, result: Value) -> Value {
	json!({
		"jsonrpc": "2.0",
		"id": id,
		"result": result,
	})
}

pub fn error_frame(id: u64, failure: &RpcFailure) -> Value {
	let mut error = json!({
		"code": failure.code,
		"message": failure.message,
	});
	if let Some(data) = &failure.data {
		error["data"] = data.clone();
	}
	json!({
		"jsonrpc": "2.0",
		"id": id,
		"error": error,
	})
}
