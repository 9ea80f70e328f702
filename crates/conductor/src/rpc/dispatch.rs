//! Method dispatch for the `conductor` JSON-RPC namespace.

use conductor_common::ExecutionPayload;
use conductor_common::constants::methods;
use futures::future::join_all;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::ConductorApi;
use super::jsonrpc::{JSONRPC_VERSION, RpcError, RpcRequest, RpcResponse};

/// Reply to an HTTP request body: one response, or one per answered batch entry
#[derive(Debug, Serialize)]
#[serde(untagged)]
pub enum RpcReply {
    Single(RpcResponse),
    Batch(Vec<RpcResponse>),
}

/// Decode a request body and run every call it contains.
///
/// Batch entries run concurrently; responses keep request order. Notifications
/// (calls without an `id`) are executed but never answered, so `None` means
/// there is nothing to send back.
pub async fn handle_body(
    api: &dyn ConductorApi,
    max_batch_size: usize,
    body: &[u8],
) -> Option<RpcReply> {
    let value: Value = match serde_json::from_slice(body) {
        Ok(v) => v,
        Err(e) => {
            let error = RpcError::parse_error(e);
            return Some(RpcReply::Single(RpcResponse::failure(Value::Null, error)));
        }
    };

    match value {
        Value::Array(calls) => {
            if calls.is_empty() {
                return Some(RpcReply::Single(RpcResponse::failure(
                    Value::Null,
                    RpcError::invalid_request("empty batch"),
                )));
            }
            if calls.len() > max_batch_size {
                return Some(RpcReply::Single(RpcResponse::failure(
                    Value::Null,
                    RpcError::invalid_request(format!(
                        "batch of {} exceeds limit of {}",
                        calls.len(),
                        max_batch_size
                    )),
                )));
            }

            tracing::debug!(size = calls.len(), "Handling JSON-RPC batch");
            let responses: Vec<RpcResponse> =
                join_all(calls.into_iter().map(|call| handle_call(api, call)))
                    .await
                    .into_iter()
                    .flatten()
                    .collect();

            if responses.is_empty() {
                None
            } else {
                Some(RpcReply::Batch(responses))
            }
        }
        call => handle_call(api, call).await.map(RpcReply::Single),
    }
}

/// Run a single call; `None` for a notification
async fn handle_call(api: &dyn ConductorApi, call: Value) -> Option<RpcResponse> {
    let id = call.get("id").cloned();
    let reply_id = id.clone().unwrap_or(Value::Null);

    let request: RpcRequest = match serde_json::from_value(call) {
        Ok(r) => r,
        Err(e) => return Some(RpcResponse::failure(reply_id, RpcError::invalid_request(e))),
    };
    if request.jsonrpc != JSONRPC_VERSION {
        let error = RpcError::invalid_request(format!(
            "unsupported jsonrpc version {:?}",
            request.jsonrpc
        ));
        return Some(RpcResponse::failure(reply_id, error));
    }

    tracing::debug!(method = %request.method, id = %reply_id, "JSON-RPC call");

    let result = dispatch(api, &request.method, request.params).await;
    match id {
        Some(id) => Some(RpcResponse::from_result(id, result)),
        None => {
            if let Err(e) = result {
                tracing::debug!(
                    method = %request.method,
                    error = %e,
                    "JSON-RPC notification failed"
                );
            }
            None
        }
    }
}

/// Run one method against the API
pub async fn dispatch(
    api: &dyn ConductorApi,
    method: &str,
    params: Option<Value>,
) -> Result<Value, RpcError> {
    match method {
        methods::ACTIVE => {
            no_params(params)?;
            to_value(api.active().await?)
        }
        methods::PAUSE => {
            no_params(params)?;
            to_value(api.pause().await?)
        }
        methods::RESUME => {
            no_params(params)?;
            to_value(api.resume().await?)
        }
        methods::LEADER => {
            no_params(params)?;
            to_value(api.leader().await?)
        }
        methods::LEADER_WITH_ID => {
            no_params(params)?;
            to_value(api.leader_with_id().await?)
        }
        methods::ADD_SERVER_AS_VOTER => {
            let (id, addr): (String, String) = parse_params(params)?;
            to_value(api.add_server_as_voter(&id, &addr).await?)
        }
        methods::ADD_SERVER_AS_NONVOTER => {
            let (id, addr): (String, String) = parse_params(params)?;
            to_value(api.add_server_as_nonvoter(&id, &addr).await?)
        }
        methods::REMOVE_SERVER => {
            let (id,): (String,) = parse_params(params)?;
            to_value(api.remove_server(&id).await?)
        }
        methods::TRANSFER_LEADER => {
            no_params(params)?;
            to_value(api.transfer_leader().await?)
        }
        methods::TRANSFER_LEADER_TO_SERVER => {
            let (id, addr): (String, String) = parse_params(params)?;
            to_value(api.transfer_leader_to_server(&id, &addr).await?)
        }
        methods::COMMIT_UNSAFE_PAYLOAD => {
            let (payload,): (ExecutionPayload,) = parse_params(params)?;
            to_value(api.commit_unsafe_payload(payload).await?)
        }
        _ => Err(RpcError::method_not_found(method)),
    }
}

fn no_params(params: Option<Value>) -> Result<(), RpcError> {
    match params {
        None | Some(Value::Null) => Ok(()),
        Some(Value::Array(items)) if items.is_empty() => Ok(()),
        Some(other) => Err(RpcError::invalid_params(format!(
            "expected no parameters, got {other}"
        ))),
    }
}

/// Decode positional params into a tuple
fn parse_params<T: DeserializeOwned>(params: Option<Value>) -> Result<T, RpcError> {
    let params = match params {
        None | Some(Value::Null) => Value::Array(Vec::new()),
        Some(p) => p,
    };
    serde_json::from_value(params).map_err(RpcError::invalid_params)
}

fn to_value<T: Serialize>(value: T) -> Result<Value, RpcError> {
    serde_json::to_value(value).map_err(RpcError::internal)
}
