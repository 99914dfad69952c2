//! Output helpers.
//!
//! Results go to stdout as pretty JSON so they can be piped into `jq`;
//! logs go to stderr.

use linebot_messaging::BasicResponse;
use serde::Serialize;

/// Print a response as pretty JSON.
pub fn print_json<T: Serialize>(value: &T) -> anyhow::Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

/// Print the request IDs of an empty response.
pub fn print_basic(response: &BasicResponse) -> anyhow::Result<()> {
    print_json(&basic_json(response))
}

fn basic_json(response: &BasicResponse) -> serde_json::Value {
    let mut value = serde_json::json!({ "status": "ok" });
    if let Some(id) = &response.request_id {
        value["requestId"] = id.as_str().into();
    }
    if let Some(id) = &response.accepted_request_id {
        value["acceptedRequestId"] = id.as_str().into();
    }
    value
}
