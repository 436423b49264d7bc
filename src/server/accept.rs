use std::sync::Arc;

use rocket::{http::Status, State};
use tracing::debug;

use crate::{
    counter::{unique_counter::UniqueCounter, Identifier},
    forward::{forward_client::ForwardClient, forward_method::ForwardMethod},
};

type Reply = (Status, &'static str);

const OK: Reply = (Status::Ok, "OK");
const FAILED: Reply = (Status::Ok, "Failed");
const MISSING_ID: Reply = (Status::BadRequest, "ID parameter is missing");
const INVALID_ID: Reply = (Status::BadRequest, "Invalid ID parameter");
const GET_ONLY: Reply = (Status::MethodNotAllowed, "Only GET method is allowed");

/// Counts `id` if it is new, then optionally forwards to `endpoint`.
///
/// A failed forward still answers 200, with `Failed` as the body. Repeated
/// query parameters resolve to their first value.
#[rocket::get("/accept?<id>&<endpoint>&<method>")]
pub async fn accept(
    id: Vec<&str>,
    endpoint: Vec<String>,
    method: Vec<String>,
    counter: &State<Arc<UniqueCounter>>,
    forward_client: &State<ForwardClient>,
) -> Reply {
    let id: Identifier = match first(id) {
        None | Some("") => return MISSING_ID,
        Some(raw) => match raw.parse() {
            Ok(id) => id,
            Err(_) => return INVALID_ID,
        },
    };

    let first_sight = counter.observe(id);
    debug!(id, first_sight, "observed request id");

    let endpoint = first(endpoint);
    let endpoint = match endpoint.as_deref() {
        None | Some("") => return OK,
        Some(endpoint) => endpoint,
    };

    let method = ForwardMethod::parse(first(method).as_deref());
    if forward_client.forward(endpoint, method).await {
        OK
    } else {
        FAILED
    }
}

fn first<T>(values: Vec<T>) -> Option<T> {
    values.into_iter().next()
}

// an explicit HEAD route keeps Rocket from answering HEAD through `accept`
#[rocket::head("/accept")]
pub fn accept_head() -> Reply {
    GET_ONLY
}

#[rocket::options("/accept")]
pub fn accept_options() -> Reply {
    GET_ONLY
}

#[rocket::post("/accept")]
pub fn accept_post() -> Reply {
    GET_ONLY
}

#[rocket::put("/accept")]
pub fn accept_put() -> Reply {
    GET_ONLY
}

#[rocket::delete("/accept")]
pub fn accept_delete() -> Reply {
    GET_ONLY
}

#[rocket::patch("/accept")]
pub fn accept_patch() -> Reply {
    GET_ONLY
}
