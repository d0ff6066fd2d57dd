//! Handler Module
//!
//! Request/response surface used by external dispatch layers.
//!
//! A dispatch layer (polling client, chat bot, CLI) receives a named request
//! with string arguments, turns it into a [`Request`] and hands it to
//! [`Handler::dispatch`]. Every call returns a [`Reply`]; failures are
//! reported as `Reply::Error` with a human-readable message rather than
//! propagated. Transport, retries and backoff belong to the caller.
//!
//! ### Requests
//! - `ping`
//! - `add_fields   <path> <identifier> <sub-key> <value> [<sub-key> <value>]...`
//! - `set_value    <path> <identifier> <sub-key> <value>`
//! - `list_keys    <path>`
//! - `list_values  <path> <identifier> [with_keys] [raw]`
//! - `delete_key   <path> <identifier>`
//! - `delete_all   <path>`

mod dispatch;
mod reply;
mod request;

pub use dispatch::Handler;
pub use reply::Reply;
pub use request::Request;
