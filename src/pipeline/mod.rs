//! Pipeline stages for one extraction request.
//!
//! Each submodule implements exactly one step, so each can be tested
//! without a running service.
//!
//! ## Data Flow
//!
//! ```text
//! upload ──▶ request ──▶ response ──▶ normalize
//! (multipart)  (POST)    (status/JSON)  (optional)
//! ```
//!
//! 1. [`upload`]    wrap the selected file (or nothing) as the `file` part
//! 2. [`request`]   POST it; the only stage with network I/O
//! 3. [`response`]  map status and JSON body onto fields or an error
//! 4. [`normalize`] optional per-field cleanup of verbose answers

pub mod normalize;
pub mod request;
pub mod response;
pub mod upload;
