//! Wire contract for the inventory engine: per-command status enums and
//! read-model projections. Every command returns a typed status, never a
//! thrown fault — one enum per command rather than one shared error type,
//! so each command's return type statically encodes its own valid outcomes.

pub mod read_model;
pub mod status;

pub use read_model::*;
pub use status::*;
