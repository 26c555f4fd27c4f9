//! Request extractors that reject with [`AppError`](crate::error::AppError) so
//! failures reach the client as envelopes.

pub mod json;
pub mod user_id;

pub use json::JsonBody;
pub use user_id::UserId;
