//! Model to entity mappers
//!
//! Conversions from database rows into `roster-core` entities.

mod member;
mod refresh_token;
