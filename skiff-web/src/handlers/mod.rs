//! Request handlers, split by the upstream they front.

pub mod download;
pub mod probe;
pub mod qb;
pub mod search;
pub mod utils;
