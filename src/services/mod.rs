//! Request workflows: validation, existence checks, conflict checks, then
//! persistence, in that order.
//!
//! The load/check/write steps are not wrapped in a transaction. Two requests
//! booking the same slot at the same moment can both pass the conflict check.

pub mod meeting;
pub mod user;
