#![deny(missing_debug_implementations)]
#![deny(rustdoc::broken_intra_doc_links)]

//! # cafedb-entities
//!
//! Reusable, agnostic domain entities for CafeDB.
//!
//! The entities only contain generic functionality that does not reveal any application-specific business logic.

pub mod address;
pub mod cafe;
pub mod comment;
pub mod geo;
pub mod id;
pub mod location;
pub mod password;
pub mod slug;
pub mod time;
pub mod user;
pub mod vote;

#[cfg(any(test, feature = "builders"))]
pub mod builders;
