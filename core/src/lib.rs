//! Core business logic for VitaPlan.
//!
//! The crate is split the usual way: `domain` holds the entities, the static
//! meal catalog, the recommendation engine and the ports; `infrastructure`
//! holds the local (SQLite) and remote (Firestore) adapters; `application`
//! wires them into a ready-to-use service.

pub mod application;
pub mod domain;
pub mod entity;
pub mod infrastructure;
