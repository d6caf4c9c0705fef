//! `SeaORM` entities backing the local store.

pub mod conversations;
pub mod diet_plans;
pub mod feedback;
pub mod users;
