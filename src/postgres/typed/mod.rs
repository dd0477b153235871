//! Bb8-backed Postgres typestate API.
//! Provides `PgConnection<Idle>` / `PgConnection<InTx>` using an owned client
//! and explicit BEGIN/COMMIT/ROLLBACK.

mod core;
mod executor;
mod tx;

pub use core::{Idle, InTx, PgConnection, PgManager};
