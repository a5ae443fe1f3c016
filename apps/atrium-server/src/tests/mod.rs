//! Handler tests over a real in-memory SQLite store.

mod common;
mod handlers;
