//! Client and backend for a single shared grocery list.
//!
//! The client side ([`client::ListClient`]) issues the form-encoded mutations
//! and the list load against `/api/*`. The server side ([`routes`] over
//! [`store::Database`]) is what those requests talk to.

pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod routes;
pub mod store;
