//! edutask - Schema-validated document DAO layer
//!
//! Collections of JSON documents guarded by validators, data access objects
//! over them, and the user controller built on top.

pub mod config;
pub mod controllers;
pub mod dao;
pub mod models;
pub mod observability;
pub mod schema;
pub mod store;
