//! Pokedex team builder
//!
//! Catalog fetching, filtering, team composition and persistence live here so
//! the terminal front end stays thin and the pieces can be tested on their own.

pub mod action;
pub mod api;
pub mod config;
pub mod effect;
pub mod error;
pub mod filter;
pub mod pagination;
pub mod pokedex;
pub mod reducer;
pub mod state;
pub mod storage;
pub mod team;
pub mod types;
