//! RocketShoes Core - Shared types library.
//!
//! This crate provides the types shared by the RocketShoes cart components:
//! - `cart` - Cart state container, store API client and storage backends
//! - `cli` - Command-line front end for the cart
//!
//! # Architecture
//!
//! The core crate contains only types - no I/O, no storage access,
//! no HTTP clients. This keeps it lightweight and allows it to be used anywhere.
//!
//! # Modules
//!
//! - [`types`] - Type-safe IDs, prices, and the product/stock records

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod types;

pub use types::*;
