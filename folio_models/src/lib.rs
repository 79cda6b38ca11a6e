//! Domain types shared by every layer of the backend.
//!
//! This crate has no server-side dependencies, so the contact form rules in
//! [`contact`] can be linked into the user interface as well as the API.

pub mod contact;
mod macros;
