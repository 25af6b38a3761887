//! HTTP routes of the web console.

pub mod api;
pub mod health;
pub mod page;
