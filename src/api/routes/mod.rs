//! API Routes
//!
//! Route handlers organized by functionality.

pub mod charts;
pub mod features;
pub mod health;
pub mod predict;
