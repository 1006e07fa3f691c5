//! # vibrae-domain
//!
//! Pure domain model for the vibrae garden music/ambience client.
//!
//! ## Responsibilities
//! - Foundational types: typed identifiers, error conventions, time-of-day helpers
//! - Define **Routines** (recurring time windows that play a scene at a volume)
//! - Define **Scenes** (named references to backend-managed audio folders)
//! - Recurrence sets and their human-readable summaries
//! - The schedule **activity evaluator** ("which routine is active now?")
//! - The **calendar grid** (representative week + per-day events)
//! - Player push messages and log listings as exchanged with the backend
//!
//! ## Dependency rule
//! This crate has **no internal dependencies**.
//! It must never import anything from `app`, adapters, or IO crates.
//! All IO boundaries are expressed as traits in the `app` crate (ports).

pub mod error;
pub mod id;
pub mod time;

pub mod activity;
pub mod calendar;
pub mod logs;
pub mod player;
pub mod recurrence;
pub mod routine;
pub mod scene;
pub mod session;
