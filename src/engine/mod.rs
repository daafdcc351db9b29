//! Engine modules: the "brain" that turns a cargo collection into a plan.
//!
//! The engine layer sits between the data model (what is on the trailer)
//! and the presentation layer (how the plan is shown). It generates
//! deterministic, validated placements.

pub mod allocation;
