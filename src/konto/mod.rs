//! Client-side onboarding and login flows.
//!
//! The [`flow`] module holds the form controller; [`api`] talks to the
//! authentication server; [`storage`] carries the handoff between the signup
//! and login invocations; [`term`] renders everything in a terminal.

pub mod api;
pub mod draft;
pub mod flow;
pub mod storage;
pub mod term;
pub mod types;
