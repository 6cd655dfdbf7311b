//! Bounty Wizard - a three-step terminal wizard for creating bounties
//!
//! The form model and wizard controller are usable without a terminal;
//! the binary wraps them in a ratatui front end and a few draft commands.

pub mod app;
pub mod config;
pub mod draft;
pub mod form;
pub mod logging;
pub mod logo;
pub mod ui;
pub mod wizard;
