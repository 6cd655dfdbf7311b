//! Render methods for each wizard view

mod backer;
mod basics;
mod rewards;
mod submitted;
