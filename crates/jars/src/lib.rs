//! `splitbooks-jars` — shared savings goals with two-party contribution tracking.

pub mod jar;

pub use jar::{Contributions, DepositEntry, Jar};
