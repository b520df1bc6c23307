// src/stats/mod.rs
//
// The aggregation core: flattening the nested results tree, grouping
// attempts per student, and ordering the leaderboard. Everything in here is
// pure and synchronous; handlers feed it data fetched from the store.

pub mod aggregate;
pub mod rank;
pub mod tree;
