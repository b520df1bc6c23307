// src/utils/mod.rs

pub mod hash;
pub mod jwt;
pub mod keys;
pub mod policy;
pub mod sanitize;
