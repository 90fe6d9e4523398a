//! Repository functions over the relational store. Each function takes a
//! connection and returns fully materialized rows or DTOs, so the eager
//! loading contract is visible in the signature and no handler traverses
//! relations lazily.

pub mod categories;
pub mod recipes;
pub mod tags;
