//! Rendering of SQL DDL statements. Every statement is a plain struct
//! implementing `Display`, so rendering is pure and the output can be compared
//! byte for byte in tests.

#![deny(rust_2018_idioms, unsafe_code)]

#[cfg(feature = "postgres")]
pub mod postgres;

mod common;

pub use common::IteratorJoin;
