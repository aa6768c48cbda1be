//! Unit tests for the core crate.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

mod audio;
mod keys;
