#![doc = include_str!("../README.md")]
#![no_std]
#![deny(
    unsafe_code,
    unused_imports,
    unused_variables,
    unused_must_use,
    missing_docs,
    clippy::all,
    clippy::unwrap_used,
    clippy::expect_used,
    clippy::dbg_macro,
    clippy::todo,
    clippy::unimplemented
)]
#![allow(clippy::len_without_is_empty)]

#[macro_use]
extern crate alloc;

mod utils;
pub use utils::Queue;

mod error;
pub use error::{Result, TreeError};

mod config;
pub use config::{DuplicatePolicy, TreeConfig};

mod tree;
pub use tree::{FloatTree, NodeId, OrderedTree};

pub use ordered_float::OrderedFloat;
