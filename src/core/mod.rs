//! # Core Module
//!
//! Concurrency primitives used to share crate state between threads.
//!
//! ## Usage
//! ```rust
//! use chunk_store::core::MtResource;
//!
//! let counter = MtResource::new(0);
//! *counter.get_mut() += 1;
//! assert_eq!(*counter.get(), 1);
//! ```

pub mod mt_resource;

pub use mt_resource::MtResource;
