//! A `.env` loader with pluggable environment repositories.
//!
//! 1. [About](#about)
//! 2. [File Format](#file-format)
//! 3. [Repositories](#repositories)
//! 4. [Cargo Features](#cargo-features)
//! 5. [Quick Example](#quick-example)
//!
//! ## About
//! `dotenv_loader` reads `NAME=value` files, resolves nested `${NAME}` references and writes
//! the variables into a [`Repository`]. A [`Repository`] is backed by a group of adapters, each
//! adapter gives access to one kind of environment, such as the process environment or an
//! in-memory map. [`Dotenv`] wires a [`Store`], a [`Loader`] and a [`Repository`] together.
//!
//! ## File Format
//!
//! * `NAME=value`, `export NAME=value`, or `NAME` without value.
//! * `'value'` is kept literally.
//! * `"value"` supports escapes `\"`, `\\`, `\$`, `\n`, `\r`, `\t`, `\f`, `\v` and may span lines.
//! * `${NAME}` in unquoted and double quoted values is replaced by the value of `NAME`
//!   if it exists, otherwise kept as is.
//! * `#` starts a comment outside quotes.
//!
//! ## Repositories
//! * [`RepositoryBuilder::create()`] uses the default adapters which are supported in the current
//!   process, in order: [`ApacheAdapter`], [`EnvConstAdapter`], [`ServerConstAdapter`],
//!   [`PutenvAdapter`].
//! * [`RepositoryBuilder::immutable()`] never overwrites existing variables.
//! * [`ArrayAdapter`] keeps variables in memory, see [`Dotenv::create_array_backed()`] and
//!   [`Dotenv::parse()`].
//!
//! ## Cargo Features
//! 1. `enable_log`, enable log record if enabled, default on.
//!
//! ## Quick Example
//!
//! ```
//! use dotenv_loader::*;
//!
//! let vars = Dotenv::parse("HOST=localhost\nURL=\"http://${HOST}:8080\"").unwrap();
//! assert_eq!(Some(Some("http://localhost:8080")), vars.get("URL"));
//!
//! let dir = std::env::temp_dir();
//! let mut dotenv = Dotenv::create_array_backed(&[dir], Some(&["no-such.env"][..]), true);
//! assert_eq!(true, dotenv.safe_load().unwrap().is_empty());
//! ```
//!
#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(
    anonymous_parameters,
    missing_copy_implementations,
    missing_debug_implementations,
    missing_docs,
    nonstandard_style,
    rust_2018_idioms,
    single_use_lifetimes,
    trivial_casts,
    trivial_numeric_casts,
    unreachable_pub,
    unused_extern_crates,
    unused_qualifications,
    variant_size_differences
)]

#[cfg(test)]
#[macro_use(quickcheck)]
extern crate quickcheck_macros;

mod err;
mod map;

pub use crate::err::DotenvError;
pub use crate::map::EnvMap;

mod repository;
pub use crate::repository::adapter::{
    filter_by_availability, Adapter, ApacheAdapter, ArrayAdapter, Availability, EnvConstAdapter,
    PutenvAdapter, Reader, ServerConstAdapter, Writer,
};
pub use crate::repository::builder::RepositoryBuilder;
pub use crate::repository::{AdapterRepository, Repository};

mod store;
pub use crate::store::builder::StoreBuilder;
pub use crate::store::{FileStore, Store, StringStore};

mod loader;
pub use crate::loader::{DefaultLoader, Loader};

mod validator;
pub use crate::validator::Validator;

mod dotenv;
pub use crate::dotenv::{Dotenv, LoadState};

pub(crate) const NOT_POSSIBLE: &str = "Not possible";
