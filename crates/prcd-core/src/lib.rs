//! PRCD Core - quotation loader and random picker
//!
//! PRCD Core turns a directory of flat-text prcd files into an in-memory
//! [`Grimoire`] and serves random quotations out of it.
//!
//! # Architecture
//!
//! PRCD is built on two layers:
//!
//! 1. **Loader** (`loader`): scans `prcd_*.txt` files and parses them into sections
//! 2. **Grimoire** (`grimoire`): read-only section map with uniform random picks
//!
//! # Quick Start
//!
//! ```no_run
//! use prcd_core::load_dir;
//!
//! let grimoire = load_dir("/usr/share/prcd").unwrap();
//!
//! let (moccolo, section) = grimoire.from_random_section().unwrap();
//! println!("{} ({}) [{}]", moccolo.text, moccolo.author, section);
//! ```
//!
//! # File format
//!
//! ```text
//! All you need. (Beatles)
//! optimized for vinyl
//! Roses are red.
//! ```
//!
//! Each line is a quotation with an optional trailing `(Author)`. Lines that
//! start with `optimiz` (any case) are appended to the previous quotation.

#![deny(unsafe_code)]
#![warn(rust_2018_idioms, missing_debug_implementations, clippy::all)]

pub mod error;
pub mod grimoire;
pub mod loader;
pub mod moccolo;

// Re-export commonly used types for convenience
pub use error::{LoadError, PrcdError, Result, ResultExt};
pub use grimoire::Grimoire;
pub use loader::{load_dir, load_file, parse_entries, parse_line};
pub use moccolo::{Moccolo, Section, UNKNOWN_AUTHOR};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Library name
pub const NAME: &str = env!("CARGO_PKG_NAME");
