//! # Fragment Parsing
//!
//! Locates `#[ … #]` fragments in document text and picks the one nearest a cursor.
//!
//! ## Modules
//!
//! - **`span`**: `Span` byte ranges plus the overlap and distance helpers
//! - **`marker`**: `FragmentMarker` delimiter constants
//! - **`cursor`**: `Cursor` for byte-by-byte scanning with one byte of look-behind
//! - **`scanner`**: `scan()` single-pass, escape-aware fragment scanner
//! - **`nearest`**: `select_nearest()` cursor-to-fragment selection
//!
//! Every operation re-scans the whole document; spans carry no identity
//! between scans.

pub mod cursor;
pub mod marker;
pub mod nearest;
pub mod scanner;
pub mod span;

pub use marker::FragmentMarker;
pub use nearest::{nearest_with_distance, select_nearest};
pub use scanner::{scan, scan_from, scan_rope};
pub use span::Span;
