//! # CLI Behavior
//!
//! This is **one possible UI client** for listingsapp, not the application
//! itself. It is the only place that knows about terminal I/O, exit codes and
//! output formatting.
//!
//! ## Sessions From the Command Line
//!
//! A browser keeps its filter panel alive between clicks; the CLI rebuilds it
//! on every run from `--url`. That keeps the URL as the single source of
//! truth, exactly as a bookmarked page would be:
//!
//! ```text
//! listings search --filter 'district=["Yunusabad"]'
//!     -> /en/listings?filter_district=%5B%22Yunusabad%22%5D
//! listings search --url '/en/listings?filter_district=%5B%22Yunusabad%22%5D' \
//!     --filter 'price=[50000,150000]'
//! ```
//!
//! `--filter` values use the same encoding as the URL parameters, so
//! anything printed can be pasted back.
//!
//! ## Module Structure
//!
//! - `setup`: argument parsing via clap
//! - `commands`: per-command handlers that call the API and print results
//! - `render`: output formatting (colors, widths, relative times)

mod commands;
mod render;
pub mod setup;

pub use commands::run;
