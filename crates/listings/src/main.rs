//! # listings CLI
//!
//! A terminal client for the `listingsapp` library. The binary is thin: the
//! client lives in `src/cli/` and this file only calls `cli::run()` and turns
//! an error into exit status 1.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (crates/listings/src/cli/)                       │
//! │  - clap argument parsing (setup.rs)                         │
//! │  - session wiring and dispatch (commands.rs)                │
//! │  - colored terminal output (render.rs)                      │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  listingsapp::api::ListingsApi<FileSource>                  │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each invocation is one short-lived browser session: the `--url` is decoded
//! into applied filters, the session is mounted, the requested edits are made
//! and applied, and the result is printed along with the rewritten URL.

mod cli;

fn main() {
    if let Err(e) = cli::run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
