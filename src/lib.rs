//! Line-protocol TCP server that deals out short jokes and proverbs.
//!
//! Every client cycles through four distinct, randomly drawn items per
//! content mode before a fresh batch is selected; its place in the
//! cycle rides in an opaque 8-bit progress word it echoes back with
//! each request ([`progress`]). A separate admin port flips the
//! process-wide joke/proverb mode, relabels the admin port, or shuts
//! the server down while client traffic is in flight.

pub mod admin;
pub mod cli;
pub mod conn;
pub mod console;
pub mod ident;
pub mod pool;
pub mod progress;
pub mod rotation;
pub mod server;
pub mod state;
