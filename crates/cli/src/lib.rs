//! glyphkit CLI library.

pub mod bridge;
pub mod cli;
pub mod extract;
pub mod info;
pub mod io;
pub mod parallel;
pub mod subset;
pub mod validate;

pub use bridge::Bridge;
