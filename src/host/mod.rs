//! Ready-made hosts.
//!
//! [`FsHost`] backs hosted mode with a directory on disk.

pub mod fs;

pub use fs::FsHost;
