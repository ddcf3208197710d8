#![doc = include_str!("../README.md")]
//!
//! # Module Structure
//!
//! - [`source`]: Raw text abstraction (`InfoSource`, `DataSource` trait)
//! - [`local`]: Local shell commands (`LocalSource`)
//! - [`ssh`]: Remote commands over OpenSSH (`SshSource`)
//! - [`logs`]: Collected log directories (`LogDirSource`)
//! - [`tarball`]: Collected log archives (`TarballSource`)
//! - [`memory`]: Captured text held in memory (`StaticSource`)
//! - [`host`]: Inventory operations over any source (`Host`)

pub mod host;
pub mod local;
pub mod logs;
pub mod memory;
pub mod source;
pub mod ssh;
pub mod tarball;

// --- Public API Re-exports ---

pub use host::{Host, SOCKET_COUNT};
pub use local::LocalSource;
pub use logs::LogDirSource;
pub use memory::StaticSource;
pub use source::{DataSource, InfoSource};
pub use ssh::SshSource;
pub use tarball::TarballSource;
