//! Garbage collection for SpaceBindings whose Space, UserRecord or
//! originating SpaceBindingRequest has gone away.

pub mod access;
pub mod cluster;
pub mod config;
mod context;
pub mod controller;
pub mod decision;
mod error;
pub mod metrics;
pub mod origin;
pub mod resolver;
mod runtime;
#[cfg(test)]
mod testing;

pub use access::{KubeAccess, ObjectAccess};
pub use cluster::{MemberCluster, MemberClusters};
pub use context::Context;
pub use error::Error;
pub use runtime::start_cleanup_controller;

pub type Result<T, E = Error> = std::result::Result<T, E>;
