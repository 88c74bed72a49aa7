#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Native binary location for the gsoc2 command bridge.
//!
//! This crate answers one question: which `gsoc2-cli` executable should run
//! on this machine. It provides:
//! - The fixed table of published binary distributions, keyed by platform
//! - Host OS/architecture detection
//! - Package lookup behind the [`PackageLocator`] trait
//! - [`PlatformResolver`], which walks the resolution order and reports
//!   actionable errors when nothing matches

pub mod distribution;
pub mod implementations;
pub mod locator;
pub mod resolver;

pub use distribution::{
    BinaryDistribution, HostArch, HostOs, HostPlatform, PlatformKey, BINARY_DISTRIBUTIONS,
};
pub use implementations::node_modules::NodeModulesLocator;
pub use locator::PackageLocator;
pub use resolver::{PlatformResolver, PlatformResolverBuilder};
