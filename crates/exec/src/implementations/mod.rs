//! Concrete process runners

pub mod tokio_runner;
