//! Concrete package locators

pub mod node_modules;
