//! Unit test harness for plotter-motion.
//!
//! This module organizes unit tests for each component of the library.

mod axis_properties;
mod config_parsing;
mod config_validation;
