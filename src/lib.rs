
/// Command line interface functionality
pub mod cli;
/// Contains various shared data types and the comparison metrics
pub mod data_types;
/// Tooling for parsing input files into meaningful structs / data
pub mod parsing;
/// Various utility functions that tend to be very generic
pub mod util;
/// All output writers
pub mod writers;
