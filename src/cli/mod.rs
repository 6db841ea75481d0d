/*!
# CLI module
Command line interface functionality that is specific to vcfconcord.
*/

/// The main CLI module that contains the top-level CLI parser and help text
pub mod core;
/// The compare CLI subcommand
pub mod compare;
