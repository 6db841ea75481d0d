/*!
# Writers module
Contains the logic for reporting and writing the output files for the compare command.
*/
/// Console, JSON, and CSV reporting of the comparison results
pub mod summary;
