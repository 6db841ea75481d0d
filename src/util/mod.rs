
/// Helper functions for opening (possibly compressed) files and preparing output paths
pub mod file_io;
/// Helper functions for read/writing JSON via serde
pub mod json_io;
