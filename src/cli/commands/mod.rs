pub mod analyze;
pub mod classify;
pub mod helper;
pub mod init;
