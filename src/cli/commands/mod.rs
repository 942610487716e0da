pub mod init;
pub mod scan;
pub mod suggest;
pub mod wrap;
