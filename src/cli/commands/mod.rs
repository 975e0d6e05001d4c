pub mod check;
mod command_result;
pub mod helper;
pub mod init;
pub mod rewrite;
pub mod scan;
pub mod suggest;
pub mod sync;
pub mod translate;

pub use command_result::*;
