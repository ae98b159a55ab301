pub mod add;
pub mod cert;
pub mod common;
pub mod list;
pub mod remove;
pub mod status;
