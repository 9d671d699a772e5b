pub mod annotate;
pub mod dispatch;
pub mod init;
pub mod revise;
pub mod schema;
pub mod score;
pub mod shared;
pub mod tool;
pub mod validate;
