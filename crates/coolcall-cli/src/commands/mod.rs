pub mod call;
pub mod deck;
pub mod export;
pub mod import;
pub mod init;
pub mod start;
pub mod summary;
pub mod validate;
pub mod verify;
