pub mod cluster;
pub mod connect;
pub mod image;
pub mod logs;
