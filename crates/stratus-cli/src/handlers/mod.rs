pub mod configure;
pub mod create;
pub mod dcv;
pub mod delete;
pub mod export_image_logs;
pub mod fleet;
pub mod image;
pub mod instances;
pub mod list;
pub mod ssh;
pub mod status;
pub mod update;
pub mod version;
