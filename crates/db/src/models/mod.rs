pub mod asset;
pub mod asset_event;
pub mod assignment;
pub mod import_job;
pub mod reference;
