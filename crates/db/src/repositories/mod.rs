//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod asset_event_repo;
pub mod asset_repo;
pub mod assignment_repo;
pub mod import_job_repo;
pub mod reference_repo;

pub use asset_event_repo::AssetEventRepo;
pub use asset_repo::{AssetRepo, ResolvedRefs};
pub use assignment_repo::AssignmentRepo;
pub use import_job_repo::ImportJobRepo;
pub use reference_repo::ReferenceRepo;
