//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod admin_setting_repo;
pub mod gear_product_repo;
pub mod lead_repo;
pub mod vehicle_repo;

pub use admin_setting_repo::AdminSettingRepo;
pub use gear_product_repo::GearProductRepo;
pub use lead_repo::LeadRepo;
pub use vehicle_repo::VehicleRepo;
