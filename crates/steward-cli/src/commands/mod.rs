pub mod advance;
pub mod apply;
pub mod dispatch;
pub mod gates;
pub mod impact;
pub mod lineage;
pub mod schema;
pub mod shared;
pub mod status;
pub mod summary;
pub mod validate_resolution;
