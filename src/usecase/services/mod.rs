pub mod aggregate_service;
pub mod export_service;
pub mod filter_service;
pub mod import_service;
