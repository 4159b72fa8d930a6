pub mod analyze;
pub mod capture;
pub mod export;
pub mod info;
