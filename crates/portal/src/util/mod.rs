pub mod capability;
pub mod geocoding;
