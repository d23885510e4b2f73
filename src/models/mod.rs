pub mod mount;
pub mod snapshot;
