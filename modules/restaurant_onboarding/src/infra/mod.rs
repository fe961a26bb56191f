//! Infrastructure layer - database storage and content stores

pub mod blob;
pub mod storage;
