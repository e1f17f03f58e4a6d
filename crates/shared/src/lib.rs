//! Wire contract between the process-mapping client and the analysis backend.

pub mod error;
pub mod protocol;
