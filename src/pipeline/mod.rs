// Pipeline stages shared by the hole-level and shot-level processors.

pub mod baseline;
pub mod category;
pub mod hole;
pub mod missing;
pub mod relative;
pub mod sanitize;
pub mod shot;
