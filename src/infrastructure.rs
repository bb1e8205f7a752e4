//! Infrastructure layer: extraction engine, platform modules and logging.

pub mod extraction;
pub mod logging;
