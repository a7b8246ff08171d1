// Domain layer: catalog data, query types and ports. No HTTP or file access here.

pub mod catalog;
pub mod model;
pub mod ports;
pub mod query;
pub mod video;
