// Domain layer: creature models and ports. Only serde/uuid beyond std.

pub mod model;
pub mod ports;
