// Domain layer: step definitions, outcomes and ports. No HTTP or filesystem access here.

pub mod context;
pub mod model;
pub mod ports;
