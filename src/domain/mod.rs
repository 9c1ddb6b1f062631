// Domain layer: operations, payload types and the ports the client implements.

pub mod model;
pub mod ports;
