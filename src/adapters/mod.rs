// Adapters layer: concrete implementations of the side-effect ports.

pub mod audit;
