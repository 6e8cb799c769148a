pub mod normalize;
pub mod progress;
pub mod session_builder;
pub mod stats;
pub mod weight;
