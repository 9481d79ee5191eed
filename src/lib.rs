pub mod aggregate;
pub mod extract;
pub mod normalize;
pub mod output;
pub mod stats;
