pub mod accumulator;
pub mod histogram;
pub mod normalizer;
pub mod pixel_source;
pub mod renderer;
pub mod utils;
