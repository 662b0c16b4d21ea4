pub mod use_wheels;

pub use use_wheels::*;
