pub mod incise;
pub mod interpolate;
pub mod maker;
pub mod makers;
pub mod music;
pub mod spelling;
pub mod state;
pub mod talea;

// Utility modules
pub mod error;

pub use rmakers_core::rational::Rational;
