pub mod country_data;
pub mod geography;

pub use country_data::*;
pub use geography::*;
