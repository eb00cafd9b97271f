pub mod clip;
pub mod geo;
pub mod orthographic;
pub mod path;
pub mod rotation;
pub mod vec;

pub use geo::*;
pub use orthographic::*;
pub use path::*;
pub use rotation::*;
pub use vec::*;
