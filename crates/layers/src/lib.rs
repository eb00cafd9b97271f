pub mod countries;
pub mod details;
pub mod svg;
pub mod symbology;
pub mod zoom;

pub use countries::*;
pub use details::*;
pub use symbology::*;
pub use zoom::*;
