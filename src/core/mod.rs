//! Pure widget logic, free of platform APIs so the host-side tests can
//! exercise it directly.

pub mod click;
pub mod keycap;
pub mod material;
pub mod model;

pub use click::*;
pub use keycap::*;
pub use material::*;
pub use model::*;
