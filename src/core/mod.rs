pub mod animation;
pub mod color;
pub mod constants;
pub mod feedback;
pub mod model;
pub mod particles;
pub mod store;
pub mod surface;

pub use animation::*;
pub use color::*;
pub use feedback::*;
pub use model::*;
pub use particles::*;
pub use store::*;
pub use surface::*;
