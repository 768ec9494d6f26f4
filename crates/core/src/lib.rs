pub mod error;
pub mod geometry;
pub mod bisect;
pub mod model;
pub mod layout;
pub mod color;
pub mod text;
pub mod render;
pub mod svg;
pub mod scheme;
pub mod mapper;

pub use error::*;
pub use geometry::*;
pub use layout::*;
pub use model::*;
pub use render::*;
