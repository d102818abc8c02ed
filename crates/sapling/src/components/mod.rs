pub mod component;
pub mod entity;
pub mod follow;
pub mod surface;
