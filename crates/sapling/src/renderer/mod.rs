pub mod draw_list;
pub mod viewport;

pub use draw_list::{DrawInstance, DrawList};
pub use viewport::Viewport;
