pub mod feature;
pub mod popup;
pub mod renderer;
