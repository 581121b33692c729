mod component;
mod render;
mod scroll;
mod table;
mod tooltip;

pub use component::DiagramView;
