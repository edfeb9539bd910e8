pub mod component;
pub mod full_page_loader;
pub mod input_box;
pub mod tab_bar;
pub mod toast;
pub mod totals_bar;
pub mod usage;

pub use component::{CapturesInput, Component, ComponentRender};
