pub mod pages;
pub mod view;

pub use pages::{component_link_updates, page_number_updates, tag_update, PageNumbering};
pub use view::UnitView;
