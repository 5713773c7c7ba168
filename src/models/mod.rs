pub mod form;
pub mod item;
pub mod list;
