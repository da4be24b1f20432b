pub mod groups;
pub mod panels;
pub mod plot;
