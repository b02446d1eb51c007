pub mod app;
pub mod editor;
pub mod event;
pub mod input;
pub mod render;
pub mod surface;
pub mod theme;

#[cfg(test)]
pub(crate) mod test_helpers;

pub use app::run;
