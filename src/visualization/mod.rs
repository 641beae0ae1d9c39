pub mod screen;

#[cfg(feature = "viewer")]
pub mod viewer2d;
