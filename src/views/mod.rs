//! Headless view models: derived output and local form state, no I/O

pub mod banner;
pub mod dashboard;
pub mod password_reset;
pub mod theme;

pub use banner::{Banner, BannerKind};
pub use dashboard::{tiles, Tile};
pub use password_reset::PasswordResetForm;
pub use theme::Palette;
