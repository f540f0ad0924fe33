//! Minimal image containers shared by the distance transform and the probe tool.
//!
//! - [`ImageU8`]: borrowed 8-bit grayscale view (scanned page).
//! - [`ImageF32`]: owned float buffer, backing store of a distance field.
//! - [`io`]: loading pages from disk and writing JSON/PNG artifacts.
pub mod f32;
pub mod io;
pub mod traits;
pub mod u8;

pub use self::f32::ImageF32;
pub use self::traits::{ImageView, Rows};
pub use self::u8::ImageU8;
