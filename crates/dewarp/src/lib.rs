//! Fisheye lens dewarping.
//!
//! Builds the coordinate maps that rectify a circular fisheye image, either
//! with the calibration-free hemicylinder projection or with the
//! midpoint-circle construction on a circle fitted from boundary points, and
//! resamples images through them.
//!
//! ```no_run
//! use dewarp::{imgproc::fisheye, io::functional as F};
//!
//! let img = F::read_image_any_rgb8("fisheye.jpg").unwrap();
//! let config = fisheye::DewarpConfig::default();
//! let maps = fisheye::generate_dewarp_maps(img.size(), &config, &[]).unwrap();
//!
//! let src = img.cast_and_scale::<f32>(1.0).unwrap();
//! let dst = fisheye::dewarp_image(&src, &maps, &config).unwrap();
//! F::write_image_rgb8("rectified.png", &dst.to_u8_saturated().unwrap()).unwrap();
//! ```

#[doc(inline)]
pub use dewarp_image as image;

#[doc(inline)]
pub use dewarp_imgproc as imgproc;

#[doc(inline)]
pub use dewarp_io as io;
