//! # magick-exif
//!
//! Reads photographic metadata through ImageMagick's `identify` command and
//! normalizes it into an [`ExifInfo`]: camera make and model, pixel size,
//! resolution, orientation, capture time, focal length, exposure, aperture,
//! an HDR flag for Apple devices and signed GPS coordinates.
//!
//! `identify` prints tags as loosely typed text (`129/18`, `10/1, 30/1, 0/1`,
//! `2006:11:12 17:08:24`). Parsing is tolerant: a tag that is missing or
//! malformed leaves its field `None` and never turns into an error. The only
//! errors are those of running `identify` itself.
//!
//! ## Basic Usage
//!
//! ```no_run
//! use magick_exif::{Identify, IdentifyError};
//! use std::path::Path;
//!
//! fn main() -> Result<(), IdentifyError> {
//!     let identify = Identify::new(); // `identify` from PATH, 20 s timeout
//!     let exif = identify.extract_exif(Path::new("path/to/your/image.jpg"))?;
//!
//!     if let (Some(lat), Some(lon)) = (exif.latitude, exif.longitude) {
//!         println!("Taken at {lat:.5}, {lon:.5}");
//!     }
//!     println!("Captured: {:?}", exif.date_time);
//!     Ok(())
//! }
//! ```
//!
//! Text obtained some other way can be parsed directly:
//!
//! ```
//! use magick_exif::parse_exif;
//!
//! let exif = parse_exif("exif:GPSLatitude=10/1, 30/1, 0/1\n\
//!                        exif:GPSLatitudeRef=S\n\
//!                        exif:GPSLongitude=20/1, 0/1, 0/1\n\
//!                        exif:GPSLongitudeRef=W\n");
//! assert_eq!(exif.latitude, Some(-10.5));
//! assert_eq!(exif.longitude, Some(-20.0));
//! ```

// Public API
mod config;
mod error;
mod identify;
mod parser;
mod source;

pub use config::IdentifyConfig;
pub use error::IdentifyError;
pub use identify::{extract_exif_with_defaults, Identify, IDENTIFY_FORMAT};
pub use parser::parse_exif;
pub use source::{extract_exif, TagSource};

pub mod attributes;
pub mod parse_fn;
pub mod structs;
pub use structs::exif_info::ExifInfo;
