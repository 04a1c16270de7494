#[macro_use]
extern crate log;

mod imgdsc;
pub mod logging;
mod rgb565;

pub use imgdsc::render_image_dsc;
pub use imgdsc::write_image_dsc;
pub use rgb565::convert_image;
pub use rgb565::pack_rgb565;
pub use rgb565::ConversionSummary;
