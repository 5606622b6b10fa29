mod det_box;
mod detection;
mod detection_result;
mod displayed_image;
mod selected_file;

pub use det_box::*;
pub use detection::*;
pub use detection_result::*;
pub use displayed_image::*;
pub use selected_file::*;
