mod detection_api;
mod media_host;
mod multipart;

pub use detection_api::*;
pub use media_host::*;
pub use multipart::MultipartForm;
