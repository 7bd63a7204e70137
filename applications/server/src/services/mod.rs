/// Server services
pub mod passwords;
pub mod uploads;

pub use passwords::PasswordService;
pub use uploads::{UploadStore, UploadedFile};
