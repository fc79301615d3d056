pub mod file_storage;
pub mod generative_model;

pub use file_storage::FileStorage;
pub use generative_model::GenerativeModel;
