//! Files module - uploaded file model, the storage trait and a local-disk store.

mod files_model;
mod files_traits;
mod local_store;

pub use files_model::{stored_name, UploadedFile};
pub use files_traits::FileStoreTrait;
pub use local_store::LocalFileStore;
