mod config;
mod content_type;
mod error;
mod memory;
mod s3;
mod traits;

pub use config::{Credentials, StoreConfig};
pub use content_type::content_type_for;
pub use error::{CredentialsError, StoreError, StoreOperation};
pub use memory::{MemoryStore, StoredObject};
pub use s3::S3Store;
pub use traits::ObjectStore;
