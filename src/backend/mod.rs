#[cfg(feature = "sync")]
pub mod sync_client;
pub mod traits;
#[cfg(feature = "async")]
pub mod async_client;

pub use traits::*;
