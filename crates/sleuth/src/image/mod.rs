pub mod layout;
mod store;

#[cfg(test)]
pub mod mock;

pub use store::ByteStore;

#[cfg(test)]
pub use mock::ImageBuilder;
