//! Storage - read-only settings files

pub mod json {
    mod store;
    pub use store::JsonStore;
}

pub use json::JsonStore;
