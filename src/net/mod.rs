//! Catalog networking: object lookups, the thumbnail-URL cache, and the
//! background image loader.

pub mod cache;
pub mod fetch;
pub mod image;
