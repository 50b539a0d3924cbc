pub mod document;
pub mod metadata;

pub use document::DocumentService;
pub use metadata::MetadataStore;
