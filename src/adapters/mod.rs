// Adapters layer: concrete implementations for the external collaborators
// (HTTP retrieval, the document model).

pub mod dom;
pub mod http;
