//! In-Memory Persistence - 内存文档存储

mod store;

pub use store::InMemoryDocumentStore;
