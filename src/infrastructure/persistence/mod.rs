//! Persistence Layer - 数据持久化
//!
//! MongoDB、内存与未连接三种文档存储实现

mod disconnected;
pub mod memory;
pub mod mongo;

pub use disconnected::DisconnectedStore;
pub use memory::InMemoryDocumentStore;
pub use mongo::{MongoConfig, MongoDocumentStore};
