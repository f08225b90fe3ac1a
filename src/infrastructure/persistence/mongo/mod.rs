//! MongoDB Persistence - MongoDB 文档存储实现

mod store;

pub use store::{MongoConfig, MongoDocumentStore};
