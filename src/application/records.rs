//! 实体 ↔ 存储记录的映射
//!
//! 文档字段名与集合内已有数据保持一致：
//! - story:   title, author, cover_image, description
//! - chapter: story_id, title, order
//! - bubble:  chapter_id, content_html, order
//!
//! 读取时缺失的 `order` 视为 0；其余必填字段缺失视为存储数据损坏。

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::application::ports::{NewRecord, StoreError, StoredRecord};
use crate::domain::story::{
    Bubble, Chapter, Identifier, NewBubble, NewChapter, NewStory, Order, Story,
};

#[derive(Debug, Serialize, Deserialize)]
struct StoryDocument {
    title: String,
    #[serde(default)]
    author: Option<String>,
    #[serde(default)]
    cover_image: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
struct ChapterDocument {
    story_id: String,
    title: String,
    #[serde(default)]
    order: i64,
}

#[derive(Debug, Serialize, Deserialize)]
struct BubbleDocument {
    chapter_id: String,
    content_html: String,
    #[serde(default)]
    order: i64,
}

fn encode<T: Serialize>(document: &T) -> Result<NewRecord, StoreError> {
    match serde_json::to_value(document) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(other) => Err(StoreError::Serialization(format!(
            "expected an object, got {other}"
        ))),
        Err(e) => Err(StoreError::Serialization(e.to_string())),
    }
}

fn decode<T: DeserializeOwned>(record: StoredRecord) -> Result<(Identifier, T), StoreError> {
    let id = record.id;
    let document = serde_json::from_value(Value::Object(record.fields))
        .map_err(|e| StoreError::Serialization(format!("record {id}: {e}")))?;
    Ok((id, document))
}

fn stored_reference(id: &Identifier, raw: &str) -> Result<Identifier, StoreError> {
    Identifier::parse(raw)
        .map_err(|e| StoreError::Serialization(format!("record {id}: {e}")))
}

fn stored_order(id: &Identifier, raw: i64) -> Result<Order, StoreError> {
    Order::new(raw).map_err(|e| StoreError::Serialization(format!("record {id}: {e}")))
}

pub fn story_to_record(story: &NewStory) -> Result<NewRecord, StoreError> {
    encode(&StoryDocument {
        title: story.title().as_str().to_string(),
        author: story.author().map(str::to_string),
        cover_image: story.cover_image().map(str::to_string),
        description: story.description().map(str::to_string),
    })
}

pub fn story_from_record(record: StoredRecord) -> Result<Story, StoreError> {
    let (id, doc): (_, StoryDocument) = decode(record)?;
    Ok(Story::restore(
        id,
        doc.title,
        doc.author,
        doc.cover_image,
        doc.description,
    ))
}

pub fn chapter_to_record(chapter: &NewChapter) -> Result<NewRecord, StoreError> {
    encode(&ChapterDocument {
        story_id: chapter.story_id().to_string(),
        title: chapter.title().to_string(),
        order: chapter.order().value(),
    })
}

pub fn chapter_from_record(record: StoredRecord) -> Result<Chapter, StoreError> {
    let (id, doc): (_, ChapterDocument) = decode(record)?;
    let story_id = stored_reference(&id, &doc.story_id)?;
    let order = stored_order(&id, doc.order)?;
    Ok(Chapter::restore(id, story_id, doc.title, order))
}

pub fn bubble_to_record(bubble: &NewBubble) -> Result<NewRecord, StoreError> {
    encode(&BubbleDocument {
        chapter_id: bubble.chapter_id().to_string(),
        content_html: bubble.content_html().to_string(),
        order: bubble.order().value(),
    })
}

pub fn bubble_from_record(record: StoredRecord) -> Result<Bubble, StoreError> {
    let (id, doc): (_, BubbleDocument) = decode(record)?;
    let chapter_id = stored_reference(&id, &doc.chapter_id)?;
    let order = stored_order(&id, doc.order)?;
    Ok(Bubble::restore(id, chapter_id, doc.content_html, order))
}
