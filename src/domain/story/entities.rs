//! Story Context - Entities
//!
//! `New*` 为尚未持久化、已通过校验的实体；
//! `Story` / `Chapter` / `Bubble` 为已持久化、携带存储分配标识的实体。

use super::{Identifier, Order, Title};

/// 待创建的故事
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStory {
    title: Title,
    author: Option<String>,
    cover_image: Option<String>,
    description: Option<String>,
}

impl NewStory {
    pub fn new(
        title: Title,
        author: Option<String>,
        cover_image: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            title,
            author,
            cover_image,
            description,
        }
    }

    pub fn title(&self) -> &Title {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// 待创建的章节
///
/// 不变量: story_id 在创建时已确认指向存在的故事
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewChapter {
    story_id: Identifier,
    title: String,
    order: Order,
}

impl NewChapter {
    /// 章节标题必填，但允许为空串
    pub fn new(story_id: Identifier, title: impl Into<String>, order: Order) -> Self {
        Self {
            story_id,
            title: title.into(),
            order,
        }
    }

    pub fn story_id(&self) -> &Identifier {
        &self.story_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

/// 待创建的气泡
///
/// 不变量: chapter_id 在创建时已确认指向存在的章节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewBubble {
    chapter_id: Identifier,
    content_html: String,
    order: Order,
}

impl NewBubble {
    pub fn new(chapter_id: Identifier, content_html: String, order: Order) -> Self {
        Self {
            chapter_id,
            content_html,
            order,
        }
    }

    pub fn chapter_id(&self) -> &Identifier {
        &self.chapter_id
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

/// 故事（根实体）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Story {
    id: Identifier,
    title: String,
    author: Option<String>,
    cover_image: Option<String>,
    description: Option<String>,
}

impl Story {
    /// 从存储记录还原
    pub fn restore(
        id: Identifier,
        title: String,
        author: Option<String>,
        cover_image: Option<String>,
        description: Option<String>,
    ) -> Self {
        Self {
            id,
            title,
            author,
            cover_image,
            description,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn author(&self) -> Option<&str> {
        self.author.as_deref()
    }

    pub fn cover_image(&self) -> Option<&str> {
        self.cover_image.as_deref()
    }

    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}

/// 章节
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Chapter {
    id: Identifier,
    story_id: Identifier,
    title: String,
    order: Order,
}

impl Chapter {
    pub fn restore(id: Identifier, story_id: Identifier, title: String, order: Order) -> Self {
        Self {
            id,
            story_id,
            title,
            order,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn story_id(&self) -> &Identifier {
        &self.story_id
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn order(&self) -> Order {
        self.order
    }
}

/// 气泡 - 最小内容单位，承载富文本
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Bubble {
    id: Identifier,
    chapter_id: Identifier,
    content_html: String,
    order: Order,
}

impl Bubble {
    pub fn restore(
        id: Identifier,
        chapter_id: Identifier,
        content_html: String,
        order: Order,
    ) -> Self {
        Self {
            id,
            chapter_id,
            content_html,
            order,
        }
    }

    pub fn id(&self) -> &Identifier {
        &self.id
    }

    pub fn chapter_id(&self) -> &Identifier {
        &self.chapter_id
    }

    pub fn content_html(&self) -> &str {
        &self.content_html
    }

    pub fn order(&self) -> Order {
        self.order
    }
}
