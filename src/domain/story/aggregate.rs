//! Story Context - Aggregate
//!
//! 故事详情树：Story → 有序 Chapter → 有序 Bubble

use super::ordering::sort_by_order;
use super::{Bubble, Chapter, DomainError, Story};

/// 章节节点，持有该章节下已排序的气泡
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChapterNode {
    chapter: Chapter,
    bubbles: Vec<Bubble>,
}

impl ChapterNode {
    pub fn chapter(&self) -> &Chapter {
        &self.chapter
    }

    pub fn bubbles(&self) -> &[Bubble] {
        &self.bubbles
    }
}

/// 故事详情聚合
///
/// 不变量:
/// - 每个章节的 story_id 等于根故事 id
/// - 每个气泡的 chapter_id 等于其所在章节 id
/// - 章节、气泡均按 order 升序；相同 order 保持挂载顺序
///
/// 每次读取时重新组装，只读快照，不做缓存。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoryTree {
    story: Story,
    chapters: Vec<ChapterNode>,
}

impl StoryTree {
    pub fn new(story: Story) -> Self {
        Self {
            story,
            chapters: Vec::new(),
        }
    }

    /// 挂载一个章节及其气泡
    ///
    /// 归属不符时拒绝挂载，树保持不变。
    pub fn attach_chapter(
        &mut self,
        chapter: Chapter,
        mut bubbles: Vec<Bubble>,
    ) -> Result<(), DomainError> {
        if chapter.story_id() != self.story.id() {
            return Err(DomainError::ForeignChild {
                child: format!("chapter {}", chapter.id()),
                parent: format!("story {}", self.story.id()),
            });
        }
        if let Some(stray) = bubbles.iter().find(|b| b.chapter_id() != chapter.id()) {
            return Err(DomainError::ForeignChild {
                child: format!("bubble {}", stray.id()),
                parent: format!("chapter {}", chapter.id()),
            });
        }

        sort_by_order(&mut bubbles);

        // 插入到最后一个 order 不大于它的章节之后，保证相同 order 按挂载顺序排列
        let position = self
            .chapters
            .partition_point(|node| node.chapter.order() <= chapter.order());
        self.chapters
            .insert(position, ChapterNode { chapter, bubbles });

        Ok(())
    }

    pub fn story(&self) -> &Story {
        &self.story
    }

    pub fn chapters(&self) -> &[ChapterNode] {
        &self.chapters
    }

    pub fn bubble_count(&self) -> usize {
        self.chapters.iter().map(|node| node.bubbles.len()).sum()
    }
}
