//! 同级排序
//!
//! 按 `order` 升序稳定排序。`order` 相同的元素保持输入顺序，
//! 而输入顺序来自存储的自然返回顺序：单次查询内稳定，跨查询不作保证。

use super::{Bubble, Chapter, Order};

/// 带排序键的同级实体
pub trait Ordered {
    fn order(&self) -> Order;
}

impl Ordered for Chapter {
    fn order(&self) -> Order {
        Chapter::order(self)
    }
}

impl Ordered for Bubble {
    fn order(&self) -> Order {
        Bubble::order(self)
    }
}

/// 就地按 order 升序排序
pub fn sort_by_order<T: Ordered>(items: &mut [T]) {
    items.sort_by_key(|item| item.order());
}
