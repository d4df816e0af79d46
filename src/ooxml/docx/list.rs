//! Ordered and unordered lists.

use super::enums::ListType;
use super::paragraph::Paragraph;
use crate::ooxml::error::{OoxmlError, Result};

/// Deepest list level Word supports.
pub const MAX_LIST_LEVEL: u32 = 8;

/// One list entry: a paragraph and an optional nested list one level deeper.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListItem {
    pub paragraph: Paragraph,
    pub nested: Option<List>,
}

impl ListItem {
    pub fn new(paragraph: Paragraph) -> Self {
        Self {
            paragraph,
            nested: None,
        }
    }

    /// Attach a nested list; its level is set when the item is added.
    pub fn nested(mut self, list: List) -> Self {
        self.nested = Some(list);
        self
    }
}

impl From<Paragraph> for ListItem {
    fn from(paragraph: Paragraph) -> Self {
        Self::new(paragraph)
    }
}

impl From<&str> for ListItem {
    fn from(text: &str) -> Self {
        Self::new(Paragraph::new(text))
    }
}

impl From<String> for ListItem {
    fn from(text: String) -> Self {
        Self::new(Paragraph::new(text))
    }
}

/// A list of items sharing one type and level.
///
/// # Examples
///
/// ```rust,ignore
/// let list = List::ordered()
///     .item("First")
///     .item(ListItem::from("Second").nested(List::unordered().item("Detail")));
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct List {
    pub list_type: ListType,
    pub level: u32,
    pub items: Vec<ListItem>,
}

impl List {
    pub fn new(list_type: ListType) -> Self {
        Self {
            list_type,
            level: 0,
            items: Vec::new(),
        }
    }

    pub fn ordered() -> Self {
        Self::new(ListType::Ordered)
    }

    pub fn unordered() -> Self {
        Self::new(ListType::Unordered)
    }

    pub fn item(mut self, item: impl Into<ListItem>) -> Self {
        let mut item = item.into();
        if let Some(nested) = item.nested.as_mut() {
            nested.set_level(self.level + 1);
        }
        self.items.push(item);
        self
    }

    fn set_level(&mut self, level: u32) {
        self.level = level;
        for item in &mut self.items {
            if let Some(nested) = item.nested.as_mut() {
                nested.set_level(level + 1);
            }
        }
    }

    /// Every item of this list and its nested lists in document order,
    /// paired with the item's type and level.
    pub fn recursive_items(&self) -> Vec<(ListType, u32, &ListItem)> {
        let mut out = Vec::new();
        self.collect_items(&mut out);
        out
    }

    fn collect_items<'a>(&'a self, out: &mut Vec<(ListType, u32, &'a ListItem)>) {
        for item in &self.items {
            out.push((self.list_type, self.level, item));
            if let Some(nested) = &item.nested {
                nested.collect_items(out);
            }
        }
    }

    /// Visit every item paragraph, nested ones included.
    pub(crate) fn for_each_paragraph_mut(&mut self, f: &mut impl FnMut(&mut Paragraph)) {
        for item in &mut self.items {
            f(&mut item.paragraph);
            if let Some(nested) = item.nested.as_mut() {
                nested.for_each_paragraph_mut(f);
            }
        }
    }

    pub(crate) fn validate(&self) -> Result<()> {
        if self.items.is_empty() {
            return Err(OoxmlError::validation(
                "list",
                "items",
                "lists require at least one list item",
            ));
        }
        if self.level > MAX_LIST_LEVEL {
            return Err(OoxmlError::validation(
                "list",
                "level",
                format!("must not exceed {}", MAX_LIST_LEVEL),
            ));
        }
        for item in &self.items {
            item.paragraph.validate()?;
            if let Some(nested) = &item.nested {
                nested.validate()?;
            }
        }
        Ok(())
    }
}
