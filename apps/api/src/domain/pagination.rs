/// Window into an ordered result set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LimitOffset {
    pub limit: i64,
    pub offset: i64,
}

impl Default for LimitOffset {
    fn default() -> Self {
        Self {
            limit: 20,
            offset: 0,
        }
    }
}

impl LimitOffset {
    /// Window for a 1-based page number
    pub fn page(page: u32, page_size: u32) -> Self {
        let page = i64::from(page.max(1));
        let limit = i64::from(page_size.max(1));
        Self {
            limit,
            offset: (page - 1) * limit,
        }
    }
}

/// One page of results plus the size of the whole result set
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Paginated<T> {
    pub items: Vec<T>,
    pub total: i64,
}

impl<T> Paginated<T> {
    /// Slices an already ordered, fully loaded collection
    pub fn from_ordered(all: Vec<T>, window: LimitOffset) -> Self {
        let total = all.len() as i64;
        let items = all
            .into_iter()
            .skip(window.offset.max(0) as usize)
            .take(window.limit.max(0) as usize)
            .collect();
        Self { items, total }
    }

    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Paginated<U> {
        Paginated {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
        }
    }
}
