pub const PAGE_SIZE: usize = 4;

/// What `total_pages` reports for an empty list.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum EmptyListPolicy {
    /// An empty list still has one (empty) page.
    #[default]
    FloorToOne,
    /// An empty list has zero pages.
    Zero,
}

impl EmptyListPolicy {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "floor" | "one" | "floor-to-one" => Some(Self::FloorToOne),
            "zero" | "0" => Some(Self::Zero),
            _ => None,
        }
    }
}

pub fn total_pages(len: usize, page_size: usize, policy: EmptyListPolicy) -> usize {
    if page_size == 0 {
        return 0;
    }
    let pages = len.div_ceil(page_size);
    match policy {
        EmptyListPolicy::FloorToOne => pages.max(1),
        EmptyListPolicy::Zero => pages,
    }
}

/// Items shown on `page` (1-based). Pages past the end, and page 0, are empty.
pub fn visible<T>(page: usize, all: &[T], page_size: usize) -> &[T] {
    if page == 0 {
        return &[];
    }
    let start = (page - 1).saturating_mul(page_size);
    if start >= all.len() {
        return &[];
    }
    let end = start.saturating_add(page_size).min(all.len());
    &all[start..end]
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NavAction {
    Previous,
    Next,
    Goto(usize),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PaginationState {
    pub current_page: usize,
    pub page_size: usize,
    pub total_pages: usize,
}

impl PaginationState {
    pub fn new(len: usize, page_size: usize, policy: EmptyListPolicy) -> Self {
        Self {
            current_page: 1,
            page_size,
            total_pages: total_pages(len, page_size, policy),
        }
    }

    pub fn last_page(&self) -> usize {
        self.total_pages.max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.current_page > 1
    }

    pub fn has_next(&self) -> bool {
        self.current_page < self.total_pages
    }

    /// Pure transition; actions that would leave the valid range are no-ops.
    pub fn apply(self, action: NavAction) -> Self {
        let current_page = match action {
            NavAction::Previous if self.has_previous() => self.current_page - 1,
            NavAction::Next if self.has_next() => self.current_page + 1,
            NavAction::Goto(k) if k >= 1 && k <= self.total_pages => k,
            _ => self.current_page,
        };
        Self {
            current_page,
            ..self
        }
    }

    /// Same as `Goto`, but out-of-range pages are clamped instead of ignored.
    pub fn clamped(self, page: usize) -> Self {
        Self {
            current_page: page.clamp(1, self.last_page()),
            ..self
        }
    }
}
