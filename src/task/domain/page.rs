//! Paging and ordering value types for task listing.

use super::{PageRequestError, ParseTaskSortError, TaskRecord};
use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

/// Property a listing can be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum TaskSortKey {
    /// Due date; tasks without one always sort last.
    #[default]
    DueDate,
    /// Title, compared byte-wise (the `tasks.title` column uses the `C`
    /// collation so storage ordering agrees).
    Title,
    /// Lifecycle status, `OPEN` before `DONE`.
    Status,
    /// Creation timestamp.
    CreatedAt,
}

impl TaskSortKey {
    /// Returns the external property name.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::DueDate => "dueDate",
            Self::Title => "title",
            Self::Status => "status",
            Self::CreatedAt => "createdAt",
        }
    }
}

impl FromStr for TaskSortKey {
    type Err = ParseTaskSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim() {
            "dueDate" | "due_date" => Ok(Self::DueDate),
            "title" => Ok(Self::Title),
            "status" => Ok(Self::Status),
            "createdAt" | "created_at" => Ok(Self::CreatedAt),
            other => Err(ParseTaskSortError::UnknownKey(other.to_owned())),
        }
    }
}

/// Ordering direction.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SortDirection {
    /// Smallest first.
    #[default]
    Ascending,
    /// Largest first.
    Descending,
}

impl SortDirection {
    /// Returns the external direction token.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "asc",
            Self::Descending => "desc",
        }
    }

    const fn apply(self, ordering: Ordering) -> Ordering {
        match self {
            Self::Ascending => ordering,
            Self::Descending => ordering.reverse(),
        }
    }
}

impl FromStr for SortDirection {
    type Err = ParseTaskSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "asc" => Ok(Self::Ascending),
            "desc" => Ok(Self::Descending),
            _ => Err(ParseTaskSortError::UnknownDirection(value.to_owned())),
        }
    }
}

/// Listing order: a key plus a direction, defaulting to due date ascending.
///
/// Records that compare equal on the key are ordered by identifier so every
/// listing is deterministic.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct TaskSort {
    key: TaskSortKey,
    direction: SortDirection,
}

impl TaskSort {
    /// Creates a sort specification.
    #[must_use]
    pub const fn new(key: TaskSortKey, direction: SortDirection) -> Self {
        Self { key, direction }
    }

    /// Returns the sort key.
    #[must_use]
    pub const fn key(self) -> TaskSortKey {
        self.key
    }

    /// Returns the sort direction.
    #[must_use]
    pub const fn direction(self) -> SortDirection {
        self.direction
    }

    /// Compares two records under this ordering.
    #[must_use]
    pub fn compare(self, left: &TaskRecord, right: &TaskRecord) -> Ordering {
        let by_key = match self.key {
            TaskSortKey::DueDate => match (left.due_date(), right.due_date()) {
                (Some(l), Some(r)) => self.direction.apply(l.cmp(&r)),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            },
            TaskSortKey::Title => self
                .direction
                .apply(left.title().as_str().cmp(right.title().as_str())),
            TaskSortKey::Status => self.direction.apply(left.status().cmp(&right.status())),
            TaskSortKey::CreatedAt => self
                .direction
                .apply(left.created_at().cmp(&right.created_at())),
        };
        by_key.then_with(|| left.id().cmp(&right.id()))
    }
}

/// Parses `key` or `key,direction`, e.g. `dueDate,desc`.
impl FromStr for TaskSort {
    type Err = ParseTaskSortError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        if trimmed.is_empty() {
            return Ok(Self::default());
        }
        let (key_part, direction_part) = trimmed
            .split_once(',')
            .map_or((trimmed, None), |(key, direction)| (key, Some(direction)));
        let key = key_part.parse()?;
        let direction = direction_part
            .map(str::parse)
            .transpose()?
            .unwrap_or_default();
        Ok(Self { key, direction })
    }
}

impl fmt::Display for TaskSort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.key.as_str(), self.direction.as_str())
    }
}

/// A request for one page of the task collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageRequest {
    page: u32,
    size: u32,
    sort: TaskSort,
}

impl PageRequest {
    /// Creates a page request.
    ///
    /// # Errors
    ///
    /// Returns [`PageRequestError::ZeroPageSize`] when `size` is zero.
    pub const fn new(page: u32, size: u32, sort: TaskSort) -> Result<Self, PageRequestError> {
        if size == 0 {
            return Err(PageRequestError::ZeroPageSize);
        }
        Ok(Self { page, size, sort })
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(self) -> u32 {
        self.page
    }

    /// Returns the page size.
    #[must_use]
    pub const fn size(self) -> u32 {
        self.size
    }

    /// Returns the requested ordering.
    #[must_use]
    pub const fn sort(self) -> TaskSort {
        self.sort
    }

    /// Returns the number of records preceding this page.
    #[must_use]
    pub fn offset(self) -> u64 {
        u64::from(self.page) * u64::from(self.size)
    }
}

/// An ordered slice of a collection plus the size of the whole collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page<T> {
    items: Vec<T>,
    total: u64,
    page: u32,
    size: u32,
}

impl<T> Page<T> {
    /// Assembles a page for the given request.
    #[must_use]
    pub const fn new(items: Vec<T>, total: u64, request: PageRequest) -> Self {
        Self {
            items,
            total,
            page: request.page,
            size: request.size,
        }
    }

    /// Returns the items on this page.
    #[must_use]
    pub fn items(&self) -> &[T] {
        &self.items
    }

    /// Consumes the page, returning its items.
    #[must_use]
    pub fn into_items(self) -> Vec<T> {
        self.items
    }

    /// Returns the number of records in the whole collection.
    #[must_use]
    pub const fn total(&self) -> u64 {
        self.total
    }

    /// Returns the zero-based page index.
    #[must_use]
    pub const fn page(&self) -> u32 {
        self.page
    }

    /// Returns the requested page size.
    #[must_use]
    pub const fn size(&self) -> u32 {
        self.size
    }

    /// Returns the number of pages needed to hold the whole collection.
    #[must_use]
    pub fn total_pages(&self) -> u64 {
        self.total.div_ceil(u64::from(self.size.max(1)))
    }

    /// Maps every item while keeping the paging metadata.
    #[must_use]
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total: self.total,
            page: self.page,
            size: self.size,
        }
    }
}
