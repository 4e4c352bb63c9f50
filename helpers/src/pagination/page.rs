//! Page windows and page metadata

use serde::Serialize;
use serde_json::Value;
use utoipa::ToSchema;

use super::error::PageError;
use crate::core::PaginationConfig;
use crate::filters::{Arguments, is_truthy};

/// Argument key holding the page number
pub const PAGE_KEY: &str = "page";

/// Argument key holding the page size
pub const SIZE_KEY: &str = "size";

/// One page of results with its position in the full result set
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Page<T> {
    pub items: Vec<T>,
    /// Rows matched by the unwindowed query
    pub total_count: u64,
    /// Number of pages; zero when nothing matched
    pub total_page: u64,
    pub current_page: u32,
    pub has_next: bool,
    pub has_prev: bool,
}

impl<T> Page<T> {
    /// Page metadata for `items` fetched with `args` out of `total_count` rows
    pub fn new(items: Vec<T>, total_count: u64, args: &PageArgs) -> Self {
        let total_page = total_count.div_ceil(u64::from(args.size()));
        Self {
            items,
            total_count,
            total_page,
            current_page: args.page(),
            has_next: u64::from(args.page()) < total_page,
            has_prev: args.page() > 1,
        }
    }

    /// Transform the items, keeping the metadata
    pub fn map<U>(self, f: impl FnMut(T) -> U) -> Page<U> {
        Page {
            items: self.items.into_iter().map(f).collect(),
            total_count: self.total_count,
            total_page: self.total_page,
            current_page: self.current_page,
            has_next: self.has_next,
            has_prev: self.has_prev,
        }
    }
}

/// Validated 1-based page number and page size
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageArgs {
    page: u32,
    size: u32,
}

impl PageArgs {
    pub fn new(page: u32, size: u32) -> Result<Self, PageError> {
        if size == 0 {
            return Err(PageError::InvalidPageSize);
        }
        if page == 0 {
            return Err(PageError::InvalidPage);
        }
        if (page - 1).checked_mul(size).is_none() {
            return Err(PageError::PageOutOfRange { page, size });
        }
        Ok(Self { page, size })
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn size(&self) -> u32 {
        self.size
    }

    /// Rows skipped before this page
    pub fn offset(&self) -> u32 {
        // Cannot overflow, checked in new()
        (self.page - 1) * self.size
    }

    /// Take `page` and `size` out of `arguments`, leaving only filter arguments
    ///
    /// Both keys are removed even when reading one of them fails. Missing or
    /// falsy values default to page 1 and size 10.
    pub fn extract(arguments: &mut Arguments) -> Result<Self, PageError> {
        Self::extract_with(arguments, &PaginationConfig::default())
    }

    /// [`PageArgs::extract`] with defaults from `config`
    pub fn extract_with(
        arguments: &mut Arguments,
        config: &PaginationConfig,
    ) -> Result<Self, PageError> {
        let page = arguments.shift_remove(PAGE_KEY);
        let size = arguments.shift_remove(SIZE_KEY);
        Self::new(
            read_argument(PAGE_KEY, page, config.default_page)?,
            read_argument(SIZE_KEY, size, config.default_size)?,
        )
    }

    /// Non-mutating [`PageArgs::extract`], returning the remaining arguments
    pub fn split(mut arguments: Arguments) -> Result<(Self, Arguments), PageError> {
        let args = Self::extract(&mut arguments)?;
        Ok((args, arguments))
    }
}

/// Integers and numeric strings are accepted; falsy values and zero use `default`
fn read_argument(key: &str, value: Option<Value>, default: u32) -> Result<u32, PageError> {
    let Some(value) = value.filter(is_truthy) else {
        return Ok(default);
    };
    let parsed = match &value {
        Value::Number(n) => n.as_u64().and_then(|n| u32::try_from(n).ok()),
        Value::String(s) => s.trim().parse::<u32>().ok(),
        _ => None,
    };
    match parsed {
        Some(0) => Ok(default),
        Some(n) => Ok(n),
        None => Err(PageError::InvalidArgument {
            key: key.to_string(),
            value,
        }),
    }
}
