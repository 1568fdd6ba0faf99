//! Page arithmetic shared by every listing.
//!
//! Pages are 1-indexed. Out-of-range requests are clamped to the last page
//! and an empty sequence still has exactly one (empty) page, so callers never
//! have to handle a missing page.

use serde::Serialize;

/// A requested page number, already normalised to be at least 1.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct PageNumber(usize);

impl PageNumber {
    pub const FIRST: PageNumber = PageNumber(1);

    /// Absent, non-numeric and non-positive values all fall back to page 1.
    pub fn parse(raw: Option<&str>) -> Self {
        raw.and_then(|value| value.trim().parse::<i64>().ok())
            .filter(|number| *number >= 1)
            .map(|number| PageNumber(usize::try_from(number).unwrap_or(usize::MAX)))
            .unwrap_or(Self::FIRST)
    }

    pub fn get(self) -> usize {
        self.0
    }
}

impl Default for PageNumber {
    fn default() -> Self {
        Self::FIRST
    }
}

impl From<usize> for PageNumber {
    fn from(number: usize) -> Self {
        PageNumber(number.max(1))
    }
}

/// Position of a resolved page inside a sequence of `count` items.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub offset: usize,
    pub limit: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Paginator {
    page_size: usize,
}

impl Paginator {
    pub fn new(page_size: usize) -> Self {
        Self {
            page_size: page_size.max(1),
        }
    }

    pub fn window(&self, count: usize, requested: PageNumber) -> PageWindow {
        let num_pages = count.div_ceil(self.page_size).max(1);
        let number = requested.get().min(num_pages);
        let offset = (number - 1) * self.page_size;
        let limit = self.page_size.min(count.saturating_sub(offset));
        PageWindow {
            number,
            num_pages,
            count,
            offset,
            limit,
        }
    }

    /// Slices an already ordered sequence.
    pub fn paginate<T>(&self, items: Vec<T>, requested: PageNumber) -> Page<T> {
        let window = self.window(items.len(), requested);
        let items = items
            .into_iter()
            .skip(window.offset)
            .take(window.limit)
            .collect();
        Page::new(items, window)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<T> {
    pub items: Vec<T>,
    pub number: usize,
    pub num_pages: usize,
    pub count: usize,
    pub has_next: bool,
    pub has_previous: bool,
    pub next_page_number: Option<usize>,
    pub previous_page_number: Option<usize>,
}

impl<T> Page<T> {
    pub fn new(items: Vec<T>, window: PageWindow) -> Self {
        let has_next = window.number < window.num_pages;
        let has_previous = window.number > 1;
        Self {
            items,
            number: window.number,
            num_pages: window.num_pages,
            count: window.count,
            has_next,
            has_previous,
            next_page_number: has_next.then_some(window.number + 1),
            previous_page_number: has_previous.then_some(window.number - 1),
        }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_defaults_to_first() {
        assert_eq!(PageNumber::parse(None), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("abc")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("0")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("-4")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some("2.5")), PageNumber::FIRST);
        assert_eq!(PageNumber::parse(Some(" 3 ")).get(), 3);
        assert_eq!(PageNumber::parse(Some("17")).get(), 17);
    }

    #[test]
    fn fifteen_items_split_into_ten_and_five() {
        let paginator = Paginator::new(10);
        let items: Vec<u32> = (0..15).collect();

        let first = paginator.paginate(items.clone(), PageNumber::FIRST);
        assert_eq!(first.len(), 10);
        assert_eq!(first.num_pages, 2);
        assert!(first.has_next);
        assert!(!first.has_previous);
        assert_eq!(first.next_page_number, Some(2));

        let second = paginator.paginate(items, PageNumber::from(2));
        assert_eq!(second.items, vec![10, 11, 12, 13, 14]);
        assert!(!second.has_next);
        assert!(second.has_previous);
        assert_eq!(second.previous_page_number, Some(1));
    }

    #[test]
    fn out_of_range_page_is_clamped_to_last() {
        let paginator = Paginator::new(10);
        let items: Vec<u32> = (0..25).collect();

        let page = paginator.paginate(items, PageNumber::from(1000));

        assert_eq!(page.number, 3);
        assert_eq!(page.items, vec![20, 21, 22, 23, 24]);
    }

    #[test]
    fn empty_sequence_has_one_empty_page() {
        let paginator = Paginator::new(10);

        let page = paginator.paginate(Vec::<u32>::new(), PageNumber::from(5));

        assert!(page.is_empty());
        assert_eq!(page.number, 1);
        assert_eq!(page.num_pages, 1);
        assert!(!page.has_next);
        assert!(!page.has_previous);
    }

    #[test]
    fn paginate_is_deterministic() {
        let paginator = Paginator::new(4);
        let items: Vec<u32> = (0..11).collect();

        let a = paginator.paginate(items.clone(), PageNumber::from(2));
        let b = paginator.paginate(items, PageNumber::from(2));

        assert_eq!(a, b);
    }

    #[test]
    fn window_exposes_offset_and_limit() {
        let paginator = Paginator::new(10);

        let window = paginator.window(23, PageNumber::from(3));

        assert_eq!(window.offset, 20);
        assert_eq!(window.limit, 3);
        assert_eq!(window.num_pages, 3);
    }

    #[test]
    fn zero_page_size_is_raised_to_one() {
        let page = Paginator::new(0).paginate(vec![1, 2, 3], PageNumber::from(2));

        assert_eq!(page.items, vec![2]);
        assert_eq!(page.num_pages, 3);
    }
}
