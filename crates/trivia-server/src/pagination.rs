//! Pagination helper
//!
//! Pages are 1-based and sized by a fixed constant. Callers decide whether an
//! empty page is a 404 or a legitimate empty result.

/// Fixed page size for every paginated listing.
pub const QUESTIONS_PER_PAGE: usize = 10;

/// Parse a 1-based page number from a raw query value.
///
/// Non-numeric or non-positive input falls back to page 1, so a junk `?page=`
/// never produces a rejection.
pub fn page_number(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<usize>().ok())
        .filter(|&p| p >= 1)
        .unwrap_or(1)
}

/// Return the slice of `items` for the given page, at most
/// [`QUESTIONS_PER_PAGE`] long. An offset past the end yields an empty vec.
pub fn paginate<T: Clone>(items: &[T], page: usize) -> Vec<T> {
    let start = (page - 1).saturating_mul(QUESTIONS_PER_PAGE);
    items
        .iter()
        .skip(start)
        .take(QUESTIONS_PER_PAGE)
        .cloned()
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn page_number_parsing() {
        assert_eq!(page_number(None), 1);
        assert_eq!(page_number(Some("3")), 3);
        assert_eq!(page_number(Some(" 2 ")), 2);
        assert_eq!(page_number(Some("0")), 1);
        assert_eq!(page_number(Some("-4")), 1);
        assert_eq!(page_number(Some("abc")), 1);
        assert_eq!(page_number(Some("")), 1);
    }

    #[test]
    fn slices_never_exceed_page_size() {
        let items: Vec<usize> = (0..25).collect();
        assert_eq!(paginate(&items, 1).len(), QUESTIONS_PER_PAGE);
        assert_eq!(paginate(&items, 2).len(), QUESTIONS_PER_PAGE);
        assert_eq!(paginate(&items, 3), vec![20, 21, 22, 23, 24]);
        assert!(paginate(&items, 4).is_empty());
    }

    #[test]
    fn first_page_of_short_collection() {
        let items = vec![1, 2, 3];
        assert_eq!(paginate(&items, 1), vec![1, 2, 3]);
        assert!(paginate(&items, 2).is_empty());
    }

    #[test]
    fn huge_page_does_not_overflow() {
        let items = vec![1];
        assert!(paginate(&items, usize::MAX).is_empty());
    }
}
