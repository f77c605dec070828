pub const MAX_PAGE_SIZE: usize = 1000;

/// Returns the 1-based `page` of `items`. Out-of-range pages are empty.
pub fn paginate<T>(items: Vec<T>, page: Option<usize>, page_size: usize) -> Vec<T> {
    let page = page.unwrap_or(1).max(1);
    let page_size = page_size.clamp(1, MAX_PAGE_SIZE);
    let start = (page - 1).saturating_mul(page_size);
    items.into_iter().skip(start).take(page_size).collect()
}
