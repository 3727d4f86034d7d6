/// Structural failures while reshaping results for presentation.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ReportError {
    #[error("page size must be at least 1, got {0}")]
    InvalidPageSize(usize),
}

/// Splits an ordered list into consecutive fixed-size pages; the last page may
/// be shorter. Used for paginated violation tables and report pages alike.
pub fn chunk<T: Clone>(items: &[T], page_size: usize) -> Result<Vec<Vec<T>>, ReportError> {
    if page_size == 0 {
        return Err(ReportError::InvalidPageSize(page_size));
    }

    Ok(items
        .chunks(page_size)
        .map(|page| page.to_vec())
        .collect())
}
