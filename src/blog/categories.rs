//! Category listing for the filter sidebar

use crate::cms::{CmsError, Query};
use crate::content::Category;

use super::ContentApi;

/// Categories are few; one generous page covers them all.
const CATEGORIES_PAGE_SIZE: usize = 100;

/// Fetch all categories, sorted by name
pub async fn load_categories<A: ContentApi>(api: &A) -> Result<Vec<Category>, CmsError> {
    let query = Query::new()
        .sort("name:asc")
        .paginate(1, CATEGORIES_PAGE_SIZE);
    Ok(api.find_categories(&query).await?.data)
}
