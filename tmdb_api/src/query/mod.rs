mod common;
pub use self::common::{PageQuery, Query, QueryCommon};

mod discover;
pub use self::discover::{DiscoverQuery, SortBy};

mod search;
pub use self::search::SearchQuery;
