mod meta;
pub use self::meta::PagedResults;

mod item;
pub use self::item::{CatalogItem, ItemID};

mod kind;
pub use self::kind::{MediaKind, SearchScope};
