pub mod annotation;
pub mod header;
pub mod metadata;
pub mod record;
pub mod variant;

// re-export for cleaner imports
pub use self::annotation::{ANNOTATION_COLUMNS, Annotation};
pub use self::header::{Header, REQUIRED_COLUMNS};
pub use self::metadata::{MULTI_VALUED_KEYS, MetaEntry, MetaValue, Metadata};
pub use self::record::{RawRecord, Record};
pub use self::variant::{VariantType, Zygosity};
