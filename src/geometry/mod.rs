pub mod display_list;
pub mod primitives;

pub use display_list::{
    CurveCache, DispListEntry, DispListKind, DisplayList, DisplayListError, DisplayListView,
};
