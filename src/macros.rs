//! # Internal Macros
//!
//! ## le_field_getters!
//!
//! The on-disk structs in `storage::headers` keep their numeric fields as
//! zerocopy little-endian wrappers so they stay `Unaligned` and byte-exact.
//! This macro emits one native-typed read accessor per listed field.
//!
//! ```ignore
//! impl RecordHeader {
//!     le_field_getters! {
//!         record_size: u32,
//!         timestamp: i64,
//!     }
//! }
//!
//! // record_size(&self) -> u32, timestamp(&self) -> i64
//! ```
//!
//! Headers are written once and never patched in place, so no setters are
//! generated.

macro_rules! le_field_getters {
    ($($field:ident : $native:ty),* $(,)?) => {
        $(
            #[inline]
            pub fn $field(&self) -> $native {
                self.$field.get()
            }
        )*
    };
}
