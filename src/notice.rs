//! User-facing notification text.
//!
//! `Display` on the error enums is written for logs. [`Notice`] is the short
//! sentence a storefront shows in its toast or alert.

pub trait Notice {
    fn notice(&self) -> String;
}
