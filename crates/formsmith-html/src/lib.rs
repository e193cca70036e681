//! HTML primitives for formsmith
//!
//! This crate provides the leaf pieces the form builder renders through:
//! - HTML escaping for element bodies and attribute values
//! - [`Attributes`], an ordered attribute map with builder helpers
//! - [`AttributeRenderer`], the attribute-string serialization seam
//! - [`SafeString`], markup that must not be escaped again

pub mod attributes;
pub mod escape;
pub mod markup;

pub use attributes::{AttrValue, AttributeRenderer, Attributes, HtmlAttributeRenderer};
pub use escape::{escape, escape_attr};
pub use markup::SafeString;
