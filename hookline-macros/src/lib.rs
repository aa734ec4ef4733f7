//! Procedural macros for hookline.
//!
//! This crate provides:
//! - `#[derive(Entity)]` - implements `hookline::Entity` for a struct

use proc_macro::TokenStream;

mod entity;

/// Derive macro for implementing the `Entity` trait.
///
/// The tag suffix defaults to `@` followed by the type name and can be set
/// with `#[entity(suffix = "...")]` on the type. The identifier is the field
/// marked `#[entity(id)]`, or the field named `id` when nothing is marked.
/// It must convert into `u32` with `From`.
///
/// Only a direct field of the type can be the identifier. When the
/// identifier lives in a nested struct (`self.data.map_id`) or has to be
/// computed, implement `Entity` by hand instead.
///
/// ```rust,ignore
/// #[derive(Entity)]
/// #[entity(suffix = "@Item")]
/// struct Item {
///     #[entity(id)]
///     serial: u32,
///     name: String,
/// }
/// ```
#[proc_macro_derive(Entity, attributes(entity))]
pub fn derive_entity(input: TokenStream) -> TokenStream {
    entity::derive_entity_impl(input)
}
