//! Entity-scoped hooks.

/// A game entity whose hooks live in their own tag namespace.
///
/// Entity hooks append [`Entity::SUFFIX`] to the caller's tag and use the
/// entity's identifier as the subscription index, so unrelated entity kinds
/// can share tag names and every entity of one kind shares the wildcard
/// handler at index 0.
///
/// # Example
///
/// ```rust
/// use hookline_core::Entity;
///
/// struct Item {
///     id: u32,
/// }
///
/// impl Entity for Item {
///     const SUFFIX: &'static str = "@Item";
///
///     fn hook_index(&self) -> u32 {
///         self.id
///     }
/// }
///
/// assert_eq!(Item::scoped_tag("use"), "use@Item");
/// ```
#[diagnostic::on_unimplemented(
    message = "`{Self}` is not a hookable entity",
    label = "missing `Entity` implementation",
    note = "Derive `Entity` or implement `SUFFIX` and `hook_index` by hand."
)]
pub trait Entity {
    /// Suffix appended to every tag raised for this entity kind.
    const SUFFIX: &'static str;

    /// Identifier used as the subscription index.
    ///
    /// An identifier of 0 collides with the wildcard index.
    fn hook_index(&self) -> u32;

    /// The tag as rewritten for this entity kind.
    fn scoped_tag(tag: &str) -> String
    where
        Self: Sized,
    {
        let mut scoped = String::with_capacity(tag.len() + Self::SUFFIX.len());
        scoped.push_str(tag);
        scoped.push_str(Self::SUFFIX);
        scoped
    }
}
