//! Base entity behavior shared by every record kind.

use uuid::Uuid;

/// Type alias for record identifiers.
///
/// Ids are opaque UUID v4 strings minted by the store at creation time and
/// immutable afterwards. A deleted id is never reused; a new create always
/// mints a fresh one.
pub type EntityId = String;

/// Ties a record type to its input shapes and uniform lifecycle.
///
/// All three kinds share the same base shape (`id`, `created_at`,
/// `updated_at`) and the same lifecycle: minted by `new`, mutated in place by
/// `apply_update` / `apply_patch` (both advance `updated_at`), removed by the
/// store.
pub trait Entity: Clone + Send + Sync + 'static {
    /// Fields accepted at creation. The store fills id, timestamps, and any
    /// kind-specific default.
    type Create: Send + 'static;
    /// Full-replace input: every update-carrying field, with omitted optional
    /// fields becoming unset.
    type Update: Send + 'static;
    /// Merge input: only `Some(_)` fields overwrite the existing record.
    type Patch: Send + 'static;

    /// Lowercase kind name, used in log lines and error messages.
    const KIND: &'static str;

    /// Mint a new record: fresh id, `created_at == updated_at == now`,
    /// kind-specific defaults applied.
    fn new(input: Self::Create) -> Self;

    fn id(&self) -> &EntityId;

    /// Replace all update-carrying fields and advance `updated_at`.
    fn apply_update(&mut self, input: Self::Update);

    /// Merge supplied fields over the record and advance `updated_at`.
    fn apply_patch(&mut self, patch: Self::Patch);
}

pub(crate) fn mint_id() -> EntityId {
    Uuid::new_v4().to_string()
}
