//! ** idgen module **
//! Namespaces and helpers for generating stable v5 uuids for loaded world objects.
//! Dynamically created objects (tests, tooling) use v4 (random) UUIDs instead.
use uuid::Uuid;

pub const NAMESPACE_SCENE: Uuid = uuid::uuid!("7c1f0a42-93d1-4e0b-a2b7-5d9c4f6e8a01");

pub const NAMESPACE_ITEM: Uuid = uuid::uuid!("e58b3c11-0f77-4b4e-9a64-21d8c0a9b7f2");

/// Generate a v5 UUID for a given symbol from the map data files.
///
/// Uses the namespaces above to keep scene and item ids from colliding.
pub fn uuid_from_token(namespace: &Uuid, token: &str) -> Uuid {
    Uuid::new_v5(namespace, token.as_bytes())
}

/// Generate a random (v4) UUID for objects created outside map loading.
pub fn new_id() -> Uuid {
    Uuid::new_v4()
}
