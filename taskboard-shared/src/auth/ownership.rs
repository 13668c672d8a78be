/// Ownership guard shared by every entity type
///
/// Taskboard has a single authorization rule: an entity may only be read,
/// changed or deleted by the user who created it. The rule is implemented
/// once here and applied to projects, tasks and todos through the [`Owned`]
/// trait.
///
/// # Decision Table
///
/// | entity  | owner == requester | result      |
/// |---------|--------------------|-------------|
/// | absent  | -                  | `NotFound`  |
/// | present | no                 | `Denied`    |
/// | present | yes                | `Granted`   |
///
/// # Example
///
/// ```
/// use taskboard_shared::auth::ownership::{check, Access, Owned};
/// use uuid::Uuid;
///
/// struct Note { owner: Uuid }
///
/// impl Owned for Note {
///     const KIND: &'static str = "note";
///     fn owner_id(&self) -> Uuid { self.owner }
/// }
///
/// let owner = Uuid::new_v4();
/// let note = Note { owner };
///
/// assert_eq!(check(Some(&note), owner), Access::Granted);
/// assert_eq!(check(Some(&note), Uuid::new_v4()), Access::Denied);
/// assert_eq!(check::<Note>(None, owner), Access::NotFound);
/// ```

use std::fmt;
use uuid::Uuid;

/// An entity with a single owning user
pub trait Owned {
    /// Lowercase entity name used in error messages
    const KIND: &'static str;

    /// The owning user's ID
    fn owner_id(&self) -> Uuid;
}

/// Outcome of an ownership check
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Access {
    Granted,
    Denied,
    NotFound,
}

/// What the requester is trying to do with the entity
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Access,
    Update,
    Delete,
    /// Create a child under the entity; holds the child's plural name
    Add(&'static str),
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Action::Access => f.write_str("access"),
            Action::Update => f.write_str("update"),
            Action::Delete => f.write_str("delete"),
            Action::Add(children) => write!(f, "add {} to", children),
        }
    }
}

/// Error type for ownership checks
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AccessError {
    /// The entity does not exist
    #[error("{} not found", capitalize(.0))]
    NotFound(&'static str),

    /// The entity exists but belongs to someone else
    #[error("Not authorized to {action} this {kind}")]
    Forbidden { kind: &'static str, action: Action },
}

/// Decides whether `requester` may act on `entity`
pub fn check<E: Owned>(entity: Option<&E>, requester: Uuid) -> Access {
    match entity {
        None => Access::NotFound,
        Some(entity) if entity.owner_id() != requester => Access::Denied,
        Some(_) => Access::Granted,
    }
}

/// Runs [`check`] and hands the entity back only when access is granted
///
/// # Errors
///
/// - `AccessError::NotFound` if the entity is absent
/// - `AccessError::Forbidden` if the requester does not own it; the message
///   names `action`
pub fn authorize<E: Owned>(entity: Option<E>, requester: Uuid, action: Action) -> Result<E, AccessError> {
    match check(entity.as_ref(), requester) {
        Access::Granted => entity.ok_or(AccessError::NotFound(E::KIND)),
        Access::Denied => Err(AccessError::Forbidden {
            kind: E::KIND,
            action,
        }),
        Access::NotFound => Err(AccessError::NotFound(E::KIND)),
    }
}

fn capitalize(kind: &str) -> String {
    let mut chars = kind.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}
