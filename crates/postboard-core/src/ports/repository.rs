use crate::domain::User;
use crate::error::DomainError;

/// Identifier type shared by every persisted entity.
pub type Id = i32;

/// A partial set of field assignments applied onto an entity.
pub trait FieldMap<T> {
    /// Assign every present field onto `target`.
    fn apply_to(self, target: &mut T);
}

/// Extension points of the generic CRUD pipeline.
///
/// A specialization supplies the domain decisions; the pipeline itself only
/// fetches, calls these hooks in a fixed order and persists. Hooks left at
/// their default fail with [`DomainError::NotImplemented`] the moment they are
/// reached.
pub trait CrudHooks: Send + Sync {
    /// Domain entity the pipeline reads and writes.
    type Entity: Clone + Send + Sync;
    /// Field map an entity is inserted from.
    type CreateFields: Send;
    /// Field map a partial update is made of.
    type UpdateFields: FieldMap<Self::Entity> + Send;

    /// Message of the `NotFound` raised by strict lookups.
    const NOT_FOUND: &'static str = "Object(s) not found.";
    /// Message of the `AlreadyExists` raised on a uniqueness conflict.
    const ALREADY_EXISTS: &'static str = "Object with such unique values already exists.";

    /// Fail unless `actor` may modify or delete `entity`.
    fn has_permission(&self, _entity: &Self::Entity, _actor: &User) -> Result<(), DomainError> {
        Err(DomainError::NotImplemented("has_permission"))
    }

    /// Fail if this particular update is forbidden by a domain rule.
    fn is_update_allowed(
        &self,
        _entity: &Self::Entity,
        _fields: &Self::UpdateFields,
    ) -> Result<(), DomainError> {
        Err(DomainError::NotImplemented("is_update_allowed"))
    }

    /// Fail if `entity` may not be deleted.
    fn is_delete_allowed(&self, _entity: &Self::Entity) -> Result<(), DomainError> {
        Err(DomainError::NotImplemented("is_delete_allowed"))
    }

    /// Adjust the create field map in place, e.g. inject the owner.
    fn shape_create_fields(
        &self,
        _fields: &mut Self::CreateFields,
        _actor: Option<&User>,
    ) -> Result<(), DomainError> {
        Err(DomainError::NotImplemented("shape_create_fields"))
    }

    /// Apply `fields` plus any derived fields and hand the entity back.
    fn shape_update_fields(
        &self,
        _entity: Self::Entity,
        _fields: Self::UpdateFields,
    ) -> Result<Self::Entity, DomainError> {
        Err(DomainError::NotImplemented("shape_update_fields"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone)]
    struct Note(String);

    struct Append(String);

    impl FieldMap<Note> for Append {
        fn apply_to(self, target: &mut Note) {
            target.0.push_str(&self.0);
        }
    }

    struct BareHooks;

    impl CrudHooks for BareHooks {
        type Entity = Note;
        type CreateFields = String;
        type UpdateFields = Append;
    }

    fn actor() -> User {
        User {
            id: 1,
            email: "user@example.com".to_string(),
            is_active: true,
            is_superuser: false,
            is_verified: false,
        }
    }

    fn hook_name<T>(result: Result<T, DomainError>) -> Option<&'static str> {
        match result {
            Err(DomainError::NotImplemented(hook)) => Some(hook),
            _ => None,
        }
    }

    #[test]
    fn every_default_hook_fails_with_its_name() {
        let note = Note("text".to_string());
        let hooks = BareHooks;

        assert_eq!(
            hook_name(hooks.has_permission(&note, &actor())),
            Some("has_permission")
        );
        assert_eq!(
            hook_name(hooks.is_update_allowed(&note, &Append(String::new()))),
            Some("is_update_allowed")
        );
        assert_eq!(
            hook_name(hooks.is_delete_allowed(&note)),
            Some("is_delete_allowed")
        );
        assert_eq!(
            hook_name(hooks.shape_create_fields(&mut String::new(), None)),
            Some("shape_create_fields")
        );
        assert_eq!(
            hook_name(hooks.shape_update_fields(note, Append(String::new()))),
            Some("shape_update_fields")
        );
    }

    #[test]
    fn default_messages_are_generic() {
        assert_eq!(BareHooks::NOT_FOUND, "Object(s) not found.");
        assert_eq!(
            BareHooks::ALREADY_EXISTS,
            "Object with such unique values already exists."
        );
    }
}
