//! Ownership and role checks for mutating operations.
//!
//! These are pure functions of (actor, resource), called at the top of
//! every mutating handler after the resource has been resolved and before
//! any field validation, so a non-owner never learns whether their payload
//! was otherwise valid.

use uuid::Uuid;

use crate::models::User;

/// The author may always mutate their own recipe; admins and content
/// managers may mutate any recipe.
pub fn can_mutate_recipe(actor: &User, author_id: Uuid) -> bool {
    actor.id == author_id || actor.is_admin || actor.is_content_manager
}

/// Category management is admin-only. Content managers may manage
/// recipes but not categories.
pub fn can_manage_categories(actor: &User) -> bool {
    actor.is_admin
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn user(is_admin: bool, is_content_manager: bool) -> User {
        User {
            id: Uuid::new_v4(),
            username: "casey".to_string(),
            email: "casey@example.com".to_string(),
            password_hash: String::new(),
            avatar: None,
            is_admin,
            is_content_manager,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn author_can_mutate_own_recipe() {
        let actor = user(false, false);
        assert!(can_mutate_recipe(&actor, actor.id));
    }

    #[test]
    fn stranger_cannot_mutate() {
        let actor = user(false, false);
        assert!(!can_mutate_recipe(&actor, Uuid::new_v4()));
    }

    #[test]
    fn admin_can_mutate_any_recipe() {
        let actor = user(true, false);
        assert!(can_mutate_recipe(&actor, Uuid::new_v4()));
    }

    #[test]
    fn content_manager_can_mutate_any_recipe() {
        let actor = user(false, true);
        assert!(can_mutate_recipe(&actor, Uuid::new_v4()));
    }

    #[test]
    fn only_admin_manages_categories() {
        assert!(can_manage_categories(&user(true, false)));
        assert!(!can_manage_categories(&user(false, true)));
        assert!(!can_manage_categories(&user(false, false)));
    }
}
