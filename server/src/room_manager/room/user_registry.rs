use std::collections::{HashMap, HashSet};

use comms::event::User;

use super::user_session_handle::UserSessionHandle;

/// Result of registering a session in the [UserRegistry]
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Registration {
    /// First session of the user in the room
    NewUser,
    /// The user was already present, their record changed
    UpdatedUser,
    /// The user was already present with the very same record
    Unchanged,
}

#[derive(Debug)]
pub struct UserRegistry {
    user_id_to_sessions: HashMap<String, HashSet<String>>,
    users: HashMap<String, User>,
    /// User ids in the order they first joined
    join_order: Vec<String>,
}

/// [UserRegistry] is a smart container for keeping track of which unique list of users are in a room
///
/// Since a user can have multiple sessions, e.g. while a dropped connection is being replaced,
/// we need to keep track of which sessions belong to which users
impl UserRegistry {
    pub fn new() -> Self {
        UserRegistry {
            user_id_to_sessions: HashMap::new(),
            users: HashMap::new(),
            join_order: Vec::new(),
        }
    }

    /// Add a session of a user to the room and store the latest record of that user
    pub fn insert(&mut self, user_session_handle: &UserSessionHandle, user: User) -> Registration {
        let user_id = String::from(user_session_handle.user_id());
        let session_id = String::from(user_session_handle.session_id());

        let sessions = self
            .user_id_to_sessions
            .entry(user_id.clone())
            .or_insert_with(HashSet::new);

        sessions.insert(session_id);

        match self.users.insert(user_id.clone(), user.clone()) {
            None => {
                self.join_order.push(user_id);

                Registration::NewUser
            }
            Some(previous) if previous != user => Registration::UpdatedUser,
            Some(_) => Registration::Unchanged,
        }
    }

    /// Removes a given session from the participant list, returns true if the user is no longer in the room
    /// Does nothing and returns false if the user does not exist
    pub fn remove(&mut self, user_session_handle: &UserSessionHandle) -> bool {
        let user_id = user_session_handle.user_id();
        let session_id = user_session_handle.session_id();

        let Some(sessions) = self.user_id_to_sessions.get_mut(user_id) else {
            return false;
        };

        sessions.remove(session_id);

        if !sessions.is_empty() {
            return false;
        }

        self.user_id_to_sessions.remove(user_id);
        self.users.remove(user_id);
        self.join_order.retain(|id| id != user_id);

        true
    }

    /// Updates the life total of a user, returns false if the user is not in the room
    pub fn set_life(&mut self, user_id: &str, life: i32) -> bool {
        match self.users.get_mut(user_id) {
            Some(user) => {
                user.life = life;

                true
            }
            None => false,
        }
    }

    /// Users in the order they joined the room
    pub fn users(&self) -> Vec<User> {
        self.join_order
            .iter()
            .filter_map(|user_id| self.users.get(user_id))
            .cloned()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.users.len()
    }

    pub fn is_empty(&self) -> bool {
        self.users.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::super::user_session_handle::SessionAndUserId;
    use super::*;

    fn handle(session_id: &str, user_id: &str) -> UserSessionHandle {
        UserSessionHandle::new(
            "room".into(),
            SessionAndUserId {
                session_id: session_id.into(),
                user_id: user_id.into(),
            },
        )
    }

    fn user(id: &str, life: i32) -> User {
        User {
            id: id.into(),
            name: format!("name-{}", id),
            life,
        }
    }

    #[test]
    fn test_second_session_of_same_user_is_not_new() {
        let mut registry = UserRegistry::new();

        assert_eq!(
            registry.insert(&handle("s1", "u1"), user("u1", 20)),
            Registration::NewUser
        );
        assert_eq!(
            registry.insert(&handle("s2", "u1"), user("u1", 20)),
            Registration::Unchanged
        );
        assert_eq!(
            registry.insert(&handle("s2", "u1"), user("u1", 18)),
            Registration::UpdatedUser
        );
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_user_leaves_with_last_session() {
        let mut registry = UserRegistry::new();
        registry.insert(&handle("s1", "u1"), user("u1", 20));
        registry.insert(&handle("s2", "u1"), user("u1", 20));

        assert!(!registry.remove(&handle("s1", "u1")));
        assert!(registry.remove(&handle("s2", "u1")));
        assert!(registry.is_empty());
        assert!(!registry.remove(&handle("s2", "u1")));
    }

    #[test]
    fn test_users_keep_join_order() {
        let mut registry = UserRegistry::new();
        registry.insert(&handle("s1", "u1"), user("u1", 20));
        registry.insert(&handle("s2", "u2"), user("u2", 20));
        registry.insert(&handle("s3", "u3"), user("u3", 20));
        registry.remove(&handle("s2", "u2"));
        registry.insert(&handle("s4", "u2"), user("u2", 20));

        let ids: Vec<String> = registry.users().into_iter().map(|u| u.id).collect();
        assert_eq!(ids, vec!["u1", "u3", "u2"]);
    }

    #[test]
    fn test_set_life_of_unknown_user() {
        let mut registry = UserRegistry::new();
        registry.insert(&handle("s1", "u1"), user("u1", 20));

        assert!(registry.set_life("u1", 7));
        assert!(!registry.set_life("u9", 7));
        assert_eq!(registry.users()[0].life, 7);
    }
}
