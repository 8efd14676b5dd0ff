use crate::models::user::RegisteredUser;
use std::sync::{Mutex, MutexGuard};

/// Ordered, append-only list of self-registered patients
pub struct RegisteredUsers {
    users: Mutex<Vec<RegisteredUser>>,
}

impl RegisteredUsers {
    pub fn new() -> Self {
        Self {
            users: Mutex::new(Vec::new()),
        }
    }

    fn users(&self) -> MutexGuard<'_, Vec<RegisteredUser>> {
        // A panic while holding the lock cannot leave the Vec half-written.
        self.users.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Find a user by email (linear scan)
    pub fn find_by_email(&self, email: &str) -> Option<RegisteredUser> {
        self.users().iter().find(|u| u.user.email == email).cloned()
    }

    /// Find a user by id (linear scan)
    pub fn find_by_id(&self, id: &str) -> Option<RegisteredUser> {
        self.users().iter().find(|u| u.user.id == id).cloned()
    }

    /// Append a user unless the email is already taken.
    ///
    /// `build` receives the current list length. Returns None if the email exists.
    pub fn insert_unique<F>(&self, email: &str, build: F) -> Option<RegisteredUser>
    where
        F: FnOnce(usize) -> RegisteredUser,
    {
        let mut users = self.users();
        if users.iter().any(|u| u.user.email == email) {
            return None;
        }

        let user = build(users.len());
        users.push(user.clone());
        Some(user)
    }

    /// Run `f` against the current list while holding the lock.
    ///
    /// Used to persist: whichever writer runs last writes the complete list.
    pub fn with_users<R>(&self, f: impl FnOnce(&[RegisteredUser]) -> R) -> R {
        f(&self.users())
    }

    /// Replace the whole list, e.g. after loading from storage
    pub fn replace(&self, users: Vec<RegisteredUser>) {
        *self.users() = users;
    }

    pub fn len(&self) -> usize {
        self.users().len()
    }

    pub fn is_empty(&self) -> bool {
        self.users().is_empty()
    }
}

impl Default for RegisteredUsers {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::user::{Role, User};

    fn patient(index: usize, email: &str) -> RegisteredUser {
        RegisteredUser {
            user: User::new(
                format!("patient-{}", index + 1),
                "Patient".to_string(),
                email.to_string(),
                Role::Patient,
                String::new(),
            ),
            password: "pw".to_string(),
        }
    }

    #[test]
    fn test_insert_unique_assigns_sequential_ids() {
        let list = RegisteredUsers::new();

        let first = list.insert_unique("a@x.com", |n| patient(n, "a@x.com")).unwrap();
        let second = list.insert_unique("b@x.com", |n| patient(n, "b@x.com")).unwrap();

        assert_eq!(first.user.id, "patient-1");
        assert_eq!(second.user.id, "patient-2");

        let emails = list.with_users(|users| {
            users.iter().map(|u| u.user.email.clone()).collect::<Vec<_>>()
        });
        assert_eq!(emails, vec!["a@x.com", "b@x.com"]);
    }

    #[test]
    fn test_insert_unique_rejects_duplicate_email() {
        let list = RegisteredUsers::new();
        list.insert_unique("a@x.com", |n| patient(n, "a@x.com")).unwrap();

        assert!(list.insert_unique("a@x.com", |n| patient(n, "a@x.com")).is_none());
        assert_eq!(list.len(), 1);
    }

    #[test]
    fn test_lookup() {
        let list = RegisteredUsers::new();
        list.replace(vec![patient(0, "a@x.com"), patient(1, "b@x.com")]);

        assert_eq!(list.find_by_email("b@x.com").unwrap().user.id, "patient-2");
        assert_eq!(list.find_by_id("patient-1").unwrap().user.email, "a@x.com");
        assert!(list.find_by_id("patient-9").is_none());
    }

    #[test]
    fn test_replace_discards_previous_list() {
        let list = RegisteredUsers::new();
        list.insert_unique("a@x.com", |n| patient(n, "a@x.com")).unwrap();

        list.replace(vec![patient(0, "b@x.com")]);
        assert_eq!(list.len(), 1);
        assert!(list.find_by_email("a@x.com").is_none());

        list.replace(Vec::new());
        assert!(list.is_empty());
    }
}
