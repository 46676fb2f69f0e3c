//! Session accessors.

use mauria_shared::Session;

use crate::store::Store;

pub const EMAIL_KEY: &str = "email";
pub const PASSWORD_KEY: &str = "password";
pub const NAME_KEY: &str = "name";

impl Store {
    /// The stored session, present iff both credential keys exist.
    pub fn session(&self) -> Option<Session> {
        let email = self.read(EMAIL_KEY)?;
        let password = self.read(PASSWORD_KEY)?;
        Some(Session { email, password })
    }

    pub fn set_session(&self, session: &Session) {
        self.write(EMAIL_KEY, &session.email);
        self.write(PASSWORD_KEY, &session.password);
    }

    /// Log out: drop both credential keys.
    pub fn clear_session(&self) {
        self.remove(EMAIL_KEY);
        self.remove(PASSWORD_KEY);
    }

    /// The student's display name, pushed by the host or the login flow.
    pub fn display_name(&self) -> Option<String> {
        self.read(NAME_KEY)
    }

    pub fn set_display_name(&self, name: &str) {
        self.write(NAME_KEY, name);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn session_requires_both_keys() {
        let store = Store::open_in_memory().unwrap();
        assert!(store.session().is_none());

        store.write(EMAIL_KEY, "a@b.fr");
        // Password missing: still logged out.
        assert!(store.session().is_none());

        store.write(PASSWORD_KEY, "hunter2");
        let session = store.session().unwrap();
        assert_eq!(session.email, "a@b.fr");
        assert_eq!(session.password, "hunter2");
    }

    #[test]
    fn clear_session_logs_out() {
        let store = Store::open_in_memory().unwrap();
        store.set_session(&Session {
            email: "a@b.fr".into(),
            password: "hunter2".into(),
        });
        assert!(store.session().is_some());

        store.clear_session();
        assert!(store.session().is_none());
    }
}
