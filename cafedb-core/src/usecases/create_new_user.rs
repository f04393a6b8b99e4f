use super::prelude::*;
use crate::util::validate;

#[derive(Debug, Clone)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
}

pub fn create_new_user<R: UserRepo>(repo: &R, u: NewUser) -> Result<User> {
    let name = u.name.trim();
    if name.is_empty() {
        return Err(Error::UserName);
    }
    let email = u.email.trim().to_lowercase();
    if !validate::is_valid_email(&email) {
        return Err(Error::Email);
    }
    if !validate::is_valid_password(&u.password) {
        return Err(Error::Password);
    }
    if repo.try_get_user_by_email(&email)?.is_some() {
        return Err(Error::UserExists);
    }
    let new_user = User {
        id: Id::new(),
        name: name.to_owned(),
        email,
        password: u.password.parse::<Password>()?,
        created_at: Timestamp::now(),
    };
    log::debug!("Creating new user: email = {}", new_user.email);
    repo.create_user(&new_user)?;
    Ok(new_user)
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    fn new_user(email: &str, password: &str) -> NewUser {
        NewUser {
            name: "Alice".into(),
            email: email.into(),
            password: password.into(),
        }
    }

    #[test]
    fn create_two_users() {
        let db = MockDb::default();
        assert!(create_new_user(&db, new_user("foo@bar.de", "secret1")).is_ok());
        assert!(create_new_user(&db, new_user("baz@bar.de", "secret2")).is_ok());
        assert!(db.try_get_user_by_email("foo@bar.de").unwrap().is_some());
        assert!(db.try_get_user_by_email("baz@bar.de").unwrap().is_some());
        assert!(db.try_get_user_by_email("nobody@bar.de").unwrap().is_none());
    }

    #[test]
    fn normalize_email() {
        let db = MockDb::default();
        let user = create_new_user(&db, new_user(" Foo@Bar.de ", "secret1")).unwrap();
        assert_eq!("foo@bar.de", user.email);
    }

    #[test]
    fn reject_invalid_input() {
        let db = MockDb::default();
        assert!(matches!(
            create_new_user(&db, new_user("fooo@", "secret1")),
            Err(Error::Email)
        ));
        assert!(matches!(
            create_new_user(&db, new_user("foo@bar.de", "12345")),
            Err(Error::Password)
        ));
        let mut u = new_user("foo@bar.de", "secret1");
        u.name = " ".into();
        assert!(matches!(create_new_user(&db, u), Err(Error::UserName)));
        assert!(db.users.borrow().is_empty());
    }

    #[test]
    fn reject_existing_email() {
        let db = MockDb::default();
        create_new_user(&db, new_user("foo@bar.de", "secret1")).unwrap();
        assert!(matches!(
            create_new_user(&db, new_user("FOO@bar.de", "secret2")),
            Err(Error::UserExists)
        ));
    }

    #[test]
    fn encrypt_user_password() {
        let db = MockDb::default();
        create_new_user(&db, new_user("foo@bar.de", "secret1")).unwrap();
        let users = db.users.borrow();
        assert_ne!("secret1", users[0].password.as_hash());
        assert!(users[0].password.verify("secret1"));
    }
}
