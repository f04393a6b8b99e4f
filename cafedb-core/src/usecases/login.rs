use super::prelude::*;

pub struct Credentials<'a> {
    pub email: &'a str,
    pub password: &'a str,
}

pub fn login_with_email<R>(repo: &R, login: &Credentials) -> Result<User>
where
    R: UserRepo,
{
    let email = login.email.trim().to_lowercase();
    match repo.try_get_user_by_email(&email)? {
        Some(user) if user.password.verify(login.password) => Ok(user),
        _ => Err(Error::Credentials),
    }
}

#[cfg(test)]
mod tests {
    use super::{
        super::{create_new_user::*, tests::*},
        *,
    };

    #[test]
    fn login_with_valid_and_invalid_credentials() {
        let db = MockDb::default();
        let user = create_new_user(
            &db,
            NewUser {
                name: "Alice".into(),
                email: "alice@example.com".into(),
                password: "secret1".into(),
            },
        )
        .unwrap();
        let ok = login_with_email(
            &db,
            &Credentials {
                email: "Alice@example.com",
                password: "secret1",
            },
        )
        .unwrap();
        assert_eq!(user.id, ok.id);
        assert!(matches!(
            login_with_email(
                &db,
                &Credentials {
                    email: "alice@example.com",
                    password: "secret2",
                }
            ),
            Err(Error::Credentials)
        ));
        assert!(matches!(
            login_with_email(
                &db,
                &Credentials {
                    email: "bob@example.com",
                    password: "secret1",
                }
            ),
            Err(Error::Credentials)
        ));
    }
}
