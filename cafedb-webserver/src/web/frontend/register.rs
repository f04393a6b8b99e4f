use maud::Markup;
use rocket::{
    self,
    form::Form,
    get, post,
    request::FlashMessage,
    response::{Flash, Redirect},
    uri, FromForm,
};

use cafedb_application::{
    error::{AppError, BError},
    prelude as flows,
};
use cafedb_core::usecases::{self, Error as ParameterError};

use super::{login, view};
use crate::web::state::Connections;

#[derive(FromForm)]
pub struct Registration {
    name: String,
    email: String,
    password: String,
}

#[get("/register")]
pub fn get_register(flash: Option<FlashMessage>) -> Markup {
    view::register(flash)
}

#[allow(clippy::result_large_err)]
#[post("/register", data = "<registration>")]
pub fn post_register(
    db: Connections,
    registration: Form<Registration>,
) -> std::result::Result<Flash<Redirect>, Flash<Redirect>> {
    let Registration {
        name,
        email,
        password,
    } = registration.into_inner();
    let new_user = usecases::NewUser {
        name,
        email,
        password,
    };
    match flows::register_user(&db, new_user) {
        Ok(_) => Ok(Flash::success(
            Redirect::to(uri!(login::get_login)),
            "Registered successfully. Please sign in.",
        )),
        Err(err) => {
            let msg = match err {
                AppError::Business(BError::Parameter(err)) => match err {
                    ParameterError::UserExists => "A user with your email address already exists.",
                    ParameterError::UserName => "Please tell us your name.",
                    ParameterError::Email => "Invalid email address.",
                    ParameterError::Password => "Your password is too short.",
                    err => {
                        error!("Failed to register user: {err}");
                        "We are so sorry, something went wrong :("
                    }
                },
                err => {
                    error!("Failed to register user: {err}");
                    "We are so sorry, something went wrong :("
                }
            };
            Err(Flash::error(Redirect::to(uri!(get_register)), msg))
        }
    }
}

#[cfg(test)]
mod tests {
    use crate::web::tests::prelude::*;

    #[test]
    fn register_and_login() {
        let (client, db, _) = rocket_test_setup();
        let res = client
            .post("/register")
            .header(ContentType::Form)
            .body("name=Alice&email=alice%40example.com&password=secret123")
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(res.headers().get_one("Location"), Some("/login"));
        assert!(db
            .shared()
            .unwrap()
            .try_get_user_by_email("alice@example.com")
            .unwrap()
            .is_some());

        let res = login(&client, "alice@example.com", "secret123");
        assert_eq!(res.headers().get_one("Location"), Some("/cafes"));
    }

    #[test]
    fn reject_duplicate_email() {
        let (client, db, _) = rocket_test_setup();
        register_user(&db, "Alice", "alice@example.com", PASSWORD);
        let res = client
            .post("/register")
            .header(ContentType::Form)
            .body("name=Other&email=alice%40example.com&password=secret123")
            .dispatch();
        assert_eq!(res.status(), Status::SeeOther);
        assert_eq!(res.headers().get_one("Location"), Some("/register"));
        let res = client.get("/register").dispatch();
        let body = res.into_string().unwrap();
        assert!(body.contains("A user with your email address already exists."));
    }
}
