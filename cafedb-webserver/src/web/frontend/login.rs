use maud::Markup;
use rocket::{
    self,
    form::Form,
    get,
    http::{Cookie, CookieJar, SameSite},
    post,
    request::FlashMessage,
    response::{Flash, Redirect},
    uri, FromForm,
};

use cafedb_application::{
    error::{AppError, BError},
    prelude as flows,
};
use cafedb_core::usecases::{self, Error as ParameterError};

use super::{cafes, view};
use crate::web::{guards::*, state::Connections};

#[derive(FromForm)]
pub struct LoginCredentials<'r> {
    email: &'r str,
    password: &'r str,
}

#[allow(clippy::result_large_err)]
#[get("/login")]
pub fn get_login(
    account: Option<Account>,
    flash: Option<FlashMessage>,
) -> std::result::Result<Markup, Redirect> {
    if account.is_some() {
        Err(Redirect::to(uri!(cafes::get_cafes(_, _))))
    } else {
        Ok(view::login(flash))
    }
}

#[post("/login", data = "<credentials>")]
pub fn post_login(
    db: Connections,
    credentials: Form<LoginCredentials>,
    cookies: &CookieJar<'_>,
) -> Flash<Redirect> {
    let credentials = usecases::Credentials {
        email: credentials.email,
        password: credentials.password,
    };
    match flows::login(&db, &credentials) {
        Ok(user) => {
            cookies.add_private(
                Cookie::build((COOKIE_USER_KEY, user.id.to_string()))
                    .http_only(true)
                    .same_site(SameSite::Lax),
            );
            Flash::success(
                Redirect::to(uri!(cafes::get_cafes(_, _))),
                "Signed in successfully.",
            )
        }
        Err(AppError::Business(BError::Parameter(ParameterError::Credentials))) => Flash::error(
            Redirect::to(uri!(get_login)),
            "Invalid email or password.",
        ),
        Err(err) => {
            error!("Failed to login: {err}");
            Flash::error(
                Redirect::to(uri!(get_login)),
                "We are so sorry! An internal server error has occurred. Please try again later.",
            )
        }
    }
}

#[post("/logout")]
pub fn post_logout(cookies: &CookieJar<'_>) -> Flash<Redirect> {
    cookies.remove_private(COOKIE_USER_KEY);
    Flash::success(
        Redirect::to(uri!(super::get_index)),
        "You have successfully logged out.",
    )
}
