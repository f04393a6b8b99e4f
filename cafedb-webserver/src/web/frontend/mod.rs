use std::convert::Infallible;

use cafedb_boundary::{cafes_to_features, Feature};
use cafedb_core::entities::{Cafe, User};
use maud::Markup;
use rocket::{
    self, catch, catchers, get,
    http::Status,
    request::FromParam,
    response::{
        content::{RawCss, RawJavaScript},
        Flash, Redirect,
    },
    routes,
    serde::json::Json,
    uri, Catcher, Responder, Route,
};

use super::guards::Account;

mod cafes;
mod login;
mod register;
mod view;


const MAP_JS: &str = include_str!("map.js");
const MAIN_CSS: &str = include_str!("main.css");

/// How a resource is rendered, selected by the `.json` suffix of the path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResponseFormat {
    Html,
    Json,
}

#[derive(Responder)]
pub enum Rendered {
    Html(Markup),
    Json(Json<Vec<Feature>>),
}

impl Rendered {
    pub fn features<'a>(cafes: impl IntoIterator<Item = &'a Cafe>) -> Self {
        Self::Json(Json(cafes_to_features(cafes)))
    }
}

/// A cafe slug with an optional `.json` suffix.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CafeParam<'r> {
    pub slug: &'r str,
    pub format: ResponseFormat,
}

impl<'r> FromParam<'r> for CafeParam<'r> {
    type Error = Infallible;

    fn from_param(param: &'r str) -> Result<Self, Self::Error> {
        let (slug, format) = match param.strip_suffix(".json") {
            Some(slug) => (slug, ResponseFormat::Json),
            None => (param, ResponseFormat::Html),
        };
        Ok(Self { slug, format })
    }
}

#[get("/")]
pub fn get_index() -> Redirect {
    Redirect::to(uri!(cafes::get_cafes(_, _)))
}

#[get("/map.js")]
pub fn get_map_js() -> RawJavaScript<&'static str> {
    RawJavaScript(MAP_JS)
}

#[get("/main.css")]
pub fn get_main_css() -> RawCss<&'static str> {
    RawCss(MAIN_CSS)
}

#[catch(401)]
pub fn unauthorized() -> Flash<Redirect> {
    Flash::error(
        Redirect::to(uri!(login::get_login)),
        "You need to sign in or sign up before continuing.",
    )
}

#[catch(404)]
pub fn not_found() -> (Status, Markup) {
    (Status::NotFound, view::not_found())
}

#[catch(500)]
pub fn internal_error() -> (Status, Markup) {
    (Status::InternalServerError, view::internal_error())
}

pub fn routes() -> Vec<Route> {
    routes![
        get_index,
        get_map_js,
        get_main_css,
        cafes::get_cafes,
        cafes::get_cafes_json,
        cafes::get_cafe,
        cafes::get_new_cafe,
        cafes::post_cafe,
        cafes::post_new_cafe,
        cafes::get_edit_cafe,
        cafes::patch_cafe,
        cafes::patch_edit_cafe,
        cafes::delete_cafe,
        cafes::post_upvote,
        cafes::post_downvote,
        login::get_login,
        login::post_login,
        login::post_logout,
        register::get_register,
        register::post_register,
    ]
}

pub fn catchers() -> Vec<Catcher> {
    catchers![unauthorized, not_found, internal_error]
}

// Shared by all pages that show the login state
fn current_user(account: &Option<Account>) -> Option<&User> {
    account.as_ref().map(Account::user)
}
