use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::page::*;

pub(super) fn credential_fields() -> Markup {
    html! {
        label {
            "Email:" br;
            input type="email" name="email" required autocomplete="email";
        }
        br;
        label {
            "Password:" br;
            input type="password" name="password" required autocomplete="current-password";
        }
        br;
    }
}

pub fn login(flash: Option<FlashMessage>) -> Markup {
    page(
        "Sign in",
        None,
        flash,
        None,
        html! {
            main {
                h1 { "Sign in" }
                form class="login" action="/login" method="POST" {
                    fieldset {
                        (credential_fields())
                        input type="submit" value="sign in";
                    }
                }
                p { "No account yet? " a href="/register" { "Sign up" } }
            }
        },
    )
}
