use maud::{html, Markup};
use rocket::request::FlashMessage;

use super::{login::credential_fields, page::*};

pub fn register(flash: Option<FlashMessage>) -> Markup {
    page(
        "Sign up",
        None,
        flash,
        None,
        html! {
            main {
                h1 { "Sign up" }
                form class="register" action="/register" method="POST" {
                    fieldset {
                        label {
                            "Name:" br;
                            input type="text" name="name" required autocomplete="name";
                        }
                        br;
                        (credential_fields())
                        input type="submit" value="sign up";
                    }
                }
                p { "Already registered? " a href="/login" { "Sign in" } }
            }
        },
    )
}
