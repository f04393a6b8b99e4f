use cafedb_core::entities::User;
use maud::{html, Markup, DOCTYPE};
use rocket::request::FlashMessage;

use super::MAIN_CSS_URL;

pub fn page(
    title: &str,
    user: Option<&User>,
    flash: Option<FlashMessage>,
    h: Option<Markup>,
    content: Markup,
) -> Markup {
    html! {
        (DOCTYPE)
        head{
            meta charset="utf-8";
            meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no";
            title {(title)}
            link rel="stylesheet" href=(MAIN_CSS_URL);
            @if let Some(h) = h {
               (h)
            }
        }
        body{
            (header(user))
            (flash_msg(flash))
            (content)
        }
    }
}

fn flash_msg(flash: Option<FlashMessage>) -> Markup {
    html! {
        @if let Some(msg) = flash {
            div class=(format!("flash {}", msg.kind())) {
                (msg.message())
            }
        }
    }
}

fn header(user: Option<&User>) -> Markup {
    html! {
    header {
        a class="home" href="/cafes" { "CafeDB" }
        @if let Some(user) = user {
            div class="msg" { "Signed in as " span class="user" { (user.name) } }
            nav {
                a href="/cafes/new" { "add a cafe" }
                form class="logout" action="/logout" method="POST" {
                    input type="submit" value="logout";
                }
            }
        }
        @ else {
            nav {
                a href="/login" { "sign in" }
                a href="/register" { "sign up" }
            }
        }
    }
    }
}
