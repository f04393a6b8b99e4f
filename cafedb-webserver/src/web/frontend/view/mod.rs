use maud::{html, Markup};

const LEAFLET_CSS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.css";
const LEAFLET_CSS_SHA256: &str = "sha256-p4NxAoJBhIIN+hmNHrzRCf9tD/miZyoHS5obTRR9BMY=";
const LEAFLET_JS_URL: &str = "https://unpkg.com/leaflet@1.9.4/dist/leaflet.js";
const LEAFLET_JS_SHA256: &str = "sha256-20nQCchB9co0qIjJZRGuk2/Z9VM+kNiyxNV1lvTlZBo=";
const MAP_JS_URL: &str = "/map.js";
const MAIN_CSS_URL: &str = "/main.css";

mod cafe;
mod login;
mod page;
mod register;

pub use cafe::*;
pub use login::*;
use page::*;
pub use register::*;

fn leaflet_css_link() -> Markup {
    html! {
        link
            rel="stylesheet"
            href=(LEAFLET_CSS_URL)
            integrity=(LEAFLET_CSS_SHA256)
            crossorigin="";
    }
}

// The map fetches its features on its own, see map.js
fn map_scripts() -> Markup {
    html! {
        script
            src=(LEAFLET_JS_URL)
            integrity=(LEAFLET_JS_SHA256)
            crossorigin="" {}
        script src=(MAP_JS_URL) {}
    }
}

pub fn not_found() -> Markup {
    page(
        "Not found",
        None,
        None,
        None,
        html! {
            main {
                h1 { "Not found" }
                p { "The page you were looking for doesn't exist." }
                a href="/cafes" { "Back to all cafes" }
            }
        },
    )
}

pub fn internal_error() -> Markup {
    page(
        "Internal error",
        None,
        None,
        None,
        html! {
            main {
                h1 { "We're sorry, but something went wrong." }
                p { "Please try again later." }
            }
        },
    )
}
