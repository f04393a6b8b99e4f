use maud::{html, Markup};
use rocket::{request::FlashMessage, uri};

use cafedb_core::{
    entities::*,
    usecases::{CafeDetails, CafeFields},
    util::{paging::Page, validate::CafeInvalidation},
};

use super::{leaflet_css_link, map_scripts, page};
use crate::web::frontend::cafes::{self, cafe_path};

pub enum CafeFormAction<'a> {
    Create,
    Update(&'a str),
}

fn address_line(cafe: &Cafe) -> String {
    let mut parts = vec![cafe.address.as_str(), cafe.city.as_str()];
    if let Some(state) = &cafe.state {
        parts.push(state.as_str());
    }
    parts.join(", ")
}

fn map() -> Markup {
    html! {
        div id="map" {}
    }
}

fn search_form(search: Option<&str>) -> Markup {
    html! {
        form class="search" action="/cafes" method="GET" {
            input
                type="text"
                name="search"
                value=(search.unwrap_or_default())
                placeholder="City or suburb";
            input type="submit" value="search";
        }
    }
}

fn pager(search: Option<&str>, results: &Page<Cafe>) -> Markup {
    let page_uri = |n: u64| uri!(cafes::get_cafes(search, Some(n))).to_string();
    html! {
        @if results.total_pages() > 1 {
            nav class="pager" {
                @if let Some(prev) = results.prev_page() {
                    a rel="prev" href=(page_uri(prev)) { "previous" }
                }
                span class="current" {
                    (format!("page {} of {}", results.request.page(), results.total_pages()))
                }
                @if let Some(next) = results.next_page() {
                    a rel="next" href=(page_uri(next)) { "next" }
                }
            }
        }
    }
}

fn cafe_summary(cafe: &Cafe) -> Markup {
    html! {
        a href=(cafe_path(cafe.slug.as_str())) { (cafe.name) }
        " "
        span class="votes" { (cafe.votes) }
        br;
        span class="address" { (address_line(cafe)) }
    }
}

pub fn cafes(
    user: Option<&User>,
    flash: Option<FlashMessage>,
    search: Option<&str>,
    location: Option<&Location>,
    results: &Page<Cafe>,
) -> Markup {
    page(
        "Cafes",
        user,
        flash,
        Some(leaflet_css_link()),
        html! {
            main {
                h1 { "Cafes" }
                (search_form(search))
                @if let Some(location) = location {
                    h2 class="location" {
                        "Cafes in " (location.name)
                        @if let Some(state) = &location.state {
                            ", " (state)
                        }
                    }
                }
                (map())
                @if results.items.is_empty() {
                    @if let Some(search) = search {
                        p { "Sorry, we could not find any cafes near " em { (search) } "." }
                    } @else {
                        p { "There are no cafes yet." }
                    }
                } @else {
                    ul class="cafes" {
                        @for cafe in &results.items {
                            li { (cafe_summary(cafe)) }
                        }
                    }
                    (pager(search, results))
                }
            }
            (map_scripts())
        },
    )
}

// The current vote of the user is marked as voted
fn vote_forms(cafe: &Cafe, own_vote: Option<VoteDirection>) -> Markup {
    let path = cafe_path(cafe.slug.as_str());
    let class = |direction| {
        if own_vote == Some(direction) {
            "vote voted"
        } else {
            "vote"
        }
    };
    html! {
        form class=(class(VoteDirection::Up)) action=(format!("{path}/upvote")) method="POST" {
            input type="submit" value="upvote";
        }
        form class=(class(VoteDirection::Down)) action=(format!("{path}/downvote")) method="POST" {
            input type="submit" value="downvote";
        }
    }
}

fn owner_actions(cafe: &Cafe) -> Markup {
    let path = cafe_path(cafe.slug.as_str());
    html! {
        nav class="owner" {
            a href=(format!("{path}/edit")) { "edit" }
            form class="delete" action=(path) method="POST" {
                input type="hidden" name="_method" value="DELETE";
                input type="submit" value="delete";
            }
        }
    }
}

pub fn cafe(
    user: Option<&User>,
    own_vote: Option<VoteDirection>,
    flash: Option<FlashMessage>,
    details: &CafeDetails,
) -> Markup {
    let CafeDetails {
        cafe,
        location,
        comments,
        nearby,
    } = details;
    page(
        &cafe.name,
        user,
        flash,
        Some(leaflet_css_link()),
        html! {
            main class="cafe" {
                h1 { (cafe.name) }
                p class="address" { (address_line(cafe)) }
                @if cafe.pos.is_none() {
                    p class="alert" { "The address of this cafe could not be found on the map." }
                }
                @if let Some(location) = location {
                    p class="location" {
                        "Location: "
                        a href=(uri!(cafes::get_cafes(Some(location.name.as_str()), _)).to_string()) {
                            (location.name)
                        }
                    }
                }
                p class="description" { (cafe.description) }
                p class="owner" { "Added by " (cafe.owner.name) " on " (cafe.created_at.format_date()) }
                div class="votes" {
                    span class="tally" { (cafe.votes) }
                    @if user.is_some() {
                        (vote_forms(cafe, own_vote))
                    }
                }
                @if user.is_some_and(|user| cafe.is_owned_by(&user.id)) {
                    (owner_actions(cafe))
                }
                (map())
                h2 { "Nearby cafes" }
                @if nearby.is_empty() {
                    p { "There are no other cafes nearby." }
                } @else {
                    ul class="nearby" {
                        @for n in nearby {
                            li {
                                a href=(cafe_path(n.cafe.slug.as_str())) { (n.cafe.name) }
                                " "
                                span class="distance" { (n.distance.to_string()) }
                            }
                        }
                    }
                }
                h2 { "Comments" }
                @if comments.is_empty() {
                    p { "No comments yet." }
                } @else {
                    ul class="comments" {
                        @for c in comments {
                            li {
                                p { (c.text) }
                                span class="author" {
                                    (c.author_name.as_deref().unwrap_or("Anonymous"))
                                    ", "
                                    (c.created_at.format_date())
                                }
                            }
                        }
                    }
                }
            }
            (map_scripts())
        },
    )
}

fn validation_errors(errors: &[CafeInvalidation]) -> Markup {
    html! {
        @if !errors.is_empty() {
            div class="errors" {
                h2 {
                    @if errors.len() == 1 {
                        "1 error prohibited this cafe from being saved:"
                    } @else {
                        (format!("{} errors prohibited this cafe from being saved:", errors.len()))
                    }
                }
                ul {
                    @for e in errors {
                        li { (e.to_string()) }
                    }
                }
            }
        }
    }
}

pub fn cafe_form(
    user: &User,
    flash: Option<FlashMessage>,
    action: CafeFormAction,
    fields: &CafeFields,
    errors: &[CafeInvalidation],
) -> Markup {
    let (title, form_action, method_override) = match action {
        CafeFormAction::Create => ("New cafe", "/cafes".to_owned(), None),
        CafeFormAction::Update(slug) => ("Edit cafe", cafe_path(slug), Some("PATCH")),
    };
    page(
        title,
        Some(user),
        flash,
        None,
        html! {
            main {
                h1 { (title) }
                (validation_errors(errors))
                form class="cafe" action=(form_action) method="POST" {
                    // Must be the first field
                    @if let Some(method) = method_override {
                        input type="hidden" name="_method" value=(method);
                    }
                    fieldset {
                        label {
                            "Name:" br;
                            input type="text" name="name" value=(fields.name);
                        }
                        br;
                        label {
                            "Address:" br;
                            input type="text" name="address" value=(fields.address);
                        }
                        br;
                        label {
                            "City or suburb:" br;
                            input type="text" name="city" value=(fields.city);
                        }
                        br;
                        label {
                            "State:" br;
                            input type="text" name="state" value=(fields.state.as_deref().unwrap_or_default());
                        }
                        br;
                        label {
                            "Description:" br;
                            textarea name="description" { (fields.description) }
                        }
                        br;
                        input type="submit" value="save";
                    }
                }
            }
        },
    )
}
