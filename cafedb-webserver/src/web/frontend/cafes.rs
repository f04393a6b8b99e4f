use maud::Markup;
use rocket::{
    self, delete,
    form::Form,
    get, patch, post,
    request::FlashMessage,
    response::{Flash, Redirect},
    uri, FromForm, Responder, State,
};

use cafedb_application::{
    error::{AppError, BError},
    prelude as flows,
};
use cafedb_core::{
    entities::*,
    usecases::{self, Error as ParameterError},
    util::{
        paging::{Page, PageRequest},
        validate::CafeInvalidation,
    },
};

use super::{current_user, login, view, CafeParam, Rendered, ResponseFormat};
use crate::web::{
    error::Error,
    guards::*,
    state::{Connections, SearchEngine},
    Cfg,
};

type Result<T> = std::result::Result<T, Error>;

const CAFE_NOT_FOUND: &str = "Sorry, that cafe does not exist";

#[derive(FromForm)]
pub struct CafeForm {
    name: String,
    description: String,
    address: String,
    city: String,
    state: String,
}

impl From<CafeForm> for usecases::CafeFields {
    fn from(from: CafeForm) -> Self {
        let CafeForm {
            name,
            description,
            address,
            city,
            state,
        } = from;
        Self {
            name,
            description,
            address,
            city,
            state: Some(state),
        }
    }
}

#[derive(Responder)]
pub enum Submitted {
    Saved(Flash<Redirect>),
    #[response(status = 422)]
    Invalid(Markup),
}

pub fn cafe_path(slug: &str) -> String {
    format!("/cafes/{slug}")
}

fn cafe_not_found() -> Flash<Redirect> {
    Flash::error(Redirect::to(uri!(get_cafes(_, _))), CAFE_NOT_FOUND)
}

// Turns expected failures of a cafe action into a redirect with a notice.
fn recover(err: AppError, slug: &str) -> Result<Flash<Redirect>> {
    if err.is_not_found() {
        return Ok(cafe_not_found());
    }
    match err {
        AppError::Business(BError::Parameter(ParameterError::Forbidden)) => Ok(Flash::error(
            Redirect::to(cafe_path(slug)),
            "Only the owner of this cafe is allowed to do that.",
        )),
        AppError::Business(BError::Parameter(ParameterError::Unauthorized)) => Ok(Flash::error(
            Redirect::to(uri!(login::get_login)),
            "You need to sign in or sign up before continuing.",
        )),
        err => Err(err.into()),
    }
}

fn saved(stored: &usecases::StoredCafe, action: &str) -> Flash<Redirect> {
    let redirect = Redirect::to(cafe_path(stored.cafe.slug.as_str()));
    let notice = format!("Cafe {} {action} successfully.", stored.cafe.name);
    match stored.geocoding {
        usecases::Geocoding::Failed => Flash::warning(
            redirect,
            format!("{notice} Its address could not be found on the map."),
        ),
        usecases::Geocoding::Succeeded | usecases::Geocoding::Unchanged => {
            Flash::success(redirect, notice)
        }
    }
}

fn invalid_cafe(err: &AppError) -> Option<&[CafeInvalidation]> {
    match err {
        AppError::Business(BError::Parameter(ParameterError::InvalidCafe(errors))) => {
            Some(errors)
        }
        _ => None,
    }
}

struct CafeListing {
    search: Option<String>,
    location: Option<Location>,
    cafes: Page<Cafe>,
}

// A blank search lists all cafes.
fn load_listing(
    db: &Connections,
    search_engine: &SearchEngine,
    cfg: &Cfg,
    search: Option<&str>,
    page: Option<u64>,
) -> Result<CafeListing> {
    let request = PageRequest::new(page, cfg.page_size);
    let search = search.map(str::trim).filter(|text| !text.is_empty());
    let db = db.shared()?;
    let listing = match search {
        Some(text) => {
            let usecases::CafeSearchResult { location, cafes } =
                usecases::search_cafes(&db, &**search_engine, text, request)?;
            CafeListing {
                search: Some(text.to_owned()),
                location,
                cafes,
            }
        }
        None => CafeListing {
            search: None,
            location: None,
            cafes: usecases::list_cafes(&db, request)?,
        },
    };
    Ok(listing)
}

fn render_listing(
    format: ResponseFormat,
    user: Option<&User>,
    flash: Option<FlashMessage>,
    listing: &CafeListing,
) -> Rendered {
    match format {
        ResponseFormat::Html => Rendered::Html(view::cafes(
            user,
            flash,
            listing.search.as_deref(),
            listing.location.as_ref(),
            &listing.cafes,
        )),
        ResponseFormat::Json => Rendered::features(&listing.cafes.items),
    }
}

#[get("/cafes?<search>&<page>")]
pub fn get_cafes(
    db: Connections,
    search_engine: SearchEngine,
    cfg: &State<Cfg>,
    account: Option<Account>,
    flash: Option<FlashMessage>,
    search: Option<&str>,
    page: Option<u64>,
) -> Result<Rendered> {
    let listing = load_listing(&db, &search_engine, cfg, search, page)?;
    Ok(render_listing(
        ResponseFormat::Html,
        current_user(&account),
        flash,
        &listing,
    ))
}

#[get("/cafes.json?<search>&<page>")]
pub fn get_cafes_json(
    db: Connections,
    search_engine: SearchEngine,
    cfg: &State<Cfg>,
    search: Option<&str>,
    page: Option<u64>,
) -> Result<Rendered> {
    let listing = load_listing(&db, &search_engine, cfg, search, page)?;
    Ok(render_listing(ResponseFormat::Json, None, None, &listing))
}

#[get("/cafes/<cafe>")]
pub fn get_cafe(
    db: Connections,
    cfg: &State<Cfg>,
    account: Option<Account>,
    flash: Option<FlashMessage>,
    cafe: CafeParam<'_>,
) -> Result<std::result::Result<Rendered, Flash<Redirect>>> {
    let details = match usecases::load_cafe_details(&db.shared()?, cafe.slug, cfg.nearby_radius) {
        Ok(details) => details,
        Err(err) if err.is_not_found() => return Ok(Err(cafe_not_found())),
        Err(err) => return Err(err.into()),
    };
    let rendered = match cafe.format {
        ResponseFormat::Html => {
            let own_vote = match &account {
                Some(account) => {
                    usecases::own_vote(&db.shared()?, &details.cafe, account.user_id())?
                }
                None => None,
            };
            Rendered::Html(view::cafe(
                current_user(&account),
                own_vote,
                flash,
                &details,
            ))
        }
        // The cafe itself comes first
        ResponseFormat::Json => Rendered::features(
            std::iter::once(&details.cafe).chain(details.nearby.iter().map(|nearby| &nearby.cafe)),
        ),
    };
    Ok(Ok(rendered))
}

#[get("/cafes/new")]
pub fn get_new_cafe(account: Account, flash: Option<FlashMessage>) -> Markup {
    view::cafe_form(
        account.user(),
        flash,
        view::CafeFormAction::Create,
        &usecases::CafeFields::default(),
        &[],
    )
}

fn create_cafe(
    db: &Connections,
    mut search_engine: SearchEngine,
    geo: &GeoCoding,
    cfg: &Cfg,
    account: &Account,
    fields: usecases::CafeFields,
) -> Result<Submitted> {
    match flows::create_cafe(
        db,
        &mut *search_engine,
        &**geo,
        account.user_id(),
        fields.clone(),
        cfg.default_country.as_deref(),
    ) {
        Ok(stored) => Ok(Submitted::Saved(saved(&stored, "added"))),
        Err(err) => match invalid_cafe(&err) {
            Some(errors) => Ok(Submitted::Invalid(view::cafe_form(
                account.user(),
                None,
                view::CafeFormAction::Create,
                &fields,
                errors,
            ))),
            None => recover(err, "").map(Submitted::Saved),
        },
    }
}

#[post("/cafes", data = "<form>")]
pub fn post_cafe(
    db: Connections,
    search_engine: SearchEngine,
    geo: &State<GeoCoding>,
    cfg: &State<Cfg>,
    account: Account,
    form: Form<CafeForm>,
) -> Result<Submitted> {
    create_cafe(&db, search_engine, geo, cfg, &account, form.into_inner().into())
}

#[post("/cafes/new", data = "<form>")]
pub fn post_new_cafe(
    db: Connections,
    search_engine: SearchEngine,
    geo: &State<GeoCoding>,
    cfg: &State<Cfg>,
    account: Account,
    form: Form<CafeForm>,
) -> Result<Submitted> {
    create_cafe(&db, search_engine, geo, cfg, &account, form.into_inner().into())
}

#[get("/cafes/<slug>/edit")]
pub fn get_edit_cafe(
    db: Connections,
    account: Account,
    flash: Option<FlashMessage>,
    slug: &str,
) -> Result<std::result::Result<Markup, Flash<Redirect>>> {
    let cafe = match usecases::get_cafe_by_slug(&db.shared()?, slug) {
        Ok(cafe) => cafe,
        Err(err) => return recover(err.into(), slug).map(Err),
    };
    if !cafe.is_owned_by(account.user_id()) {
        return recover(ParameterError::Forbidden.into(), slug).map(Err);
    }
    Ok(Ok(view::cafe_form(
        account.user(),
        flash,
        view::CafeFormAction::Update(cafe.slug.as_str()),
        &usecases::CafeFields::from(&cafe),
        &[],
    )))
}

fn update_cafe(
    db: &Connections,
    mut search_engine: SearchEngine,
    geo: &GeoCoding,
    cfg: &Cfg,
    account: &Account,
    slug: &str,
    fields: usecases::CafeFields,
) -> Result<Submitted> {
    match flows::update_cafe(
        db,
        &mut *search_engine,
        &**geo,
        account.user_id(),
        slug,
        fields.clone(),
        cfg.default_country.as_deref(),
    ) {
        Ok(stored) => Ok(Submitted::Saved(saved(&stored, "updated"))),
        Err(err) => match invalid_cafe(&err) {
            Some(errors) => Ok(Submitted::Invalid(view::cafe_form(
                account.user(),
                None,
                view::CafeFormAction::Update(slug),
                &fields,
                errors,
            ))),
            None => recover(err, slug).map(Submitted::Saved),
        },
    }
}

#[patch("/cafes/<slug>", data = "<form>")]
pub fn patch_cafe(
    db: Connections,
    search_engine: SearchEngine,
    geo: &State<GeoCoding>,
    cfg: &State<Cfg>,
    account: Account,
    slug: &str,
    form: Form<CafeForm>,
) -> Result<Submitted> {
    let fields = form.into_inner().into();
    update_cafe(&db, search_engine, geo, cfg, &account, slug, fields)
}

#[patch("/cafes/<slug>/edit", data = "<form>")]
pub fn patch_edit_cafe(
    db: Connections,
    search_engine: SearchEngine,
    geo: &State<GeoCoding>,
    cfg: &State<Cfg>,
    account: Account,
    slug: &str,
    form: Form<CafeForm>,
) -> Result<Submitted> {
    let fields = form.into_inner().into();
    update_cafe(&db, search_engine, geo, cfg, &account, slug, fields)
}

#[delete("/cafes/<slug>")]
pub fn delete_cafe(db: Connections, account: Account, slug: &str) -> Result<Flash<Redirect>> {
    match flows::delete_cafe(&db, account.user_id(), slug) {
        Ok(cafe) => Ok(Flash::success(
            Redirect::to(uri!(super::get_index)),
            format!("Cafe {} deleted successfully.", cafe.name),
        )),
        Err(err) => recover(err, slug),
    }
}

fn vote(
    db: &Connections,
    account: &Account,
    referer: Referer,
    slug: &str,
    direction: VoteDirection,
) -> Result<std::result::Result<Redirect, Flash<Redirect>>> {
    match flows::vote(db, account.user_id(), slug, direction) {
        Ok(cafe) => {
            let redirect = match referer.into_inner() {
                Some(referer) => Redirect::to(referer),
                None => Redirect::to(cafe_path(cafe.slug.as_str())),
            };
            Ok(Ok(redirect))
        }
        Err(err) => recover(err, slug).map(Err),
    }
}

#[post("/cafes/<slug>/upvote")]
pub fn post_upvote(
    db: Connections,
    account: Account,
    referer: Referer,
    slug: &str,
) -> Result<std::result::Result<Redirect, Flash<Redirect>>> {
    vote(&db, &account, referer, slug, VoteDirection::Up)
}

#[post("/cafes/<slug>/downvote")]
pub fn post_downvote(
    db: Connections,
    account: Account,
    referer: Referer,
    slug: &str,
) -> Result<std::result::Result<Redirect, Flash<Redirect>>> {
    vote(&db, &account, referer, slug, VoteDirection::Down)
}
