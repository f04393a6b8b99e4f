#![allow(clippy::extra_unused_lifetimes)]

// NOTE:
// All timestamps with the `_at` postfix are stored
// as unix timestamp in **milli**seconds.

use super::schema::*;

#[derive(Insertable)]
#[diesel(table_name = users)]
pub struct NewUser<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub email: &'a str,
    pub password: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct UserEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub email: String,
    pub password: String,
    pub created_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = locations)]
pub struct NewLocation<'a> {
    pub id: &'a str,
    pub name: &'a str,
    pub state: Option<&'a str>,
    pub country: Option<&'a str>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct LocationEntity {
    pub rowid: i64,
    pub id: String,
    pub name: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub created_at: i64,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = cafes)]
#[diesel(treat_none_as_null = true)]
pub struct NewCafe<'a> {
    pub id: &'a str,
    pub slug: &'a str,
    pub name: &'a str,
    pub description: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub state: Option<&'a str>,
    pub country: Option<&'a str>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub owner_rowid: i64,
    pub location_rowid: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Queryable)]
pub struct JoinedCafe {
    pub rowid: i64,
    pub id: String,
    pub slug: String,
    pub name: String,
    pub description: String,
    pub address: String,
    pub city: String,
    pub state: Option<String>,
    pub country: Option<String>,
    pub lat: Option<f64>,
    pub lon: Option<f64>,
    pub created_at: i64,
    pub updated_at: i64,
    // Joined columns
    pub owner_id: String,
    pub owner_name: String,
    pub location_id: Option<String>,
}

#[derive(Insertable)]
#[diesel(table_name = cafe_votes)]
pub struct NewVote {
    pub cafe_rowid: i64,
    pub user_rowid: i64,
    pub value: i32,
    pub voted_at: i64,
}

#[derive(Insertable)]
#[diesel(table_name = cafe_comments)]
pub struct NewComment<'a> {
    pub id: &'a str,
    pub cafe_rowid: i64,
    pub author_name: Option<&'a str>,
    pub text: &'a str,
    pub created_at: i64,
}

#[derive(Queryable)]
pub struct JoinedComment {
    pub id: String,
    pub author_name: Option<String>,
    pub text: String,
    pub created_at: i64,
    // Joined columns
    pub cafe_id: String,
}
