///////////////////////////////////////////////////////////////////////
// Users
///////////////////////////////////////////////////////////////////////

table! {
    users (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        email -> Text,
        password -> Text,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Locations
///////////////////////////////////////////////////////////////////////

table! {
    locations (rowid) {
        rowid -> BigInt,
        id -> Text,
        name -> Text,
        state -> Nullable<Text>,
        country -> Nullable<Text>,
        lat -> Nullable<Double>,
        lon -> Nullable<Double>,
        created_at -> BigInt,
    }
}

///////////////////////////////////////////////////////////////////////
// Cafes
///////////////////////////////////////////////////////////////////////

table! {
    cafes (rowid) {
        rowid -> BigInt,
        id -> Text,
        slug -> Text,
        name -> Text,
        description -> Text,
        address -> Text,
        city -> Text,
        state -> Nullable<Text>,
        country -> Nullable<Text>,
        lat -> Nullable<Double>,
        lon -> Nullable<Double>,
        owner_rowid -> BigInt,
        location_rowid -> Nullable<BigInt>,
        created_at -> BigInt,
        updated_at -> BigInt,
    }
}

joinable!(cafes -> users (owner_rowid));
joinable!(cafes -> locations (location_rowid));

table! {
    cafe_votes (cafe_rowid, user_rowid) {
        cafe_rowid -> BigInt,
        user_rowid -> BigInt,
        value -> Integer,
        voted_at -> BigInt,
    }
}

joinable!(cafe_votes -> cafes (cafe_rowid));
joinable!(cafe_votes -> users (user_rowid));

table! {
    cafe_comments (rowid) {
        rowid -> BigInt,
        id -> Text,
        cafe_rowid -> BigInt,
        author_name -> Nullable<Text>,
        text -> Text,
        created_at -> BigInt,
    }
}

joinable!(cafe_comments -> cafes (cafe_rowid));

allow_tables_to_appear_in_same_query!(cafe_comments, cafe_votes, cafes, locations, users);
