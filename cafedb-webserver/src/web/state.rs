//! Request guards for the shared backend handles.
//!
//! The handles are managed by Rocket and cloned into every
//! request that asks for them. They are wrapped into local
//! types to be able to implement `FromRequest`.

use rocket::{
    outcome::try_outcome,
    request::{FromRequest, Outcome},
    Request, State,
};
use std::ops::{Deref, DerefMut};

macro_rules! managed_handle {
    ($(#[$meta:meta])* $name:ident($inner:ty)) => {
        $(#[$meta])*
        #[derive(Clone)]
        pub struct $name(pub $inner);

        impl From<$inner> for $name {
            fn from(from: $inner) -> Self {
                Self(from)
            }
        }

        impl Deref for $name {
            type Target = $inner;
            fn deref(&self) -> &Self::Target {
                &self.0
            }
        }

        impl DerefMut for $name {
            fn deref_mut(&mut self) -> &mut Self::Target {
                &mut self.0
            }
        }

        #[rocket::async_trait]
        impl<'r> FromRequest<'r> for $name {
            type Error = ();

            async fn from_request(request: &'r Request<'_>) -> Outcome<Self, Self::Error> {
                let handle = try_outcome!(request.guard::<&State<$name>>().await);
                Outcome::Success(handle.inner().clone())
            }
        }
    };
}

managed_handle!(
    /// Pooled SQLite connections, see `shared()` and `exclusive()`.
    Connections(cafedb_db_sqlite::Connections)
);

managed_handle!(SearchEngine(cafedb_db_tantivy::SearchEngine));
