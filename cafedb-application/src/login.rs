use super::*;

pub fn login(connections: &sqlite::Connections, credentials: &usecases::Credentials) -> Result<User> {
    let db = connections.shared()?;
    Ok(usecases::login_with_email(&db, credentials)?)
}
