use super::*;

pub fn register_user(connections: &sqlite::Connections, new_user: usecases::NewUser) -> Result<User> {
    let user = connections
        .exclusive()?
        .transaction(|conn| usecases::create_new_user(conn, new_user))?;
    log::info!("Registered new user {}", user.id);
    Ok(user)
}
