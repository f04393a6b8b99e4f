use super::*;

pub fn delete_cafe(connections: &sqlite::Connections, editor_id: &Id, slug: &str) -> Result<Cafe> {
    let cafe = connections
        .exclusive()?
        .transaction(|conn| usecases::delete_cafe(conn, editor_id, slug))?;
    log::info!("Deleted cafe '{}'", cafe.slug);
    Ok(cafe)
}
