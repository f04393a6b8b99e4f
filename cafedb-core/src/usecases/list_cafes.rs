use super::prelude::*;

/// All cafes in the order of their creation, one page at a time.
pub fn list_cafes<R: CafeRepo>(repo: &R, request: PageRequest) -> Result<Page<Cafe>> {
    let total_items = repo.count_cafes()?;
    let items = repo.list_cafes(&request.to_pagination())?;
    Ok(Page {
        items,
        request,
        total_items,
    })
}

#[cfg(test)]
mod tests {
    use super::{super::tests::*, *};

    #[test]
    fn paginate_in_order_of_creation() {
        let db = MockDb::default();
        for i in 0..8 {
            db.add_cafe(
                Cafe::build()
                    .name(&format!("Cafe {i}"))
                    .created_at(Timestamp::from_millis(1_000 * i)),
            );
        }
        let first = list_cafes(&db, PageRequest::new(Some(1), 6)).unwrap();
        assert_eq!(8, first.total_items);
        assert_eq!(2, first.total_pages());
        assert_eq!(
            vec!["Cafe 0", "Cafe 1", "Cafe 2", "Cafe 3", "Cafe 4", "Cafe 5"],
            first.items.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );
        let second = list_cafes(&db, PageRequest::new(Some(2), 6)).unwrap();
        assert_eq!(
            vec!["Cafe 6", "Cafe 7"],
            second.items.iter().map(|c| c.name.as_str()).collect::<Vec<_>>()
        );
        let third = list_cafes(&db, PageRequest::new(Some(3), 6)).unwrap();
        assert!(third.items.is_empty());
    }
}
