use crate::collection::RecordFilter;
use crate::commands::{CmdMessage, CmdResult, ListedRecord};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::shell::AppShell;

/// Move one record to a 1-based position.
///
/// Without a filter the position is in the whole collection. With one it is
/// in the filtered view, and only the records of that view trade places.
pub fn run<E: Environment + 'static>(
    shell: &mut AppShell<E>,
    id: &str,
    to: usize,
    within: Option<&RecordFilter>,
) -> Result<CmdResult> {
    let mut order: Vec<String> = match within {
        None => shell.collection().records().iter().map(|r| r.id.clone()).collect(),
        Some(filter) => shell
            .collection()
            .filtered(filter)
            .into_iter()
            .map(|r| r.id.clone())
            .collect(),
    };

    let from = order
        .iter()
        .position(|candidate| candidate == id)
        .ok_or_else(|| ShelfError::Api(format!("{} is not in the current view", id)))?;
    if to == 0 || to > order.len() {
        return Err(ShelfError::InvalidOrder(format!(
            "position {} is outside 1..={}",
            to,
            order.len()
        )));
    }

    let moving = order.remove(from);
    order.insert(to - 1, moving);

    match within {
        None => shell.reorder(&order)?,
        Some(_) => shell.reorder_visible(&order)?,
    }

    let mut result = CmdResult::default();
    if let Some(record) = shell.collection().get(id) {
        result.add_message(CmdMessage::success(format!("Moved {} to {}", record.name, to)));
    }
    let listed = shell
        .collection()
        .records()
        .iter()
        .enumerate()
        .map(|(i, r)| ListedRecord {
            position: i + 1,
            record: r.clone(),
        })
        .collect();
    Ok(result.with_listed_records(listed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::store::fixtures::RecordFixture;
    use crate::store::RecordStore;
    use std::rc::Rc;

    fn shell() -> AppShell<MemEnvironment> {
        let env = Rc::new(MemEnvironment::new());
        let records = RecordFixture::new()
            .with_category("a", "A", "work")
            .with_category("b", "B", "misc")
            .with_category("c", "C", "work")
            .with_category("d", "D", "misc")
            .build();
        RecordStore::new(Rc::clone(&env)).save(&records);
        AppShell::new(env)
    }

    fn ids(shell: &AppShell<MemEnvironment>) -> Vec<&str> {
        shell.collection().records().iter().map(|r| r.id.as_str()).collect()
    }

    #[test]
    fn moves_within_whole_collection() {
        let mut shell = shell();
        run(&mut shell, "d", 1, None).unwrap();
        assert_eq!(ids(&shell), vec!["d", "a", "b", "c"]);
        run(&mut shell, "d", 4, None).unwrap();
        assert_eq!(ids(&shell), vec!["a", "b", "c", "d"]);
    }

    #[test]
    fn moves_within_filtered_view_without_losing_others() {
        let mut shell = shell();
        let work = RecordFilter::new("", "work");
        let result = run(&mut shell, "c", 1, Some(&work)).unwrap();
        assert_eq!(ids(&shell), vec!["c", "b", "a", "d"]);
        assert_eq!(result.listed_records.len(), 4);
    }

    #[test]
    fn rejects_bad_positions_and_hidden_records() {
        let mut shell = shell();
        assert!(run(&mut shell, "a", 0, None).is_err());
        assert!(run(&mut shell, "a", 5, None).is_err());
        let work = RecordFilter::new("", "work");
        assert!(run(&mut shell, "b", 1, Some(&work)).is_err());
        assert_eq!(ids(&shell), vec!["a", "b", "c", "d"]);
    }
}
