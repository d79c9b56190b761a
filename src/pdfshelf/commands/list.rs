use crate::collection::{RecordFilter, ALL_CATEGORIES};
use crate::commands::{CmdResult, ListedRecord};
use crate::env::Environment;
use crate::error::Result;
use crate::model::PdfRecord;
use crate::shell::AppShell;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ListView {
    #[default]
    All,
    Favorites,
    Recent,
}

#[derive(Debug, Clone, Default)]
pub struct ListFilter {
    pub view: ListView,
    pub search: Option<String>,
    pub category: Option<String>,
}

impl ListFilter {
    fn record_filter(&self) -> RecordFilter {
        RecordFilter::new(
            self.search.clone().unwrap_or_default(),
            self.category.as_deref().unwrap_or(ALL_CATEGORIES),
        )
    }
}

/// List records through one of the projections, narrowed by search and category.
pub fn run<E: Environment + 'static>(shell: &AppShell<E>, filter: &ListFilter) -> Result<CmdResult> {
    let collection = shell.collection();
    let base: Vec<&PdfRecord> = match filter.view {
        ListView::All => collection.records().iter().collect(),
        ListView::Favorites => collection.favorites(),
        ListView::Recent => collection.recent(),
    };

    let narrow = filter.record_filter();
    let listed = base
        .into_iter()
        .filter(|r| narrow.matches(r))
        .filter_map(|r| {
            collection.position(&r.id).map(|i| ListedRecord {
                position: i + 1,
                record: r.clone(),
            })
        })
        .collect();

    Ok(CmdResult::default().with_listed_records(listed))
}

/// The category list: built-ins, then any custom ones in use.
pub fn categories<E: Environment + 'static>(shell: &AppShell<E>) -> Result<CmdResult> {
    Ok(CmdResult::default().with_categories(shell.collection().categories()))
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
            .with_category("a", "Tax return", "work")
            .with_favorite("b", "Recipes")
            .with_viewed("c", "Trip plan", 500)
            .with_category("d", "Old return", "misc")
            .build();
        RecordStore::new(Rc::clone(&env)).save(&records);
        AppShell::new(env)
    }

    fn ids(result: &CmdResult) -> Vec<&str> {
        result.listed_records.iter().map(|l| l.record.id.as_str()).collect()
    }

    #[test]
    fn lists_everything_with_positions() {
        let result = run(&shell(), &ListFilter::default()).unwrap();
        assert_eq!(ids(&result), vec!["a", "b", "c", "d"]);
        assert_eq!(result.listed_records[3].position, 4);
    }

    #[test]
    fn search_and_category_narrow() {
        let shell = shell();
        let search = ListFilter {
            search: Some("RETURN".into()),
            ..Default::default()
        };
        assert_eq!(ids(&run(&shell, &search).unwrap()), vec!["a", "d"]);

        let both = ListFilter {
            category: Some("work".into()),
            ..search
        };
        assert_eq!(ids(&run(&shell, &both).unwrap()), vec!["a"]);
    }

    #[test]
    fn favorites_and_recent_views() {
        let shell = shell();
        let favorites = ListFilter {
            view: ListView::Favorites,
            ..Default::default()
        };
        let result = run(&shell, &favorites).unwrap();
        assert_eq!(ids(&result), vec!["b"]);
        assert_eq!(result.listed_records[0].position, 2);

        let recent = ListFilter {
            view: ListView::Recent,
            ..Default::default()
        };
        assert_eq!(ids(&run(&shell, &recent).unwrap())[0], "c");
    }

    #[test]
    fn categories_include_builtins() {
        let result = categories(&shell()).unwrap();
        assert_eq!(result.categories.len(), 5);
        assert_eq!(result.categories[0], "education");
    }
}
