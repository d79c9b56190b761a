//! # API Facade
//!
//! The single entry point for every user action, whatever the UI. It is thin:
//!
//! - turns user selectors (`3`, `f1`, id prefixes) into record ids
//! - dispatches to the matching `commands::*` function
//! - returns [`CmdResult`] data, never formatted text
//!
//! Business rules live in the shell and the command modules. `ShelfApi` is
//! generic over [`Environment`], so it runs against [`MemEnvironment`] in
//! tests and [`SystemEnvironment`] in the CLI.
//!
//! [`MemEnvironment`]: crate::env::MemEnvironment
//! [`SystemEnvironment`]: crate::env::SystemEnvironment

use crate::collection::RecordFilter;
use crate::commands;
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::selector::{parse_selectors, resolve, resolve_all, RecordSelector};
use crate::shell::AppShell;
use std::path::{Path, PathBuf};

pub struct ShelfApi<E: Environment + 'static> {
    shell: AppShell<E>,
    data_dir: PathBuf,
}

impl<E: Environment + 'static> ShelfApi<E> {
    pub fn new(shell: AppShell<E>, data_dir: impl Into<PathBuf>) -> Self {
        Self {
            shell,
            data_dir: data_dir.into(),
        }
    }

    pub fn shell(&self) -> &AppShell<E> {
        &self.shell
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    fn resolve_ids<I: AsRef<str>>(&self, inputs: &[I]) -> Result<Vec<String>> {
        let selectors = parse_selectors(inputs)?;
        resolve_all(self.shell.collection(), &selectors)
    }

    fn resolve_one(&self, input: &str) -> Result<String> {
        let selector: RecordSelector = input.parse().map_err(ShelfError::Api)?;
        resolve(self.shell.collection(), &selector)
    }

    pub fn upload(&mut self, paths: &[PathBuf]) -> Result<commands::CmdResult> {
        commands::upload::run(&mut self.shell, paths)
    }

    pub fn list(&self, filter: &ListFilter) -> Result<commands::CmdResult> {
        commands::list::run(&self.shell, filter)
    }

    pub fn categories(&self) -> Result<commands::CmdResult> {
        commands::list::categories(&self.shell)
    }

    pub fn open(&mut self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_one(selector)?;
        commands::view::open(&mut self.shell, &id)
    }

    pub fn close(&mut self) -> Result<commands::CmdResult> {
        commands::view::close(&mut self.shell)
    }

    pub fn status(&self) -> Result<commands::CmdResult> {
        commands::view::status(&self.shell)
    }

    pub fn favorite<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_ids(selectors)?;
        commands::favorite::favorite(&mut self.shell, &ids)
    }

    pub fn unfavorite<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_ids(selectors)?;
        commands::favorite::unfavorite(&mut self.shell, &ids)
    }

    pub fn set_category<I: AsRef<str>>(
        &mut self,
        category: &str,
        selectors: &[I],
    ) -> Result<commands::CmdResult> {
        let ids = self.resolve_ids(selectors)?;
        commands::category::run(&mut self.shell, &ids, category)
    }

    pub fn delete<I: AsRef<str>>(&mut self, selectors: &[I]) -> Result<commands::CmdResult> {
        let ids = self.resolve_ids(selectors)?;
        commands::delete::run(&mut self.shell, &ids)
    }

    /// Move a record to `to`. With `category` or `search`, `to` is a position
    /// in that filtered view.
    pub fn move_record(
        &mut self,
        selector: &str,
        to: usize,
        search: Option<String>,
        category: Option<String>,
    ) -> Result<commands::CmdResult> {
        let id = self.resolve_one(selector)?;
        let within = if search.is_none() && category.is_none() {
            None
        } else {
            Some(RecordFilter::new(
                search.unwrap_or_default(),
                category.as_deref().unwrap_or(crate::collection::ALL_CATEGORIES),
            ))
        };
        commands::reorder::run(&mut self.shell, &id, to, within.as_ref())
    }

    pub fn share(&self, selector: &str) -> Result<commands::CmdResult> {
        let id = self.resolve_one(selector)?;
        commands::share::run(&self.shell, &id)
    }

    pub fn export<I: AsRef<str>>(&self, selectors: &[I], dir: &Path) -> Result<commands::CmdResult> {
        let ids = self.resolve_ids(selectors)?;
        commands::export::run(&self.shell, &ids, dir)
    }

    pub fn highlight(&mut self, drag: Drag) -> Result<commands::CmdResult> {
        commands::annotate::highlight(&mut self.shell, drag)
    }

    /// Annotations of the given record, or of the open one.
    pub fn annotations(&self, selector: Option<&str>) -> Result<commands::CmdResult> {
        let id = self.target_or_active(selector)?;
        commands::annotate::list(&self.shell, &id)
    }

    pub fn unhighlight(
        &mut self,
        selector: Option<&str>,
        annotations: &[String],
    ) -> Result<commands::CmdResult> {
        let id = self.target_or_active(selector)?;
        commands::annotate::unhighlight(&mut self.shell, &id, annotations)
    }

    fn target_or_active(&self, selector: Option<&str>) -> Result<String> {
        match selector {
            Some(s) => self.resolve_one(s),
            None => self
                .shell
                .active_id()
                .map(str::to_string)
                .ok_or_else(|| ShelfError::Api("No document is open".to_string())),
        }
    }

    pub fn find(&mut self, query: &str) -> Result<commands::CmdResult> {
        commands::find::run(&mut self.shell, query)
    }

    pub fn settings(&self, update: SettingsUpdate) -> Result<commands::CmdResult> {
        commands::settings::run(&self.shell, update)
    }

    pub fn config(&self, action: ConfigAction) -> Result<commands::CmdResult> {
        commands::config::run(&self.data_dir, action)
    }
}

pub use crate::commands::annotate::Drag;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::list::{ListFilter, ListView};
pub use crate::commands::settings::SettingsUpdate;
pub use crate::commands::{CmdMessage, CmdResult, ListedRecord, MessageLevel, ViewerStatus};

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::store::fixtures::RecordFixture;
    use crate::store::RecordStore;
    use std::rc::Rc;
    use tempfile::tempdir;

    fn api(records: Vec<crate::model::PdfRecord>) -> ShelfApi<MemEnvironment> {
        let env = Rc::new(MemEnvironment::new());
        RecordStore::new(Rc::clone(&env)).save(&records);
        ShelfApi::new(AppShell::new(env), std::env::temp_dir())
    }

    #[test]
    fn selectors_are_resolved_before_dispatch() {
        let mut api = api(
            RecordFixture::new()
                .with_record("1700-aaa", "A")
                .with_record("1800-bbb", "B")
                .build(),
        );

        api.favorite(&["2"]).unwrap();
        let favs = api
            .list(&ListFilter {
                view: ListView::Favorites,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(favs.listed_records[0].record.id, "1800-bbb");

        api.open("f1").unwrap();
        assert_eq!(api.shell().active_id(), Some("1800-bbb"));

        api.delete(&["1700-"]).unwrap();
        assert_eq!(api.shell().collection().len(), 1);
    }

    #[test]
    fn unknown_selector_fails_whole_command() {
        let mut api = api(RecordFixture::new().with_records(2).build());
        assert!(api.favorite(&["1", "9"]).is_err());
        assert!(api.shell().collection().favorites().is_empty());
    }

    #[test]
    fn annotation_commands_default_to_open_record() {
        let mut api = api(RecordFixture::new().with_annotated("doc", "Doc", 2).build());
        assert!(api.annotations(None).is_err());

        api.open("doc").unwrap();
        assert_eq!(api.annotations(None).unwrap().annotations.len(), 2);

        api.highlight(Drag::fractions((0.2, 0.2), (0.4, 0.4))).unwrap();
        api.unhighlight(None, &["1".to_string()]).unwrap();
        assert_eq!(api.annotations(Some("doc")).unwrap().annotations.len(), 2);
    }

    #[test]
    fn move_within_category() {
        let mut api = api(
            RecordFixture::new()
                .with_category("a", "A", "work")
                .with_category("b", "B", "misc")
                .with_category("c", "C", "work")
                .build(),
        );
        api.move_record("c", 1, None, Some("work".into())).unwrap();
        let ids: Vec<_> = api
            .shell()
            .collection()
            .records()
            .iter()
            .map(|r| r.id.clone())
            .collect();
        assert_eq!(ids, vec!["c", "b", "a"]);
    }

    #[test]
    fn config_uses_data_dir() {
        let dir = tempdir().unwrap();
        let env = Rc::new(MemEnvironment::new());
        let api = ShelfApi::new(AppShell::new(env), dir.path());
        api.config(ConfigAction::Set("highlight-color".into(), "#22c55e".into()))
            .unwrap();
        let all = api.config(ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().highlight_color, "#22c55e");
    }
}
