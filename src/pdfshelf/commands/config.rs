use crate::commands::{CmdMessage, CmdResult};
use crate::config::ShelfConfig;
use crate::error::Result;
use std::path::Path;

#[derive(Debug, Clone)]
pub enum ConfigAction {
    ShowAll,
    ShowKey(String),
    Set(String, String),
}

pub fn run(data_dir: &Path, action: ConfigAction) -> Result<CmdResult> {
    let mut config = ShelfConfig::load(data_dir)?;
    let mut result = CmdResult::default();

    match action {
        ConfigAction::ShowAll => Ok(result.with_config(config)),
        ConfigAction::ShowKey(key) => {
            match config.get(&key) {
                Some(value) => result.add_message(CmdMessage::info(value)),
                None => result.add_message(CmdMessage::error(format!("Unknown config key: {}", key))),
            }
            Ok(result)
        }
        ConfigAction::Set(key, value) => {
            if let Err(e) = config.set(&key, &value) {
                result.add_message(CmdMessage::error(e.to_string()));
                return Ok(result);
            }
            config.save(data_dir)?;
            let shown = config.get(&key).unwrap_or(value.as_str()).to_string();
            result.add_message(CmdMessage::success(format!("{} set to {}", key, shown)));
            Ok(result.with_config(config))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::MessageLevel;
    use tempfile::tempdir;

    #[test]
    fn set_persists_and_show_reads_back() {
        let dir = tempdir().unwrap();
        let set = ConfigAction::Set("base-url".into(), "https://docs.example/shelf".into());
        run(dir.path(), set).unwrap();

        let shown = run(dir.path(), ConfigAction::ShowKey("base-url".into())).unwrap();
        assert_eq!(shown.messages[0].content, "https://docs.example/shelf");

        let all = run(dir.path(), ConfigAction::ShowAll).unwrap();
        assert_eq!(all.config.unwrap().base_url, "https://docs.example/shelf");
    }

    #[test]
    fn invalid_values_are_reported_not_saved() {
        let dir = tempdir().unwrap();
        let result = run(dir.path(), ConfigAction::Set("log-level".into(), "loud".into())).unwrap();
        assert_eq!(result.messages[0].level, MessageLevel::Error);
        assert!(!dir.path().join("config.json").exists());

        let unknown = run(dir.path(), ConfigAction::ShowKey("colour".into())).unwrap();
        assert_eq!(unknown.messages[0].level, MessageLevel::Error);
    }
}
