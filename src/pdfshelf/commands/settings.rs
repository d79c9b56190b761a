use crate::commands::{CmdMessage, CmdResult};
use crate::env::Environment;
use crate::error::{Result, ShelfError};
use crate::settings::Theme;
use crate::shell::AppShell;

#[derive(Debug, Clone, Default)]
pub struct SettingsUpdate {
    pub theme: Option<String>,
    pub primary: Option<String>,
}

/// Show the stored settings, applying any update first.
pub fn run<E: Environment + 'static>(shell: &AppShell<E>, update: SettingsUpdate) -> Result<CmdResult> {
    let mut settings = shell.settings();
    let mut result = CmdResult::default();

    if update.theme.is_none() && update.primary.is_none() {
        return Ok(result.with_settings(settings));
    }

    if let Some(theme) = update.theme {
        settings.theme = theme.parse::<Theme>().map_err(ShelfError::Api)?;
    }
    if let Some(primary) = update.primary {
        let primary = primary.trim();
        if primary.is_empty() {
            return Err(ShelfError::Api("Primary color cannot be empty".to_string()));
        }
        settings.primary = primary.to_string();
    }

    shell.save_settings(&settings)?;
    result.add_message(CmdMessage::success("Settings saved."));
    Ok(result.with_settings(settings))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::env::MemEnvironment;
    use crate::settings::Settings;
    use std::rc::Rc;

    #[test]
    fn shows_defaults_then_updates() {
        let shell = AppShell::new(Rc::new(MemEnvironment::new()));
        let shown = run(&shell, SettingsUpdate::default()).unwrap();
        assert_eq!(shown.settings.unwrap(), Settings::default());

        let update = SettingsUpdate {
            theme: Some("dark".into()),
            primary: None,
        };
        run(&shell, update).unwrap();
        assert_eq!(shell.settings().theme, Theme::Dark);
        assert_eq!(shell.settings().primary, Settings::default().primary);
    }

    #[test]
    fn rejects_unknown_theme() {
        let shell = AppShell::new(Rc::new(MemEnvironment::new()));
        let update = SettingsUpdate {
            theme: Some("sepia".into()),
            primary: None,
        };
        assert!(run(&shell, update).is_err());
        assert_eq!(shell.settings(), Settings::default());
    }
}
