//! Scenario file handling
//!
//! A scenario is a TOML file describing one select widget and a script of
//! interactions to replay against it:
//!
//! ```toml
//! [select]
//! label = "Favorite color"
//! id = "colors"
//! value = "green"
//! autofocus = true
//!
//! [[options]]
//! value = "red"
//! text = "Red"
//!
//! [layout]
//! option_height = 24
//!
//! [[steps]]
//! key = "ArrowDown"
//!
//! [[steps]]
//! wait = 100
//! ```

use anyhow::{Context, Result};
use civic_platform::Key;
use civic_select::{
    ComboboxConfig, HitTarget, ScreenMetrics, ScrollEngineConfig, SelectConfig, SelectLayout,
    SelectOption,
};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::Path;

// =============================================================================
// Scenario
// =============================================================================

/// A widget description plus the interactions to replay
#[derive(Debug, Deserialize, Serialize)]
pub struct Scenario {
    #[serde(default)]
    pub select: SelectSection,
    #[serde(default)]
    pub options: Vec<SelectOption>,
    #[serde(default)]
    pub layout: SelectLayout,
    #[serde(default)]
    pub scroll: ScrollEngineConfig,
    #[serde(default)]
    pub screen: Option<ScreenMetrics>,
    #[serde(default)]
    pub steps: Vec<Step>,
}

/// The `[select]` table
#[derive(Debug, Deserialize, Serialize)]
pub struct SelectSection {
    #[serde(default = "default_label")]
    pub label: String,
    #[serde(default = "default_id")]
    pub id: String,
    /// Initial field value
    #[serde(default)]
    pub value: String,
    /// Start with the control focused
    #[serde(default)]
    pub autofocus: bool,
}

impl Default for SelectSection {
    fn default() -> Self {
        Self {
            label: default_label(),
            id: default_id(),
            value: String::new(),
            autofocus: false,
        }
    }
}

fn default_label() -> String {
    ComboboxConfig::default().label
}

fn default_id() -> String {
    ComboboxConfig::default().listbox_id
}

impl Scenario {
    /// Load a scenario from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .with_context(|| format!("Failed to read {}", path.display()))?;
        Self::parse(&content).with_context(|| format!("Failed to parse {}", path.display()))
    }

    /// Parse a scenario from TOML text
    pub fn parse(content: &str) -> Result<Self> {
        let scenario: Scenario = toml::from_str(content)?;
        Ok(scenario)
    }

    /// The widget configuration this scenario describes
    pub fn select_config(&self) -> SelectConfig {
        SelectConfig {
            combobox: ComboboxConfig {
                label: self.select.label.clone(),
                listbox_id: self.select.id.clone(),
            },
            layout: self.layout,
            scroll: self.scroll,
            screen: self.screen,
        }
    }

    /// Check that every step names a real key and target
    pub fn validate_steps(&self) -> Result<()> {
        for (index, step) in self.steps.iter().enumerate() {
            step.validate()
                .with_context(|| format!("Invalid step {} ({step})", index + 1))?;
        }
        Ok(())
    }
}

// =============================================================================
// Steps
// =============================================================================

/// One scripted interaction
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Step {
    /// Press a key, by DOM key name (`ArrowDown`, `Enter`, `b`)
    Key(String),
    /// Move to a target and click it
    Click(String),
    /// Move to a target and press the left button
    Press(String),
    /// Release the left button over a target
    Release(String),
    /// Move the mouse over a target
    Move(String),
    /// A touch phase over a target
    Touch(TouchStep),
    /// Let this many milliseconds pass
    Wait(u64),
    /// Resize the window
    Resize(ScreenMetrics),
}

/// `touch = { phase = "start", target = "scroll-down" }`
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct TouchStep {
    pub phase: TouchPhase,
    #[serde(default = "default_touch_target")]
    pub target: String,
}

fn default_touch_target() -> String {
    "outside".to_string()
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TouchPhase {
    Start,
    Move,
    End,
    Cancel,
}

impl Step {
    /// The target this step aims at, if any
    pub fn target(&self) -> Option<&str> {
        match self {
            Step::Click(t) | Step::Press(t) | Step::Release(t) | Step::Move(t) => Some(t),
            Step::Touch(touch) => Some(&touch.target),
            Step::Key(_) | Step::Wait(_) | Step::Resize(_) => None,
        }
    }

    fn validate(&self) -> Result<()> {
        if let Step::Key(name) = self {
            if Key::from_name(name) == Key::Unknown {
                anyhow::bail!("unknown key '{name}'");
            }
        }
        if let Some(target) = self.target() {
            target.parse::<HitTarget>()?;
        }
        Ok(())
    }
}

impl fmt::Display for Step {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Step::Key(name) => write!(f, "key {name}"),
            Step::Click(target) => write!(f, "click {target}"),
            Step::Press(target) => write!(f, "press {target}"),
            Step::Release(target) => write!(f, "release {target}"),
            Step::Move(target) => write!(f, "move {target}"),
            Step::Touch(touch) => write!(f, "touch {:?} {}", touch.phase, touch.target),
            Step::Wait(ms) => write!(f, "wait {ms}ms"),
            Step::Resize(screen) => write!(
                f,
                "resize {}x{}",
                screen.viewport_height, screen.document_height
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SCENARIO: &str = r#"
        [select]
        label = "State"
        value = "ny"
        autofocus = true

        [[options]]
        value = "ca"
        text = "California"

        [[options]]
        value = "ny"
        text = "New York"

        [layout]
        option_height = 24

        [scroll]
        interval = 20

        [[steps]]
        key = "ArrowDown"

        [[steps]]
        click = "option:1"

        [[steps]]
        touch = { phase = "start", target = "scroll-down" }

        [[steps]]
        wait = 150

        [[steps]]
        resize = { viewport_height = 600, document_height = 900 }
    "#;

    #[test]
    fn test_parse_scenario() {
        let scenario = Scenario::parse(SCENARIO).unwrap();
        assert_eq!(scenario.select.label, "State");
        assert_eq!(scenario.select.id, "select-listbox");
        assert_eq!(scenario.select.value, "ny");
        assert!(scenario.select.autofocus);
        assert_eq!(scenario.options.len(), 2);
        assert_eq!(scenario.layout.option_height, 24.0);
        assert_eq!(scenario.layout.width, 240.0);
        assert_eq!(scenario.scroll.interval.as_millis(), 20);
        assert_eq!(scenario.scroll.step, 5.0);
        assert_eq!(scenario.screen, None);

        assert_eq!(
            scenario.steps,
            vec![
                Step::Key("ArrowDown".into()),
                Step::Click("option:1".into()),
                Step::Touch(TouchStep {
                    phase: TouchPhase::Start,
                    target: "scroll-down".into()
                }),
                Step::Wait(150),
                Step::Resize(ScreenMetrics::new(600.0, 900.0)),
            ]
        );
        assert!(scenario.validate_steps().is_ok());
    }

    #[test]
    fn test_empty_scenario_uses_defaults() {
        let scenario = Scenario::parse("").unwrap();
        assert!(scenario.options.is_empty());
        assert!(scenario.steps.is_empty());
        let config = scenario.select_config();
        assert_eq!(config.combobox, ComboboxConfig::default());
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_invalid_steps_are_reported() {
        let scenario = Scenario::parse("[[steps]]\nclick = \"button\"").unwrap();
        let err = scenario.validate_steps().unwrap_err();
        assert!(format!("{err:#}").contains("Unknown target `button`"));

        let scenario = Scenario::parse("[[steps]]\nkey = \"Hyper\"").unwrap();
        assert!(scenario.validate_steps().is_err());
    }

    #[test]
    fn test_unknown_step_kind_fails_to_parse() {
        assert!(Scenario::parse("[[steps]]\nscroll = 10").is_err());
    }

    #[test]
    fn test_step_display() {
        assert_eq!(Step::Key("Enter".into()).to_string(), "key Enter");
        assert_eq!(Step::Wait(30).to_string(), "wait 30ms");
    }
}
