//! Scenario replay
//!
//! Builds a mounted [`Select`] from a [`Scenario`] and feeds it the scripted
//! steps as platform events, recording the rendered view along the way.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use anyhow::{Context, Result};
use civic_platform::{
    InputEvent, Key, KeyboardEvent, MouseButton, MouseEvent, Point, TouchEvent, WindowEvent,
};
use civic_select::{Field, HitTarget, Select, SelectView, SharedField};
use serde::Serialize;
use tracing::{debug, warn};

use crate::config::{Scenario, Step, TouchPhase};

/// The view after one step
#[derive(Debug, Serialize)]
pub struct StepReport {
    pub index: usize,
    pub step: String,
    pub value: String,
    pub view: SelectView,
}

/// Everything a replay produced
#[derive(Debug, Serialize)]
pub struct ReplayReport {
    /// Per-step views, when requested
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub steps: Vec<StepReport>,
    /// Values committed to the field, in order
    pub commits: Vec<String>,
    pub value: String,
    pub view: SelectView,
}

/// A live select driven by scripted steps
pub struct Replay {
    select: Select<SharedField>,
    field: SharedField,
    commits: Arc<Mutex<Vec<String>>>,
    pointer: Point,
    next_touch_id: u64,
    touch_id: Option<u64>,
}

impl Replay {
    /// Build and mount the select a scenario describes
    pub fn new(scenario: &Scenario) -> Result<Self> {
        let field = SharedField::new(scenario.select.value.clone());
        let commits = Arc::new(Mutex::new(Vec::new()));
        let sink = Arc::clone(&commits);
        field.on_change(move |value| {
            if let Ok(mut commits) = sink.lock() {
                commits.push(value.to_string());
            }
        });

        let mut select = Select::new(
            scenario.select_config(),
            scenario.options.clone(),
            field.clone(),
        )
        .context("Invalid select configuration")?;
        select.mount();
        if scenario.select.autofocus {
            select.controller_mut().focus_combobox();
        }

        Ok(Self {
            select,
            field,
            commits,
            pointer: Point::new(-1.0, -1.0),
            next_touch_id: 1,
            touch_id: None,
        })
    }

    pub fn select(&self) -> &Select<SharedField> {
        &self.select
    }

    /// Current field value
    pub fn value(&self) -> String {
        self.field.value()
    }

    /// Apply one step
    pub fn apply(&mut self, step: &Step) -> Result<()> {
        debug!(%step, "replaying step");
        match step {
            Step::Key(name) => {
                let key = Key::from_name(name);
                if key == Key::Unknown {
                    anyhow::bail!("unknown key '{name}'");
                }
                self.dispatch(InputEvent::Keyboard(KeyboardEvent::pressed(key)));
            }
            Step::Click(target) => {
                let point = self.require(target)?;
                self.move_to(point);
                self.select.click_at(point);
            }
            Step::Press(target) => {
                let point = self.require(target)?;
                self.move_to(point);
                let Point { x, y } = point;
                self.dispatch(InputEvent::Mouse(MouseEvent::ButtonPressed {
                    button: MouseButton::Left,
                    x,
                    y,
                }));
            }
            Step::Release(target) => {
                let point = self.locate(target)?;
                self.move_to(point);
                let Point { x, y } = point;
                self.dispatch(InputEvent::Mouse(MouseEvent::ButtonReleased {
                    button: MouseButton::Left,
                    x,
                    y,
                }));
            }
            Step::Move(target) => {
                let point = self.locate(target)?;
                self.move_to(point);
            }
            Step::Touch(touch) => self.touch(touch.phase, &touch.target)?,
            Step::Wait(ms) => self.select.advance(Duration::from_millis(*ms)),
            Step::Resize(screen) => {
                let event = WindowEvent::Resized {
                    viewport_height: screen.viewport_height,
                    document_height: screen.document_height,
                };
                self.select.handle_event(&event.into());
            }
        }
        Ok(())
    }

    /// Values committed so far
    pub fn commits(&self) -> Vec<String> {
        self.commits
            .lock()
            .map(|commits| commits.clone())
            .unwrap_or_default()
    }

    fn touch(&mut self, phase: TouchPhase, target: &str) -> Result<()> {
        let event = match phase {
            TouchPhase::Start => {
                let Point { x, y } = self.require(target)?;
                let id = self.next_touch_id;
                self.next_touch_id += 1;
                self.touch_id = Some(id);
                TouchEvent::Started { id, x, y }
            }
            TouchPhase::Move | TouchPhase::End => {
                let id = self
                    .touch_id
                    .context("no touch in progress; start one first")?;
                let Point { x, y } = self.locate(target)?;
                if phase == TouchPhase::Move {
                    TouchEvent::Moved { id, x, y }
                } else {
                    self.touch_id = None;
                    TouchEvent::Ended { id, x, y }
                }
            }
            TouchPhase::Cancel => {
                let id = self
                    .touch_id
                    .take()
                    .context("no touch in progress; start one first")?;
                TouchEvent::Cancelled { id }
            }
        };
        debug!(id = event.id(), ?phase, "touch");
        self.dispatch(InputEvent::Touch(event));
        Ok(())
    }

    fn move_to(&mut self, point: Point) {
        self.pointer = point;
        let Point { x, y } = point;
        self.dispatch(InputEvent::Mouse(MouseEvent::Moved { x, y }));
    }

    fn dispatch(&mut self, event: InputEvent) {
        self.select.handle_event(&event.into());
    }

    /// A point on a target that must be on screen
    fn require(&self, target: &str) -> Result<Point> {
        let hit: HitTarget = target.parse()?;
        self.select
            .target_point(hit)
            .with_context(|| format!("target `{hit}` is not on screen"))
    }

    /// A point on a target, or the current pointer if it has gone away
    fn locate(&self, target: &str) -> Result<Point> {
        let hit: HitTarget = target.parse()?;
        Ok(match self.select.target_point(hit) {
            Some(point) => point,
            None => {
                warn!(%hit, "target not on screen, staying in place");
                self.pointer
            }
        })
    }
}

/// Replay every step of a scenario
pub fn run(scenario: &Scenario, every_step: bool) -> Result<ReplayReport> {
    let mut replay = Replay::new(scenario)?;
    let mut steps = Vec::new();

    for (index, step) in scenario.steps.iter().enumerate() {
        replay
            .apply(step)
            .with_context(|| format!("Step {} ({step}) failed", index + 1))?;
        if every_step {
            steps.push(StepReport {
                index: index + 1,
                step: step.to_string(),
                value: replay.value(),
                view: replay.select().view(),
            });
        }
    }

    Ok(ReplayReport {
        steps,
        commits: replay.commits(),
        value: replay.value(),
        view: replay.select().view(),
    })
}
