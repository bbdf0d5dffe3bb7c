//! Batch driver
//!
//! Runs every window through bounds lookup, display assignment, target-area
//! conversion and the edge test. A failure only affects its own window; the
//! run carries on and the failure counts against the final verdict.

use std::io::Write;

use tracing::{debug, warn};

use crate::config::Options;
use crate::environment::WindowEnvironment;
use crate::report::{self, CheckRecord, ErrorRecord, Record};
use crate::screen::{to_native, touches, DisplayRegistry, Native, Rect, ScreenError, WindowId};

/// A window that could not be checked
#[derive(Debug, Clone)]
pub struct WindowFailure {
    pub window_id: WindowId,
    /// Known when the failure happened after the bounds lookup
    pub bounds: Option<Rect<Native>>,
    pub error: ScreenError,
}

/// Result of processing one window
#[derive(Debug, Clone)]
pub enum Outcome {
    Checked(CheckRecord),
    Failed(WindowFailure),
}

impl Outcome {
    pub fn window_id(&self) -> WindowId {
        match self {
            Outcome::Checked(check) => check.window_id,
            Outcome::Failed(failure) => failure.window_id,
        }
    }

    /// A touching window or a processing error
    pub fn is_problem(&self) -> bool {
        match self {
            Outcome::Checked(check) => check.touches.any,
            Outcome::Failed(_) => true,
        }
    }

    pub fn to_record(&self) -> Record {
        match self {
            Outcome::Checked(check) => Record::Check(check.clone()),
            Outcome::Failed(failure) => Record::Error(ErrorRecord {
                bounds_quartz: failure.bounds,
                error: failure.error.code(),
                window_id: failure.window_id,
            }),
        }
    }
}

/// Aggregate result of a run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    /// Every window was checked and none touches an edge
    Clean,
    /// At least one window touches an edge or failed
    Problem,
}

impl Verdict {
    pub fn from_outcomes<'a>(outcomes: impl IntoIterator<Item = &'a Outcome>) -> Self {
        outcomes
            .into_iter()
            .fold(Verdict::Clean, |verdict, outcome| {
                if outcome.is_problem() {
                    Verdict::Problem
                } else {
                    verdict
                }
            })
    }

    pub fn exit_code(&self) -> u8 {
        match self {
            Verdict::Clean => 0,
            Verdict::Problem => 1,
        }
    }
}

/// Drives a batch of windows against one environment snapshot
pub struct BatchDriver<'a> {
    env: &'a dyn WindowEnvironment,
    registry: DisplayRegistry,
    options: &'a Options,
}

impl<'a> BatchDriver<'a> {
    /// Snapshot the display layout once for the whole batch
    pub fn new(env: &'a dyn WindowEnvironment, options: &'a Options) -> Self {
        let registry = env.list_displays();
        debug!("{} displays attached", registry.len());
        if registry.is_empty() {
            warn!("no displays attached");
        }
        for screen in registry.displays() {
            let index = screen.index;
            match screen.native_bounds {
                Some(bounds) => debug!("screen {}: quartz bounds {}", index, bounds),
                None => debug!("screen {}: no quartz bounds", index),
            }
        }
        Self {
            env,
            registry,
            options,
        }
    }

    /// Process windows in order.
    ///
    /// With `dump` enabled each record is written to `out` as soon as its
    /// window is done.
    pub fn run<W: Write>(&self, ids: &[WindowId], out: &mut W) -> std::io::Result<Vec<Outcome>> {
        let mut outcomes = Vec::with_capacity(ids.len());

        for &id in ids {
            let outcome = self.check_window(id);
            if self.options.dump {
                report::write_record(out, &outcome.to_record())?;
            }
            outcomes.push(outcome);
        }

        Ok(outcomes)
    }

    /// Check a single window
    pub fn check_window(&self, id: WindowId) -> Outcome {
        let bounds = match self.env.bounds_of(id) {
            Ok(bounds) => bounds,
            Err(error) => return self.fail(id, None, error),
        };

        let placement = match self.registry.locate(bounds) {
            Ok(placement) => placement,
            Err(error) => return self.fail(id, Some(bounds), error),
        };
        let screen = placement.display;

        let target = screen.target_rect(self.options.target);
        let target = match to_native(target, screen) {
            Ok(target) => target,
            Err(error) => return self.fail(id, Some(bounds), error),
        };

        let result = touches(bounds, target, self.options.epsilon);
        if result.any {
            let edges: Vec<&str> = result.edges().map(|e| e.as_str()).collect();
            let index = screen.index;
            debug!("window {} on screen {} touches {}", id, index, edges.join(", "));
        }

        Outcome::Checked(CheckRecord {
            bounds_quartz: bounds,
            display_bounds_quartz: placement.native_bounds,
            epsilon: self.options.epsilon,
            screen_frame_app_kit: screen.frame,
            screen_index: screen.index,
            screen_used_quartz: target,
            screen_visible_frame_app_kit: screen.visible_frame,
            touches: result,
            using: self.options.target.label(),
            window_id: id,
        })
    }

    fn fail(&self, id: WindowId, bounds: Option<Rect<Native>>, error: ScreenError) -> Outcome {
        match &error {
            ScreenError::NotFound(_) => warn!("{}", error),
            ScreenError::NoDisplay => warn!("could not determine screen for window {}", id),
            ScreenError::Conversion { .. } => {
                warn!("could not convert screen rect to quartz for window {}: {}", id, error)
            }
        }
        Outcome::Failed(WindowFailure {
            window_id: id,
            bounds,
            error,
        })
    }
}
