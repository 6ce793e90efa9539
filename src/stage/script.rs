use crate::{
    foundation::{core::Millis, error::MotionResult},
    stage::runtime::{Input, Stage},
    surface::memory::Surface,
};

/// One scripted input, delivered when the stage clock reaches `at`.
#[derive(Clone, Debug, PartialEq, serde::Serialize, serde::Deserialize)]
pub struct ScriptStep {
    pub at: Millis,
    pub input: Input,
}

/// Timed input sequence. Steps are kept sorted by time; steps sharing a time keep their
/// listed order.
#[derive(Clone, Debug, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(transparent)]
pub struct Script {
    steps: Vec<ScriptStep>,
}

impl Script {
    pub fn new(mut steps: Vec<ScriptStep>) -> Self {
        steps.sort_by_key(|s| s.at);
        Self { steps }
    }

    pub fn from_json_str(s: &str) -> MotionResult<Self> {
        let steps: Vec<ScriptStep> = serde_json::from_str(s)?;
        Ok(Self::new(steps))
    }

    pub fn push(&mut self, at: Millis, input: Input) {
        let idx = self.steps.partition_point(|s| s.at <= at);
        self.steps.insert(idx, ScriptStep { at, input });
    }

    pub fn steps(&self) -> &[ScriptStep] {
        &self.steps
    }

    pub fn len(&self) -> usize {
        self.steps.len()
    }

    pub fn is_empty(&self) -> bool {
        self.steps.is_empty()
    }
}

impl<S: Surface> Stage<S> {
    /// Set up (if needed), play `script` and run the clock to `until`. Steps after `until`
    /// are not delivered.
    pub fn run_script(&mut self, script: &Script, until: Millis) -> MotionResult<()> {
        self.setup()?;
        for step in script.steps().iter().take_while(|s| s.at <= until) {
            self.advance_to(step.at);
            self.dispatch(step.input.clone())?;
        }
        self.advance_to(until);
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/stage/script.rs"]
mod tests;
