//! Host-side stand-ins: a launcher that records requests and a scripted probe.

use crate::bridge::{Availability, CapabilityProbe, LaunchParams, ScreenLauncher};
use crate::error::CapabilityError;

/// Records every launch instead of starting a screen
#[derive(Debug, Default)]
pub struct RecordingLauncher {
    launched: Vec<LaunchParams>,
}

impl RecordingLauncher {
    pub fn launched(&self) -> &[LaunchParams] {
        &self.launched
    }

    /// Take the queued launches, oldest first
    pub fn take_launched(&mut self) -> Vec<LaunchParams> {
        std::mem::take(&mut self.launched)
    }
}

impl ScreenLauncher for RecordingLauncher {
    fn launch(&mut self, params: LaunchParams) {
        self.launched.push(params);
    }
}

#[derive(Debug, Clone)]
enum ProbeScript {
    Answer(Availability),
    Fail(String),
    Panic,
}

/// Capability probe with a fixed answer, error or panic
#[derive(Debug, Clone)]
pub struct ScriptedProbe {
    script: ProbeScript,
}

impl ScriptedProbe {
    pub fn answer(availability: Availability) -> Self {
        Self {
            script: ProbeScript::Answer(availability),
        }
    }

    pub fn fail(reason: &str) -> Self {
        Self {
            script: ProbeScript::Fail(reason.to_string()),
        }
    }

    pub fn panicking() -> Self {
        Self {
            script: ProbeScript::Panic,
        }
    }
}

impl CapabilityProbe for ScriptedProbe {
    fn check_availability(&self) -> Result<Availability, CapabilityError> {
        match &self.script {
            ProbeScript::Answer(availability) => Ok(*availability),
            ProbeScript::Fail(reason) => Err(CapabilityError::Unavailable(reason.clone())),
            ProbeScript::Panic => panic!("capability service crashed"),
        }
    }
}
