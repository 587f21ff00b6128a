//! System output volume.
//!
//! [`MixerEndpoint`] shells out to the platform mixer CLI, picked at startup
//! by probing each candidate in turn.  [`DryRunEndpoint`] only logs.

use std::fmt;
use std::io;
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info};

// ════════════════════════════════════════════════════════════════════════════
// Errors
// ════════════════════════════════════════════════════════════════════════════

#[derive(Debug, Error)]
pub enum AudioError {
    #[error("no working volume mixer found (tried {tried})")]
    NoMixer { tried: String },

    #[error("could not run `{program}`: {source}")]
    Spawn { program: &'static str, source: io::Error },

    #[error("`{program}` exited with {status}")]
    Failed { program: &'static str, status: String },

    #[error("volume {0} is outside [0, 1]")]
    OutOfRange(f32),
}

// ════════════════════════════════════════════════════════════════════════════
// AudioEndpoint trait
// ════════════════════════════════════════════════════════════════════════════

pub trait AudioEndpoint {
    /// Range of levels the device accepts, as reported by the backend.
    fn volume_range(&self) -> (f32, f32);

    /// Set the master output level; `level` is a scalar in `[0, 1]`.
    fn set_volume_scalar(&mut self, level: f32) -> Result<(), AudioError>;

    fn name(&self) -> String;
}

/// Reject NaN and anything outside `[0, 1]`, else round to a percentage.
fn to_percent(level: f32) -> Result<u32, AudioError> {
    if !(0.0..=1.0).contains(&level) {
        return Err(AudioError::OutOfRange(level));
    }
    Ok((level * 100.0).round() as u32)
}

// ════════════════════════════════════════════════════════════════════════════
// Mixer (platform CLI backends)
// ════════════════════════════════════════════════════════════════════════════

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Mixer {
    /// PulseAudio / PipeWire.
    Pactl,
    /// ALSA.
    Amixer,
    /// macOS `set volume`.
    Osascript,
}

impl Mixer {
    /// Backends worth probing on this platform, in preference order.
    pub fn candidates() -> &'static [Mixer] {
        if cfg!(target_os = "macos") {
            &[Mixer::Osascript]
        } else {
            &[Mixer::Pactl, Mixer::Amixer]
        }
    }

    pub fn program(self) -> &'static str {
        match self {
            Mixer::Pactl     => "pactl",
            Mixer::Amixer    => "amixer",
            Mixer::Osascript => "osascript",
        }
    }

    /// A harmless read-only command that succeeds only if the mixer works.
    pub fn probe_args(self) -> Vec<String> {
        let args: &[&str] = match self {
            Mixer::Pactl     => &["get-sink-volume", "@DEFAULT_SINK@"],
            Mixer::Amixer    => &["get", "Master"],
            Mixer::Osascript => &["-e", "output volume of (get volume settings)"],
        };
        args.iter().map(|s| s.to_string()).collect()
    }

    pub fn set_args(self, percent: u32) -> Vec<String> {
        match self {
            Mixer::Pactl => vec![
                "set-sink-volume".into(), "@DEFAULT_SINK@".into(), format!("{}%", percent),
            ],
            Mixer::Amixer => vec![
                "-q".into(), "set".into(), "Master".into(), format!("{}%", percent),
            ],
            Mixer::Osascript => vec![
                "-e".into(), format!("set volume output volume {}", percent),
            ],
        }
    }

    fn run(self, args: &[String]) -> Result<(), AudioError> {
        let program = self.program();
        let status = Command::new(program)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .map_err(|source| AudioError::Spawn { program, source })?;
        if status.success() {
            Ok(())
        } else {
            Err(AudioError::Failed { program, status: status.to_string() })
        }
    }
}

impl fmt::Display for Mixer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.program())
    }
}

// ════════════════════════════════════════════════════════════════════════════
// MixerEndpoint
// ════════════════════════════════════════════════════════════════════════════

pub struct MixerEndpoint {
    mixer: Mixer,
}

impl MixerEndpoint {
    /// Probe [`Mixer::candidates`] and keep the first that answers.
    pub fn detect() -> Result<Self, AudioError> {
        Self::detect_from(Mixer::candidates(), |mixer| mixer.run(&mixer.probe_args()))
    }

    /// Keep the first of `candidates` that `probe` accepts.
    pub fn detect_from<F>(candidates: &[Mixer], mut probe: F) -> Result<Self, AudioError>
    where
        F: FnMut(Mixer) -> Result<(), AudioError>,
    {
        for &mixer in candidates {
            match probe(mixer) {
                Ok(()) => {
                    info!(%mixer, "volume mixer found");
                    return Ok(MixerEndpoint { mixer });
                }
                Err(e) => debug!(%mixer, error = %e, "mixer probe failed"),
            }
        }
        let tried = candidates.iter().map(|m| m.program()).collect::<Vec<_>>().join(", ");
        Err(AudioError::NoMixer { tried })
    }
}

impl AudioEndpoint for MixerEndpoint {
    /// The CLIs take percentages, exposed here as a scalar range.
    fn volume_range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn set_volume_scalar(&mut self, level: f32) -> Result<(), AudioError> {
        let percent = to_percent(level)?;
        self.mixer.run(&self.mixer.set_args(percent))?;
        debug!(mixer = %self.mixer, percent, "volume set");
        Ok(())
    }

    fn name(&self) -> String {
        self.mixer.to_string()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// DryRunEndpoint
// ════════════════════════════════════════════════════════════════════════════

/// Accepts every request and only logs it.
#[derive(Debug, Default)]
pub struct DryRunEndpoint {
    last: Option<f32>,
}

impl DryRunEndpoint {
    pub fn new() -> Self {
        Self::default()
    }

    /// Most recent level requested.
    pub fn last(&self) -> Option<f32> {
        self.last
    }
}

impl AudioEndpoint for DryRunEndpoint {
    fn volume_range(&self) -> (f32, f32) {
        (0.0, 1.0)
    }

    fn set_volume_scalar(&mut self, level: f32) -> Result<(), AudioError> {
        let percent = to_percent(level)?;
        info!(percent, "dry run: volume not changed");
        self.last = Some(level);
        Ok(())
    }

    fn name(&self) -> String {
        "dry run".to_string()
    }
}

// ════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_conversion() {
        assert_eq!(to_percent(0.0).unwrap(), 0);
        assert_eq!(to_percent(0.25).unwrap(), 25);
        assert_eq!(to_percent(1.0).unwrap(), 100);
        assert!(matches!(to_percent(1.5), Err(AudioError::OutOfRange(_))));
        assert!(matches!(to_percent(-0.1), Err(AudioError::OutOfRange(_))));
        assert!(to_percent(f32::NAN).is_err());
    }

    #[test]
    fn mixer_command_lines() {
        assert_eq!(Mixer::Pactl.set_args(50), vec!["set-sink-volume", "@DEFAULT_SINK@", "50%"]);
        assert_eq!(Mixer::Amixer.set_args(75), vec!["-q", "set", "Master", "75%"]);
        assert_eq!(Mixer::Osascript.set_args(0), vec!["-e", "set volume output volume 0"]);
        assert_eq!(Mixer::Amixer.probe_args(), vec!["get", "Master"]);
    }

    #[test]
    fn candidates_are_platform_specific() {
        let c = Mixer::candidates();
        assert!(!c.is_empty());
        if cfg!(target_os = "macos") {
            assert_eq!(c, &[Mixer::Osascript]);
        } else {
            assert!(!c.contains(&Mixer::Osascript));
        }
    }

    fn exit_1(mixer: Mixer) -> Result<(), AudioError> {
        Err(AudioError::Failed { program: mixer.program(), status: "exit status: 1".into() })
    }

    #[test]
    fn no_working_mixer_is_an_error() {
        let mut probed = Vec::new();
        let err = MixerEndpoint::detect_from(&[Mixer::Pactl, Mixer::Amixer], |m| {
            probed.push(m);
            exit_1(m)
        })
        .err()
        .unwrap();
        assert_eq!(probed, vec![Mixer::Pactl, Mixer::Amixer]);
        assert!(matches!(&err, AudioError::NoMixer { tried } if tried == "pactl, amixer"));
    }

    #[test]
    fn first_answering_mixer_wins() {
        let ep = MixerEndpoint::detect_from(&[Mixer::Pactl, Mixer::Amixer, Mixer::Osascript], |m| {
            if m == Mixer::Pactl { exit_1(m) } else { Ok(()) }
        })
        .unwrap();
        assert_eq!(ep.name(), "amixer");
        assert_eq!(ep.volume_range(), (0.0, 1.0));
    }

    #[test]
    fn dry_run_records_and_validates() {
        let mut ep = DryRunEndpoint::new();
        assert_eq!(ep.volume_range(), (0.0, 1.0));
        ep.set_volume_scalar(0.75).unwrap();
        assert_eq!(ep.last(), Some(0.75));
        assert!(ep.set_volume_scalar(2.0).is_err());
        assert_eq!(ep.last(), Some(0.75));
    }
}
