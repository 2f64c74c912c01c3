use anyhow::{Context, Result};
use eogcal_core::{
    ConfigError, MarkerStyle, OrderEntry, Pattern, TARGET_COUNT, TargetOrder, fill_default_clips,
};
use eogcal_sequencer::{AudioRoute, BeepMode, SequencerConfig, config::seconds};
use eogcal_sync::{OscRemoteControl, SyncChannels, UdpRemoteAudio, UdpTrigger};
use log::{info, warn};
use rand::{SeedableRng, rngs::StdRng, seq::SliceRandom};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// On-disk settings, `settings.json` in the platform config directory.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub trigger: TriggerSettings,
    pub remote: RemoteSettings,
    pub remote_audio: RemoteAudioSettings,
    pub calibration: CalibrationSettings,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TriggerSettings {
    pub enabled: bool,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteAudioSettings {
    pub enabled: bool,
    pub host: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RemoteSettings {
    pub enabled: bool,
    pub host: String,
    /// OSC address pattern every command is sent to.
    pub address: String,
    pub experiment: String,
    pub subject: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CalibrationSettings {
    /// Seconds a marker stays on screen.
    pub duration: f32,
    /// Seconds between two markers.
    pub pause: f32,
    pub radius: f32,
    pub beep_once: bool,
    pub beep_always: bool,
    pub foreground: [u8; 3],
    pub background: [u8; 3],
    pub blink_hz: f32,
    /// Presets expanded in sequence; when non-empty they replace `order`.
    pub pattern: Vec<Pattern>,
    /// Entries without a `command` get the stock clip for their target.
    pub order: Vec<OrderEntry>,
    pub reference: Option<usize>,
    pub use_reference: bool,
    pub use_verbal_commands: bool,
    pub use_remote_sound: bool,
    /// Shuffle `order` once at load.
    pub shuffle: bool,
    pub seed: Option<u64>,
    pub clip_dir: PathBuf,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            trigger: TriggerSettings::default(),
            remote: RemoteSettings::default(),
            remote_audio: RemoteAudioSettings::default(),
            calibration: CalibrationSettings::default(),
        }
    }
}

impl Default for TriggerSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "192.168.1.1:5000".into(),
        }
    }
}

impl Default for RemoteAudioSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1:5001".into(),
        }
    }
}

impl Default for RemoteSettings {
    fn default() -> Self {
        Self {
            enabled: false,
            host: "127.0.0.1:4444".into(),
            address: "/eyetracker".into(),
            experiment: "calibration".into(),
            subject: "subject".into(),
        }
    }
}

impl Default for CalibrationSettings {
    fn default() -> Self {
        Self {
            duration: 2.0,
            pause: 0.25,
            radius: 12.0,
            beep_once: true,
            beep_always: false,
            foreground: [128, 0, 128],
            background: [0, 0, 0],
            blink_hz: 2.0,
            pattern: Vec::new(),
            order: (0..TARGET_COUNT).map(OrderEntry::new).collect(),
            reference: Some(0),
            use_reference: true,
            use_verbal_commands: false,
            use_remote_sound: false,
            shuffle: false,
            seed: None,
            clip_dir: PathBuf::from("data/commands"),
        }
    }
}

/// Everything the shell needs to build a sequencer, already validated.
#[derive(Debug, Clone)]
pub struct Calibration {
    pub config: SequencerConfig,
    pub order: TargetOrder,
    pub clip_dir: PathBuf,
}

impl Settings {
    pub fn default_path() -> Result<PathBuf> {
        let dirs = directories::ProjectDirs::from("org", "eogcal", "eogcal")
            .ok_or_else(|| anyhow::anyhow!("Could not determine config directory"))?;
        Ok(dirs.config_dir().join("settings.json"))
    }

    /// Loads `path`. A missing or unreadable file is replaced with the
    /// defaults, which are then used.
    pub fn load_or_init(path: &Path) -> Result<Self> {
        match Self::load_from_path(path) {
            Ok(settings) => {
                info!("Loaded settings from {}", path.display());
                Ok(settings)
            }
            Err(e) => {
                warn!("{e:#}; writing default settings to {}", path.display());
                Self::default().save_to_path(path)?;
                Self::load_from_path(path)
            }
        }
    }

    pub fn load_from_path(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read settings {}", path.display()))?;
        serde_json::from_str(&content)
            .with_context(|| format!("Failed to parse settings {}", path.display()))
    }

    pub fn save_to_path(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = serde_json::to_string_pretty(self)?;
        std::fs::write(path, content)
            .with_context(|| format!("Failed to write settings {}", path.display()))?;
        Ok(())
    }

    /// Validates the calibration section and produces the sequencer inputs.
    pub fn calibration(&self) -> Result<Calibration, ConfigError> {
        let c = &self.calibration;
        let [fr, fg, fb] = c.foreground;
        let [br, bg, bb] = c.background;

        let config = SequencerConfig {
            target_duration: seconds("duration", c.duration)?,
            pause_duration: seconds("pause", c.pause)?,
            style: MarkerStyle {
                radius: c.radius,
                foreground: [fr, fg, fb, 255],
                background: [br, bg, bb, 255],
                blink_hz: c.blink_hz.max(0.0),
            },
            beep: BeepMode::from_flags(c.beep_once, c.beep_always),
            audio_route: AudioRoute::from_flag(c.use_remote_sound),
            use_verbal_commands: c.use_verbal_commands,
            use_reference: c.use_reference,
        };
        config.validate()?;

        let mut entries = if c.pattern.is_empty() {
            c.order.clone()
        } else {
            Pattern::expand(&c.pattern)
        };
        fill_default_clips(&mut entries);
        if c.shuffle {
            let mut rng = match c.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_rng(&mut rand::rng()),
            };
            entries.shuffle(&mut rng);
        }
        let reference = c.reference.filter(|_| c.use_reference);
        let order = TargetOrder::resolve(entries, reference)?;

        Ok(Calibration {
            config,
            order,
            clip_dir: c.clip_dir.clone(),
        })
    }

    /// Checks every host, enabled or not, so a typo surfaces before the
    /// channel is switched on mid-session.
    pub fn validate_hosts(&self) -> Result<(), ConfigError> {
        check_host("trigger", &self.trigger.host)?;
        check_host("remote control", &self.remote.host)?;
        check_host("remote audio", &self.remote_audio.host)?;
        if !self.remote.address.starts_with('/') {
            return Err(ConfigError::InvalidAddress {
                channel: "remote control",
                address: self.remote.address.clone(),
            });
        }
        Ok(())
    }

    /// Opens every enabled channel.
    pub fn open_channels(&self) -> Result<SyncChannels> {
        let mut channels = SyncChannels::disabled();
        if self.trigger.enabled {
            channels = channels.with_trigger(UdpTrigger::open(&self.trigger.host)?);
            info!("Trigger channel -> {}", self.trigger.host);
        }
        if self.remote.enabled {
            channels = channels.with_remote(OscRemoteControl::open(
                &self.remote.host,
                self.remote.address.clone(),
            )?);
            info!(
                "Remote control -> {} {}",
                self.remote.host, self.remote.address
            );
        }
        if self.remote_audio.enabled {
            channels = channels.with_audio(UdpRemoteAudio::open(&self.remote_audio.host)?);
            info!("Remote audio -> {}", self.remote_audio.host);
        }
        Ok(channels)
    }
}

fn check_host(channel: &'static str, host: &str) -> Result<(), ConfigError> {
    let valid = host
        .rsplit_once(':')
        .is_some_and(|(name, port)| !name.is_empty() && port.parse::<u16>().is_ok());
    if valid {
        Ok(())
    } else {
        Err(ConfigError::InvalidAddress {
            channel,
            address: host.to_string(),
        })
    }
}
