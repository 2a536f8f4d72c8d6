//! Command table - maps typed tokens to the effects and content they trigger.
//!
//! Each command is a small data-driven handler: it may switch the screen, pick an
//! entry from a content sequence, cancel running effects and start new ones.
//! Tokens are matched after trimming and ASCII-lowercasing; nothing else about the
//! input is validated.

use effect_engine::{EffectKind, EffectScheduler, Millis, SchedulerError};
use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, HashMap};
use tracing::debug;

use crate::catalog::ContentCatalog;
use crate::error::{DossierError, Result};

/// An effect a command starts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EffectCue {
    pub key: String,
    pub duration_ms: Millis,
    pub kind: EffectKind,
}

impl EffectCue {
    pub fn new(key: impl Into<String>, duration_ms: Millis, kind: EffectKind) -> Self {
        Self {
            key: key.into(),
            duration_ms,
            kind,
        }
    }

    /// Check the cue against the scheduler's preconditions without firing it.
    pub fn validate(&self) -> Result<()> {
        if self.key.is_empty() {
            return Err(SchedulerError::EmptyKey.into());
        }
        if self.duration_ms == 0 {
            return Err(SchedulerError::ZeroDuration {
                key: self.key.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Register this cue with the scheduler.
    pub fn fire(&self, scheduler: &mut EffectScheduler) -> Result<()> {
        scheduler.start_effect(self.key.clone(), self.kind.clone(), self.duration_ms)?;
        Ok(())
    }
}

/// How a command picks which entry of its sequence to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum CycleMode {
    /// Always the first entry.
    First,
    /// Show the current entry, then step the sequence's cycle for next time.
    #[default]
    OnActivation,
    /// Step on a timer while the sequence stays on screen.
    Every { interval_ms: Millis },
}

/// Content a command puts on screen.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShowContent {
    pub sequence: String,
    #[serde(default)]
    pub cycle: CycleMode,
}

/// Everything one command does when activated.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CommandAction {
    /// Extra tokens that trigger the same action.
    #[serde(default)]
    pub aliases: Vec<String>,

    /// Screen/tab to switch to.
    #[serde(default)]
    pub screen: Option<String>,

    #[serde(default)]
    pub show: Option<ShowContent>,

    /// Effect keys to stop before the new cues start.
    #[serde(default)]
    pub cancel: Vec<String>,

    #[serde(default)]
    pub effects: Vec<EffectCue>,
}

/// The content picked by an activation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    pub sequence: String,
    pub index: usize,
    pub cycle: CycleMode,
}

/// What an activation changed, for the session to apply.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Applied {
    pub screen: Option<String>,
    pub selection: Option<Selection>,
}

impl CommandAction {
    /// Check every cue and the cycle interval, so that `apply` on a validated
    /// action can only fail on a missing sequence.
    pub fn validate(&self) -> Result<()> {
        for cue in &self.effects {
            cue.validate()?;
        }
        if let Some(ShowContent {
            sequence,
            cycle: CycleMode::Every { interval_ms: 0 },
        }) = &self.show
        {
            return Err(SchedulerError::ZeroInterval {
                key: sequence.clone(),
            }
            .into());
        }
        Ok(())
    }

    /// Run the action against the scheduler.
    pub fn apply(
        &self,
        scheduler: &mut EffectScheduler,
        catalog: &ContentCatalog,
    ) -> Result<Applied> {
        for key in &self.cancel {
            scheduler.cancel(key);
        }
        for cue in &self.effects {
            cue.fire(scheduler)?;
        }

        let selection = match &self.show {
            Some(show) => Some(select(show, scheduler, catalog)?),
            None => None,
        };

        Ok(Applied {
            screen: self.screen.clone(),
            selection,
        })
    }
}

/// Pick the entry index for `show`, stepping its cycle as the mode requires.
///
/// The sequence name doubles as the cycle key, so commands sharing a sequence
/// share its position.
pub fn select(
    show: &ShowContent,
    scheduler: &mut EffectScheduler,
    catalog: &ContentCatalog,
) -> Result<Selection> {
    let length = catalog
        .len(&show.sequence)
        .ok_or_else(|| DossierError::MissingSequence {
            sequence: show.sequence.clone(),
        })?;

    let index = match show.cycle {
        CycleMode::First => 0,
        CycleMode::OnActivation => {
            let current = scheduler.current_cycle_index(&show.sequence) % length;
            scheduler.advance_cycle(&show.sequence, length)?;
            current
        }
        CycleMode::Every { interval_ms } => {
            scheduler.advance_cycle_every(&show.sequence, length, interval_ms)?
        }
    };

    Ok(Selection {
        sequence: show.sequence.clone(),
        index,
        cycle: show.cycle,
    })
}

/// Lowercased, trimmed form of a typed token.
pub fn normalize(token: &str) -> String {
    token.trim().to_ascii_lowercase()
}

/// Lookup table from token to command.
#[derive(Debug, Clone, Default)]
pub struct CommandRegistry {
    /// Canonical command name -> action.
    actions: HashMap<String, CommandAction>,

    /// Every accepted token (names and aliases) -> canonical name.
    tokens: HashMap<String, String>,
}

impl CommandRegistry {
    /// Create an empty registry.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the registry from configured commands, checking every cue and that
    /// every referenced sequence exists in `catalog`.
    pub fn from_config(
        commands: BTreeMap<String, CommandAction>,
        catalog: &ContentCatalog,
    ) -> Result<Self> {
        let mut registry = Self::new();
        for (name, action) in commands {
            if let Some(show) = &action.show {
                if !catalog.contains(&show.sequence) {
                    return Err(DossierError::UnknownSequence {
                        command: name,
                        sequence: show.sequence.clone(),
                    });
                }
            }
            action.validate()?;
            registry.register(name, action)?;
        }
        Ok(registry)
    }

    /// Add a command under `name` and its aliases.
    pub fn register(&mut self, name: impl Into<String>, action: CommandAction) -> Result<()> {
        let raw = name.into();
        let name = normalize(&raw);

        if self.actions.contains_key(&name) {
            return Err(DossierError::DuplicateToken {
                token: name.clone(),
                first: name,
                second: raw,
            });
        }

        let mut claimed = vec![name.clone()];
        claimed.extend(action.aliases.iter().map(|alias| normalize(alias)));

        for token in &claimed {
            if let Some(owner) = self.tokens.get(token) {
                if owner != &name {
                    return Err(DossierError::DuplicateToken {
                        token: token.clone(),
                        first: owner.clone(),
                        second: raw,
                    });
                }
            }
        }
        for token in claimed {
            self.tokens.insert(token, name.clone());
        }

        debug!(command = %name, aliases = action.aliases.len(), "command registered");
        self.actions.insert(name, action);
        Ok(())
    }

    /// Find the command a typed token refers to.
    pub fn resolve(&self, token: &str) -> Option<(&str, &CommandAction)> {
        let name = self.tokens.get(&normalize(token))?;
        self.actions
            .get(name)
            .map(|action| (name.as_str(), action))
    }

    /// Number of distinct commands.
    pub fn len(&self) -> usize {
        self.actions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    /// Canonical command names, sorted.
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<_> = self.actions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::ContentEntry;
    use effect_engine::Rgba;

    fn catalog() -> ContentCatalog {
        let mut sequences = BTreeMap::new();
        sequences.insert(
            "files".to_string(),
            vec![
                ContentEntry::new("A", "first"),
                ContentEntry::new("B", "second"),
                ContentEntry::new("C", "third"),
            ],
        );
        ContentCatalog::from_sequences(sequences).unwrap()
    }

    fn files_action(cycle: CycleMode) -> CommandAction {
        CommandAction {
            aliases: vec!["F".to_string()],
            screen: Some("files".to_string()),
            show: Some(ShowContent {
                sequence: "files".to_string(),
                cycle,
            }),
            cancel: Vec::new(),
            effects: vec![EffectCue::new(
                "flash",
                300,
                EffectKind::Flash { color: Rgba::WHITE },
            )],
        }
    }

    #[test]
    fn test_normalize() {
        assert_eq!(normalize("  GridBleed \n"), "gridbleed");
    }

    #[test]
    fn test_resolve_name_and_alias() {
        let mut registry = CommandRegistry::new();
        registry
            .register("Files", files_action(CycleMode::OnActivation))
            .unwrap();

        assert_eq!(registry.resolve("files").unwrap().0, "files");
        assert_eq!(registry.resolve(" f ").unwrap().0, "files");
        assert!(registry.resolve("nothing").is_none());
        assert_eq!(registry.names(), vec!["files"]);
    }

    #[test]
    fn test_duplicate_alias_rejected() {
        let mut registry = CommandRegistry::new();
        registry
            .register("files", files_action(CycleMode::First))
            .unwrap();

        let err = registry
            .register("folders", files_action(CycleMode::First))
            .unwrap_err();
        assert!(matches!(err, DossierError::DuplicateToken { token, .. } if token == "f"));
    }

    #[test]
    fn test_case_variant_names_collide() {
        let mut commands = BTreeMap::new();
        commands.insert("Files".to_string(), files_action(CycleMode::First));
        commands.insert(
            "files".to_string(),
            CommandAction {
                aliases: Vec::new(),
                ..files_action(CycleMode::First)
            },
        );

        let err = CommandRegistry::from_config(commands, &catalog()).unwrap_err();
        assert!(matches!(err, DossierError::DuplicateToken { token, .. } if token == "files"));
    }

    #[test]
    fn test_bad_cue_rejected_at_load() {
        let mut action = files_action(CycleMode::OnActivation);
        action
            .effects
            .push(EffectCue::new("bad", 0, EffectKind::Glitch { intensity: 0.2 }));

        let mut commands = BTreeMap::new();
        commands.insert("files".to_string(), action);

        let err = CommandRegistry::from_config(commands, &catalog()).unwrap_err();
        assert!(matches!(
            err,
            DossierError::Scheduler(SchedulerError::ZeroDuration { key }) if key == "bad"
        ));
    }

    #[test]
    fn test_empty_cue_key_and_zero_interval_rejected() {
        let blank = EffectCue::new("", 100, EffectKind::Shake { amplitude: 2.0 });
        assert!(matches!(
            blank.validate(),
            Err(DossierError::Scheduler(SchedulerError::EmptyKey))
        ));

        let action = files_action(CycleMode::Every { interval_ms: 0 });
        assert!(matches!(
            action.validate(),
            Err(DossierError::Scheduler(SchedulerError::ZeroInterval { .. }))
        ));
        assert!(files_action(CycleMode::First).validate().is_ok());
    }

    #[test]
    fn test_unknown_sequence_rejected() {
        let mut commands = BTreeMap::new();
        commands.insert(
            "ghost".to_string(),
            CommandAction {
                show: Some(ShowContent {
                    sequence: "nowhere".to_string(),
                    cycle: CycleMode::First,
                }),
                ..CommandAction::default()
            },
        );

        let err = CommandRegistry::from_config(commands, &catalog()).unwrap_err();
        assert!(matches!(err, DossierError::UnknownSequence { sequence, .. } if sequence == "nowhere"));
    }

    #[test]
    fn test_apply_on_activation_walks_sequence() {
        let catalog = catalog();
        let mut scheduler = EffectScheduler::new();
        let action = files_action(CycleMode::OnActivation);

        let indices: Vec<_> = (0..4)
            .map(|_| {
                action
                    .apply(&mut scheduler, &catalog)
                    .unwrap()
                    .selection
                    .unwrap()
                    .index
            })
            .collect();

        assert_eq!(indices, vec![0, 1, 2, 0]);
        assert!(scheduler.is_active("flash"));
    }

    #[test]
    fn test_apply_first_never_moves() {
        let catalog = catalog();
        let mut scheduler = EffectScheduler::new();
        let action = files_action(CycleMode::First);

        for _ in 0..3 {
            let applied = action.apply(&mut scheduler, &catalog).unwrap();
            assert_eq!(applied.selection.unwrap().index, 0);
            assert_eq!(applied.screen.as_deref(), Some("files"));
        }
    }

    #[test]
    fn test_apply_every_follows_clock() {
        let catalog = catalog();
        let mut scheduler = EffectScheduler::new();
        let action = files_action(CycleMode::Every { interval_ms: 1000 });

        assert_eq!(action.apply(&mut scheduler, &catalog).unwrap().selection.unwrap().index, 0);

        scheduler.advance(1000);
        assert_eq!(action.apply(&mut scheduler, &catalog).unwrap().selection.unwrap().index, 1);
    }

    #[test]
    fn test_apply_cancels_before_starting() {
        let catalog = catalog();
        let mut scheduler = EffectScheduler::new();
        scheduler
            .start_effect(
                "rain",
                EffectKind::AmbientRain {
                    density: 0.3,
                    color: Rgba::PHOSPHOR,
                },
                60_000,
            )
            .unwrap();

        let purge = CommandAction {
            cancel: vec!["rain".to_string()],
            effects: vec![EffectCue::new("glitch", 400, EffectKind::Glitch { intensity: 0.8 })],
            ..CommandAction::default()
        };
        let applied = purge.apply(&mut scheduler, &catalog).unwrap();

        assert!(applied.selection.is_none());
        assert!(!scheduler.is_active("rain"));
        assert!(scheduler.is_active("glitch"));
    }

    #[test]
    fn test_bad_cue_surfaces_scheduler_error() {
        let catalog = catalog();
        let mut scheduler = EffectScheduler::new();
        let broken = CommandAction {
            effects: vec![EffectCue::new("flash", 0, EffectKind::Flash { color: Rgba::WHITE })],
            ..CommandAction::default()
        };

        let err = broken.apply(&mut scheduler, &catalog).unwrap_err();
        assert!(matches!(err, DossierError::Scheduler(_)));
    }
}
