//! Dossier session - owns the scheduler and turns commands and ticks into frames.
//!
//! One frame of the host loop works as follows:
//! 1. **Input**: zero or more [`DossierSession::submit`] calls for typed commands,
//!    each stamped with the time the line arrived
//! 2. **Advance**: [`DossierSession::frame`] moves the scheduler clock and sweeps
//! 3. **Refresh**: timed content on screen steps if its interval passed
//! 4. **Snapshot**: active effects and displayed content are copied out for drawing

mod snapshot;

pub use snapshot::*;

use effect_engine::{EffectScheduler, Millis};
use tracing::{info, warn};

use crate::catalog::ContentCatalog;
use crate::commands::{normalize, select, CommandRegistry, CycleMode, EffectCue, Selection, ShowContent};
use crate::config::DossierConfig;
use crate::error::{DossierError, Result};

/// Result of submitting one line of input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// Blank input; nothing happened.
    Empty,
    /// A known command ran.
    Executed { command: String },
    /// No command matched; the fallback cue (if any) fired.
    Unrecognized { token: String },
}

/// Everything the frame loop owns.
#[derive(Debug)]
pub struct DossierSession {
    scheduler: EffectScheduler,
    catalog: ContentCatalog,
    registry: CommandRegistry,
    fallback: Option<EffectCue>,
    screen: String,
    displayed: Option<Selection>,
    tick_ms: Millis,
}

impl DossierSession {
    /// Build a session from configuration, validating sequences and commands.
    pub fn new(config: DossierConfig) -> Result<Self> {
        if config.tick_ms == 0 {
            return Err(DossierError::ZeroTick);
        }
        if let Some(cue) = &config.fallback {
            cue.validate()?;
        }
        let catalog = ContentCatalog::from_sequences(config.sequences)?;
        let registry = CommandRegistry::from_config(config.commands, &catalog)?;

        info!(
            sequences = catalog.sequence_count(),
            commands = registry.len(),
            "dossier session ready"
        );

        Ok(Self {
            scheduler: EffectScheduler::new(),
            catalog,
            registry,
            fallback: config.fallback,
            screen: config.start_screen,
            displayed: None,
            tick_ms: config.tick_ms,
        })
    }

    /// Session over the embedded dossier.
    pub fn with_defaults() -> Result<Self> {
        Self::new(DossierConfig::default_embedded()?)
    }

    /// Handle one line of typed input that arrived at `now`.
    ///
    /// The scheduler clock moves to `now` first, so effects started here begin at
    /// the moment of input rather than at the previous frame.
    pub fn submit(&mut self, line: &str, now: Millis) -> Result<CommandOutcome> {
        let token = normalize(line);
        if token.is_empty() {
            return Ok(CommandOutcome::Empty);
        }

        self.scheduler.advance(now);

        let Some((name, action)) = self.registry.resolve(&token) else {
            warn!(token = %token, "unrecognized command");
            if let Some(cue) = &self.fallback {
                cue.fire(&mut self.scheduler)?;
            }
            return Ok(CommandOutcome::Unrecognized { token });
        };

        let applied = action.apply(&mut self.scheduler, &self.catalog)?;
        info!(
            command = name,
            screen = applied.screen.as_deref().unwrap_or(&self.screen),
            "command executed"
        );
        let command = name.to_string();

        if let Some(screen) = applied.screen {
            self.screen = screen;
        }
        if let Some(selection) = applied.selection {
            self.displayed = Some(selection);
        }

        Ok(CommandOutcome::Executed { command })
    }

    /// Advance to `now` and snapshot what should be drawn.
    ///
    /// Call exactly once per frame, with non-decreasing `now`.
    pub fn frame(&mut self, now: Millis) -> Result<FrameSnapshot> {
        self.scheduler.advance(now);
        self.refresh_timed_content()?;

        let mut effects: Vec<_> = self
            .scheduler
            .all_active()
            .map(|effect| ActiveEffectView::capture(effect, now))
            .collect();
        effects.sort_by(|a, b| a.key.cmp(&b.key));

        let content = self.displayed.as_ref().and_then(|selection| {
            self.catalog
                .entry(&selection.sequence, selection.index)
                .map(|entry| ContentView {
                    sequence: selection.sequence.clone(),
                    index: selection.index,
                    title: entry.title.clone(),
                    body: entry.body.clone(),
                })
        });

        Ok(FrameSnapshot {
            now,
            screen: self.screen.clone(),
            content,
            effects,
        })
    }

    fn refresh_timed_content(&mut self) -> Result<()> {
        let Some(selection) = &self.displayed else {
            return Ok(());
        };
        if !matches!(selection.cycle, CycleMode::Every { .. }) {
            return Ok(());
        }

        let show = ShowContent {
            sequence: selection.sequence.clone(),
            cycle: selection.cycle,
        };
        self.displayed = Some(select(&show, &mut self.scheduler, &self.catalog)?);
        Ok(())
    }

    pub fn scheduler(&self) -> &EffectScheduler {
        &self.scheduler
    }

    pub fn screen(&self) -> &str {
        &self.screen
    }

    pub fn displayed(&self) -> Option<&Selection> {
        self.displayed.as_ref()
    }

    pub fn tick_ms(&self) -> Millis {
        self.tick_ms
    }

    pub fn registry(&self) -> &CommandRegistry {
        &self.registry
    }
}
