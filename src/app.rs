use anyhow::{Context, Result};
use crossterm::event::{self, Event, KeyEventKind};
use std::time::{Duration, Instant};

use crate::config::Config;
use crate::form::FormState;
use crate::ui::terminal_guard::{install_panic_hook, TerminalGuard};
use crate::ui::{ScreenResult, WizardScreen};
use crate::wizard::{SubmissionTimings, Wizard};

pub struct App {
    config: Config,
    wizard: Wizard,
    screen: WizardScreen,
    should_quit: bool,
}

impl App {
    pub fn new(config: Config) -> Self {
        Self::with_state(config, FormState::default())
    }

    /// Start the wizard pre-filled, e.g. from a draft file
    pub fn with_state(config: Config, state: FormState) -> Self {
        let timings = SubmissionTimings::from(&config.submission);
        let mut wizard = Wizard::with_state(state, timings);
        let screen = WizardScreen::new(&mut wizard, config.logo.max_bytes);

        Self {
            config,
            wizard,
            screen,
            should_quit: false,
        }
    }

    pub fn run(&mut self) -> Result<()> {
        install_panic_hook();
        let mut guard = TerminalGuard::new()?;

        let tick_rate = Duration::from_millis(self.config.ui.tick_rate_ms);
        tracing::info!(
            session = %self.wizard.session_id(),
            tick_rate_ms = self.config.ui.tick_rate_ms,
            "starting wizard TUI"
        );

        while !self.should_quit {
            guard
                .terminal_mut()
                .draw(|f| self.screen.render(f, &self.wizard))
                .context("Failed to draw frame")?;

            if event::poll(tick_rate)? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == KeyEventKind::Press {
                        self.handle_key(key);
                    }
                }
            }

            // Deferred submission / redirect
            let fired = self.wizard.tick(Instant::now());
            self.screen.on_tick(&self.wizard, fired);
        }

        guard.release();
        tracing::info!(session = %self.wizard.session_id(), route = %self.wizard.route(), "wizard closed");
        Ok(())
    }

    fn handle_key(&mut self, key: crossterm::event::KeyEvent) {
        let result = self
            .screen
            .handle_key(&mut self.wizard, key, Instant::now());
        if result == ScreenResult::Quit {
            self.should_quit = true;
        }
    }
}
