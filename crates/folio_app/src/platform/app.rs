use std::io::{self, BufRead, Write};
use std::process::ExitCode;
use std::sync::Arc;
use std::time::{Duration, Instant};

use folio_core::{
    update, ContactState, Field, Msg, Page, RelayReadiness, SubmissionStatus, CONTACT_EMAIL,
};
use folio_engine::{captcha_channel, CaptchaVerifier, EmailJsRelay, Relay, RelayConfig, RelaySettings};
use folio_logging::{folio_info, folio_warn};

use super::effects::{DisabledRelay, EffectRunner};
use super::logging::{self, LogDestination};
use super::ui;

const POLL_INTERVAL: Duration = Duration::from_millis(50);
const CAPTCHA_WAIT: Duration = Duration::from_secs(5);
/// Longer than the relay's connect plus request timeouts.
const DELIVERY_WAIT: Duration = Duration::from_secs(45);

pub fn run_app() -> io::Result<ExitCode> {
    logging::initialize(LogDestination::Both);

    let config = RelayConfig::from_env();
    let (relay, readiness): (Arc<dyn Relay>, RelayReadiness) =
        match EmailJsRelay::new(config.clone(), RelaySettings::default()) {
            Ok(relay) => (Arc::new(relay), RelayReadiness::Configured),
            Err(err) => {
                folio_warn!("Contact relay disabled: {}", err);
                (Arc::new(DisabledRelay), RelayReadiness::NotConfigured)
            }
        };
    let (captcha, verifier) = captcha_channel(config.captcha_site_key.clone());
    folio_info!("Captcha widget mounted site_key={}", captcha.site_key());
    let to_email = config
        .to_email
        .clone()
        .unwrap_or_else(|| CONTACT_EMAIL.to_string());
    let runner = EffectRunner::new(relay, captcha, to_email)?;
    folio_info!("Contact page mounted readiness={:?}", readiness);

    let mut page = ContactPage {
        state: ContactState::new(readiness),
        runner,
        verifier,
    };
    for line in ui::layout::initial_lines(Page::Contact) {
        println!("{line}");
    }

    let stdin = io::stdin();
    let mut input = stdin.lock().lines();
    page.run(&mut input)
}

struct ContactPage {
    state: ContactState,
    runner: EffectRunner,
    verifier: CaptchaVerifier,
}

impl ContactPage {
    fn run(&mut self, input: &mut impl Iterator<Item = io::Result<String>>) -> io::Result<ExitCode> {
        loop {
            self.drain_events();
            for field in Field::ALL {
                let current = self.state.form().get(field).to_string();
                let Some(value) = prompt(input, field.label(), &current)? else {
                    return Ok(ExitCode::FAILURE);
                };
                if value != current {
                    self.dispatch(Msg::FieldChanged { field, value });
                }
            }

            if self.state.captcha_token().is_none() {
                let Some(token) = prompt(input, "Captcha token", "")? else {
                    return Ok(ExitCode::FAILURE);
                };
                if !token.trim().is_empty() {
                    // The widget answers through the engine, like the hosted one would.
                    self.verifier.verified(token.trim());
                    if !self.pump_until(CAPTCHA_WAIT, |state| state.captcha_token().is_some()) {
                        folio_warn!("Captcha token was not confirmed by the widget");
                    }
                }
            }

            self.dispatch(Msg::SubmitClicked);
            if !self.pump_until(DELIVERY_WAIT, |state| !state.is_submitting()) {
                folio_warn!("No answer from the relay; abandoning the submission");
                return Ok(ExitCode::FAILURE);
            }
            self.render();

            let question = match self.state.status() {
                SubmissionStatus::Idle => continue,
                SubmissionStatus::Success => "Send another message? [y/N]",
                SubmissionStatus::Error => "Try again? [y/N]",
            };
            match prompt(input, question, "")? {
                Some(answer) if answer.trim().eq_ignore_ascii_case("y") => continue,
                _ => break,
            }
        }

        Ok(match self.state.status() {
            SubmissionStatus::Error => ExitCode::FAILURE,
            SubmissionStatus::Idle | SubmissionStatus::Success => ExitCode::SUCCESS,
        })
    }

    fn dispatch(&mut self, msg: Msg) {
        let state = std::mem::take(&mut self.state);
        let (state, effects) = update(state, msg);
        self.state = state;
        self.runner.enqueue(effects);
    }

    fn drain_events(&mut self) {
        while let Some(msg) = self.runner.next_msg(Duration::ZERO) {
            self.dispatch(msg);
        }
    }

    /// Pumps engine events until `done` holds; false if `timeout` passes first.
    fn pump_until(&mut self, timeout: Duration, done: impl Fn(&ContactState) -> bool) -> bool {
        let deadline = Instant::now() + timeout;
        while !done(&self.state) {
            if Instant::now() >= deadline {
                return false;
            }
            if let Some(msg) = self.runner.next_msg(POLL_INTERVAL) {
                self.dispatch(msg);
            }
        }
        true
    }

    fn render(&mut self) {
        if !self.state.consume_dirty() {
            return;
        }
        println!();
        for line in ui::render::render(&self.state.view()) {
            println!("{line}");
        }
        println!();
    }
}

/// Reads one line; empty input keeps `current`. `None` means stdin closed.
fn prompt(
    input: &mut impl Iterator<Item = io::Result<String>>,
    label: &str,
    current: &str,
) -> io::Result<Option<String>> {
    if current.is_empty() {
        print!("{label}: ");
    } else {
        print!("{label} [{current}]: ");
    }
    io::stdout().flush()?;
    match input.next().transpose()? {
        Some(line) if line.trim().is_empty() => Ok(Some(current.to_string())),
        Some(line) => Ok(Some(line)),
        None => Ok(None),
    }
}
