//! Terminal runtime and event loop.

mod preview;
mod surface;

use std::collections::VecDeque;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, mpsc};
use std::thread;
use std::time::{Duration, Instant};

use anyhow::{Result, anyhow};
use glint_core::{HistorySource, SelectionMemory};
use ratatui::crossterm::event::{self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers};
use throbber_widgets_tui::ThrobberState;
use tracing::{debug, info};

use self::preview::FilePreview;
use self::surface::TerminalSurface;
use crate::input::QueryInput;
use crate::session::{Backends, CommitAction, Session, SessionConfig, SessionOutcome};
use crate::style::Theme;

const FRAME_INTERVAL: Duration = Duration::from_millis(16);

/// Open a session on the terminal and run it until the user leaves.
///
/// Commits made during the session are added to `memory`.
pub fn run(
	config: SessionConfig,
	backends: Backends,
	history: Box<dyn HistorySource>,
	memory: &mut SelectionMemory,
	theme: Theme,
) -> Result<SessionOutcome> {
	let mut terminal = ratatui::init();
	terminal.clear()?;

	let size = terminal.size()?;
	let opened = Session::open(
		config,
		backends,
		history,
		memory.clone(),
		size.width,
		size.height,
	);
	let mut session = match opened {
		Ok(session) => session,
		Err(error) => {
			ratatui::restore();
			return Ok(SessionOutcome::Closed {
				reason: error.to_string(),
			});
		}
	};
	let mut input = QueryInput::new(session.query());
	let mut surface = TerminalSurface::new(theme);
	let mut preview = FilePreview::default();
	let mut throbber = ThrobberState::default();

	let (event_tx, event_rx) = mpsc::channel();
	let event_loop_running = Arc::new(AtomicBool::new(true));
	let event_loop_flag = Arc::clone(&event_loop_running);

	let event_thread = thread::spawn(move || -> Result<()> {
		while event_loop_flag.load(Ordering::Relaxed) {
			if event::poll(Duration::from_millis(50))? {
				let event = event::read()?;
				if event_tx.send(event).is_err() {
					break;
				}
			}
		}
		Ok(())
	});

	let mut pending_events = VecDeque::new();

	let result: Result<SessionOutcome> = 'event_loop: loop {
		loop {
			match event_rx.try_recv() {
				Ok(event) => pending_events.push_back(event),
				Err(mpsc::TryRecvError::Empty) => break,
				Err(mpsc::TryRecvError::Disconnected) => {
					break 'event_loop Err(anyhow!("input event channel disconnected"));
				}
			}
		}

		let mut maybe_outcome = None;
		while let Some(event) = pending_events.pop_front() {
			let outcome = match event {
				Event::Key(key) if key.kind == KeyEventKind::Press => {
					handle_key(&mut session, &mut input, key)
				}
				Event::Resize(width, height) => match session.handle_resize(width, height) {
					Ok(()) => None,
					Err(error) => Some(SessionOutcome::Closed {
						reason: error.to_string(),
					}),
				},
				_ => None,
			};
			if outcome.is_some() {
				maybe_outcome = outcome;
				break;
			}
		}

		if let Some(outcome) = maybe_outcome {
			break Ok(outcome);
		}

		session.tick(Instant::now(), &mut preview);
		if session.is_scanning() {
			throbber.calc_next();
		}
		session.present(&mut surface, input.cursor_column());
		terminal.draw(|frame| surface.draw(frame, &preview, &throbber))?;

		thread::sleep(FRAME_INTERVAL);
	};

	ratatui::restore();
	*memory = session.memory().clone();

	event_loop_running.store(false, Ordering::Relaxed);
	match event_thread.join() {
		Ok(join_result) => join_result?,
		Err(err) => std::panic::resume_unwind(err),
	}

	if let Ok(outcome) = &result {
		info!(?outcome, "session finished");
	}
	result
}

/// Apply one key press. Returns the outcome when the key ends the session.
fn handle_key(
	session: &mut Session,
	input: &mut QueryInput,
	key: KeyEvent,
) -> Option<SessionOutcome> {
	let ctrl = key.modifiers.contains(KeyModifiers::CONTROL);
	match key.code {
		KeyCode::Esc => return Some(cancel(session)),
		KeyCode::Char('c') if ctrl => return Some(cancel(session)),
		KeyCode::Enter => return commit(session, CommitAction::Open),
		KeyCode::Char('s') if ctrl => return commit(session, CommitAction::Split),
		KeyCode::Char('v') if ctrl => return commit(session, CommitAction::VerticalSplit),
		KeyCode::Char('t') if ctrl => return commit(session, CommitAction::NewTab),
		KeyCode::Char('q') if ctrl => {
			let query = session.query().to_owned();
			return match session.send_all_selected_to_external_list() {
				Ok(entries) => Some(SessionOutcome::ExternalList { query, entries }),
				Err(error) => Some(SessionOutcome::Closed {
					reason: error.to_string(),
				}),
			};
		}
		KeyCode::Char('g') if ctrl => session.toggle_mode(),
		KeyCode::Char('r') if ctrl => {
			session.cycle_history();
			input.set_text(session.query());
		}
		KeyCode::Tab => session.toggle_selection(),
		KeyCode::Up => session.move_cursor(-1),
		KeyCode::Down => session.move_cursor(1),
		KeyCode::Char('p') if ctrl => session.move_cursor(-1),
		KeyCode::Char('n') if ctrl => session.move_cursor(1),
		KeyCode::PageDown => session.next_page(),
		KeyCode::PageUp => session.previous_page(),
		_ => {
			if input.input(key) {
				session.update_query(input.text());
			}
		}
	}
	None
}

fn cancel(session: &mut Session) -> SessionOutcome {
	let query = session.query().to_owned();
	session.close();
	debug!(%query, "session cancelled");
	SessionOutcome::Cancelled { query }
}

fn commit(session: &mut Session, action: CommitAction) -> Option<SessionOutcome> {
	match session.commit_selection(action) {
		Ok(Some(commit)) => Some(SessionOutcome::Committed(commit)),
		Ok(None) => None,
		Err(error) => Some(SessionOutcome::Closed {
			reason: error.to_string(),
		}),
	}
}
