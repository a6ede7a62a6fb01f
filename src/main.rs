mod display;

use std::collections::HashMap;
use std::fs::File;
use std::io::{stdout, BufWriter, Write};
use std::path::PathBuf;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant};

use crossterm::{
    cursor,
    event::{
        self, Event, KeyCode, KeyEvent, KeyEventKind, KeyModifiers,
        KeyboardEnhancementFlags, PopKeyboardEnhancementFlags, PushKeyboardEnhancementFlags,
    },
    terminal, ExecutableCommand,
};
use rand::rngs::StdRng;
use rand::SeedableRng;

use shard_shooter::compute::{init_state, restart, tick};
use shard_shooter::config::Tuning;
use shard_shooter::events::{dispatch_sounds, AudioSink, SilentAudio, SoundEvent};
use shard_shooter::input::InputState;

const FRAME: Duration = Duration::from_millis(16); // ≈60 FPS

// ── Simultaneous-input constants ──────────────────────────────────────────────

/// A key is considered "held" if its last press/repeat event arrived within
/// this many frames. Covers terminals that don't emit key-release events:
/// the OS key-repeat rate is ≥ 15 Hz, so 8 frames (≈133 ms) is always
/// refreshed before expiry.
const HOLD_WINDOW: u64 = 8;

/// Returns true if `key` was seen within the last `HOLD_WINDOW` frames.
fn is_held(key_frame: &HashMap<KeyCode, u64>, keys: &[KeyCode], frame: u64) -> bool {
    keys.iter().any(|key| {
        key_frame
            .get(key)
            .map(|&last| frame.saturating_sub(last) <= HOLD_WINDOW)
            .unwrap_or(false)
    })
}

// ── Audio ─────────────────────────────────────────────────────────────────────

/// Rings the terminal bell for the big moments; everything else is silent.
/// Writes to stderr so the bell never interleaves with a half-queued frame.
/// After the first failed write it stays silent for the rest of the run.
#[derive(Default)]
struct BellAudio {
    silenced: bool,
}

impl AudioSink for BellAudio {
    fn play(&mut self, sound: SoundEvent) {
        log::debug!("sound: {}", sound.name());
        if self.silenced {
            return;
        }
        if matches!(sound, SoundEvent::LevelComplete | SoundEvent::BossSpawn | SoundEvent::BossDefeated) {
            let mut err = std::io::stderr();
            if let Err(e) = err.write_all(b"\x07").and_then(|_| err.flush()) {
                log::warn!("Terminal bell unavailable ({e}), audio muted");
                self.silenced = true;
            }
        }
    }
}

// ── Logging ───────────────────────────────────────────────────────────────────

/// The terminal belongs to the game, so log records go to a file.
fn init_logging() {
    let path = std::env::temp_dir().join("shard_shooter.log");
    let mut builder = env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info"));
    if let Ok(file) = File::create(&path) {
        builder.target(env_logger::Target::Pipe(Box::new(file)));
    }
    builder.init();
}

struct Options {
    mute: bool,
    tuning: PathBuf,
}

fn parse_args() -> Options {
    let mut options = Options { mute: false, tuning: Tuning::default_path() };
    let mut args = std::env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--mute" => options.mute = true,
            "--tuning" => match args.next() {
                Some(path) => options.tuning = PathBuf::from(path),
                None => log::warn!("--tuning needs a path, using {}", options.tuning.display()),
            },
            other => log::warn!("Ignoring unknown argument {other}"),
        }
    }
    options
}

// ── Game loop ─────────────────────────────────────────────────────────────────

/// Input model: a `key_frame` map records the frame number of the last
/// press/repeat event for every key. Each frame we check which keys are
/// still "fresh" (within `HOLD_WINDOW` frames) and build one `InputState`
/// from all of them, so movement and fire can be held together.
///
/// Keyboard-enhancement terminals also send `Release`, which drops the key
/// immediately; classic terminals let it expire after `HOLD_WINDOW`.
fn game_loop<W: Write>(
    out: &mut W,
    tuning: Tuning,
    audio: &mut dyn AudioSink,
    rx: &mpsc::Receiver<Event>,
) -> std::io::Result<()> {
    let mut rng = StdRng::from_entropy();
    let mut state = init_state(tuning, &mut rng);

    let mut key_frame: HashMap<KeyCode, u64> = HashMap::new();
    let mut frame: u64 = 0;
    let mut last = Instant::now();

    loop {
        let frame_start = Instant::now();
        frame += 1;

        let mut typed = Vec::new();
        let mut pause = false;

        // ── Drain all pending input events (non-blocking) ─────────────────────
        while let Ok(ev) = rx.try_recv() {
            let Event::Key(KeyEvent { code, kind, modifiers, .. }) = ev else {
                continue;
            };
            match kind {
                KeyEventKind::Press => {
                    key_frame.insert(code.clone(), frame);
                    match code {
                        KeyCode::Char('q') | KeyCode::Char('Q') | KeyCode::Esc => return Ok(()),
                        KeyCode::Char('c') if modifiers.contains(KeyModifiers::CONTROL) => return Ok(()),
                        KeyCode::Char('p') | KeyCode::Char('P') => pause = true,
                        KeyCode::Char('r') | KeyCode::Char('R') if state.status.is_terminal() => {
                            state = restart(&state, &mut rng);
                            key_frame.clear();
                        }
                        KeyCode::Char(c) if c.is_ascii_digit() || c == '-' => typed.push(c),
                        _ => {}
                    }
                }
                KeyEventKind::Repeat => {
                    key_frame.insert(code.clone(), frame);
                }
                KeyEventKind::Release => {
                    key_frame.remove(&code);
                }
            }
        }

        let input = InputState {
            left: is_held(&key_frame, &[KeyCode::Left, KeyCode::Char('a'), KeyCode::Char('A')], frame),
            right: is_held(&key_frame, &[KeyCode::Right, KeyCode::Char('d'), KeyCode::Char('D')], frame),
            up: is_held(&key_frame, &[KeyCode::Up, KeyCode::Char('w'), KeyCode::Char('W')], frame),
            down: is_held(&key_frame, &[KeyCode::Down, KeyCode::Char('s'), KeyCode::Char('S')], frame),
            fire: is_held(&key_frame, &[KeyCode::Char(' '), KeyCode::Char('z'), KeyCode::Char('Z')], frame),
            pause,
            typed,
        };

        let now = Instant::now();
        let dt_ms = now.duration_since(last).as_secs_f32() * 1000.0;
        last = now;

        state = tick(&state, &input, dt_ms, &mut rng);
        dispatch_sounds(&state.events, audio);

        display::render(out, &state)?;

        let elapsed = frame_start.elapsed();
        if elapsed < FRAME {
            thread::sleep(FRAME - elapsed);
        }
    }
}

// ── Entry point ───────────────────────────────────────────────────────────────

fn main() -> std::io::Result<()> {
    init_logging();
    let options = parse_args();
    let tuning = Tuning::load_or_default(&options.tuning);

    let raw_out = stdout();
    let mut out = BufWriter::new(raw_out);

    terminal::enable_raw_mode()?;
    out.execute(terminal::EnterAlternateScreen)?;
    out.execute(cursor::Hide)?;

    // Request key-release (and key-repeat) events from the terminal.
    let keyboard_enhanced = out
        .execute(PushKeyboardEnhancementFlags(KeyboardEnhancementFlags::REPORT_EVENT_TYPES))
        .is_ok();

    // Blocking event reads live on their own thread so the loop never stalls.
    let (tx, rx) = mpsc::channel::<Event>();
    thread::spawn(move || loop {
        match event::read() {
            Ok(ev) => {
                if tx.send(ev).is_err() {
                    break;
                }
            }
            Err(_) => break,
        }
    });

    let mut audio: Box<dyn AudioSink> = if options.mute { Box::new(SilentAudio) } else { Box::new(BellAudio::default()) };
    let result = game_loop(&mut out, tuning, audio.as_mut(), &rx);

    // Always restore the terminal
    if keyboard_enhanced {
        let _ = out.execute(PopKeyboardEnhancementFlags);
    }
    let _ = out.execute(cursor::Show);
    let _ = out.execute(terminal::LeaveAlternateScreen);
    let _ = terminal::disable_raw_mode();

    if let Err(e) = &result {
        log::error!("Terminal error: {e}");
    }
    result
}
