//! Terminal front end for the fire effect

use crate::colors::{fire_color, fire_rgb, plain_char};
use crate::terminal::Terminal;
use crossterm::event::KeyCode;
use doomfire::{AnimationHandle, AnimationLoop, DefaultDecay, FireConfig, FireEffect, FireFrame, Result, Viewport};
use std::io::{self, Write};
use std::sync::mpsc::{self, Receiver, SyncSender};
use std::time::Duration;
use tracing::info;

/// How long to wait for input between redraw checks
const INPUT_POLL: Duration = Duration::from_millis(10);

/// What a keypress asks the viewer to do
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    Quit,
    TogglePause,
    CycleWind,
    ToggleFuel,
}

pub fn key_action(code: KeyCode) -> Option<Action> {
    match code {
        KeyCode::Char('q') | KeyCode::Esc => Some(Action::Quit),
        KeyCode::Char(' ') => Some(Action::TogglePause),
        KeyCode::Char('w') => Some(Action::CycleWind),
        KeyCode::Char('x') => Some(Action::ToggleFuel),
        _ => None,
    }
}

/// Either animating, or stopped with the effect parked for later
enum Run {
    Active(AnimationHandle<DefaultDecay>),
    Paused(FireEffect),
}

struct Viewer {
    config: FireConfig,
    frames_tx: SyncSender<FireFrame>,
    frames_rx: Receiver<FireFrame>,
    run: Option<Run>,
}

impl Viewer {
    fn new(config: FireConfig) -> Self {
        // One slot: a slow terminal drops frames instead of stalling the loop
        let (frames_tx, frames_rx) = mpsc::sync_channel(1);
        Self {
            config,
            frames_tx,
            frames_rx,
            run: None,
        }
    }

    fn start(&mut self, effect: FireEffect) -> Result<()> {
        let tx = self.frames_tx.clone();
        let handle = AnimationLoop::spawn(effect, self.config.tick_interval(), move |frame| {
            let _ = tx.try_send(frame);
        })?;
        self.run = Some(Run::Active(handle));
        Ok(())
    }

    /// Fresh grid for the current terminal size
    fn restart(&mut self, term: &Terminal) -> Result<()> {
        self.halt()?;
        let (width, height) = term.pixel_size();
        let effect = FireEffect::from_config(&self.config, Viewport::new(width, height))?;
        self.start(effect)
    }

    /// Stop the loop (if any) and return the effect with whether it was running
    fn take_effect(&mut self) -> Result<Option<(FireEffect, bool)>> {
        match self.run.take() {
            Some(Run::Active(handle)) => Ok(Some((handle.stop()?, true))),
            Some(Run::Paused(effect)) => Ok(Some((effect, false))),
            None => Ok(None),
        }
    }

    fn halt(&mut self) -> Result<()> {
        self.take_effect().map(drop)
    }

    /// Stop, change the effect, and resume in the same pause state
    fn modify(&mut self, change: impl FnOnce(FireEffect) -> FireEffect) -> Result<()> {
        if let Some((effect, was_running)) = self.take_effect()? {
            let effect = change(effect);
            if was_running {
                self.start(effect)?;
            } else {
                self.run = Some(Run::Paused(effect));
            }
        }
        Ok(())
    }

    fn handle(&mut self, action: Action) -> Result<bool> {
        match action {
            Action::Quit => return Ok(true),
            Action::TogglePause => match self.take_effect()? {
                Some((effect, true)) => self.run = Some(Run::Paused(effect)),
                Some((effect, false)) => self.start(effect)?,
                None => {}
            },
            Action::CycleWind => {
                self.modify(|effect| {
                    let wind = effect.wind().cycle();
                    info!(%wind, "changing wind");
                    effect.with_wind(wind)
                })?;
                self.config.wind = self.config.wind.cycle();
            }
            Action::ToggleFuel => self.modify(|mut effect| {
                if effect.is_burning() {
                    effect.extinguish();
                } else {
                    effect.reseed();
                }
                effect
            })?,
        }
        Ok(false)
    }

    fn latest_frame(&self) -> Option<FireFrame> {
        self.frames_rx.try_iter().last()
    }
}

/// Paint a frame, one grid cell per `pixel_scale` x `pixel_scale` pixels
fn draw(term: &mut Terminal, frame: &FireFrame, pixel_scale: usize) {
    let (width, height) = term.pixel_size();
    for y in 0..height {
        for x in 0..width {
            let intensity = frame.get(x / pixel_scale, y / pixel_scale).unwrap_or(0);
            term.set_pixel(x, y, fire_color(intensity, frame.max_intensity));
        }
    }
}

/// Animate full-screen until the user quits
pub fn run(config: FireConfig) -> Result<()> {
    let mut term = Terminal::new()?;
    let mut viewer = Viewer::new(config);
    viewer.restart(&term)?;

    loop {
        if term.refresh_size()? {
            info!(size = ?term.size(), "terminal resized, restarting fire");
            viewer.restart(&term)?;
        }

        if let Some((code, _)) = term.poll_key(INPUT_POLL)? {
            if let Some(action) = key_action(code) {
                if viewer.handle(action)? {
                    break;
                }
            }
        }

        if let Some(frame) = viewer.latest_frame() {
            draw(&mut term, &frame, viewer.config.pixel_scale);
            term.present()?;
        }
    }

    viewer.halt()
}

/// Run `ticks` steps without a terminal and print the last frame
pub fn print(config: &FireConfig, width: usize, height: usize, ticks: u32, plain: bool) -> Result<()> {
    let mut effect = FireEffect::from_config(config, Viewport::new(width, height))?;
    let mut frame = effect.snapshot();
    for _ in 0..ticks {
        frame = effect.step();
    }

    let mut out = io::stdout().lock();
    if plain {
        write_plain(&mut out, &frame)?;
    } else {
        write_ansi(&mut out, &frame)?;
    }
    out.flush()?;
    Ok(())
}

fn write_plain(out: &mut impl Write, frame: &FireFrame) -> io::Result<()> {
    for row in 0..frame.height {
        let line: String = frame
            .row(row)
            .unwrap_or_default()
            .iter()
            .map(|&c| plain_char(c, frame.max_intensity))
            .collect();
        writeln!(out, "{line}")?;
    }
    Ok(())
}

/// Two grid rows per text line using half blocks and truecolor escapes
fn write_ansi(out: &mut impl Write, frame: &FireFrame) -> io::Result<()> {
    for top in (0..frame.height).step_by(2) {
        for x in 0..frame.width {
            let (r, g, b) = fire_rgb(frame.get(x, top).unwrap_or(0), frame.max_intensity);
            write!(out, "\x1b[38;2;{r};{g};{b}m")?;
            match frame.get(x, top + 1) {
                Some(lower) => {
                    let (r, g, b) = fire_rgb(lower, frame.max_intensity);
                    write!(out, "\x1b[48;2;{r};{g};{b}m▀")?;
                }
                None => write!(out, "\x1b[49m▀")?,
            }
        }
        writeln!(out, "\x1b[0m")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use doomfire::WindDirection;

    fn frame(config: &FireConfig, width: usize, height: usize, ticks: u32) -> FireFrame {
        let mut effect = FireEffect::from_config(config, Viewport::new(width, height)).unwrap();
        for _ in 0..ticks {
            effect.step();
        }
        effect.snapshot()
    }

    #[test]
    fn test_key_actions() {
        assert_eq!(key_action(KeyCode::Char('q')), Some(Action::Quit));
        assert_eq!(key_action(KeyCode::Esc), Some(Action::Quit));
        assert_eq!(key_action(KeyCode::Char(' ')), Some(Action::TogglePause));
        assert_eq!(key_action(KeyCode::Char('w')), Some(Action::CycleWind));
        assert_eq!(key_action(KeyCode::Char('x')), Some(Action::ToggleFuel));
        assert_eq!(key_action(KeyCode::Char('z')), None);
    }

    #[test]
    fn test_plain_output_shape() {
        let config = FireConfig {
            seed: Some(1),
            wind: WindDirection::None,
            ..FireConfig::default()
        };
        let mut out = Vec::new();
        write_plain(&mut out, &frame(&config, 6, 4, 3)).unwrap();
        let text = String::from_utf8(out).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert!(lines.iter().all(|l| l.chars().count() == 6));
        assert_eq!(lines[3], "%%%%%%");
    }

    #[test]
    fn test_ansi_output_pairs_rows() {
        let config = FireConfig {
            seed: Some(2),
            ..FireConfig::default()
        };
        let mut out = Vec::new();
        write_ansi(&mut out, &frame(&config, 3, 5, 2)).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text.lines().count(), 3);
        assert_eq!(text.matches('▀').count(), 9);
        // odd height: last line has no second row and falls back to default background
        assert!(text.lines().last().unwrap().contains("\x1b[49m"));
    }

    #[test]
    fn test_viewer_pause_and_wind_without_terminal() {
        let config = FireConfig {
            seed: Some(5),
            tick_interval_ms: 1,
            ..FireConfig::default()
        };
        let mut viewer = Viewer::new(config.clone());
        viewer.start(FireEffect::from_config(&config, Viewport::new(8, 8)).unwrap()).unwrap();

        assert!(!viewer.handle(Action::TogglePause).unwrap());
        assert!(matches!(viewer.run, Some(Run::Paused(_))));

        viewer.handle(Action::CycleWind).unwrap();
        match &viewer.run {
            Some(Run::Paused(effect)) => assert_eq!(effect.wind(), WindDirection::None),
            _ => panic!("wind change should keep the viewer paused"),
        }

        viewer.handle(Action::ToggleFuel).unwrap();
        match &viewer.run {
            Some(Run::Paused(effect)) => assert!(!effect.is_burning()),
            _ => panic!("expected paused effect"),
        }

        viewer.handle(Action::TogglePause).unwrap();
        assert!(matches!(viewer.run, Some(Run::Active(_))));
        assert!(viewer.handle(Action::Quit).unwrap());
        viewer.halt().unwrap();
        assert!(viewer.run.is_none());
    }
}
