//! Fixed-cadence driver for a [`FireEffect`]
//!
//! The loop runs on its own thread and never ends by itself. Each iteration
//! ticks the effect, hands a snapshot to the consumer callback and then waits
//! on the stop channel for one interval, so a stop request cuts the wait short
//! and the owner can join right away.

use super::effect::{FireEffect, FireFrame};
use super::engine::DecaySource;
use crate::error::{FireError, Result};
use std::sync::mpsc::{self, RecvTimeoutError, Sender};
use std::thread::{self, JoinHandle};
use std::time::Duration;
use tracing::{debug, info};

pub struct AnimationLoop;

impl AnimationLoop {
    /// Start animating `effect`, publishing every frame to `on_tick`
    pub fn spawn<D, F>(effect: FireEffect<D>, interval: Duration, mut on_tick: F) -> Result<AnimationHandle<D>>
    where
        D: DecaySource + Send + 'static,
        F: FnMut(FireFrame) + Send + 'static,
    {
        let (stop_tx, stop_rx) = mpsc::channel::<()>();
        let mut effect = effect;

        info!(wind = %effect.wind(), interval_ms = interval.as_millis() as u64, "starting fire animation");
        let thread = thread::Builder::new()
            .name("doomfire-animation".into())
            .spawn(move || {
                loop {
                    let frame = effect.step();
                    on_tick(frame);

                    match stop_rx.recv_timeout(interval) {
                        Err(RecvTimeoutError::Timeout) => continue,
                        Ok(()) | Err(RecvTimeoutError::Disconnected) => break,
                    }
                }
                debug!(ticks = effect.ticks(), "fire animation loop exited");
                effect
            })?;

        Ok(AnimationHandle {
            stop_tx: Some(stop_tx),
            thread: Some(thread),
        })
    }
}

/// Owner side of a running animation. Dropping it stops the loop.
pub struct AnimationHandle<D> {
    stop_tx: Option<Sender<()>>,
    thread: Option<JoinHandle<FireEffect<D>>>,
}

impl<D> AnimationHandle<D> {
    /// False once the loop thread has exited
    pub fn is_running(&self) -> bool {
        self.thread.as_ref().is_some_and(|t| !t.is_finished())
    }

    /// Stop the loop, wait for it, and take the effect back
    pub fn stop(mut self) -> Result<FireEffect<D>> {
        self.signal_stop();
        let thread = self.thread.take().ok_or(FireError::LoopPanicked)?;
        let effect = thread.join().map_err(|_| FireError::LoopPanicked)?;
        info!(ticks = effect.ticks(), "stopped fire animation");
        Ok(effect)
    }

    fn signal_stop(&mut self) {
        if let Some(tx) = self.stop_tx.take() {
            // The loop may already be gone; dropping tx also wakes it
            let _ = tx.send(());
        }
    }
}

impl<D> Drop for AnimationHandle<D> {
    fn drop(&mut self) {
        self.signal_stop();
        if let Some(thread) = self.thread.take() {
            let _ = thread.join();
        }
    }
}
