//! Blocking playback of a rendered waveform on the default output device.
//!
//! Samples travel to the audio callback through a lock-free ring buffer.
//! The callback never blocks: when the ring runs dry it writes silence.

use std::thread;
use std::time::{Duration, Instant};

use armonia::synth::Waveform;
use color_eyre::eyre::{eyre, Result as EyreResult, WrapErr};
use cpal::traits::{DeviceTrait, HostTrait, StreamTrait};
use log::{debug, warn};
use rtrb::RingBuffer;

/// Ring capacity in seconds of audio
const RING_SECS: f64 = 0.25;
const POLL: Duration = Duration::from_millis(5);
/// Extra time allowed past the waveform's own length before giving up
const STALL_SLACK: Duration = Duration::from_secs(2);

pub struct Player {
    device: cpal::Device,
    config: cpal::StreamConfig,
}

impl Player {
    pub fn open() -> EyreResult<Self> {
        let host = cpal::default_host();
        let device = host
            .default_output_device()
            .ok_or_else(|| eyre!("no default output device available"))?;
        let config = device
            .default_output_config()
            .wrap_err("failed to fetch default output config")?;

        Ok(Self {
            device,
            config: config.into(),
        })
    }

    pub fn sample_rate(&self) -> u32 {
        self.config.sample_rate.0
    }

    /// Play to completion, then return.
    pub fn play(&self, waveform: &Waveform) -> EyreResult<()> {
        if waveform.sample_rate() != self.sample_rate() {
            return Err(eyre!(
                "waveform is {} Hz but the device runs at {} Hz",
                waveform.sample_rate(),
                self.sample_rate()
            ));
        }
        if waveform.is_empty() {
            return Ok(());
        }

        let channels = self.config.channels as usize;
        let capacity = ((self.sample_rate() as f64 * RING_SECS) as usize).max(1);
        let (mut producer, mut consumer) = RingBuffer::<f32>::new(capacity);

        let stream = self
            .device
            .build_output_stream(
                &self.config,
                move |data: &mut [f32], _| {
                    // mono to every channel
                    for frame in data.chunks_mut(channels) {
                        let sample = consumer.pop().unwrap_or(0.0);
                        frame.fill(sample);
                    }
                },
                |err| warn!("audio stream error: {}", err),
                None,
            )
            .wrap_err("failed to build output stream")?;
        stream.play().wrap_err("failed to start output stream")?;

        debug!(
            "playing {} samples ({:.2}s) on {} channel(s)",
            waveform.len(),
            waveform.duration_secs(),
            channels
        );

        let deadline = Instant::now() + playback_budget(waveform.duration_secs());
        let stalled = || {
            eyre!(
                "output stream stopped pulling samples before {:.2}s of audio finished",
                waveform.duration_secs()
            )
        };

        let mut pending = waveform.samples();
        while !pending.is_empty() {
            let room = producer.slots().min(pending.len());
            if room == 0 {
                if Instant::now() > deadline {
                    return Err(stalled());
                }
                thread::sleep(POLL);
                continue;
            }
            for &sample in &pending[..room] {
                // slots() guaranteed the space
                let _ = producer.push(sample);
            }
            pending = &pending[room..];
        }

        while producer.slots() < capacity {
            if Instant::now() > deadline {
                return Err(stalled());
            }
            thread::sleep(POLL);
        }
        // let the device flush its own buffer
        thread::sleep(Duration::from_millis(50));
        Ok(())
    }
}

/// Longest `play` may block for a waveform of this length.
fn playback_budget(duration_secs: f64) -> Duration {
    let secs = if duration_secs.is_finite() {
        duration_secs.max(0.0)
    } else {
        0.0
    };
    Duration::from_secs_f64(secs + RING_SECS) + STALL_SLACK
}
