// ─────────────────────────────────────────────────────────────────────
// Q-Core Kernel — Acoustic Sources
// ─────────────────────────────────────────────────────────────────────
//! Collaborator seam for acoustic input.
//!
//! The engine consumes one (energy, coherence) pair per tick and does no
//! signal processing. Device acquisition lives outside the crate; what
//! lives here is the trait, a silent source, a closure-backed source for
//! the FFI layer, and a PCM frame analyzer that turns raw 16-bit frames
//! into samples.

use std::collections::VecDeque;
use std::sync::Arc;

use parking_lot::Mutex;

use qcore_physics::AcousticSample;
use qcore_types::{QcoreError, QcoreResult};

/// Trait for acoustic sources.
///
/// `poll_audio` must not block: `None` means "nothing new since the last
/// poll", and the engine holds the previous sample.
pub trait AcousticSource: Send + Sync {
    fn poll_audio(&mut self) -> Option<AcousticSample>;
}

/// Source that never yields. The engine runs with silence held.
pub struct SilentSource;

impl AcousticSource for SilentSource {
    fn poll_audio(&mut self) -> Option<AcousticSample> {
        None
    }
}

/// External source that calls a polling closure.
///
/// Used by the PyO3 layer to pull samples from a Python-side device
/// reader while the tick loop stays in Rust.
type PollFn = Box<dyn FnMut() -> Option<AcousticSample> + Send + Sync>;

pub struct ExternalAcoustic {
    poll_fn: PollFn,
}

impl ExternalAcoustic {
    pub fn new(poll_fn: impl FnMut() -> Option<AcousticSample> + Send + Sync + 'static) -> Self {
        Self {
            poll_fn: Box::new(poll_fn),
        }
    }
}

impl AcousticSource for ExternalAcoustic {
    fn poll_audio(&mut self) -> Option<AcousticSample> {
        (self.poll_fn)()
    }
}

/// Default bound on queued PCM frames.
pub const DEFAULT_FRAME_CAPACITY: usize = 64;

/// Frames above this RMS count as coherent sound.
const COHERENCE_GATE: f32 = 0.05;
const ENERGY_RETENTION: f32 = 0.9;
const COHERENCE_RETENTION: f32 = 0.95;
const COHERENCE_DECAY: f32 = 0.99;

/// Cloneable producer handle for a [`PcmAnalyzer`] queue.
///
/// A capture thread pushes frames here; the tick loop drains them.
#[derive(Clone)]
pub struct PcmFeed {
    frames: Arc<Mutex<VecDeque<Vec<i16>>>>,
    capacity: usize,
}

impl PcmFeed {
    /// Queue one frame of signed 16-bit samples. When the queue is full
    /// the oldest frame is dropped.
    pub fn push_frame(&self, frame: &[i16]) -> QcoreResult<()> {
        if frame.is_empty() {
            return Err(QcoreError::Acoustic("empty PCM frame".to_string()));
        }
        let mut frames = self.frames.lock();
        if frames.len() >= self.capacity {
            frames.pop_front();
            log::debug!("PCM queue full ({}), dropped oldest frame", self.capacity);
        }
        frames.push_back(frame.to_vec());
        Ok(())
    }

    pub fn queued(&self) -> usize {
        self.frames.lock().len()
    }
}

/// Turns raw PCM frames into smoothed (energy, coherence) samples.
///
/// Per frame:
///   rms       = √mean((s/32768)²)
///   energy    ← 0.9·energy + 0.1·rms
///   coherence ← 0.95·coherence + 0.05   if rms > 0.05
///             ← 0.99·coherence          otherwise
pub struct PcmAnalyzer {
    feed: PcmFeed,
    energy: f32,
    coherence: f32,
}

impl PcmAnalyzer {
    pub fn new(capacity: usize) -> Self {
        Self {
            feed: PcmFeed {
                frames: Arc::new(Mutex::new(VecDeque::with_capacity(capacity))),
                capacity: capacity.max(1),
            },
            energy: 0.0,
            coherence: 0.0,
        }
    }

    /// Producer handle sharing this analyzer's queue.
    pub fn feed(&self) -> PcmFeed {
        self.feed.clone()
    }

    pub fn push_frame(&self, frame: &[i16]) -> QcoreResult<()> {
        self.feed.push_frame(frame)
    }

    /// Current smoothed sample, without draining the queue.
    pub fn current(&self) -> AcousticSample {
        AcousticSample::new(self.energy, self.coherence)
    }

    fn analyze(&mut self, frame: &[i16]) {
        let sum_sq: f32 = frame
            .iter()
            .map(|&s| {
                let x = s as f32 / 32768.0;
                x * x
            })
            .sum();
        let rms = (sum_sq / frame.len() as f32).sqrt();

        self.energy = ENERGY_RETENTION * self.energy + (1.0 - ENERGY_RETENTION) * rms;
        self.coherence = if rms > COHERENCE_GATE {
            COHERENCE_RETENTION * self.coherence + (1.0 - COHERENCE_RETENTION)
        } else {
            self.coherence * COHERENCE_DECAY
        };
    }
}

impl Default for PcmAnalyzer {
    fn default() -> Self {
        Self::new(DEFAULT_FRAME_CAPACITY)
    }
}

impl AcousticSource for PcmAnalyzer {
    fn poll_audio(&mut self) -> Option<AcousticSample> {
        let drained: Vec<Vec<i16>> = self.feed.frames.lock().drain(..).collect();
        if drained.is_empty() {
            return None;
        }
        for frame in &drained {
            self.analyze(frame);
        }
        Some(self.current().sanitized())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_silent_source() {
        assert_eq!(SilentSource.poll_audio(), None);
    }

    #[test]
    fn test_external_source() {
        let mut calls = 0;
        let mut src = ExternalAcoustic::new(move || {
            calls += 1;
            (calls == 1).then(|| AcousticSample::new(0.2, 0.4))
        });
        assert_eq!(src.poll_audio(), Some(AcousticSample::new(0.2, 0.4)));
        assert_eq!(src.poll_audio(), None);
    }

    #[test]
    fn test_empty_queue_yields_none() {
        let mut pcm = PcmAnalyzer::default();
        assert_eq!(pcm.poll_audio(), None);
    }

    #[test]
    fn test_empty_frame_rejected() {
        let pcm = PcmAnalyzer::default();
        let err = pcm.push_frame(&[]).unwrap_err();
        assert!(matches!(err, QcoreError::Acoustic(_)), "got {err}");
    }

    #[test]
    fn test_half_scale_frame() {
        // rms = 0.5 → energy = 0.05, coherence = 0.05
        let mut pcm = PcmAnalyzer::default();
        pcm.push_frame(&[16384; 256]).unwrap();
        let s = pcm.poll_audio().unwrap();
        assert!((s.energy - 0.05).abs() < 1e-6, "energy={}", s.energy);
        assert!((s.coherence - 0.05).abs() < 1e-6, "coherence={}", s.coherence);
    }

    #[test]
    fn test_quiet_frames_decay_coherence() {
        let mut pcm = PcmAnalyzer::default();
        pcm.push_frame(&[16384; 64]).unwrap();
        pcm.poll_audio();
        let before = pcm.current().coherence;
        pcm.push_frame(&[10; 64]).unwrap();
        let after = pcm.poll_audio().unwrap().coherence;
        assert!((after - before * 0.99).abs() < 1e-7);
    }

    #[test]
    fn test_poll_drains_all_frames() {
        let mut pcm = PcmAnalyzer::default();
        for _ in 0..5 {
            pcm.push_frame(&[16384; 32]).unwrap();
        }
        let s = pcm.poll_audio().unwrap();
        // 1 - 0.9⁵ = 0.40951 → energy = 0.5·0.40951
        assert!((s.energy - 0.204_755).abs() < 1e-4, "energy={}", s.energy);
        assert_eq!(pcm.feed().queued(), 0);
        assert_eq!(pcm.poll_audio(), None);
    }

    #[test]
    fn test_queue_bounded_drops_oldest() {
        let pcm = PcmAnalyzer::new(3);
        let feed = pcm.feed();
        for k in 1..=5i16 {
            feed.push_frame(&[k]).unwrap();
        }
        assert_eq!(feed.queued(), 3);
        let first = feed.frames.lock().front().cloned();
        assert_eq!(first, Some(vec![3]));
    }

    #[test]
    fn test_coherence_bounded_under_loud_input() {
        let mut pcm = PcmAnalyzer::default();
        for _ in 0..2000 {
            pcm.push_frame(&[i16::MIN; 16]).unwrap();
            let s = pcm.poll_audio().unwrap();
            assert!((0.0..=1.0).contains(&s.coherence));
            assert!(s.energy >= 0.0);
        }
    }
}
