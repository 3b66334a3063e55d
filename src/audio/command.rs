//! Commands sent from the control thread to the mixer via ring buffer.

use std::sync::Arc;

/// Index of an atomic instrument's voice in the mixer.
pub type VoiceId = usize;

/// Commands sent from the control thread to the mixer via ring buffer.
///
/// Frame stamps count output frames since the stream started.
#[derive(Debug, Clone)]
pub enum AudioCommand {
    /// Start `sample` on `voice` at frame `at`, cutting whatever it was playing.
    Trigger {
        voice: VoiceId,
        at: u64,
        sample: Arc<[f32]>,
    },

    /// Fade `voice` out starting at frame `at`.
    Release { voice: VoiceId, at: u64 },

    /// Linear gain of `voice`. Applies immediately.
    SetGain { voice: VoiceId, gain: f32 },

    /// Master volume (0.0 to 1.0).
    SetVolume(f32),

    /// Drop every pending trigger and release stamped after frame `after`.
    Cancel { after: u64 },
}

#[cfg(test)]
mod tests {
    use super::*;
    use ringbuf::{
        traits::{Consumer, Producer, Split},
        HeapRb,
    };

    #[test]
    fn trigger_shares_sample_buffer() {
        let rb = HeapRb::<AudioCommand>::new(4);
        let (mut prod, mut cons) = rb.split();

        let sample: Arc<[f32]> = Arc::from(vec![0.1, 0.2]);
        prod.try_push(AudioCommand::Trigger {
            voice: 3,
            at: 480,
            sample: Arc::clone(&sample),
        })
        .unwrap();

        match cons.try_pop().unwrap() {
            AudioCommand::Trigger { voice, at, sample: s } => {
                assert_eq!(voice, 3);
                assert_eq!(at, 480);
                assert!(Arc::ptr_eq(&s, &sample));
            }
            other => panic!("expected Trigger, got {other:?}"),
        }
    }

    #[test]
    fn queue_preserves_order() {
        let rb = HeapRb::<AudioCommand>::new(8);
        let (mut prod, mut cons) = rb.split();

        prod.try_push(AudioCommand::Cancel { after: 10 }).unwrap();
        prod.try_push(AudioCommand::Release { voice: 0, at: 10 }).unwrap();
        prod.try_push(AudioCommand::SetVolume(0.5)).unwrap();

        assert!(matches!(cons.try_pop(), Some(AudioCommand::Cancel { after: 10 })));
        assert!(matches!(cons.try_pop(), Some(AudioCommand::Release { voice: 0, at: 10 })));
        assert!(matches!(cons.try_pop(), Some(AudioCommand::SetVolume(_))));
        assert!(cons.try_pop().is_none());
    }

    #[test]
    fn full_queue_rejects_push() {
        let rb = HeapRb::<AudioCommand>::new(1);
        let (mut prod, _cons) = rb.split();
        assert!(prod.try_push(AudioCommand::SetVolume(1.0)).is_ok());
        assert!(prod.try_push(AudioCommand::SetVolume(1.0)).is_err());
    }
}
