mod tests {
    use bugjar_composer::waveform::threshold;
    use bugjar_composer::{ChannelState, PWM_RESOLUTION, WAVEFORM_LENGTH, WAVEFORM_VALUES};

    #[test]
    fn test_waveform_shape() {
        assert_eq!(WAVEFORM_VALUES.len(), WAVEFORM_LENGTH);
        assert_eq!(WAVEFORM_VALUES[0], 0);
        assert_eq!(WAVEFORM_VALUES[18], 128);
        assert_eq!(WAVEFORM_VALUES[WAVEFORM_LENGTH - 1], 0);
        assert!(WAVEFORM_VALUES.iter().all(|&v| usize::from(v) <= PWM_RESOLUTION));
        assert_eq!(threshold(5), 22);
        assert_eq!(threshold(64 + 5), 22);
    }

    #[test]
    fn test_idle_channel_is_dark() {
        let mut channel = ChannelState::IDLE;
        assert!(!channel.is_active());
        assert_eq!(channel.threshold(), 0);
        for duty in 0..128 {
            assert!(!channel.is_on(duty));
        }

        // Idle channels do not move
        assert!(!channel.advance());
        assert_eq!(channel.waveform_index(), 0);
    }

    #[test]
    fn test_full_cycle_completion() {
        let mut channel = ChannelState::IDLE;
        channel.activate();

        for step in 1..WAVEFORM_LENGTH {
            assert!(!channel.advance());
            assert_eq!(usize::from(channel.waveform_index()), step);
            assert!(channel.is_active());
        }

        assert!(channel.advance());
        assert_eq!(channel.waveform_index(), 0);
        assert!(!channel.is_active());
        assert_eq!(channel, ChannelState::IDLE);
    }

    #[test]
    fn test_activate_is_idempotent() {
        let mut channel = ChannelState::IDLE;
        channel.activate();
        channel.advance();
        channel.advance();
        channel.activate();
        assert!(channel.is_active());
        assert_eq!(channel.waveform_index(), 2);
    }

    #[test]
    fn test_is_on_boundaries() {
        let mut channel = ChannelState::IDLE;
        channel.activate();
        for _ in 0..5 {
            channel.advance();
        }
        let level = channel.threshold();
        assert_eq!(level, 22);

        assert!(channel.is_on(0));
        assert!(channel.is_on(level - 1));
        assert!(!channel.is_on(level));
        assert!(!channel.is_on(127));
    }

    #[test]
    fn test_peak_is_on_for_whole_period() {
        let mut channel = ChannelState::IDLE;
        channel.activate();
        for _ in 0..18 {
            channel.advance();
        }
        assert_eq!(channel.threshold(), 128);
        assert!((0..128).all(|duty| channel.is_on(duty)));
    }
}
