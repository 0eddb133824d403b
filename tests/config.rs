mod tests {
    use bugjar_composer::{
        ACTIVE_MASK, ConfigError, DEFAULT_SEED, Duration, EngineConfig, PRNG_UPDATE_COUNT,
        Timings, WAVEFORM_UPDATE_COUNT,
    };

    #[test]
    fn test_default_config() {
        let config = EngineConfig::default();
        assert_eq!(config.seed, DEFAULT_SEED);
        assert_eq!(config.waveform_update_count, WAVEFORM_UPDATE_COUNT);
        assert_eq!(config.prng_update_count, PRNG_UPDATE_COUNT);
        assert_eq!(config.activation_mask, ACTIVE_MASK);
        assert_eq!(config.validate(8), Ok(()));
        assert_eq!(config.validate(2), Ok(()));
    }

    #[test]
    fn test_validate_rejects_non_power_of_two() {
        let config = EngineConfig::default().with_waveform_update_count(3);
        assert_eq!(config.validate(8), Err(ConfigError::NotPowerOfTwo(3)));

        let config = EngineConfig::default().with_prng_update_count(0);
        assert_eq!(config.validate(8), Err(ConfigError::NotPowerOfTwo(0)));
    }

    #[test]
    fn test_validate_mask_width() {
        let config = EngineConfig::default().with_activation_mask(0x03);
        assert_eq!(config.validate(4), Ok(()));
        assert_eq!(
            config.validate(8),
            Err(ConfigError::MaskTooNarrow {
                mask: 0x03,
                channels: 8
            })
        );
    }

    #[test]
    fn test_default_timings() {
        let timings = Timings::default();
        assert_eq!(timings.tick, Duration::from_micros(125));
        assert_eq!(timings.pwm_period, Duration::from_millis(16));
        assert_eq!(timings.waveform_step, Duration::from_millis(32));
        assert_eq!(timings.waveform_rollover, Duration::from_millis(2048));
        assert_eq!(timings.activation_interval, Duration::from_millis(1024));
    }

    #[test]
    fn test_timings_follow_config() {
        let config = EngineConfig::default()
            .with_waveform_update_count(4)
            .with_prng_update_count(16);
        let timings = Timings::from_config(Duration::from_micros(100), &config);
        assert_eq!(timings.pwm_period, Duration::from_micros(12_800));
        assert_eq!(timings.waveform_step, Duration::from_micros(51_200));
        assert_eq!(timings.waveform_rollover, Duration::from_micros(3_276_800));
        assert_eq!(timings.activation_interval, Duration::from_micros(204_800));
    }
}
