//! Integration Tests für die Flicker Engine
//!
//! Diese Tests laufen auf dem Host (x86_64) und nutzen MockOutputs

mod common;

use common::MockOutputs;
use menorah_core::{
    ChannelId, DayCounter, FlickerConfig, FlickerEngine, OutputError, SharedDay, apply_frame,
};
use rand::SeedableRng;
use rand::rngs::SmallRng;

fn engine(seed: u64) -> FlickerEngine<SmallRng> {
    FlickerEngine::new(FlickerConfig::default(), SmallRng::seed_from_u64(seed))
}

// ============================================================================
// Tests: Enablement
// ============================================================================

#[test]
fn test_enablement_matches_day() {
    for raw in 1..=8 {
        let day = DayCounter::new(raw).unwrap();
        assert!(ChannelId::MASTER.is_enabled(day));
        for n in 1..=8 {
            let candle = ChannelId::candle(n).unwrap();
            assert_eq!(candle.is_enabled(day), n <= raw, "day {raw}, candle {n}");
        }
    }
}

// ============================================================================
// Tests: Flicker Bounds
// ============================================================================

#[test]
fn test_flicker_bounds_for_every_day() {
    let config = FlickerConfig::default();
    let lit = config.min_level()..=config.max_level();
    assert_eq!(lit, 100..=255);
    let mut engine = engine(0x5eed);
    for raw in 1..=8 {
        let day = DayCounter::new(raw).unwrap();
        for _ in 0..200 {
            let frame = engine.render(day);
            for (channel, level) in frame.iter() {
                if channel.is_enabled(day) {
                    assert!(lit.contains(&level), "{channel:?} = {level}");
                } else {
                    assert_eq!(level, 0, "{channel:?} must be off on day {raw}");
                }
            }
        }
    }
}

#[test]
fn test_flicker_actually_varies() {
    let mut engine = engine(42);
    let first = engine.render(DayCounter::LAST);
    let changed = (0..20).any(|_| engine.render(DayCounter::LAST) != first);
    assert!(changed);
}

#[test]
fn test_cycle_writes_all_channels() {
    let mut engine = engine(1);
    let mut outputs = MockOutputs::new();

    let (delay, applied) = engine.cycle(DayCounter::new(3).unwrap(), &mut outputs);

    let config = FlickerConfig::default();
    assert!(applied.is_ok());
    assert!((config.min_delay_ms()..config.max_delay_ms()).contains(&delay));
    assert_eq!((config.min_delay_ms(), config.max_delay_ms()), (40, 60));
    assert_eq!(outputs.write_count, 9);
    assert_eq!(outputs.level(ChannelId::candle(4).unwrap()), Some(0));
    assert!(outputs.level(ChannelId::candle(3).unwrap()).unwrap() >= 100);
}

// ============================================================================
// Tests: Effect Propagation
// ============================================================================

#[test]
fn test_day_change_visible_in_next_cycle() {
    let mut shared = SharedDay::new(DayCounter::new(2).unwrap());
    let (mut writer, reader) = shared.split();
    let mut engine = engine(9);
    let mut outputs = MockOutputs::new();
    let candle_3 = ChannelId::candle(3).unwrap();
    let candle_2 = ChannelId::candle(2).unwrap();

    engine.cycle(reader.get(), &mut outputs);
    assert_eq!(outputs.level(candle_3), Some(0));

    writer.set(DayCounter::new(3).unwrap());
    engine.cycle(reader.get(), &mut outputs);
    assert!(outputs.level(candle_3).unwrap() >= 100);

    // Wrap auf Tag 1 löscht die Kerzen wieder
    writer.set(DayCounter::FIRST);
    engine.cycle(reader.get(), &mut outputs);
    assert_eq!(outputs.level(candle_2), Some(0));
    assert_eq!(outputs.level(candle_3), Some(0));
}

// ============================================================================
// Tests: Output Failures
// ============================================================================

#[test]
fn test_failing_output_does_not_stop_frame() {
    let mut engine = engine(5);
    let mut outputs = MockOutputs::new();
    let broken = ChannelId::candle(2).unwrap();
    outputs.failing_channel = Some(broken);

    let frame = engine.render(DayCounter::LAST);
    let result = apply_frame(&frame, &mut outputs);

    assert_eq!(result, Err((broken, OutputError::WriteFailed)));
    assert_eq!(outputs.write_count, 8);
    assert_eq!(
        outputs.level(ChannelId::candle(8).unwrap()),
        Some(frame.level(ChannelId::candle(8).unwrap()))
    );
}

#[test]
#[should_panic]
fn test_config_rejects_dark_minimum() {
    let _ = FlickerConfig::new(0, 255, 40, 60);
}
