use proptest::prelude::*;

use sortrs::calibrate::DistanceCalibrator;
use sortrs::events::EventTableBuilder;
use sortrs::models::{KeyEvents, MeasurementBlocks, RawEvent};
use sortrs::summary::SummaryAggregator;

fn blocks_with_ratio(fiber_length: f64, ratio: f64) -> MeasurementBlocks {
    MeasurementBlocks {
        key_events: Some(KeyEvents {
            fiber_length: Some(fiber_length),
            events: vec![RawEvent {
                distance_of_travel: Some(fiber_length * ratio),
                ..RawEvent::default()
            }],
            ..KeyEvents::default()
        }),
        data_pts: None,
    }
}

fn blocks_with_events(events: Vec<RawEvent>) -> MeasurementBlocks {
    MeasurementBlocks {
        key_events: Some(KeyEvents {
            events,
            ..KeyEvents::default()
        }),
        data_pts: None,
    }
}

fn arb_event() -> impl Strategy<Value = RawEvent> {
    (
        proptest::option::of(0.0..200_000.0f64),
        proptest::option::of(-1.0..0.0f64),
        proptest::option::of(-0.5..3.0f64),
        proptest::option::of(-60.0..0.0f64),
    )
        .prop_map(|(distance, slope, splice, reflection)| RawEvent {
            event_number: None,
            distance_of_travel: distance,
            slope,
            splice_loss: splice,
            reflection_loss: reflection,
            ..RawEvent::default()
        })
}

proptest! {
    #[test]
    fn calibrator_halves_inside_round_trip_band(
        fiber_length in 1.0..100_000.0f64,
        ratio in 1.71..2.29f64,
    ) {
        let blocks = blocks_with_ratio(fiber_length, ratio);
        prop_assert_eq!(DistanceCalibrator::auto_factor(&blocks), 0.5);
    }

    #[test]
    fn calibrator_keeps_raw_inside_one_way_band(
        fiber_length in 1.0..100_000.0f64,
        ratio in 0.86..1.14f64,
    ) {
        let blocks = blocks_with_ratio(fiber_length, ratio);
        prop_assert_eq!(DistanceCalibrator::auto_factor(&blocks), 1.0);
    }

    #[test]
    fn calibrator_defaults_outside_both_bands(
        fiber_length in 1.0..100_000.0f64,
        ratio in prop_oneof![0.01..0.84f64, 1.16..1.69f64, 2.31..10.0f64],
    ) {
        let blocks = blocks_with_ratio(fiber_length, ratio);
        prop_assert_eq!(DistanceCalibrator::auto_factor(&blocks), 0.5);
    }

    #[test]
    fn rel_distance_is_never_negative(
        events in proptest::collection::vec(arb_event(), 0..40),
        factor in prop_oneof![Just(0.5), Just(1.0)],
    ) {
        let rows = EventTableBuilder::build(&blocks_with_events(events), factor);
        for row in &rows {
            prop_assert!(row.rel_distance_m >= 0.0);
        }
    }

    #[test]
    fn cumulative_loss_follows_the_recurrence(
        events in proptest::collection::vec(arb_event(), 1..40),
        factor in prop_oneof![Just(0.5), Just(1.0)],
    ) {
        let rows = EventTableBuilder::build(&blocks_with_events(events), factor);

        let mut prev = 0.0;
        for row in &rows {
            let expected = prev + row.event_loss_db + row.section_loss_db;
            prop_assert!((row.cumulative_loss_db - expected).abs() < 1e-9);
            prev = row.cumulative_loss_db;
        }
    }

    #[test]
    fn summary_km_and_average_are_consistent(
        events in proptest::collection::vec(arb_event(), 0..40),
        factor in prop_oneof![Just(0.5), Just(1.0)],
    ) {
        let blocks = blocks_with_events(events);
        let rows = EventTableBuilder::build(&blocks, factor);
        let summary = SummaryAggregator::summarize(&blocks, &rows);

        prop_assert_eq!(summary.fiber_length_km, summary.fiber_length_m / 1000.0);

        match summary.avg_att_db_per_km {
            None => prop_assert_eq!(summary.fiber_length_km, 0.0),
            Some(avg) => {
                prop_assert!(summary.fiber_length_km > 0.0);
                prop_assert_eq!(avg, summary.total_loss_db / summary.fiber_length_km);
            }
        }
    }
}
