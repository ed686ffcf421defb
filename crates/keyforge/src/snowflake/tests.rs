use crate::{
    Config, DEFAULT_EPOCH_MILLIS, Error, RandSource, SequenceCounter, SequenceMethod,
    SnowflakeGenerator, SnowflakeId, SnowflakeParts, TimeSource, compose, decompose,
};
use alloc::{sync::Arc, vec::Vec};
use chrono::{DateTime, Utc};
use core::cell::Cell;
use std::collections::HashSet;
use std::sync::Mutex;
use std::thread::scope;

fn at(millis_since_epoch: i64) -> DateTime<Utc> {
    DateTime::from_timestamp_millis(DEFAULT_EPOCH_MILLIS + millis_since_epoch).unwrap()
}

struct MockTime {
    now: DateTime<Utc>,
}

impl TimeSource for MockTime {
    fn now(&self) -> DateTime<Utc> {
        self.now
    }
}

struct MockStepTime {
    values: Vec<DateTime<Utc>>,
    index: Cell<usize>,
}

impl MockStepTime {
    fn advance(&self) {
        self.index.set(self.index.get() + 1);
    }
}

impl TimeSource for MockStepTime {
    fn now(&self) -> DateTime<Utc> {
        self.values[self.index.get()]
    }
}

struct FixedRand(u64);

impl RandSource for FixedRand {
    fn random_below(&self, bound: u64) -> u64 {
        self.0 % bound
    }
}

fn generator_at<T: TimeSource>(time: T) -> SnowflakeGenerator<T, FixedRand> {
    SnowflakeGenerator::with_sources(
        Arc::new(Config::default()),
        Arc::new(SequenceCounter::new()),
        time,
        FixedRand(0),
    )
}

#[test]
fn compose_places_fields_at_their_shifts() {
    assert_eq!(compose(0, 0, 0), 0);
    assert_eq!(compose(1, 0, 0), 4_194_304);
    assert_eq!(compose(0, 1, 0), 4096);
    assert_eq!(compose(0, 0, 1), 1);
    assert_eq!(
        compose(SnowflakeId::TIMESTAMP_MASK, 1023, 4095),
        u64::MAX >> 1
    );
}

#[test]
fn decompose_inverts_compose() {
    let triples = [
        (0, 0, 0),
        (SnowflakeId::TIMESTAMP_MASK, 1023, 4095),
        (1, 0, 0),
        (1 << 40, 0, 0),
        (0, 1, 0),
        (0, 1 << 9, 0),
        (0, 0, 1),
        (0, 0, 1 << 11),
        (1_234_567, 89, 1011),
        (SnowflakeId::TIMESTAMP_MASK, 0, 4095),
        (0, 1023, 0),
        (0x155_5555_5555, 0x2AA, 0xAAA),
    ];

    for (timestamp_ms, worker_id, sequence) in triples {
        let raw = compose(timestamp_ms, worker_id, sequence);
        let parts = decompose(raw);
        assert_eq!(
            parts,
            SnowflakeParts {
                timestamp_ms,
                worker_id: worker_id as u16,
                sequence: sequence as u16,
            },
            "({timestamp_ms}, {worker_id}, {sequence})"
        );
        assert_eq!(SnowflakeId::from(parts).to_raw(), raw);
    }
}

#[test]
fn compose_masks_out_of_range_fields() {
    // Overflowing fields never bleed into their neighbours.
    assert_eq!(compose(0, 1024, 0), 0);
    assert_eq!(compose(0, 0, 4096), 0);
    assert_eq!(compose(1 << 41, 0, 0), 0);
    assert_eq!(compose(0, 1025, 4097), compose(0, 1, 1));
}

#[test]
fn try_from_components_rejects_overflowing_fields() {
    assert!(SnowflakeId::try_from_components(SnowflakeId::TIMESTAMP_MASK, 1023, 4095).is_ok());
    assert_eq!(
        SnowflakeId::try_from_components(0, 1024, 0),
        Err(Error::ComponentOverflow {
            field: "worker_id",
            value: 1024,
            max: 1023,
        })
    );
    assert!(matches!(
        SnowflakeId::try_from_components(0, 0, 4096),
        Err(Error::ComponentOverflow {
            field: "sequence",
            ..
        })
    ));
    assert!(matches!(
        SnowflakeId::try_from_components(1 << 41, 0, 0),
        Err(Error::ComponentOverflow {
            field: "timestamp",
            ..
        })
    ));
}

#[test]
fn ids_are_valid_only_with_reserved_bit_clear() {
    assert!(SnowflakeId::from_components(u64::MAX, u64::MAX, u64::MAX).is_valid());
    assert!(!SnowflakeId::from_raw(1 << 63).is_valid());
}

#[test]
fn encode_and_decode_across_radixes() {
    let id = SnowflakeId::from_raw(4_194_304);
    assert_eq!(id.encode(10).unwrap(), "4194304");
    assert_eq!(id.encode(32).unwrap(), "40000");
    assert_eq!(SnowflakeId::decode("40000", 32).unwrap(), id);

    let id = SnowflakeId::from_components(987_654_321, 512, 77);
    for radix in [2, 16, 36, 62, 64, 94] {
        let text = id.encode(radix).unwrap();
        assert_eq!(SnowflakeId::decode(&text, radix).unwrap(), id, "radix {radix}");
    }

    assert_eq!(id.encode(1), Err(Error::UnsupportedRadix { radix: 1 }));
    assert_eq!(
        SnowflakeId::decode("18446744073709551615", 10),
        Err(Error::DecodeOverflow)
    );
}

#[test]
fn padded_string_sorts_like_the_integer() {
    let small = SnowflakeId::from_raw(42);
    let large = SnowflakeId::from_raw(4_194_304);
    assert_eq!(small.to_padded_string(), "0000000000000000042");
    assert!(small.to_padded_string() < large.to_padded_string());
}

#[test]
fn counter_sequence_increments_within_same_millisecond() {
    let generator = generator_at(MockTime { now: at(42) });

    let id1 = generator.next_id();
    let id2 = generator.next_id();
    let id3 = generator.next_id();

    assert_eq!(id1.timestamp(), 42);
    assert_eq!(id2.timestamp(), 42);
    assert_eq!(id3.timestamp(), 42);
    assert_eq!(id1.sequence(), 0);
    assert_eq!(id2.sequence(), 1);
    assert_eq!(id3.sequence(), 2);
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn counter_sequence_resets_on_next_millisecond() {
    let time = MockStepTime {
        values: vec![at(42), at(42), at(43)],
        index: Cell::new(0),
    };
    let generator = generator_at(&time);

    let id1 = generator.next_id();
    time.advance();
    let id2 = generator.next_id();
    time.advance();
    let id3 = generator.next_id();

    assert_eq!((id1.timestamp(), id1.sequence()), (42, 0));
    assert_eq!((id2.timestamp(), id2.sequence()), (42, 1));
    assert_eq!((id3.timestamp(), id3.sequence()), (43, 0));
    assert!(id1 < id2 && id2 < id3);
}

#[test]
fn worker_id_defaults_to_config_and_can_be_overridden() {
    let config = Arc::new(Config::builder().worker_id(17).build().unwrap());
    let generator = SnowflakeGenerator::with_sources(
        config,
        Arc::new(SequenceCounter::new()),
        MockTime { now: at(1) },
        FixedRand(0),
    );

    assert_eq!(generator.generate(None, SequenceMethod::Counter).worker_id(), 17);
    assert_eq!(
        generator.generate(Some(900), SequenceMethod::Counter).worker_id(),
        900
    );
    assert_eq!(generator.config().worker_id(), 17);
}

#[test]
fn random_method_draws_from_rng_and_leaves_counter_alone() {
    let counter = Arc::new(SequenceCounter::new());
    let generator = SnowflakeGenerator::with_sources(
        Arc::new(Config::default()),
        Arc::clone(&counter),
        MockTime { now: at(5) },
        FixedRand(4095 + 4096 * 3),
    );

    let id = generator.generate(None, SequenceMethod::Random);
    assert_eq!(id.sequence(), 4095);
    assert_eq!(counter.next_sequence(5), 0);
}

#[test]
fn clock_before_epoch_clamps_timestamp_to_zero() {
    let generator = generator_at(MockTime { now: at(-10_000) });
    let id = generator.next_id();
    assert_eq!(id.timestamp(), 0);
    assert_eq!(generator.timestamp_of(id), at(0));
}

#[test]
fn timestamp_of_maps_back_to_wall_clock() {
    let now = at(86_400_000 + 123);
    let generator = generator_at(MockTime { now });
    let id = generator.next_id();
    assert_eq!(id.timestamp(), 86_400_123);
    assert_eq!(generator.timestamp_of(id), now);
}

#[test]
fn generate_encoded_uses_requested_radix() {
    let generator = generator_at(MockTime { now: at(1) });

    let decimal = generator
        .generate_encoded(None, 10, SequenceMethod::Counter)
        .unwrap();
    assert_eq!(decimal, "4194304");

    let crockford = generator
        .generate_encoded(None, 32, SequenceMethod::Counter)
        .unwrap();
    assert_eq!(crockford, "40001");
    let id = SnowflakeId::decode(&crockford, 32).unwrap();
    assert_eq!(id.sequence(), 1);
}

#[test]
fn generate_encoded_rejects_radix_without_consuming_sequence() {
    let generator = generator_at(MockTime { now: at(1) });

    assert_eq!(
        generator.generate_encoded(None, 95, SequenceMethod::Counter),
        Err(Error::UnsupportedRadix { radix: 95 })
    );
    assert_eq!(generator.next_id().sequence(), 0);
}

#[test]
fn generators_sharing_a_counter_never_collide() {
    let counter = Arc::new(SequenceCounter::new());
    let config = Arc::new(Config::default());
    let first = SnowflakeGenerator::with_sources(
        Arc::clone(&config),
        Arc::clone(&counter),
        MockTime { now: at(9) },
        FixedRand(0),
    );
    let second = SnowflakeGenerator::with_sources(
        config,
        counter,
        MockTime { now: at(9) },
        FixedRand(0),
    );

    let ids: HashSet<SnowflakeId> = (0..100)
        .flat_map(|_| [first.next_id(), second.next_id()])
        .collect();
    assert_eq!(ids.len(), 200);
}

#[test]
fn concurrent_generation_yields_unique_ids() {
    const THREADS: usize = 8;
    const IDS_PER_THREAD: usize = 512;

    let generator = generator_at(MockTime { now: at(77) });
    let seen = Mutex::new(HashSet::with_capacity(THREADS * IDS_PER_THREAD));

    scope(|s| {
        for _ in 0..THREADS {
            s.spawn(|| {
                let ids: Vec<SnowflakeId> =
                    (0..IDS_PER_THREAD).map(|_| generator.next_id()).collect();
                // Each thread observes its own ids in increasing order.
                assert!(ids.windows(2).all(|w| w[0] < w[1]));
                let mut seen = seen.lock().unwrap();
                for id in ids {
                    assert!(seen.insert(id), "duplicate ID: {id:?}");
                }
            });
        }
    });

    assert_eq!(seen.into_inner().unwrap().len(), THREADS * IDS_PER_THREAD);
}

#[test]
fn system_clock_ids_increase_monotonically() {
    let generator = SnowflakeGenerator::new(
        Arc::new(Config::default()),
        Arc::new(SequenceCounter::new()),
    );
    let ids: Vec<SnowflakeId> = (0..1000).map(|_| generator.next_id()).collect();
    assert!(ids.windows(2).all(|w| w[0] < w[1]));
}

#[cfg(feature = "serde")]
#[test]
fn serde_uses_the_raw_integer() {
    let id = SnowflakeId::from_components(1, 2, 3);
    let json = serde_json::to_string(&id).unwrap();
    assert_eq!(json, id.to_raw().to_string());
    let back: SnowflakeId = serde_json::from_str(&json).unwrap();
    assert_eq!(back, id);
}
