//! Behaviour shared by the memory, file and remote backends

mod common;

use std::sync::Arc;

use membership_filter::adapters::{remote_key, BIT_UNSET};
use membership_filter::{
    BloomFilter, FilterConfigBuilder, FilterError, InMemoryListStore, ListStore, MembershipFilter,
    StorageError,
};
use rand::distributions::Alphanumeric;
use rand::{Rng, SeedableRng};
use tempfile::tempdir;

use common::{hit_rate, init_tracing};

const CAPACITY: u64 = 64 << 20;
const HASHES: u32 = 5;
const KEYS: usize = 50_000;

#[test]
fn memory_filter_hit_rate() {
    init_tracing();
    let mut filter = BloomFilter::memory(CAPACITY, HASHES).unwrap();

    let rate = hit_rate(&mut filter, KEYS).unwrap();

    assert!(rate > 0.9, "hit rate {} too low", rate);
}

#[test]
fn file_filter_hit_rate() {
    init_tracing();
    let dir = tempdir().unwrap();
    let mut filter = BloomFilter::file(dir.path().join("bloom.tmp"), CAPACITY, HASHES).unwrap();

    let rate = hit_rate(&mut filter, KEYS).unwrap();
    filter.close().unwrap();

    assert!(rate > 0.9, "hit rate {} too low", rate);
}

#[test]
fn remote_filter_hit_rate() {
    init_tracing();
    let store = Arc::new(InMemoryListStore::new());
    let mut filter = BloomFilter::remote(store, 2000, HASHES).unwrap();

    let rate = hit_rate(&mut filter, 50).unwrap();

    assert!(rate > 0.9, "hit rate {} too low", rate);
}

#[test]
fn file_filter_durability_round_trip() {
    init_tracing();
    let dir = tempdir().unwrap();
    let path = dir.path().join("bloom.tmp");
    let keys: Vec<String> = (0..KEYS).map(|i| format!("r{}", i)).collect();

    let mut filter = BloomFilter::file(&path, CAPACITY, HASHES).unwrap();
    for key in &keys {
        filter.put_str(key).unwrap();
    }
    filter.close().unwrap();

    let reopened = BloomFilter::file(&path, CAPACITY, HASHES).unwrap();
    for key in &keys {
        assert!(reopened.has_str(key).unwrap(), "{} lost across reopen", key);
    }
    reopened.close().unwrap();
}

#[test]
fn file_filter_reopen_with_other_capacity_fails() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bloom.bin");
    let mut filter = BloomFilter::file(&path, 1 << 16, 3).unwrap();
    filter.put_str("x").unwrap();
    filter.close().unwrap();

    let result = BloomFilter::file(&path, 1 << 17, 3);

    assert!(matches!(
        result,
        Err(FilterError::Storage {
            source: StorageError::CapacityMismatch { .. },
            ..
        })
    ));
}

fn random_keys(seed: u64, count: usize) -> Vec<Vec<u8>> {
    let mut rng = rand::rngs::StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let len = rng.gen_range(1..40);
            (&mut rng).sample_iter(&Alphanumeric).take(len).collect()
        })
        .collect()
}

fn answers<F: MembershipFilter>(filter: &F, probes: &[Vec<u8>]) -> Vec<bool> {
    probes.iter().map(|key| filter.has(key).unwrap()).collect()
}

#[test]
fn backends_agree_on_every_answer() {
    init_tracing();
    let capacity = 4096;
    let inserted = random_keys(7, 600);
    let probes: Vec<Vec<u8>> = inserted
        .iter()
        .cloned()
        .chain(random_keys(8, 2000))
        .collect();

    let dir = tempdir().unwrap();
    let path = dir.path().join("bloom.bin");
    let store = Arc::new(InMemoryListStore::new());

    let mut memory = BloomFilter::memory(capacity, HASHES).unwrap();
    let mut file = BloomFilter::file(&path, capacity, HASHES).unwrap();
    let mut remote = BloomFilter::remote(store.clone(), capacity, HASHES).unwrap();

    for key in &inserted {
        memory.put(key).unwrap();
        file.put(key).unwrap();
        remote.put(key).unwrap();
    }

    let expected = answers(&memory, &probes);
    assert_eq!(answers(&file, &probes), expected);
    assert_eq!(answers(&remote, &probes), expected);

    // The load is heavy enough that some probes should be false positives
    assert!(expected.iter().skip(inserted.len()).any(|hit| *hit));

    file.close().unwrap();
    let reopened = BloomFilter::file(&path, capacity, HASHES).unwrap();
    assert_eq!(answers(&reopened, &probes), expected);
}

#[test]
fn memory_bits_match_remote_list() {
    let capacity = 1024;
    let store = Arc::new(InMemoryListStore::new());
    let mut memory = BloomFilter::memory(capacity, 3).unwrap();
    let mut remote = BloomFilter::remote(store.clone(), capacity, 3).unwrap();

    for key in random_keys(11, 50) {
        memory.put(&key).unwrap();
        remote.put(&key).unwrap();
    }

    let key = remote_key(capacity, 3);
    let words = memory.backend().words();
    for index in 0..capacity {
        let in_memory = words[(index / 64) as usize] >> (index % 64) & 1 == 1;
        let element = store.get_at(&key, index).unwrap().unwrap();
        assert_eq!(in_memory, element.as_slice() != BIT_UNSET, "bit {}", index);
    }
}

#[test]
fn remote_reinitialization_clears_stale_state() {
    let store = Arc::new(InMemoryListStore::new());
    let key = remote_key(2000, HASHES);
    store.create(&key, 1999, b"1").unwrap();

    let filter = BloomFilter::remote(store.clone(), 2000, HASHES).unwrap();

    assert_eq!(store.length(&key).unwrap(), 2000);
    assert!(!filter.has_str("anything").unwrap());
}

#[test]
fn sized_config_works_for_every_backend() {
    let config = FilterConfigBuilder::new()
        .for_expected_elements(1000, 0.01)
        .build()
        .unwrap();
    let dir = tempdir().unwrap();
    let store = Arc::new(InMemoryListStore::new());

    let mut memory = BloomFilter::memory_from_config(config).unwrap();
    let mut file = BloomFilter::file_with_config(
        dir.path().join("sized.bin"),
        config,
        Default::default(),
    )
    .unwrap();
    let mut remote = BloomFilter::remote_from_config(store, config).unwrap();

    for i in 0..1000 {
        let key = format!("sized{}", i);
        memory.put_str(&key).unwrap();
        file.put_str(&key).unwrap();
        remote.put_str(&key).unwrap();
    }

    assert!(hit_rate_after_load(&memory) > 0.9);
    assert!(hit_rate_after_load(&file) > 0.9);
    assert!(hit_rate_after_load(&remote) > 0.9);
}

fn hit_rate_after_load<F: MembershipFilter>(filter: &F) -> f64 {
    let probes = 1000;
    let false_positives = (0..probes)
        .filter(|i| filter.has_str(&format!("absent{}", i)).unwrap())
        .count();
    1.0 - false_positives as f64 / probes as f64
}
