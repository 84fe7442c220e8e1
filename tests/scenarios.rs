use kvstore::Store;

#[test]
fn scenario_1_minimal_round_trip() {
    let mut store = Store::open(None).unwrap();
    store.put(b"name", b"Alice").unwrap();
    store.put(b"age", b"30").unwrap();
    store.put(b"city", b"Tokyo").unwrap();

    assert_eq!(store.get(b"name"), Some(b"Alice".as_slice()));
    assert!(store.exists(b"city"));
    assert!(!store.exists(b"country"));

    store.delete(b"age").unwrap();
    assert_eq!(store.get(b"age"), None);
    assert_eq!(store.stats().count, 2);
}

fn fruit_pairs() -> Vec<(&'static [u8], &'static [u8])> {
    vec![
        (b"apple", b"red"),
        (b"banana", b"yellow"),
        (b"cherry", b"red"),
        (b"date", b"brown"),
        (b"elderberry", b"purple"),
        (b"fig", b"purple"),
        (b"grape", b"purple"),
    ]
}

#[test]
fn scenario_2_ordered_iteration() {
    let mut store = Store::open(None).unwrap();
    for (k, v) in fruit_pairs() {
        store.put(k, v).unwrap();
    }

    let mut cursor = store.cursor();
    let mut forward = Vec::new();
    let mut has_entry = cursor.first();
    for _ in 0..5 {
        assert!(has_entry);
        forward.push(cursor.key().unwrap().to_vec());
        has_entry = cursor.next();
    }
    assert_eq!(
        forward,
        vec![
            b"apple".to_vec(),
            b"banana".to_vec(),
            b"cherry".to_vec(),
            b"date".to_vec(),
            b"elderberry".to_vec(),
        ]
    );

    let mut cursor = store.cursor();
    let mut backward = Vec::new();
    let mut has_entry = cursor.last();
    for _ in 0..3 {
        assert!(has_entry);
        backward.push(cursor.key().unwrap().to_vec());
        has_entry = cursor.prev();
    }
    assert_eq!(
        backward,
        vec![b"grape".to_vec(), b"fig".to_vec(), b"elderberry".to_vec()]
    );
}

#[test]
fn scenario_3_range_inclusive() {
    let mut store = Store::open(None).unwrap();
    for (k, v) in fruit_pairs() {
        store.put(k, v).unwrap();
    }

    let mut seen = Vec::new();
    store.range(b"banana", b"fig", |k, _| seen.push(k.to_vec()));
    assert_eq!(
        seen,
        vec![
            b"banana".to_vec(),
            b"cherry".to_vec(),
            b"date".to_vec(),
            b"elderberry".to_vec(),
            b"fig".to_vec(),
        ]
    );
}

#[test]
fn scenario_4_split_behavior_at_200_keys() {
    let mut store = Store::open(None).unwrap();
    let keys: Vec<String> = (0..200).map(|i| format!("key_{i:08}")).collect();
    for k in &keys {
        store.put(k.as_bytes(), k.as_bytes()).unwrap();
    }

    assert_eq!(store.stats().tree_height, 2);

    let mut sorted = keys.clone();
    sorted.sort();
    let mut visited = Vec::new();
    store.foreach(|k, _| visited.push(String::from_utf8(k.to_vec()).unwrap()));
    assert_eq!(visited, sorted);

    assert_eq!(
        store.get(b"key_00000100"),
        Some(b"key_00000100".as_slice())
    );
}

#[test]
fn scenario_5_bloom_growth_at_scale() {
    let mut store = Store::open(None).unwrap();
    let initial_bits = store.stats().bloom_bits;

    let keys: Vec<Vec<u8>> = (0..200_000u32)
        .map(|i| format!("present-{i}").into_bytes())
        .collect();
    for k in &keys {
        store.put(k, b"v").unwrap();
    }

    assert!(
        store.stats().bloom_bits > initial_bits,
        "bloom must have grown at least once over 200,000 puts"
    );

    for k in &keys {
        assert!(store.get(k).is_some());
    }

    let mut false_positives = 0usize;
    let sample = 10_000usize;
    for i in 0..sample {
        let absent = format!("absent-{i}");
        if store.get(absent.as_bytes()).is_some() {
            false_positives += 1;
        }
    }
    let rate = false_positives as f64 / sample as f64;
    assert!(rate < 0.10, "false-positive rate {rate} too high");
}

#[test]
fn scenario_6_snapshot_round_trip_magic_bytes() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("snap.bin");

    let mut store = Store::open(None).unwrap();
    store.put(b"name", b"Alice").unwrap();
    store.put(b"age", b"30").unwrap();
    store.put(b"city", b"Tokyo").unwrap();
    store.save(&path).unwrap();

    let bytes = std::fs::read(&path).unwrap();
    assert_eq!(&bytes[0..4], &[0x53, 0x42, 0x50, 0x54]);

    let mut reloaded = Store::open(None).unwrap();
    reloaded.load(&path).unwrap();
    assert_eq!(reloaded.stats().count, 3);
    assert_eq!(reloaded.get(b"name"), Some(b"Alice".as_slice()));
    assert_eq!(reloaded.get(b"age"), Some(b"30".as_slice()));
    assert_eq!(reloaded.get(b"city"), Some(b"Tokyo".as_slice()));
}

#[test]
fn boundary_empty_store_reports_unpositioned_and_not_found() {
    let store = Store::open(None).unwrap();
    let mut cursor = store.cursor();
    assert!(!cursor.first());
    assert!(!cursor.last());
    assert!(!cursor.seek(b"anything"));
    assert_eq!(store.get(b"anything"), None);
}

#[test]
fn boundary_order_minus_one_keys_trigger_exactly_one_split() {
    let mut store = Store::open(None).unwrap();
    for i in 0..63u32 {
        let k = format!("k{i:04}");
        store.put(k.as_bytes(), k.as_bytes()).unwrap();
    }
    assert_eq!(store.stats().tree_height, 2);
}

#[test]
fn law_put_delete_put_get_returns_second_value_and_restores_count() {
    let mut store = Store::open(None).unwrap();
    store.put(b"k", b"v1").unwrap();
    let count_after_first = store.stats().count;
    store.delete(b"k").unwrap();
    store.put(b"k", b"v2").unwrap();
    assert_eq!(store.get(b"k"), Some(b"v2".as_slice()));
    assert_eq!(store.stats().count, count_after_first);
}

#[test]
fn law_range_matches_filtered_foreach() {
    let mut store = Store::open(None).unwrap();
    for (k, v) in fruit_pairs() {
        store.put(k, v).unwrap();
    }
    let mut all = Vec::new();
    store.foreach(|k, _| all.push(k.to_vec()));
    let expected: Vec<Vec<u8>> = all
        .into_iter()
        .filter(|k| k.as_slice() >= b"banana".as_slice() && k.as_slice() <= b"fig".as_slice())
        .collect();

    let mut ranged = Vec::new();
    store.range(b"banana", b"fig", |k, _| ranged.push(k.to_vec()));
    assert_eq!(ranged, expected);
}
