use anyhow::Result;
use pretty_assertions::assert_eq;
use rlayertable::{
    Feature, FeatureCollection, FeatureCollectionWriter, FeatureGenerator, FeatureKey, FeatureTable,
    ManualHost, Record, RecordProvider, SelectOptions, SortDir, TableEvent, TableOptions, VectorSource,
    read_feature_collection, into_records, ROW_HEIGHT,
};
use serde_json::json;
use std::env;
use std::fs;
use std::rc::Rc;

const VIEWPORT: f32 = 600.0;

fn host() -> Rc<ManualHost> {
    Rc::new(ManualHost::new(VIEWPORT))
}

fn named(names: &[&str]) -> Vec<Record> {
    names.iter().map(|n| Feature::from_json(json!({ "name": n }))).collect()
}

fn numbered(n: usize) -> Vec<Record> {
    (0..n)
        .map(|i| Feature::from_json(json!({ "id": i, "name": format!("place-{:03}", (i * 37) % n) })))
        .collect()
}

fn names(records: &[Record]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.get("name").and_then(|v| v.as_str().map(str::to_owned)).unwrap_or_default())
        .collect()
}

fn row_keys(table: &FeatureTable) -> Vec<FeatureKey> {
    table.rows().iter().map(|row| row.key()).collect()
}

#[test]
fn test_sorted_first_record_and_window_at_offset() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let records = numbered(250);
    let smallest = names(&records).into_iter().min();
    table.set_records(records);

    table.sort_by("name", Some(SortDir::Asc))?;
    assert_eq!(names(&table.ordered_index()[..1]).first().cloned(), smallest);

    table.set_scroll_offset(125.0 * ROW_HEIGHT);
    assert!(table.rows().iter().any(|row| row.index == 125));
    assert!(table.window().contains(125));
    Ok(())
}

#[test]
fn test_fixed_column_missing_everywhere_renders_placeholder() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let records: Vec<Record> = (0..20).map(|i| Feature::from_json(json!({ "a": i }))).collect();
    table.set_records(records);
    table.set_columns(vec!["a".into(), "b".into()]);

    assert_eq!(table.columns().len(), 2);
    assert!(!table.rows().is_empty());
    for row in table.rows() {
        assert_eq!(row.cells[1], "-");
        assert_ne!(row.cells[0], "-");
    }
}

#[test]
fn test_removing_selected_record_clears_selection() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let collection = FeatureCollection::with_features(named(&["a", "b", "c"]));
    table.set_records(Rc::clone(&collection));

    let selected = Rc::clone(&table.ordered_index()[1]);
    table.select(Some(Rc::clone(&selected)), SelectOptions::default())?;
    table.drain_events();

    collection.remove(&selected);
    table.refresh(false)?;

    assert!(table.selection().is_none());
    let events = table.drain_events();
    assert!(matches!(events.as_slice(), [TableEvent::Select { record: None, .. }]));
    Ok(())
}

#[test]
fn test_window_covers_viewport_at_every_offset() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    table.set_records(numbered(1000));

    let visible = (table.height() / ROW_HEIGHT).ceil() as usize;
    let max_offset = table.total_height() - table.height();
    let mut offset = 0.0;
    while offset <= max_offset {
        table.set_scroll_offset(offset);
        let window = table.window();
        let first = (offset / ROW_HEIGHT).floor() as usize;
        let last = (first + visible).min(1000);
        assert!(window.start <= first && last <= window.end, "offset {offset}: {window:?}");
        assert_eq!(window.leading_spacer, window.start as f32 * ROW_HEIGHT);
        assert_eq!(window.trailing_spacer, (1000 - window.end) as f32 * ROW_HEIGHT);
        offset += 37.5;
    }
}

#[test]
fn test_equal_records_keep_source_order() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let records: Vec<Record> = (0..40)
        .map(|i| Feature::from_json(json!({ "seq": i, "group": i % 3 })))
        .collect();
    table.set_records(records);

    table.sort_by("group", Some(SortDir::Desc))?;
    let ordered = table.ordered_index();
    for pair in ordered.windows(2) {
        let (ga, gb) = (pair[0].get("group"), pair[1].get("group"));
        if ga == gb {
            let sa = pair[0].get("seq").and_then(|v| v.as_u64());
            let sb = pair[1].get("seq").and_then(|v| v.as_u64());
            assert!(sa < sb, "ties must keep input order");
        }
    }
    Ok(())
}

#[test]
fn test_selection_survives_resort() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let store = VectorSource::shared();
    store.add_features(numbered(300));
    table.set_records(Rc::clone(&store));

    let target = Rc::clone(&table.ordered_index()[10]);
    table.select(Some(Rc::clone(&target)), SelectOptions::default())?;
    table.sort_by("name", Some(SortDir::Desc))?;
    table.refresh(false)?;

    let selection = table.selection().map(|r| r.key());
    assert_eq!(selection, Some(target.key()));
    Ok(())
}

#[test]
fn test_burst_of_notifications_refreshes_once() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let collection = FeatureCollection::with_features(named(&["seed"]));
    table.set_records(Rc::clone(&collection));
    let before = table.stats().refreshes;

    for i in 0..10 {
        collection.push(Feature::from_json(json!({ "name": format!("added-{i}") })));
        host.advance_ms(20);
        assert!(!table.poll(), "refresh must wait for the burst to settle");
    }

    host.advance_ms(100);
    assert!(table.poll());
    assert!(!table.poll());
    assert_eq!(table.stats().refreshes - before, 1);
    assert_eq!(table.ordered_index().len(), 11);
}

#[test]
fn test_repeated_refresh_reuses_rows() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    table.set_records(numbered(500));

    table.refresh(false)?;
    let keys = row_keys(&table);
    let built = table.shells_built();

    table.refresh(false)?;
    assert_eq!(row_keys(&table), keys);
    assert_eq!(table.shells_built(), built);
    Ok(())
}

#[test]
fn test_forced_refresh_recomputes_window() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    table.set_records(numbered(500));

    let recomputes = table.stats().window_recomputes;
    table.refresh(false)?;
    assert_eq!(table.stats().window_recomputes, recomputes);
    table.refresh(true)?;
    assert_eq!(table.stats().window_recomputes, recomputes + 1);
    Ok(())
}

#[test]
fn test_rebinding_unsubscribes_previous_source() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let first = FeatureCollection::with_features(named(&["a"]));
    let second = VectorSource::shared();
    second.add_features(named(&["x", "y"]));

    table.set_records(Rc::clone(&first));
    assert_eq!(first.listener_count(), 1);

    table.set_records(Rc::clone(&second));
    assert_eq!(first.listener_count(), 0);
    assert_eq!(second.listener_count(), 1);

    // Edits to the old source no longer reach the table.
    first.push(Feature::from_json(json!({ "name": "late" })));
    host.advance_ms(500);
    assert!(!table.poll());
    assert_eq!(names(table.ordered_index()), vec!["x", "y"]);

    table.detach();
    assert_eq!(second.listener_count(), 0);
}

#[test]
fn test_removed_record_is_skipped_before_refresh() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let collection = FeatureCollection::with_features(named(&["a", "b", "c", "d"]));
    table.set_records(Rc::clone(&collection));

    let gone = Rc::clone(&table.ordered_index()[2]);
    collection.remove(&gone);

    // Re-render without refreshing: the ordered index is stale, the rows are not.
    table.collapse(true);
    table.collapse(false);
    assert_eq!(table.ordered_index().len(), 4);
    assert!(!row_keys(&table).contains(&gone.key()));
    assert_eq!(table.rows().len(), 3);

    host.advance_ms(100);
    assert!(table.poll());
    assert_eq!(table.ordered_index().len(), 3);
}

#[test]
fn test_store_reload_is_picked_up() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let store = VectorSource::shared();
    table.set_records(Rc::clone(&store));
    assert!(table.ordered_index().is_empty());

    store.add_features(named(&["m", "n"]));
    host.advance_ms(100);
    assert!(table.poll());
    assert_eq!(table.ordered_index().len(), 2);

    store.clear();
    host.advance_ms(100);
    assert!(table.poll());
    assert!(table.ordered_index().is_empty());
    assert!(table.rows().is_empty());
}

struct Opaque;

impl RecordProvider for Opaque {}

#[test]
fn test_unobservable_provider_binds_static() {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    let capabilities = table.set_records(rlayertable::RecordSource::Custom(Rc::new(Opaque)));
    assert!(capabilities.is_static());
    assert!(table.ordered_index().is_empty());
    assert!(table.refresh(false).is_ok());
}

#[test]
fn test_sort_and_resize_events_carry_payload() -> Result<()> {
    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    table.set_records(numbered(100));
    table.drain_events();

    table.sort_by("name", Some(SortDir::Asc))?;
    assert_eq!(table.resize(Some(200.0)), Some(200.0));
    assert_eq!(table.resize(Some(200.0)), None);

    let events = table.drain_events();
    assert_eq!(events.len(), 2);
    assert!(matches!(
        &events[0],
        TableEvent::Sort { column, direction: Some(SortDir::Asc) } if column == "name"
    ));
    assert!(matches!(events[1], TableEvent::Resize { height } if height == 200.0));
    Ok(())
}

#[test]
fn test_generated_layer_round_trips_through_file() -> Result<()> {
    let path = env::temp_dir().join("rlayertable_integration.geojson.br");
    let _ = fs::remove_file(&path);

    let features = FeatureGenerator::with_seed(7).generate(50);
    let mut writer = FeatureCollectionWriter::create(&path)?;
    for feature in &features {
        writer.write_feature(feature)?;
    }
    assert_eq!(writer.finish()?, 50);

    let loaded = read_feature_collection(&path)?;
    assert_eq!(loaded, features);

    let host = host();
    let mut table = FeatureTable::new(host.clone(), TableOptions::default());
    table.set_records(into_records(loaded));
    let columns: Vec<&str> = table.columns().iter().map(|c| c.name.as_str()).collect();
    assert!(columns.contains(&"name"));
    assert!(columns.contains(&"population"));

    fs::remove_file(&path)?;
    Ok(())
}
