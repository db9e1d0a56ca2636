use costlens::query::{FilterSpec, GroupSpec, SortDirection, SortSpec};
use costlens::source::Dataset;
use costlens::{DerivedView, DisplayMode, RecordListProcessor, Value, ViewRequest};

#[test]
fn top_warehouses_by_credits() {
    let records = Dataset::Queries.records();
    let processor = RecordListProcessor::default();
    let request = ViewRequest::new()
        .mode(DisplayMode::Credits)
        .group(GroupSpec::new("warehouse").sum_display())
        .limit(2);

    let view = processor.process(&records, &request).unwrap();
    let groups = view.groups().unwrap();
    assert_eq!(groups.len(), 2);
    assert_eq!(groups[0].key, Value::from("ETL_WH"));
    assert_eq!(groups[0].count, 4);
    assert!(groups[0].sum("credits").is_some());
    assert!(groups[0].sum("cost").is_none());
}

#[test]
fn mode_toggle_changes_nothing_but_the_key() {
    let records = Dataset::Warehouses.records();
    let processor = RecordListProcessor::default();
    let request = ViewRequest::new().sort(SortSpec::by_display(SortDirection::Descending));

    let cost = processor.process(&records, &request).unwrap();
    let credits = processor
        .process(&records, &request.clone().mode(DisplayMode::Cost.toggle()))
        .unwrap();
    // credits are derived from cost, so both orders agree
    assert_eq!(cost, credits);
    assert_eq!(cost.clicked(0, "name"), Some(&Value::from("ETL_WH")));
}

#[test]
fn filter_tables_by_database() {
    let records = Dataset::Tables.records();
    let processor = RecordListProcessor::default();
    let request = ViewRequest::new()
        .filter(FilterSpec::new("database", "events"))
        .sort(SortSpec::descending("size_bytes"));

    let view = processor.process(&records, &request).unwrap();
    let names: Vec<String> = match &view {
        DerivedView::Rows(rows) => rows.iter().map(|r| r.get("name").unwrap().to_string_value()).collect(),
        DerivedView::Groups(_) => panic!("expected rows"),
    };
    assert_eq!(names, vec!["RAW_CLICKS", "SESSIONS"]);
}

#[test]
fn chart_points_carry_click_ids() {
    let records = Dataset::Accounts.records();
    let processor = RecordListProcessor::default();
    let points = processor
        .chart(&records, &ViewRequest::new(), "id", Dataset::Accounts.label_field())
        .unwrap();
    assert_eq!(points.len(), 3);
    assert_eq!(points[0].id, "acc-prod");
    assert_eq!(points[0].label, "Production");
    assert_eq!(points[0].value, 2_210.75);
}

#[test]
fn chart_honours_filter_sort_and_limit() {
    let records = Dataset::Accounts.records();
    let processor = RecordListProcessor::default();
    let request = ViewRequest::new()
        .filter(FilterSpec::new("name", "eu"))
        .sort(SortSpec::by_display(SortDirection::Ascending))
        .limit(1);

    let points = processor
        .chart(&records, &request, "id", Dataset::Accounts.label_field())
        .unwrap();
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].label, "EU Analytics");
    assert_eq!(points[0].id, "acc-eu");
}
