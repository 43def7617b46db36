use methane_map::prelude::*;

const FIXTURE: &str = include_str!("fixtures/methane_permits.csv");

#[test]
fn test_fixture_header_matches_column_order() {
    // Ingestion never reads the header; this keeps the positional mapping
    // honest against the export it was written for.
    let header = FIXTURE.lines().next().unwrap();
    let expected = [
        "X",
        "Y",
        "OBJECTID",
        "Company",
        "Facility",
        "Permit_Type",
        "VOC_Tons_Year",
        "Methane_75_VOC",
        "Latitude",
        "Longitude",
    ];
    assert_eq!(tokenize(header), expected);
    assert_eq!(Column::ALL.len(), expected.len());
}

#[test]
fn test_fixture_ingestion() {
    let report = ingest_with_report(FIXTURE);
    let ids: Vec<i64> = report.records.iter().map(|r| r.object_id).collect();

    // 3 reports zero VOC tons, 5 is short, and 7 has an empty latitude
    // which collapses, leaving the row one column short
    assert_eq!(ids, vec![1, 2, 4, 6, 8]);
    assert_eq!(report.failures.len(), 2);
    assert_eq!(report.failures[0].line, 7);
    assert_eq!(report.failures[1].line, 9);
    assert_eq!(report.incomplete, 1);
    // the empty line and the trailing newline
    assert_eq!(report.blank, 2);
}

#[test]
fn test_quoted_company_keeps_delimiter() {
    let records = ingest(FIXTURE);
    assert_eq!(records[0].company, "Permian Midstream, LLC");
    assert_eq!(records[0].facility, "Jal #3 Gas Plant");
    assert_eq!(records[0].permit_type, "Title V");
    assert_eq!(records[0].voc_tons_year, 412.7);
    assert_eq!(records[0].methane_75_voc, 88.2);
    assert_eq!(records[0].latitude, 32.1142);
    assert_eq!(records[0].longitude, -103.1951);
}

#[test]
fn test_header_never_in_output() {
    // A header that happens to look like a valid row is still dropped
    let payload = "1,2,99,Acme,Plant,GCP,5,5,34,-104\n1,2,3,Bolt,Plant,GCP,5,5,34,-104";
    let records = ingest(payload);
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].object_id, 3);
}

#[test]
fn test_bad_row_does_not_hide_neighbours() {
    let payload = "h\n\
        1,2,1,A,F,GCP,5,5,34,-104\n\
        garbage\n\
        1,2,2,B,F,GCP,5,5,34,-104";
    let records = ingest(payload);
    assert_eq!(records.iter().map(|r| r.object_id).collect::<Vec<_>>(), vec![1, 2]);
}

#[test]
fn test_each_required_field_is_checked() {
    let rows = [
        "1,2,1,A,F,GCP,0,5,34,-104",
        "1,2,2,A,F,GCP,5,0,34,-104",
        "1,2,3,A,F,GCP,5,5,0,-104",
        "1,2,4,A,F,GCP,5,5,34,0",
        "1,2,5,A,F,GCP,abc,5,34,-104",
    ];
    for row in rows {
        let payload = format!("header\n{}", row);
        assert!(ingest(&payload).is_empty(), "{} was accepted", row);
    }
}

#[test]
fn test_reingestion_is_idempotent() {
    assert_eq!(ingest(FIXTURE), ingest(FIXTURE));
}

#[test]
fn test_crlf_payload() {
    let payload = FIXTURE.replace('\n', "\r\n");
    assert_eq!(ingest(&payload), ingest(FIXTURE));
}
