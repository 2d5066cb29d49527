use riskgrid::data::export::{csv_field, write_points_csv, CSV_HEADER};
use riskgrid::{HeatGrid, Observation};

#[test]
fn writes_points_in_input_order() {
    let grid = HeatGrid::build(&[
        Observation::new("SOC 2", "Encryption", 72.0),
        Observation::new("GDPR", "Access, Review", 12.5),
    ])
    .unwrap();
    let mut buf = Vec::new();
    write_points_csv(&mut buf, &grid).unwrap();
    let s = String::from_utf8(buf).unwrap();
    let lines: Vec<&str> = s.trim().split('\n').collect();
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(lines[1], "0,SOC 2,Encryption,0,0,72,low");
    assert_eq!(lines[2], "1,GDPR,\"Access, Review\",1,1,12.5,high");
}

#[test]
fn quotes_are_doubled() {
    assert_eq!(csv_field("plain"), "plain");
    assert_eq!(csv_field("say \"hi\""), "\"say \"\"hi\"\"\"");
}
