use riskgrid::data::severity::{classify, SeverityBand};

#[test]
fn classification_boundaries() {
    assert_eq!(classify(33.0), SeverityBand::High);
    assert_eq!(classify(34.0), SeverityBand::Medium);
    assert_eq!(classify(66.0), SeverityBand::Medium);
    assert_eq!(classify(67.0), SeverityBand::Low);
    assert_eq!(classify(0.0), SeverityBand::High);
    assert_eq!(classify(100.0), SeverityBand::Low);
}

#[test]
fn fractional_values_between_thresholds() {
    assert_eq!(classify(33.01), SeverityBand::Medium);
    assert_eq!(classify(66.01), SeverityBand::Low);
}

#[test]
fn low_scores_are_high_risk() {
    assert_eq!(classify(-50.0), SeverityBand::High);
    assert_eq!(classify(1_000.0), SeverityBand::Low);
}

#[test]
fn legend_order_is_most_severe_first() {
    let labels: Vec<&str> = SeverityBand::all().iter().map(|b| b.label()).collect();
    assert_eq!(labels, vec!["High risk", "Medium risk", "Low risk"]);
}
