// src/aggregate/mod.rs
use std::{
    cmp::Ordering,
    collections::{HashMap, HashSet},
};
use tracing::debug;

use crate::process::PolicyRecord;

/// How many counties end up in the "most valuable" ranking.
pub const TOP_COUNTIES: usize = 10;

/// Summed year-over-year change for one county.
#[derive(Debug, Clone, PartialEq)]
pub struct CountyIncrease {
    pub county: String,
    pub increase: f64,
}

/// The three figures written out by the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub county_count: usize,
    pub tiv_2012_total: f64,
    pub most_valuable: Vec<CountyIncrease>,
}

pub fn distinct_county_count(records: &[PolicyRecord]) -> usize {
    records
        .iter()
        .map(PolicyRecord::county)
        .collect::<HashSet<_>>()
        .len()
}

/// Plain left-to-right sum of the 2012 insured values.
pub fn total_tiv_2012(records: &[PolicyRecord]) -> f64 {
    records.iter().map(PolicyRecord::tiv_2012).sum()
}

/// Every county with its summed `tiv_2012 - tiv_2011`, largest increase first.
///
/// Within a county the differences are summed in record order. Equal totals
/// are ordered by county name, ascending.
pub fn rank_counties_by_increase(records: &[PolicyRecord]) -> Vec<CountyIncrease> {
    let mut by_county: HashMap<&str, f64> = HashMap::new();
    for rec in records {
        *by_county.entry(rec.county()).or_insert(0.0) += rec.increase();
    }

    let mut ranking: Vec<CountyIncrease> = by_county
        .into_iter()
        .map(|(county, increase)| CountyIncrease {
            county: county.to_string(),
            increase,
        })
        .collect();
    ranking.sort_by(by_increase_desc);
    ranking
}

pub fn top_counties_by_increase(records: &[PolicyRecord], n: usize) -> Vec<CountyIncrease> {
    let mut ranking = rank_counties_by_increase(records);
    ranking.truncate(n);
    ranking
}

fn by_increase_desc(a: &CountyIncrease, b: &CountyIncrease) -> Ordering {
    b.increase
        .total_cmp(&a.increase)
        .then_with(|| a.county.cmp(&b.county))
}

#[tracing::instrument(level = "info", skip(records), fields(records = records.len()))]
pub fn summarize(records: &[PolicyRecord]) -> Summary {
    let summary = Summary {
        county_count: distinct_county_count(records),
        tiv_2012_total: total_tiv_2012(records),
        most_valuable: top_counties_by_increase(records, TOP_COUNTIES),
    };
    debug!(
        county_count = summary.county_count,
        tiv_2012_total = summary.tiv_2012_total,
        ranked = summary.most_valuable.len(),
        "summary computed"
    );
    summary
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Vec<PolicyRecord> {
        vec![
            PolicyRecord::new("A", 100.0, 150.0),
            PolicyRecord::new("A", 100.0, 120.0),
            PolicyRecord::new("B", 200.0, 180.0),
        ]
    }

    #[test]
    fn test_three_record_scenario() {
        let records = sample();
        assert_eq!(distinct_county_count(&records), 2);
        assert_eq!(total_tiv_2012(&records), 450.0);
        assert_eq!(
            top_counties_by_increase(&records, TOP_COUNTIES),
            vec![
                CountyIncrease {
                    county: "A".into(),
                    increase: 70.0
                },
                CountyIncrease {
                    county: "B".into(),
                    increase: -20.0
                },
            ]
        );
    }

    #[test]
    fn test_empty_input() {
        let summary = summarize(&[]);
        assert_eq!(summary.county_count, 0);
        assert_eq!(summary.tiv_2012_total, 0.0);
        assert!(summary.most_valuable.is_empty());
    }

    #[test]
    fn test_county_names_are_case_sensitive() {
        let records = vec![
            PolicyRecord::new("Dade", 0.0, 1.0),
            PolicyRecord::new("DADE", 0.0, 1.0),
            PolicyRecord::new("Dade", 0.0, 1.0),
        ];
        assert_eq!(distinct_county_count(&records), 2);
    }

    #[test]
    fn test_top_is_prefix_of_full_ranking() {
        let records: Vec<PolicyRecord> = (0..25)
            .map(|i| PolicyRecord::new(format!("C{:02}", i % 13), 10.0, 10.0 + (i * 7 % 11) as f64))
            .collect();

        let full = rank_counties_by_increase(&records);
        let top = top_counties_by_increase(&records, TOP_COUNTIES);

        assert_eq!(full.len(), 13);
        assert_eq!(top.len(), TOP_COUNTIES);
        assert_eq!(top[..], full[..TOP_COUNTIES]);
        for pair in full.windows(2) {
            assert_ne!(by_increase_desc(&pair[0], &pair[1]), Ordering::Greater);
        }
    }

    #[test]
    fn test_ties_break_on_county_name() {
        let records = vec![
            PolicyRecord::new("ORANGE", 0.0, 5.0),
            PolicyRecord::new("BAY", 0.0, 5.0),
            PolicyRecord::new("LEE", 0.0, 9.0),
            PolicyRecord::new("ALACHUA", 0.0, 5.0),
        ];
        let names: Vec<String> = rank_counties_by_increase(&records)
            .into_iter()
            .map(|c| c.county)
            .collect();
        assert_eq!(names, vec!["LEE", "ALACHUA", "BAY", "ORANGE"]);
    }

    #[test]
    fn test_ranking_independent_of_record_order() {
        let mut records = sample();
        records.push(PolicyRecord::new("C", 1.0, 71.0));
        let forward = rank_counties_by_increase(&records);
        records.reverse();
        let backward = rank_counties_by_increase(&records);
        assert_eq!(forward, backward);
        assert_eq!(forward[0].county, "A");
        assert_eq!(forward[1].county, "C");
    }

    #[test]
    fn test_total_tolerates_reordering() {
        let mut records: Vec<PolicyRecord> = (1..200)
            .map(|i| PolicyRecord::new("X", 0.0, i as f64 * 0.1))
            .collect();
        let forward = total_tiv_2012(&records);
        records.reverse();
        let backward = total_tiv_2012(&records);
        assert!((forward - backward).abs() < 1e-9);
        assert!((forward - 1990.0).abs() < 1e-6);
    }

    #[test]
    fn test_fewer_counties_than_limit() {
        let top = top_counties_by_increase(&sample(), 1);
        assert_eq!(top.len(), 1);
        assert_eq!(top[0].county, "A");
        assert!(top_counties_by_increase(&sample(), 0).is_empty());
    }
}
