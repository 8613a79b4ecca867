use crate::config::ExtractionConfig;
use crate::extraction::lines::TextLine;
use crate::extraction::locations::partition_windows;
use crate::model::{
    CampaignAggregate, CampaignRecord, CampaignSummary, LocationCampaignSummary,
};
use crate::parsing::{tokenize, Token};
use rust_decimal::Decimal;
use std::collections::BTreeMap;

/// Extract campaign completion records from the campaign section lines and
/// aggregate them per location and per campaign.
///
/// An empty or missing section yields an empty aggregate; campaign data is
/// supplementary to the location metrics and never fails an extraction.
pub fn extract_campaigns(lines: &[TextLine], config: &ExtractionConfig) -> CampaignAggregate {
    let windows = partition_windows(lines, &config.locations);

    let mut location_summaries: Vec<LocationCampaignSummary> = Vec::new();
    // code -> (first seen name, close rates across locations)
    let mut by_campaign: BTreeMap<String, (String, Vec<Decimal>)> = BTreeMap::new();

    // Canonical config order for output, regardless of document order.
    for location in &config.locations {
        let Some(window) = windows.iter().find(|w| w.location.id == location.id) else {
            continue;
        };

        let tokens: Vec<Token> = lines[window.start..window.end]
            .iter()
            .flat_map(|line| tokenize(&line.text()))
            .collect();
        let records = match_campaign_records(&tokens);
        if records.is_empty() {
            continue;
        }

        let rates: Vec<Decimal> = records
            .iter()
            .filter_map(CampaignRecord::close_rate_value)
            .collect();
        let average_close_rate = mean(&rates);

        for record in &records {
            let entry = by_campaign
                .entry(record.code.clone())
                .or_insert_with(|| (record.name.clone(), Vec::new()));
            if let Some(rate) = record.close_rate_value() {
                entry.1.push(rate);
            }
        }

        location_summaries.push(LocationCampaignSummary {
            location_id: location.id.clone(),
            location_name: location.name.clone(),
            campaigns: records,
            average_close_rate,
        });
    }

    let campaign_summaries: Vec<CampaignSummary> = by_campaign
        .into_iter()
        .filter_map(|(code, (name, rates))| {
            mean(&rates).map(|average_close_rate| CampaignSummary {
                code,
                name,
                locations: rates.len(),
                average_close_rate,
            })
        })
        .collect();

    let at_goal = campaign_summaries
        .iter()
        .filter(|c| c.average_close_rate >= Decimal::ONE_HUNDRED)
        .count();

    // Overall rate is the mean of per-location averages, so locations with
    // more campaigns do not outweigh the rest.
    let location_averages: Vec<Decimal> = location_summaries
        .iter()
        .filter_map(|l| l.average_close_rate)
        .collect();
    let overall_close_rate = mean(&location_averages);

    let top_location = extreme_location(&location_summaries, |a, b| a > b);
    let bottom_location = extreme_location(&location_summaries, |a, b| a < b);

    CampaignAggregate {
        total_campaigns: campaign_summaries.len(),
        total_locations: location_summaries.len(),
        locations: location_summaries,
        campaigns: campaign_summaries,
        overall_close_rate,
        top_location,
        bottom_location,
        at_goal,
    }
}

/// Scan a token stream for repeating campaign records.
///
/// A record is: a campaign code, one or more name words (free text up to the
/// next numeric token), then exactly three percentages in sequence: close
/// rate, national rate, goal. Anything that does not complete the pattern is
/// stepped over and scanning continues.
pub fn match_campaign_records(tokens: &[Token]) -> Vec<CampaignRecord> {
    let mut records = Vec::new();
    let mut i = 0;

    while i < tokens.len() {
        let Token::Word(code) = &tokens[i] else {
            i += 1;
            continue;
        };
        if !is_campaign_code(code) {
            i += 1;
            continue;
        }

        // Name: words until the first numeric token.
        let mut j = i + 1;
        let mut name_words: Vec<&str> = Vec::new();
        while j < tokens.len() {
            match &tokens[j] {
                Token::Word(w) => name_words.push(w),
                Token::NotAvailable => name_words.push("N/A"),
                _ => break,
            }
            j += 1;
        }

        let percents: Vec<&Token> = tokens[j..]
            .iter()
            .take(3)
            .take_while(|t| matches!(t, Token::Percent { .. }))
            .collect();

        if name_words.is_empty() || percents.len() < 3 {
            i += 1;
            continue;
        }

        records.push(CampaignRecord {
            code: code.clone(),
            name: name_words.join(" "),
            close_rate: percents[0].raw().to_string(),
            national_rate: percents[1].raw().to_string(),
            goal: percents[2].raw().to_string(),
        });
        i = j + 3;
    }

    records
}

/// Campaign codes look like "24KWL" or "E311": short, uppercase
/// alphanumeric, mixing at least one digit with at least one letter.
fn is_campaign_code(word: &str) -> bool {
    let len_ok = (3..=10).contains(&word.len());
    len_ok
        && word
            .chars()
            .all(|c| c.is_ascii_digit() || c.is_ascii_uppercase())
        && word.chars().any(|c| c.is_ascii_digit())
        && word.chars().any(|c| c.is_ascii_uppercase())
}

fn mean(values: &[Decimal]) -> Option<Decimal> {
    if values.is_empty() {
        return None;
    }
    let sum: Decimal = values.iter().copied().sum();
    Some(sum / Decimal::from(values.len()))
}

fn extreme_location(
    summaries: &[LocationCampaignSummary],
    better: impl Fn(Decimal, Decimal) -> bool,
) -> Option<String> {
    let mut best: Option<(&str, Decimal)> = None;
    for summary in summaries {
        let Some(avg) = summary.average_close_rate else {
            continue;
        };
        match best {
            // Strict comparison: ties keep the earlier (canonical) location.
            Some((_, current)) if !better(avg, current) => {}
            _ => best = Some((&summary.location_name, avg)),
        }
    }
    best.map(|(name, _)| name.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::builtin::load_preset;
    use crate::config::{ExtractionConfig, LocationDef};
    use crate::extraction::PositionedFragment;
    use rust_decimal_macros::dec;

    fn make_lines(texts: &[&str]) -> Vec<TextLine> {
        texts
            .iter()
            .enumerate()
            .map(|(i, t)| TextLine {
                y: 1000.0 - i as f32 * 10.0,
                fragments: vec![PositionedFragment::new(*t, 0.0, 1000.0 - i as f32 * 10.0)],
            })
            .collect()
    }

    fn two_location_config() -> ExtractionConfig {
        ExtractionConfig {
            name: "Test".into(),
            description: None,
            version: "1.0".into(),
            locations: vec![
                LocationDef {
                    id: "alpha".into(),
                    name: "Alpha Kenworth".into(),
                },
                LocationDef {
                    id: "bravo".into(),
                    name: "Bravo Kenworth".into(),
                },
            ],
            metrics_anchor: "Dealer Metrics".into(),
            metrics_terminators: vec![],
            campaign_anchor: "Campaign Completion".into(),
            campaign_terminators: vec![],
            lower_is_better: vec![],
        }
    }

    #[test]
    fn test_is_campaign_code() {
        assert!(is_campaign_code("24KWL"));
        assert!(is_campaign_code("E311"));
        assert!(!is_campaign_code("Kenworth")); // lowercase letters
        assert!(!is_campaign_code("ABS")); // no digit
        assert!(!is_campaign_code("123456")); // no letter
        assert!(!is_campaign_code("A1")); // too short
    }

    #[test]
    fn test_full_campaign_row_matched() {
        let tokens = tokenize("24KWL Bendix EC80 ABS ECU Incorrect Signal Processing 59% 56% 100%");
        let records = match_campaign_records(&tokens);
        assert_eq!(records.len(), 1);
        let r = &records[0];
        assert_eq!(r.code, "24KWL");
        assert_eq!(r.name, "Bendix EC80 ABS ECU Incorrect Signal Processing");
        assert_eq!(r.close_rate, "59%");
        assert_eq!(r.national_rate, "56%");
        assert_eq!(r.goal, "100%");
    }

    #[test]
    fn test_multiple_records_in_stream() {
        let tokens = tokenize("24KWL Bendix Recall 59% 56% 100% 25KWB Fuel Line Check 72% 70% 100%");
        let records = match_campaign_records(&tokens);
        assert_eq!(records.len(), 2);
        assert_eq!(records[1].code, "25KWB");
        assert_eq!(records[1].close_rate, "72%");
    }

    #[test]
    fn test_incomplete_pattern_skipped() {
        // Only two percentages -> not a record.
        let tokens = tokenize("24KWL Bendix Recall 59% 56%");
        assert!(match_campaign_records(&tokens).is_empty());
    }

    #[test]
    fn test_code_without_name_skipped() {
        let tokens = tokenize("24KWL 59% 56% 100%");
        assert!(match_campaign_records(&tokens).is_empty());
    }

    #[test]
    fn test_campaigns_attributed_to_their_location() {
        let config = load_preset("wichita").unwrap();
        let lines = make_lines(&[
            "Wichita Kenworth",
            "24KWL Bendix EC80 ABS ECU Incorrect Signal Processing 59% 56% 100%",
            "Dodge City Kenworth",
            "24KWL Bendix EC80 ABS ECU Incorrect Signal Processing 64% 56% 100%",
        ]);
        let agg = extract_campaigns(&lines, &config);
        assert_eq!(agg.total_locations, 2);
        assert_eq!(agg.total_campaigns, 1);
        let wichita = &agg.locations[0];
        assert_eq!(wichita.location_id, "wichita");
        assert_eq!(wichita.campaigns.len(), 1);
        assert_eq!(wichita.campaigns[0].close_rate, "59%");
    }

    #[test]
    fn test_overall_rate_is_mean_of_location_means() {
        // Alpha has one campaign at 100%; Bravo has two at 0%.
        // Overall must be 50%, not the flat mean 33.3%.
        let config = two_location_config();
        let lines = make_lines(&[
            "Alpha Kenworth",
            "24KWL Bendix Recall 100% 56% 100%",
            "Bravo Kenworth",
            "24KWL Bendix Recall 0% 56% 100%",
            "25KWB Fuel Line Check 0% 70% 100%",
        ]);
        let agg = extract_campaigns(&lines, &config);
        assert_eq!(agg.overall_close_rate, Some(dec!(50)));
        assert_eq!(agg.top_location.as_deref(), Some("Alpha Kenworth"));
        assert_eq!(agg.bottom_location.as_deref(), Some("Bravo Kenworth"));
    }

    #[test]
    fn test_at_goal_uses_cross_location_campaign_mean() {
        let config = two_location_config();
        let lines = make_lines(&[
            "Alpha Kenworth",
            "24KWL Bendix Recall 100% 56% 100%",
            "25KWB Fuel Line Check 80% 70% 100%",
            "Bravo Kenworth",
            "24KWL Bendix Recall 100% 56% 100%",
        ]);
        let agg = extract_campaigns(&lines, &config);
        // 24KWL mean = 100 -> at goal; 25KWB mean = 80 -> not.
        assert_eq!(agg.at_goal, 1);
        assert_eq!(agg.total_campaigns, 2);
    }

    #[test]
    fn test_empty_section_yields_empty_aggregate() {
        let config = two_location_config();
        let agg = extract_campaigns(&[], &config);
        assert_eq!(agg.total_campaigns, 0);
        assert_eq!(agg.total_locations, 0);
        assert!(agg.overall_close_rate.is_none());
        assert!(agg.top_location.is_none());
    }

    #[test]
    fn test_location_without_records_excluded() {
        let config = two_location_config();
        let lines = make_lines(&[
            "Alpha Kenworth",
            "24KWL Bendix Recall 100% 56% 100%",
            "Bravo Kenworth",
            "no campaigns assigned this period",
        ]);
        let agg = extract_campaigns(&lines, &config);
        assert_eq!(agg.total_locations, 1);
        assert_eq!(agg.overall_close_rate, Some(dec!(100)));
    }
}
