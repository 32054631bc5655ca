//! Buckets reconciled customers into first-letter ranges for the
//! navigation menu. Bucketing does not sort; callers sort first.

use shared::domain::{CustomerSummary, LetterRange, MenuGroup, MenuTree};

/// The delimiters the navbar ships with. Callers can supply their own
/// table; ranges outside it simply drop customers from the menu.
pub fn default_ranges() -> Vec<LetterRange> {
    vec![
        LetterRange::new('0', '9'),
        LetterRange::new('A', 'D'),
        LetterRange::new('E', 'H'),
        LetterRange::new('I', 'L'),
        LetterRange::new('M', 'P'),
        LetterRange::new('Q', 'T'),
        LetterRange::new('U', 'Z'),
    ]
}

/// Ascending by customer name, byte-wise.
pub fn sort_summaries(summaries: &mut [CustomerSummary]) {
    summaries.sort_by(|a, b| a.customer_name.cmp(&b.customer_name));
}

/// One group per configured range, in range order, labeled `"<low>-<high>"`.
/// A customer whose first name character falls in no range appears nowhere;
/// a customer with an empty name matches no range. Empty groups are kept so
/// the menu layout stays stable.
pub fn bucket(summaries: &[CustomerSummary], ranges: &[LetterRange]) -> MenuTree {
    let groups = ranges
        .iter()
        .map(|range| MenuGroup {
            label: range.label(),
            customers: summaries
                .iter()
                .filter(|summary| {
                    summary
                        .customer_name
                        .chars()
                        .next()
                        .is_some_and(|first| range.contains(first))
                })
                .cloned()
                .collect(),
        })
        .collect();

    MenuTree { groups }
}
