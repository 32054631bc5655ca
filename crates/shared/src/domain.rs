use serde::{Deserialize, Serialize};

/// A saved report in the upstream system. Identity is `name`; the report
/// naming convention expects one report per active program, named
/// `"<program name> <year>"`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Report {
    pub name: String,
    pub qid: String,
    pub link: String,
}

/// An active engagement record. `program_key` is the derived
/// `"<program name> <year>"` string used as the join key against
/// [`Report::name`]. `report_link` starts out absent and is attached once
/// during reconciliation; a program whose key matches no report keeps `None`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ActiveProgram {
    pub customer_code: String,
    pub program_key: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_link: Option<String>,
}

/// An account record identified by a unique code.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Customer {
    pub name: String,
    pub code: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProgramEntry {
    pub report_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub report_link: Option<String>,
}

/// Per-customer reconciliation result: every active program for the
/// customer, each carrying the matching report link when one exists.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerSummary {
    pub customer_name: String,
    pub customer_code: String,
    pub programs: Vec<ProgramEntry>,
    pub program_count: usize,
}

impl CustomerSummary {
    pub fn new(customer_name: impl Into<String>, customer_code: impl Into<String>) -> Self {
        Self {
            customer_name: customer_name.into(),
            customer_code: customer_code.into(),
            programs: Vec::new(),
            program_count: 0,
        }
    }

    /// Appends a program entry. `program_count` always equals
    /// `programs.len()`, so the two are updated together.
    pub fn push_program(&mut self, entry: ProgramEntry) {
        self.programs.push(entry);
        self.program_count = self.programs.len();
    }
}

/// An inclusive first-character bucket boundary for the navigation menu,
/// e.g. `A-D`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LetterRange {
    pub low: char,
    pub high: char,
}

impl LetterRange {
    pub fn new(low: char, high: char) -> Self {
        Self { low, high }
    }

    /// Inclusive ordinal comparison, no case folding.
    pub fn contains(&self, c: char) -> bool {
        c >= self.low && c <= self.high
    }

    pub fn label(&self) -> String {
        format!("{}-{}", self.low, self.high)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuGroup {
    pub label: String,
    pub customers: Vec<CustomerSummary>,
}

/// Declarative navigation structure handed to a rendering adapter. The
/// reconciliation side never touches a display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MenuTree {
    pub groups: Vec<MenuGroup>,
}

/// Diagnostic block: one entry per active program whose expected report
/// name does not exist upstream. `count == names.len()`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissingReports {
    pub names: Vec<String>,
    pub count: usize,
}

impl MissingReports {
    pub fn new(names: Vec<String>) -> Self {
        let count = names.len();
        Self { names, count }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_program_keeps_count_in_sync() {
        let mut summary = CustomerSummary::new("Acme Inc", "C1");
        assert_eq!(summary.program_count, 0);
        summary.push_program(ProgramEntry {
            report_name: "Acme 2023".into(),
            report_link: None,
        });
        summary.push_program(ProgramEntry {
            report_name: "Acme 2024".into(),
            report_link: Some("https://example.test/db/t?a=q&qid=10".into()),
        });
        assert_eq!(summary.program_count, summary.programs.len());
        assert_eq!(summary.program_count, 2);
    }

    #[test]
    fn letter_range_is_inclusive_and_ordinal() {
        let range = LetterRange::new('A', 'D');
        assert!(range.contains('A'));
        assert!(range.contains('D'));
        assert!(!range.contains('E'));
        // Lowercase falls outside an uppercase range; no folding happens.
        assert!(!range.contains('a'));
        assert_eq!(range.label(), "A-D");
    }

    #[test]
    fn digit_range_matches_leading_digits() {
        let range = LetterRange::new('0', '9');
        assert!(range.contains('3'));
        assert!(!range.contains('A'));
    }

    #[test]
    fn program_entry_omits_absent_link_when_serialized() {
        let entry = ProgramEntry {
            report_name: "Acme 2023".into(),
            report_link: None,
        };
        let json = serde_json::to_value(&entry).expect("serialize");
        assert!(json.get("report_link").is_none());
    }
}
