//! Joins the three fetched record sets: programs to customers by customer
//! code, programs to reports by the `"<program name> <year>"` naming
//! convention. Matching is exact-string, case- and whitespace-sensitive;
//! there is no normalization and no fuzzy fallback.

use std::collections::{HashMap, HashSet};

use shared::domain::{ActiveProgram, Customer, CustomerSummary, MissingReports, ProgramEntry, Report};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Reconciliation {
    pub summaries: Vec<CustomerSummary>,
    pub missing: MissingReports,
}

/// Cross-references reports, active programs and customers.
///
/// Programs whose customer code matches no customer are silently dropped
/// from the summaries but still participate in the missing-report check;
/// the two joins are independent. A program whose key matches no report
/// keeps `report_link = None` and contributes one entry (per occurrence)
/// to the diagnostic. Duplicate records are kept as-is; duplicate report
/// names resolve to whichever report was seen last.
pub fn reconcile(
    reports: &[Report],
    mut programs: Vec<ActiveProgram>,
    customers: &[Customer],
) -> Reconciliation {
    let active_codes: HashSet<&str> = programs
        .iter()
        .map(|program| program.customer_code.as_str())
        .collect();

    let mut summaries: Vec<CustomerSummary> = customers
        .iter()
        .filter(|customer| active_codes.contains(customer.code.as_str()))
        .map(|customer| CustomerSummary::new(&customer.name, &customer.code))
        .collect();

    // Last entry wins on duplicate report names.
    let links: HashMap<&str, &str> = reports
        .iter()
        .map(|report| (report.name.as_str(), report.link.as_str()))
        .collect();

    let missing_names: Vec<String> = programs
        .iter()
        .filter(|program| !links.contains_key(program.program_key.as_str()))
        .map(|program| program.program_key.clone())
        .collect();

    for program in &mut programs {
        program.report_link = links
            .get(program.program_key.as_str())
            .map(|link| (*link).to_string());
    }

    for summary in &mut summaries {
        for program in &programs {
            if program.customer_code == summary.customer_code {
                summary.push_program(ProgramEntry {
                    report_name: program.program_key.clone(),
                    report_link: program.report_link.clone(),
                });
            }
        }
    }

    Reconciliation {
        summaries,
        missing: MissingReports::new(missing_names),
    }
}
