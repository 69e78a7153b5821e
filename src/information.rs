use crate::output::{Report, Row};
use itertools::Itertools;
use log::{info, warn};

pub fn statistics(report: &Report) {
    let mut analyzed = 0;
    let mut lossy = 0;
    for row in &report.rows {
        if let Row::Analyzed { lossy: l, .. } = row {
            analyzed += 1;
            if *l {
                lossy += 1;
            }
        }
    }
    info!(target: "mattr", "analyzed: {analyzed} documents");
    if lossy > 0 {
        warn!(target: "mattr", "documents with invalid UTF-8: {lossy}");
    }
    if report.failures() > 0 {
        warn!(target: "mattr", "failed: {} documents", report.failures());
    }
    info!(target: "mattr",
        "columns: {}",
        report.categories.iter().map(|c| c.label()).join(", ")
    );
}
