use gridplace::core::energy::scoring::Scorer;
use gridplace::core::energy::term::EnergyTerm;
use gridplace::core::models::placement::Placement;
use gridplace::core::models::point_set::{Connection, PointId};
use std::fmt::Write;

/// A connection that passes through points other than its endpoints.
#[derive(Debug, Clone, PartialEq)]
pub struct Offender {
    pub connection: Connection,
    pub length: f64,
    pub through: Vec<PointId>,
}

pub fn find_offenders(
    scorer: &Scorer,
    placement: &Placement,
    connections: &[Connection],
) -> Vec<Offender> {
    connections
        .iter()
        .filter_map(|connection| {
            let through = scorer.points_on_connection(placement, connection);
            (!through.is_empty()).then(|| Offender {
                connection: *connection,
                length: scorer.connection_length(placement, connection),
                through,
            })
        })
        .collect()
}

pub fn format_energy(term: &EnergyTerm, total: f64) -> String {
    format!(
        "length {:.4}, collinearity {:.4}, energy {:.4}",
        term.length, term.collinearity, total
    )
}

pub fn format_offenders(offenders: &[Offender]) -> String {
    if offenders.is_empty() {
        return "No connection passes through another point.\n".to_string();
    }

    let mut out = format!(
        "{} connection(s) pass through other points:\n",
        offenders.len()
    );
    for offender in offenders {
        let through: Vec<String> = offender.through.iter().map(|p| p.to_string()).collect();
        let _ = writeln!(
            out,
            "  {} -- {} (length {:.3}) through {}",
            offender.connection.from,
            offender.connection.to,
            offender.length,
            through.join(", ")
        );
    }
    out
}

/// Row-by-row rendering of the grid, `.` marking empty cells.
pub fn render_grid(placement: &Placement) -> String {
    placement.to_cell_map().to_string()
}
