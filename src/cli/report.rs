//! Plain-text rendering of routes and networks

use riskroute::{RoutePlanner, RouteReport};

/// Human-readable summary of a planned route
pub fn render_route(report: &RouteReport) -> String {
    let mut lines = vec![
        format!("Recommended route: {}", report.path.join(" -> ")),
        format!("  Distance:            {:.2} km", report.total_distance_km),
        format!("  Total risk:          {:.2}", report.total_risk),
        format!("  Estimated fuel cost: {:.2}", report.fuel_cost),
    ];

    if !report.legs.is_empty() {
        lines.push(String::new());
        lines.push("Legs:".to_string());
        lines.extend(report.legs.iter().map(|leg| {
            format!(
                "  {} -> {}: {:.2} km, risk {:.2}",
                leg.from, leg.to, leg.distance_km, leg.total_risk
            )
        }));
    }
    terminate(lines)
}

/// City table with each city's outgoing roads
pub fn render_cities(planner: &RoutePlanner) -> String {
    let mut lines = Vec::new();
    for city in &planner.network().cities {
        lines.push(format!("{} ({:.4}, {:.4})", city.name, city.lat, city.lon));
        let roads = planner.graph().outgoing(&city.name);
        if roads.is_empty() {
            lines.push("  (no outgoing roads)".to_string());
        }
        lines.extend(roads.iter().map(|road| {
            format!(
                "  -> {}: {:.0} km, risk {:.2}, weight {:.2}",
                road.to, road.distance_km, road.total_risk, road.weight
            )
        }));
    }
    terminate(lines)
}

// One line per entry, each newline-terminated
fn terminate(lines: Vec<String>) -> String {
    lines.into_iter().map(|line| line + "\n").collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use riskroute::NetworkConfig;

    fn planner() -> RoutePlanner {
        RoutePlanner::new(NetworkConfig::builtin().unwrap()).unwrap()
    }

    #[test]
    fn test_render_route() {
        let report = planner().plan("São Paulo", "Belo Horizonte").unwrap();
        let text = render_route(&report);

        assert!(text.contains("Recommended route: São Paulo -> Campinas -> Belo Horizonte"));
        assert!(text.contains("590.00 km"));
        assert!(text.contains("Total risk:          0.61"));
        assert!(text.contains("Estimated fuel cost: 442.50"));
        assert!(text.contains("Campinas -> Belo Horizonte: 490.00 km, risk 0.27"));
        assert!(text.contains("Estimated fuel cost: 442.50\n\nLegs:\n"));
        assert!(text.ends_with("risk 0.27\n"));
    }

    #[test]
    fn test_render_cities_lists_roads() {
        let text = render_cities(&planner());
        assert!(text.contains("Sorocaba (-23.5015, -47.4526)"));
        assert!(text.contains("  -> Campinas: 100 km, risk 0.34, weight 134.00"));
        // Belo Horizonte is a sink in the bundled network.
        assert!(text.contains("Belo Horizonte (-19.9167, -43.9345)\n  (no outgoing roads)"));
    }
}
